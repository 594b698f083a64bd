//! Terminal display and input handling

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use glyph_tracer::Command;
use std::io::{self, stdout, BufWriter, Stdout, Write};
use std::time::{Duration, Instant};

/// Distance moved per key press.
pub const KEYBOARD_STEP: f32 = 0.2;
/// Radians per cell of mouse drag.
pub const MOUSE_SENSITIVITY: f32 = 0.01;
/// Focus change per unit of wheel travel.
pub const WHEEL_SENSITIVITY: f32 = 0.001;
/// Wheel travel reported for one notch.
const WHEEL_NOTCH: f32 = 100.0;
/// Radians per arrow key press.
const ARROW_ROTATE: f32 = 0.05;

/// Rows kept free for the status line.
const STATUS_ROWS: u16 = 2;

/// Full-screen terminal handler with buffered output and mouse capture
pub struct TerminalDisplay {
    width: u16,
    height: u16,
    last_resize_check: Instant,
    buffer: BufWriter<Stdout>,
}

impl TerminalDisplay {
    pub fn new() -> io::Result<Self> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::Clear(terminal::ClearType::All))?;

        let (width, height) = terminal::size()?;

        Ok(Self {
            width,
            height: height.saturating_sub(STATUS_ROWS),
            last_resize_check: Instant::now(),
            buffer: BufWriter::new(stdout),
        })
    }

    /// Drawable area in cells, excluding the status line.
    pub fn size(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }

    /// Check if the terminal has been resized
    pub fn check_resize(&mut self) -> bool {
        if self.last_resize_check.elapsed() < Duration::from_millis(100) {
            return false;
        }
        self.last_resize_check = Instant::now();

        if let Ok((new_width, new_height)) = terminal::size() {
            let new_height = new_height.saturating_sub(STATUS_ROWS);
            if new_width != self.width || new_height != self.height {
                self.width = new_width;
                self.height = new_height;
                return true;
            }
        }
        false
    }

    /// Draw a frame line by line with explicit cursor positioning, then the
    /// status line below it.
    pub fn render(&mut self, content: &str, status: &str) -> io::Result<()> {
        // Hide cursor, disable line wrap
        write!(self.buffer, "\x1b[?25l\x1b[?7l")?;

        let mut rows = 0;
        for (i, line) in content.lines().enumerate() {
            write!(self.buffer, "\x1b[{};1H{}", i + 1, line)?;
            rows = i + 1;
        }

        // Clear leftovers from a larger previous frame
        write!(self.buffer, "\x1b[J")?;
        write!(self.buffer, "\x1b[{};1H\x1b[K{}", rows + 1, status)?;

        // Show cursor, enable line wrap
        write!(self.buffer, "\x1b[?25h\x1b[?7h")?;
        self.buffer.flush()
    }

    /// Wait up to `timeout` for a terminal event
    pub fn poll_event(&self, timeout: Duration) -> io::Result<Option<Event>> {
        if event::poll(timeout)? {
            return Ok(Some(event::read()?));
        }
        Ok(None)
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = self.buffer.flush();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen);
    }
}

/// What the viewer should do in response to an input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    None,
    Quit,
    Camera(Command),
    ToggleNormals,
    ToggleInvert,
    ToggleColor,
}

/// Parse keyboard input into actions
pub fn parse_key_event(event: KeyEvent) -> Action {
    if event.kind == KeyEventKind::Release {
        return Action::None;
    }

    match event.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('w') => Action::Camera(Command::MoveForward(KEYBOARD_STEP)),
        KeyCode::Char('s') => Action::Camera(Command::MoveBackward(KEYBOARD_STEP)),
        KeyCode::Char('a') => Action::Camera(Command::MoveLeft(KEYBOARD_STEP)),
        KeyCode::Char('d') => Action::Camera(Command::MoveRight(KEYBOARD_STEP)),
        KeyCode::Char('q') => Action::Camera(Command::MoveDown(KEYBOARD_STEP)),
        KeyCode::Char('e') => Action::Camera(Command::MoveUp(KEYBOARD_STEP)),
        KeyCode::Up => Action::Camera(Command::Rotate {
            pitch: ARROW_ROTATE,
            yaw: 0.0,
        }),
        KeyCode::Down => Action::Camera(Command::Rotate {
            pitch: -ARROW_ROTATE,
            yaw: 0.0,
        }),
        KeyCode::Left => Action::Camera(Command::Rotate {
            pitch: 0.0,
            yaw: ARROW_ROTATE,
        }),
        KeyCode::Right => Action::Camera(Command::Rotate {
            pitch: 0.0,
            yaw: -ARROW_ROTATE,
        }),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            Action::Camera(Command::Zoom(-WHEEL_NOTCH * WHEEL_SENSITIVITY))
        }
        KeyCode::Char('-') => Action::Camera(Command::Zoom(WHEEL_NOTCH * WHEEL_SENSITIVITY)),
        KeyCode::Char('n') => Action::ToggleNormals,
        KeyCode::Char('i') => Action::ToggleInvert,
        KeyCode::Char('c') => Action::ToggleColor,
        _ => Action::None,
    }
}

/// Turns mouse drags into rotations and wheel notches into zoom.
#[derive(Debug, Default)]
pub struct MouseTracker {
    last: Option<(u16, u16)>,
}

impl MouseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: MouseEvent) -> Action {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.last = Some((event.column, event.row));
                Action::None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.last = None;
                Action::None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let current = (event.column, event.row);
                let Some((x, y)) = self.last.replace(current) else {
                    return Action::None;
                };

                let dx = current.0 as f32 - x as f32;
                let dy = current.1 as f32 - y as f32;
                if dx == 0.0 && dy == 0.0 {
                    return Action::None;
                }

                Action::Camera(Command::Rotate {
                    pitch: -dy * MOUSE_SENSITIVITY,
                    yaw: -dx * MOUSE_SENSITIVITY,
                })
            }
            // Scrolling down widens the view
            MouseEventKind::ScrollDown => {
                Action::Camera(Command::Zoom(WHEEL_NOTCH * WHEEL_SENSITIVITY))
            }
            MouseEventKind::ScrollUp => {
                Action::Camera(Command::Zoom(-WHEEL_NOTCH * WHEEL_SENSITIVITY))
            }
            _ => Action::None,
        }
    }
}
