//! glyph - interactive ASCII ray tracer for the terminal
//!
//! Controls:
//! - W/S, A/D, E/Q: move forward/back, left/right, up/down
//! - Arrows or left-drag: pitch and yaw
//! - Mouse wheel or +/-: change focal distance
//! - N: toggle normals view, I: invert glyphs, C: colour glyphs
//! - Esc or Ctrl-C: quit
//!
//! Usage:
//!   glyph                              - Random plane field, interactive
//!   glyph --scene scene.json           - Load a JSON scene
//!   glyph --once --width 80 --height 30  - Print one frame and exit
//!   glyph --color                      - Tint glyphs with 24-bit colour
//!   glyph --png frame.png              - Save one RGB frame and exit

mod terminal;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::event::Event;
use glyph_tracer::{
    App, Camera, Frame, RenderConfig, RenderMode, Scene, SceneDescription, TICK_INTERVAL,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::time::Instant;
use terminal::{parse_key_event, Action, MouseTracker, TerminalDisplay};

#[derive(Parser)]
#[command(name = "glyph")]
#[command(version)]
#[command(about = "Interactive ASCII ray tracer for the terminal")]
struct Cli {
    /// JSON scene file; overrides --preset
    #[arg(long, value_name = "FILE")]
    scene: Option<PathBuf>,

    /// Built-in scene to show when no file is given
    #[arg(long, value_enum, default_value_t = Preset::PlaneField)]
    preset: Preset,

    /// Seed for scene generation and sampling
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output width in cells (default: terminal width)
    #[arg(long)]
    width: Option<u32>,

    /// Output height in cells (default: terminal height)
    #[arg(long)]
    height: Option<u32>,

    /// Maximum bounce depth (1 to 100)
    #[arg(long)]
    depth: Option<u32>,

    /// Samples per pixel (1 disables anti-aliasing)
    #[arg(long)]
    samples: Option<u32>,

    /// Show surface normals instead of materials
    #[arg(long)]
    normals: bool,

    /// Invert glyph brightness
    #[arg(long)]
    invert: bool,

    /// Draw each glyph in its cell's colour (needs a 24-bit colour terminal)
    #[arg(long)]
    color: bool,

    /// Print a single frame to stdout and exit
    #[arg(long)]
    once: bool,

    /// Save a single RGB frame as PNG and exit
    #[arg(long, value_name = "FILE")]
    png: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    PlaneField,
    ThreeSpheres,
}

impl Cli {
    /// Apply command line overrides on top of the scene's settings.
    fn render_config(&self, base: &RenderConfig) -> RenderConfig {
        let mut config = base.clone();
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(depth) = self.depth {
            config.max_depth = depth;
        }
        if let Some(samples) = self.samples {
            config.samples_per_pixel = samples;
        }
        if self.normals {
            config.mode = RenderMode::Normals;
        }
        if self.invert {
            config.invert_colors = true;
        }
        config
    }
}

fn build_app(cli: &Cli) -> Result<App> {
    let app = match &cli.scene {
        Some(path) => {
            let description = SceneDescription::load(path)
                .with_context(|| format!("Failed to load scene {}", path.display()))?;
            App::from_description(&description, cli.seed)?
        }
        None => {
            let scene = match cli.preset {
                Preset::PlaneField => {
                    let mut rng = StdRng::seed_from_u64(cli.seed);
                    Scene::plane_field_default(&mut rng)
                }
                Preset::ThreeSpheres => Scene::three_spheres(),
            };
            log::info!("Using preset {:?} ({} objects)", cli.preset, scene.len());
            App::new(scene, Camera::new(), RenderConfig::default(), cli.seed)
        }
    };
    Ok(app)
}

/// Text for one frame, plain or with per-cell colour escapes.
fn frame_text(frame: &Frame, invert: bool, color: bool) -> String {
    if color {
        frame.to_colored_glyphs(invert)
    } else {
        frame.to_glyphs(invert)
    }
}

fn save_png(frame: &Frame, path: &Path) -> Result<()> {
    let image = image::RgbImage::from_raw(frame.width, frame.height, frame.to_rgb8())
        .context("Frame buffer does not match its dimensions")?;
    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Saved {}x{} frame to {}", frame.width, frame.height, path.display());
    Ok(())
}

/// Render one frame, print and/or save it.
fn run_once(cli: &Cli, app: &mut App) -> Result<()> {
    let start = Instant::now();
    let frame = app.render();
    log::info!("Rendered in {:?}", start.elapsed());

    if let Some(path) = &cli.png {
        save_png(&frame, path)?;
    }
    if cli.once {
        print!("{}", frame_text(&frame, app.config().invert_colors, cli.color));
    }
    Ok(())
}

fn run_interactive(cli: &Cli, app: &mut App) -> Result<()> {
    let mut display = TerminalDisplay::new().context("Failed to initialize terminal")?;
    let mut mouse = MouseTracker::new();

    // Fill the terminal unless a size was given explicitly
    let fit_to_terminal = |app: &mut App, (width, height): (u32, u32)| -> Result<()> {
        let mut config = app.config().clone();
        if cli.width.is_none() {
            config.width = width.max(1);
        }
        if cli.height.is_none() {
            config.height = height.max(1);
        }
        app.set_config(config)?;
        Ok(())
    };
    fit_to_terminal(app, display.size())?;

    let mut last_tick = Instant::now();
    let mut last_frame_time = None;
    let mut color = cli.color;

    'main_loop: loop {
        if display.check_resize() {
            fit_to_terminal(app, display.size())?;
        }

        let timeout = TICK_INTERVAL.saturating_sub(last_tick.elapsed());
        let action = match display.poll_event(timeout)? {
            Some(Event::Key(key)) => parse_key_event(key),
            Some(Event::Mouse(event)) => mouse.handle(event),
            Some(Event::Resize(..)) => {
                app.request_render();
                Action::None
            }
            _ => Action::None,
        };

        match action {
            Action::Quit => break 'main_loop,
            Action::Camera(command) => app.apply(command),
            Action::ToggleNormals => {
                let mut config = app.config().clone();
                config.mode = match config.mode {
                    RenderMode::Normals => RenderMode::Materials,
                    RenderMode::Materials => RenderMode::Normals,
                };
                app.set_config(config)?;
            }
            Action::ToggleInvert => {
                let mut config = app.config().clone();
                config.invert_colors = !config.invert_colors;
                app.set_config(config)?;
            }
            Action::ToggleColor => {
                color = !color;
                app.request_render();
            }
            Action::None => {}
        }

        if last_tick.elapsed() >= TICK_INTERVAL {
            app.tick(last_tick.elapsed());
            last_tick = Instant::now();
        }

        let start = Instant::now();
        if let Some(frame) = app.render_if_needed() {
            last_frame_time = Some(start.elapsed());
            let config = app.config();
            let position = app.camera().position();
            let status = format!(
                "{:?} | {}x{} | depth {} | pos ({:.1}, {:.1}, {:.1}) | focus {:.2} | {} | [WASDQE] move [drag/arrows] look [wheel/+-] zoom [N]ormals [I]nvert [C]olor [Esc] quit",
                config.mode,
                config.width,
                config.height,
                config.max_depth,
                position.x,
                position.y,
                position.z,
                app.camera().focus(),
                last_frame_time.map_or_else(String::new, |t| format!("{:.0?}", t)),
            );

            let text = frame_text(&frame, config.invert_colors, color);
            if let Err(e) = display.render(&text, &status) {
                if e.kind() == std::io::ErrorKind::BrokenPipe {
                    break;
                }
                log::error!("Render error: {}", e);
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut app = build_app(&cli)?;

    let config = cli.render_config(app.config());
    app.set_config(config).context("Invalid render settings")?;

    if cli.once || cli.png.is_some() {
        return run_once(&cli, &mut app);
    }

    log::info!("Starting interactive viewer");
    run_interactive(&cli, &mut app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "glyph", "--width", "40", "--depth", "9", "--normals", "--invert",
        ]);
        let config = cli.render_config(&RenderConfig::default());

        assert_eq!(config.width, 40);
        assert_eq!(config.height, 80);
        assert_eq!(config.max_depth, 9);
        assert_eq!(config.mode, RenderMode::Normals);
        assert!(config.invert_colors);
    }

    #[test]
    fn test_cli_color_flag() {
        assert!(!Cli::parse_from(["glyph"]).color);
        let cli = Cli::parse_from(["glyph", "--color", "--once"]);
        assert!(cli.color);

        let mut frame = Frame::new(2, 1);
        frame.set(1, 0, glyph_tracer::Color::ONE);
        assert_eq!(frame_text(&frame, false, false), " W\n");
        assert_eq!(
            frame_text(&frame, false, true),
            "\x1b[38;2;0;0;0m \x1b[38;2;255;255;255mW\x1b[0m\n"
        );
    }

    #[test]
    fn test_cli_rejects_excessive_depth() {
        let cli = Cli::parse_from(["glyph", "--depth", "2000000"]);
        let config = cli.render_config(&RenderConfig::default());
        assert_eq!(
            config.validate(),
            Err(glyph_tracer::ConfigError::DepthTooLarge {
                max: glyph_tracer::MAX_DEPTH
            })
        );
    }

    #[test]
    fn test_cli_preset_names() {
        let cli = Cli::parse_from(["glyph", "--preset", "three-spheres", "--once"]);
        assert!(matches!(cli.preset, Preset::ThreeSpheres));
        assert!(cli.once);

        let app = build_app(&cli).unwrap();
        assert_eq!(app.scene().len(), 3);
    }

    #[test]
    fn test_default_preset_is_seeded() {
        let cli = Cli::parse_from(["glyph", "--seed", "4"]);
        let app = build_app(&cli).unwrap();
        assert_eq!(app.scene().len(), 12);
    }
}
