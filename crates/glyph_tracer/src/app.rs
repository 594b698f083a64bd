//! Application state shared by the display front ends.
//!
//! The host forwards input as [`Command`]s and drives [`App::tick`] on a
//! timer. Both only mark the frame dirty; the host renders once per display
//! refresh through [`App::render_if_needed`], so bursts of input collapse
//! into a single frame.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{
    description::SceneResult, render_frame, Camera, ConfigError, Frame, RenderConfig, Scene,
    SceneDescription,
};

/// Period of the animation clock.
pub const TICK_INTERVAL: Duration = Duration::from_millis(30);

/// A camera manipulation requested by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    MoveForward(f32),
    MoveBackward(f32),
    MoveLeft(f32),
    MoveRight(f32),
    MoveUp(f32),
    MoveDown(f32),
    /// Pitch around the camera's X axis, yaw around world up (radians)
    Rotate { pitch: f32, yaw: f32 },
    /// Add to the focal distance
    Zoom(f32),
}

/// Scene, camera, settings and the dirty flag for one viewer.
pub struct App {
    scene: Scene,
    camera: Camera,
    config: RenderConfig,
    clock: Duration,
    needs_render: bool,
    rng: StdRng,
}

impl App {
    /// Create the app; the first frame is always pending.
    pub fn new(scene: Scene, camera: Camera, config: RenderConfig, seed: u64) -> Self {
        Self {
            scene,
            camera,
            config,
            clock: Duration::ZERO,
            needs_render: true,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Build the scene and camera from a description.
    pub fn from_description(description: &SceneDescription, seed: u64) -> SceneResult<Self> {
        let (scene, camera) = description.build()?;
        Ok(Self::new(scene, camera, description.render.clone(), seed))
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Time accumulated by [`App::tick`].
    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    /// Force a redraw on the next refresh.
    pub fn request_render(&mut self) {
        self.needs_render = true;
    }

    /// Replace the render settings after validating them.
    pub fn set_config(&mut self, config: RenderConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if config != self.config {
            self.config = config;
            self.needs_render = true;
        }
        Ok(())
    }

    /// Apply a camera command and mark the frame dirty.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::MoveForward(step) => self.camera.move_forward(step),
            Command::MoveBackward(step) => self.camera.move_backward(step),
            Command::MoveLeft(step) => self.camera.move_left(step),
            Command::MoveRight(step) => self.camera.move_right(step),
            Command::MoveUp(step) => self.camera.move_up(step),
            Command::MoveDown(step) => self.camera.move_down(step),
            Command::Rotate { pitch, yaw } => self.camera.rotate(pitch, yaw),
            Command::Zoom(delta) => self.camera.change_focus(delta),
        }
        self.needs_render = true;
    }

    /// Advance the animation clock and move orbiting bodies.
    ///
    /// Returns true if anything moved. Static scenes ignore the clock.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.scene.is_animated() {
            return false;
        }

        self.clock += dt;
        let moved = self.scene.advance(self.clock.as_secs_f32());
        if moved {
            self.needs_render = true;
        }
        moved
    }

    /// Render a frame now and clear the dirty flag.
    pub fn render(&mut self) -> Frame {
        self.needs_render = false;
        render_frame(&self.camera, &self.scene, &self.config, &mut self.rng)
    }

    /// Render only if something changed since the last frame.
    pub fn render_if_needed(&mut self) -> Option<Frame> {
        if self.needs_render {
            Some(self.render())
        } else {
            None
        }
    }
}
