//! Camera for ray generation.

use crate::Ray;
use glyph_math::{Transform, Vec3};

/// A pinhole camera with a rectangular viewport.
///
/// In camera space the eye sits at the origin and the viewport is centred
/// on the local Z axis at distance `focus` (negative values look down -Z).
/// `transform` places the camera in the world.
#[derive(Debug, Clone)]
pub struct Camera {
    viewport_width: f32,
    viewport_height: f32,
    focus: f32,
    transform: Transform,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            viewport_width: 4.0,
            viewport_height: 2.0,
            focus: -1.0,
            transform: Transform::IDENTITY,
        }
    }

    /// Set viewport size.
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set focal distance.
    pub fn with_focus(mut self, focus: f32) -> Self {
        self.focus = focus;
        self
    }

    /// Set camera pose.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn focus(&self) -> f32 {
        self.focus
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// World-space position of the eye.
    pub fn position(&self) -> Vec3 {
        self.transform.apply_to_point(Vec3::ZERO)
    }

    /// Generate the ray through normalized viewport coordinates `(u, v)`.
    ///
    /// `(0, 0)` is the bottom-left corner of the viewport, `(1, 1)` the
    /// top-right.
    pub fn get_ray(&self, u: f32, v: f32) -> Ray {
        let direction = Vec3::new(
            u * self.viewport_width - self.viewport_width / 2.0,
            v * self.viewport_height - self.viewport_height / 2.0,
            self.focus,
        );

        Ray::new(self.position(), self.transform.apply_to_vector(direction))
    }

    pub fn move_forward(&mut self, step: f32) {
        self.transform = self.transform.move_forward(step);
    }

    pub fn move_backward(&mut self, step: f32) {
        self.transform = self.transform.move_backward(step);
    }

    pub fn move_left(&mut self, step: f32) {
        self.transform = self.transform.move_left(step);
    }

    pub fn move_right(&mut self, step: f32) {
        self.transform = self.transform.move_right(step);
    }

    pub fn move_up(&mut self, step: f32) {
        self.transform = self.transform.move_up(step);
    }

    pub fn move_down(&mut self, step: f32) {
        self.transform = self.transform.move_down(step);
    }

    /// Tilt around the camera's own X axis.
    pub fn rotate_pitch(&mut self, angle: f32) {
        self.transform = self.transform.rotate_around_local_axis(Vec3::X, angle);
    }

    /// Turn around the world up axis, pivoting on the eye.
    pub fn rotate_yaw(&mut self, angle: f32) {
        self.transform = self.transform.rotate_around_world_axis(Vec3::Y, angle);
    }

    /// Pitch, then yaw.
    pub fn rotate(&mut self, pitch: f32, yaw: f32) {
        self.rotate_pitch(pitch);
        self.rotate_yaw(yaw);
    }

    /// Shift the focal distance; a focus near zero degenerates the view.
    pub fn change_focus(&mut self, delta: f32) {
        self.focus += delta;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
