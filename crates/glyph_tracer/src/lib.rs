//! glyph tracer - CPU ray tracing for character-grid displays
//!
//! A small recursive ray tracer: spheres, planes and rotated cubes with
//! diffuse, metal and glass materials, a movable camera, and a frame driver
//! that produces gamma-corrected colour grids for a terminal or image
//! back end.
//!
//! Rendering is single-threaded and synchronous. The host owns an [`App`],
//! forwards input as [`Command`]s, calls [`App::tick`] for animated scenes,
//! and asks for a frame only when [`App::needs_render`] says so.

mod app;
mod camera;
mod cube;
mod description;
mod hittable;
mod material;
mod orbit;
mod plane;
mod presets;
mod renderer;
mod scene;
mod sphere;

pub use app::{App, Command, TICK_INTERVAL};
pub use camera::Camera;
pub use cube::Cube;
pub use description::{
    CameraDescription, MaterialDescription, ObjectDescription, SceneDescription, SceneError,
    SceneResult, ShapeDescription,
};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Color, Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use orbit::Orbit;
pub use plane::Plane;
pub use renderer::{
    glyph_for_intensity, intensity, linear_to_gamma, ray_color, render_frame, render_pixel,
    sky_gradient, ConfigError, Frame, RenderConfig, RenderMode, GLYPH_RAMP, MAX_DEPTH,
    MAX_DIMENSION,
};
pub use scene::{OrbitingSphere, Scene};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from glyph_math
pub use glyph_math::{Interval, Ray, Transform, Vec3, Vec3Ext};

use rand::{Rng, RngCore};

/// Uniform sample in [0, 1).
#[inline]
pub(crate) fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform sample in [min, max).
#[inline]
pub(crate) fn gen_range_f32(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + gen_f32(rng) * (max - min)
}
