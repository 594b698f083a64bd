//! Math types for the glyph ray tracer.
//!
//! Vector algebra comes from glam (value semantics, no in-place aliasing);
//! this crate adds the ray, the open parametric interval used for
//! intersection windows, and the affine `Transform` used for camera rigs
//! and object placement.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;
mod transform;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use transform::Transform;
pub use vector::Vec3Ext;
