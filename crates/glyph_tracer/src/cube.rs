//! Oriented cube primitive.
//!
//! The cube is axis-aligned in its own object space. Incoming rays are
//! carried into object space, tested against the six bounded face planes,
//! and the winning hit is carried back to world space.

use crate::{
    hittable::{HitRecord, Hittable},
    plane::intersect_plane,
    Material, Ray,
};
use glyph_math::{Interval, Transform, Vec3, Vec3Ext};

/// Outward face normals in object space.
const FACE_NORMALS: [Vec3; 6] = [
    Vec3::Y,
    Vec3::NEG_Y,
    Vec3::Z,
    Vec3::NEG_Z,
    Vec3::NEG_X,
    Vec3::X,
];

/// Axis each face is normal to; that axis is not bounds-checked for the face.
const FACE_AXES: [usize; 6] = [1, 1, 2, 2, 0, 0];

/// A cube of edge length `size` centred at `center`, rotated by `rotation`.
pub struct Cube<M: Material> {
    center: Vec3,
    size: f32,
    half: f32,
    to_world: Transform,
    to_local: Transform,
    material: M,
}

impl<M: Material> Cube<M> {
    /// Create a new cube.
    ///
    /// `rotation` should be a pure rotation; a singular rotation falls back
    /// to the identity orientation.
    pub fn new(center: Vec3, size: f32, rotation: Transform, material: M) -> Self {
        let size = size.max(0.0);
        let placed = Transform::from_translation(center).multiply(&rotation);

        let (to_world, to_local) = match placed.inverse() {
            Some(inverse) => (placed, inverse),
            None => {
                log::warn!("cube at {center:?} has a singular rotation, using identity");
                let placed = Transform::from_translation(center);
                let inverse = Transform::from_translation(-center);
                (placed, inverse)
            }
        };

        Self {
            center,
            size,
            half: size / 2.0,
            to_world,
            to_local,
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Nearest face hit in object space: (t, local point, local normal).
    fn hit_local(&self, ray: &Ray, ray_t: Interval) -> Option<(f32, Vec3, Vec3)> {
        let mut closest = None;
        let mut window = ray_t;

        for (normal, axis) in FACE_NORMALS.iter().zip(FACE_AXES) {
            let Some(t) = intersect_plane(*normal * self.half, *normal, ray, window) else {
                continue;
            };

            let p = ray.at(t);
            let inside = (0..3)
                .filter(|&bound| bound != axis)
                .all(|bound| p[bound] >= -self.half && p[bound] <= self.half);

            if inside {
                window = window.with_max(t);
                closest = Some((t, p, *normal));
            }
        }

        closest
    }
}

impl<M: Material + 'static> Hittable for Cube<M> {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        // The transform is affine, so t is the same in both spaces
        let local_ray = self.to_local.apply_to_ray(ray);
        let (t, p, normal) = self.hit_local(&local_ray, ray_t)?;

        Some(HitRecord {
            t,
            p: self.to_world.apply_to_point(p),
            normal: self.to_world.apply_to_vector(normal).unit_or_zero(),
            material: &self.material,
        })
    }
}
