//! Infinite plane primitive.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use glyph_math::{Interval, Vec3, Vec3Ext};

/// Solve the ray/plane intersection for `t`.
///
/// Parallel rays (including rays lying in the plane) never hit.
#[inline]
pub(crate) fn intersect_plane(point: Vec3, normal: Vec3, ray: &Ray, ray_t: Interval) -> Option<f32> {
    let denom = normal.dot(ray.direction());
    if denom == 0.0 {
        return None;
    }

    let t = normal.dot(point - ray.origin()) / denom;
    ray_t.surrounds(t).then_some(t)
}

/// An infinite plane through `point` facing along `normal`.
pub struct Plane<M: Material> {
    point: Vec3,
    normal: Vec3,
    material: M,
}

impl<M: Material> Plane<M> {
    /// Create a new plane. The normal is normalized; a zero normal gives a
    /// plane that nothing can hit.
    pub fn new(point: Vec3, normal: Vec3, material: M) -> Self {
        Self {
            point,
            normal: normal.unit_or_zero(),
            material,
        }
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl<M: Material + 'static> Hittable for Plane<M> {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let t = intersect_plane(self.point, self.normal, ray, ray_t)?;

        Some(HitRecord {
            t,
            p: ray.at(t),
            normal: self.normal,
            material: &self.material,
        })
    }
}
