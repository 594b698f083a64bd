//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use glyph_math::{Interval, Vec3};

/// A sphere primitive.
pub struct Sphere<M: Material> {
    center: Vec3,
    radius: f32,
    material: M,
}

impl<M: Material> Sphere<M> {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32, material: M) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Move the sphere; used by the orbit driver between frames.
    pub fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }
}

impl<M: Material + 'static> Hittable for Sphere<M> {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        // a*t^2 + b*t + c = 0
        let oc = ray.origin() - self.center;
        let a = ray.direction().dot(ray.direction());
        let b = 2.0 * oc.dot(ray.direction());
        let c = oc.dot(oc) - self.radius * self.radius;

        // Tangent rays (discriminant == 0) count as misses
        let discriminant = b * b - 4.0 * a * c;
        if discriminant <= 0.0 || a == 0.0 || self.radius == 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Near root first so the closer intersection wins
        let mut root = (-b - sqrtd) / (2.0 * a);
        if !ray_t.surrounds(root) {
            root = (-b + sqrtd) / (2.0 * a);
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = ray.at(root);
        Some(HitRecord {
            t: root,
            p,
            normal: (p - self.center) / self.radius,
            material: &self.material,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;

    fn sphere(center: Vec3, radius: f32) -> Sphere<Lambertian> {
        Sphere::new(center, radius, Lambertian::new(Vec3::new(0.5, 0.5, 0.5)))
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, Interval::from_min(0.001)).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-5);
        assert!((rec.p - Vec3::new(0.0, 0.0, -0.5)).length() < 1e-5);
        assert!((rec.normal - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
        assert!(rec.front_face(&ray));
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.hit(&ray, Interval::from_min(0.001)).is_none());
    }

    #[test]
    fn test_sphere_tangent_is_miss() {
        // Ray grazes the sphere at exactly one point
        let sphere = sphere(Vec3::new(0.0, 1.0, -5.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.hit(&ray, Interval::from_min(0.001)).is_none());
    }

    #[test]
    fn test_sphere_analytic_roots_along_direction() {
        // Sphere centred on the ray at distance k*|d| must be hit at t = k - r/|d|
        for (direction, k, radius) in [
            (Vec3::new(1.0, 2.0, -2.0), 4.0, 1.5),
            (Vec3::new(0.0, -0.5, 0.0), 10.0, 2.0),
            (Vec3::new(3.0, 0.0, 4.0), 2.0, 0.25),
        ] {
            let origin = Vec3::new(1.0, -1.0, 0.5);
            let ray = Ray::new(origin, direction);
            let sphere = sphere(ray.at(k), radius);

            let rec = sphere.hit(&ray, Interval::from_min(0.001)).unwrap();
            let expected = k - radius / direction.length();
            assert!((rec.t - expected).abs() < 1e-3, "{} vs {}", rec.t, expected);
        }
    }

    #[test]
    fn test_sphere_far_root_from_inside() {
        let sphere = sphere(Vec3::ZERO, 2.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let rec = sphere.hit(&ray, Interval::from_min(0.001)).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-5);
        // Normal still points outward, so the ray leaves through the back face
        assert!(!rec.front_face(&ray));
    }

    #[test]
    fn test_sphere_window_rejects_both_roots() {
        let sphere = sphere(Vec3::new(0.0, 0.0, -10.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(sphere.hit(&ray, Interval::new(0.001, 5.0)).is_none());
    }

    #[test]
    fn test_sphere_normal_is_unit() {
        let sphere = sphere(Vec3::new(2.0, -1.0, -6.0), 3.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.3, -0.1, -1.0));
        let rec = sphere.hit(&ray, Interval::from_min(0.001)).unwrap();
        assert!((rec.normal.length() - 1.0).abs() < 1e-4);
    }
}
