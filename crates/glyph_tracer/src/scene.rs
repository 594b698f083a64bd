//! Scene: static geometry plus animated bodies.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable, HittableList},
    Material, Orbit, Ray, Sphere,
};
use glyph_math::Interval;

/// A sphere whose centre follows an orbit.
pub struct OrbitingSphere {
    pub sphere: Sphere<Arc<dyn Material>>,
    pub orbit: Orbit,
}

impl OrbitingSphere {
    /// Place the sphere at its orbit's starting point.
    pub fn new(radius: f32, material: Arc<dyn Material>, orbit: Orbit) -> Self {
        Self {
            sphere: Sphere::new(orbit.position_at(0.0), radius, material),
            orbit,
        }
    }
}

/// Everything a frame is traced against.
///
/// Both collections are scanned linearly with a shared, shrinking window.
#[derive(Default)]
pub struct Scene {
    pub objects: HittableList,
    pub orbiting: Vec<OrbitingSphere>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a static object.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.add(object);
    }

    /// Add an animated sphere.
    pub fn add_orbiting(&mut self, body: OrbitingSphere) {
        self.orbiting.push(body);
    }

    /// Total number of objects.
    pub fn len(&self) -> usize {
        self.objects.len() + self.orbiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if any body animates.
    pub fn is_animated(&self) -> bool {
        !self.orbiting.is_empty()
    }

    /// Move every orbiting body to its position at `time` seconds.
    ///
    /// Returns true if anything moved.
    pub fn advance(&mut self, time: f32) -> bool {
        let mut moved = false;
        for body in &mut self.orbiting {
            let center = body.orbit.position_at(time);
            if center != body.sphere.center() {
                body.sphere.set_center(center);
                moved = true;
            }
        }
        moved
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest = self.objects.hit(ray, ray_t);
        let mut window = match &closest {
            Some(rec) => ray_t.with_max(rec.t),
            None => ray_t,
        };

        for body in &self.orbiting {
            if let Some(rec) = body.sphere.hit(ray, window) {
                window = window.with_max(rec.t);
                closest = Some(rec);
            }
        }

        closest
    }
}
