//! Built-in demo scenes.

use std::f32::consts::TAU;
use std::ops::Range;
use std::sync::Arc;

use glyph_math::{Transform, Vec3};
use rand::RngCore;

use crate::{
    gen_f32, gen_range_f32, Cube, Dielectric, Lambertian, Material, Metal, Scene, Sphere,
};

impl Scene {
    /// A field of `count` random spheres and cubes centred on the plane
    /// `y = y_level`, scattered over the given X and Z ranges.
    ///
    /// The same seed always produces the same field.
    pub fn plane_field(
        count: usize,
        y_level: f32,
        x_range: Range<f32>,
        z_range: Range<f32>,
        rng: &mut dyn RngCore,
    ) -> Self {
        let mut scene = Scene::new();

        for _ in 0..count {
            let material = random_material(rng);
            let center = Vec3::new(
                gen_range_f32(rng, x_range.start, x_range.end),
                y_level,
                gen_range_f32(rng, z_range.start, z_range.end),
            );

            if gen_f32(rng) < 0.5 {
                let radius = gen_range_f32(rng, 0.1, 4.0);
                scene.add(Box::new(Sphere::new(center, radius, material)));
            } else {
                let size = gen_range_f32(rng, 0.2, 8.0);
                let rotation = Transform::from_euler_xyz(
                    gen_range_f32(rng, 0.0, TAU),
                    gen_range_f32(rng, 0.0, TAU),
                    gen_range_f32(rng, 0.0, TAU),
                );
                scene.add(Box::new(Cube::new(center, size, rotation, material)));
            }
        }

        log::debug!("generated plane field with {count} objects");
        scene
    }

    /// Twelve objects in front of the default camera.
    pub fn plane_field_default(rng: &mut dyn RngCore) -> Self {
        Self::plane_field(12, 0.0, -25.0..25.0, -50.0..-4.0, rng)
    }

    /// A grey diffuse sphere, a pink fuzzy metal sphere and a small silver one.
    pub fn three_spheres() -> Self {
        let mut scene = Scene::new();
        scene.add(Box::new(Sphere::new(
            Vec3::new(-1.0, -0.6, -3.0),
            1.5,
            Lambertian::new(Vec3::splat(0.4)),
        )));
        scene.add(Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, -1.5),
            0.7,
            Metal::new(Vec3::new(1.0, 0.6, 0.6), 0.2),
        )));
        scene.add(Box::new(Sphere::new(
            Vec3::new(0.3, 0.3, -0.7),
            0.18,
            Metal::new(Vec3::splat(0.8), 0.1),
        )));
        scene
    }
}

/// Metal, diffuse or glass with roughly equal odds.
fn random_material(rng: &mut dyn RngCore) -> Arc<dyn Material> {
    let pick = gen_f32(rng);
    if pick < 0.33 {
        let albedo = Vec3::new(gen_f32(rng), gen_f32(rng), gen_f32(rng));
        Arc::new(Metal::new(albedo, gen_f32(rng)))
    } else if pick < 0.66 {
        let albedo = Vec3::new(gen_f32(rng), gen_f32(rng), gen_f32(rng));
        Arc::new(Lambertian::new(albedo))
    } else {
        Arc::new(Dielectric::new(gen_f32(rng) + 1.0))
    }
}
