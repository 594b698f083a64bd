//! ASCII render example.
//!
//! Renders a small scene to the terminal as glyphs and saves the same frame
//! in PPM format.

use glyph_tracer::{
    render_frame, Camera, Color, Cube, Dielectric, Lambertian, Metal, Plane, RenderConfig,
    Scene, Sphere, Transform, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() {
    println!("glyph tracer - ASCII example");
    println!("============================");

    let start = std::time::Instant::now();
    let scene = build_scene();
    println!("Scene with {} objects built in {:?}", scene.len(), start.elapsed());

    // Step back and up a little, then look slightly down
    let camera = Camera::new().with_transform(
        Transform::from_translation(Vec3::new(0.0, 0.5, 1.0)).rotate_x(-0.15),
    );

    let config = RenderConfig {
        width: 120,
        height: 48,
        samples_per_pixel: 4,
        max_depth: 8,
        ..Default::default()
    };

    let start = std::time::Instant::now();
    let mut rng = StdRng::seed_from_u64(7);
    let frame = render_frame(&camera, &scene, &config, &mut rng);
    let render_time = start.elapsed();

    print!("{}", frame.to_glyphs(config.invert_colors));
    println!("Rendered {}x{} in {:?}", frame.width, frame.height, render_time);

    let filename = "ascii_render.ppm";
    match save_ppm(&frame, filename) {
        Ok(()) => println!("Saved to {}", filename),
        Err(err) => eprintln!("Failed to save {}: {}", filename, err),
    }
}

fn build_scene() -> Scene {
    let mut scene = Scene::three_spheres();

    // Ground
    scene.add(Box::new(Plane::new(
        Vec3::new(0.0, -2.1, 0.0),
        Vec3::Y,
        Lambertian::new(Color::new(0.5, 0.5, 0.5)),
    )));

    // Glass ball and a tilted mirror cube off to the right
    scene.add(Box::new(Sphere::new(
        Vec3::new(1.6, -0.4, -2.5),
        0.6,
        Dielectric::new(1.5),
    )));
    scene.add(Box::new(Cube::new(
        Vec3::new(3.0, -1.0, -5.0),
        1.5,
        Transform::from_euler_xyz(0.4, 0.8, 0.0),
        Metal::new(Color::new(0.7, 0.6, 0.5), 0.05),
    )));

    scene
}

fn save_ppm(frame: &glyph_tracer::Frame, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", frame.width, frame.height)?;
    writeln!(writer, "255")?;

    for rgb in frame.to_rgb8().chunks(3) {
        writeln!(writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
    }

    Ok(())
}
