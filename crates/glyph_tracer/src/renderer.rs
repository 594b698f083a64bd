//! Recursive ray tracer and frame driver.
//!
//! Implements:
//! - Recursive scattering with a configurable bounce limit
//! - Surface-normal visualization mode
//! - Gamma correction and clamping
//! - Optional anti-aliasing via jittered multi-sampling
//! - Glyph and RGB output for the display back ends

use crate::{gen_f32, Camera, Color, Hittable, Ray};
use glyph_math::Interval;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use thiserror::Error;

/// Character ramp from darkest to brightest.
pub const GLYPH_RAMP: [char; 8] = [' ', '·', ':', ';', 'z', 'n', 'k', 'W'];

/// Largest accepted bounce depth; also bounds the integrator's recursion.
pub const MAX_DEPTH: u32 = 100;

/// Largest accepted output width or height in cells.
pub const MAX_DIMENSION: u32 = 16_384;

/// What a camera ray resolves to on a hit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Visualize the hit normal, no bounces
    Normals,
    /// Full material scattering
    #[default]
    Materials,
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output width in cells
    pub width: u32,
    /// Output height in cells
    pub height: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Samples per pixel; 1 disables anti-aliasing
    pub samples_per_pixel: u32,
    pub mode: RenderMode,
    /// Emit glyph intensities as `100 - avg`
    pub invert_colors: bool,
    /// Returned when a camera ray misses everything
    pub ambient: Color,
    /// Sky colour looking straight down
    pub sky_bottom: Color,
    /// Sky colour looking straight up
    pub sky_top: Color,
    /// Lower bound of the hit interval, avoids self-intersection
    pub epsilon: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 160,
            height: 80,
            max_depth: 5,
            samples_per_pixel: 1,
            mode: RenderMode::Materials,
            invert_colors: false,
            ambient: Color::ZERO,
            sky_bottom: Color::ONE,
            sky_top: Color::ZERO,
            epsilon: 0.001,
        }
    }
}

/// Invalid render settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("output size must be non-zero, got {width}x{height}")]
    EmptyOutput { width: u32, height: u32 },
    #[error("output size {width}x{height} exceeds {max} cells per side")]
    OutputTooLarge { width: u32, height: u32, max: u32 },
    #[error("bounce depth must be at least 1")]
    ZeroDepth,
    #[error("bounce depth must be at most {max}")]
    DepthTooLarge { max: u32 },
    #[error("samples per pixel must be at least 1")]
    ZeroSamples,
}

impl RenderConfig {
    /// Check that a frame can be produced with these settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyOutput {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(ConfigError::OutputTooLarge {
                width: self.width,
                height: self.height,
                max: MAX_DIMENSION,
            });
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if self.max_depth > MAX_DEPTH {
            return Err(ConfigError::DepthTooLarge { max: MAX_DEPTH });
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        Ok(())
    }
}

/// Compute the color seen by a ray.
///
/// `depth` counts bounces so far; camera rays start at 0. A camera ray that
/// misses yields the flat `ambient` colour so empty screen space stays dark,
/// while escaped bounces pick up the sky gradient and light the surfaces.
/// Recursion never goes deeper than [`MAX_DEPTH`], even for unvalidated
/// settings.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let Some(rec) = world.hit(ray, Interval::from_min(config.epsilon)) else {
        if depth == 0 {
            return config.ambient;
        }
        return sky_gradient(ray, config);
    };

    if config.mode == RenderMode::Normals {
        return 0.5 * (rec.normal + Color::ONE);
    }

    // Bounce limit reached: treat as an escape
    if depth >= config.max_depth.min(MAX_DEPTH) {
        return sky_gradient(ray, config);
    }

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            result.attenuation * ray_color(&result.scattered, world, depth + 1, config, rng)
        }
        None => sky_gradient(ray, config),
    }
}

/// Blend between the bottom and top sky colours by ray elevation.
pub fn sky_gradient(ray: &Ray, config: &RenderConfig) -> Color {
    let unit_direction = ray.direction().normalize_or_zero();
    let a = 0.5 * (unit_direction.y + 1.0);
    config.sky_bottom * (1.0 - a) + config.sky_top * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Mean of the channels scaled to [0, 100].
#[inline]
pub fn intensity(color: Color) -> f32 {
    (color.x + color.y + color.z) / 3.0 * 100.0
}

/// Pick the ramp glyph for an intensity in [0, 100].
pub fn glyph_for_intensity(intensity: f32) -> char {
    let last = GLYPH_RAMP.len() - 1;
    let intensity = intensity.clamp(0.0, 100.0);
    let index = (intensity * last as f32 / 100.0).round() as usize;
    GLYPH_RAMP[index.min(last)]
}

/// Render a single pixel, returning its linear color.
///
/// `row` counts from the bottom of the viewport. With more than one sample
/// each sample is jittered inside the cell and the results averaged.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    col: u32,
    row: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let width = config.width as f32;
    let height = config.height as f32;

    if config.samples_per_pixel <= 1 {
        let ray = camera.get_ray(col as f32 / width, row as f32 / height);
        return ray_color(&ray, world, 0, config, rng);
    }

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let u = (col as f32 + gen_f32(rng)) / width;
        let v = (row as f32 + gen_f32(rng)) / height;
        let ray = camera.get_ray(u, v);
        pixel_color += ray_color(&ray, world, 0, config, rng);
    }

    pixel_color / config.samples_per_pixel as f32
}

/// A rendered grid of display-ready colours, top row first.
///
/// Colours are gamma corrected (except in normals mode) and clamped to [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl Frame {
    /// Create a new frame filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y), y counting down from the top.
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Intensity of the pixel at (x, y) in [0, 100].
    pub fn intensity(&self, x: u32, y: u32) -> f32 {
        intensity(self.get(x, y))
    }

    /// Newline-terminated rows of ramp glyphs.
    pub fn to_glyphs(&self, invert: bool) -> String {
        let mut text = String::with_capacity((self.width as usize + 1) * self.height as usize * 2);

        for row in self.pixels.chunks(self.width.max(1) as usize) {
            for color in row {
                text.push(cell_glyph(*color, invert));
            }
            text.push('\n');
        }

        text
    }

    /// Like [`Frame::to_glyphs`], but each glyph carries its cell's colour
    /// as a 24-bit ANSI foreground. Every row ends with an attribute reset.
    pub fn to_colored_glyphs(&self, invert: bool) -> String {
        let mut text = String::with_capacity((self.width as usize * 20 + 5) * self.height as usize);

        for row in self.pixels.chunks(self.width.max(1) as usize) {
            for color in row {
                let [r, g, b] = rgb8(*color);
                let _ = write!(text, "\x1b[38;2;{r};{g};{b}m{}", cell_glyph(*color, invert));
            }
            text.push_str(ANSI_RESET);
            text.push('\n');
        }

        text
    }

    /// Packed 8-bit RGB, row-major from the top.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&rgb8(*color));
        }
        bytes
    }
}

const ANSI_RESET: &str = "\x1b[0m";

fn cell_glyph(color: Color, invert: bool) -> char {
    let value = intensity(color);
    glyph_for_intensity(if invert { 100.0 - value } else { value })
}

fn rgb8(color: Color) -> [u8; 3] {
    color
        .to_array()
        .map(|channel| (Interval::UNIT.clamp(channel) * 255.0).round() as u8)
}

/// Render the entire scene into a frame.
///
/// Single-threaded and synchronous; the host stalls until the frame is done.
pub fn render_frame(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Frame {
    let mut frame = Frame::new(config.width, config.height);

    for y in 0..config.height {
        // Output rows run top-down, viewport rows bottom-up
        let row = config.height - 1 - y;
        for x in 0..config.width {
            let mut color = render_pixel(camera, world, x, row, config, rng);

            if config.mode != RenderMode::Normals {
                color = Color::new(
                    linear_to_gamma(color.x),
                    linear_to_gamma(color.y),
                    linear_to_gamma(color.z),
                );
            }

            frame.set(x, y, color.clamp(Color::ZERO, Color::ONE));
        }
    }

    log::debug!(
        "rendered {}x{} frame ({} spp, depth {})",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth
    );

    frame
}
