//! Circular orbits for animated bodies.

use glyph_math::{Transform, Vec3};
use serde::{Deserialize, Serialize};

/// A circular path around `origin`.
///
/// The circle lies in the local XZ plane, tilted by `rotation` (Euler XYZ,
/// radians). Positions are a pure function of time; whoever owns the clock
/// decides when to move bodies and redraw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orbit {
    pub origin: Vec3,
    pub radius: f32,
    #[serde(default)]
    pub rotation: Vec3,
    /// Radians per second
    pub angular_speed: f32,
    /// Angle at time zero
    #[serde(default)]
    pub phase: f32,
}

impl Orbit {
    /// Flat orbit in the XZ plane starting on +X.
    pub fn new(origin: Vec3, radius: f32, angular_speed: f32) -> Self {
        Self {
            origin,
            radius,
            rotation: Vec3::ZERO,
            angular_speed,
            phase: 0.0,
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }

    /// Position on the orbit after `time` seconds.
    pub fn position_at(&self, time: f32) -> Vec3 {
        let angle = self.angular_speed * time + self.phase;
        let (sin, cos) = angle.sin_cos();
        let local = Vec3::new(self.radius * cos, 0.0, self.radius * sin);

        let tilt = Transform::from_euler_xyz(self.rotation.x, self.rotation.y, self.rotation.z);
        self.origin + tilt.apply_to_vector(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{a:?} != {b:?}");
    }

    #[test]
    fn test_orbit_start_position() {
        let orbit = Orbit::new(Vec3::new(0.0, 1.0, -5.0), 2.0, 1.0);
        assert_vec_eq(orbit.position_at(0.0), Vec3::new(2.0, 1.0, -5.0));
    }

    #[test]
    fn test_orbit_quarter_turn() {
        let orbit = Orbit::new(Vec3::ZERO, 2.0, FRAC_PI_2);
        assert_vec_eq(orbit.position_at(1.0), Vec3::new(0.0, 0.0, 2.0));
        assert_vec_eq(orbit.position_at(2.0), Vec3::new(-2.0, 0.0, 0.0));
    }

    #[test]
    fn test_orbit_keeps_radius() {
        let orbit = Orbit::new(Vec3::new(1.0, 2.0, 3.0), 1.5, 0.7)
            .with_rotation(Vec3::new(0.3, 1.1, -0.4))
            .with_phase(0.25);

        for step in 0..20 {
            let p = orbit.position_at(step as f32 * 0.37);
            assert!(((p - orbit.origin).length() - 1.5).abs() < 1e-4);
        }
    }

    #[test]
    fn test_orbit_tilted_plane() {
        // Tilting by 90 degrees around X swings the +Z side of the circle to -Y
        let orbit = Orbit::new(Vec3::ZERO, 1.0, 1.0)
            .with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0))
            .with_phase(FRAC_PI_2);
        assert_vec_eq(orbit.position_at(0.0), Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_orbit_phase() {
        let orbit = Orbit::new(Vec3::ZERO, 1.0, 0.0).with_phase(PI);
        assert_vec_eq(orbit.position_at(10.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_orbit_deserialize_defaults() {
        let orbit: Orbit = serde_json::from_str(
            r#"{ "origin": [0.0, 0.0, -3.0], "radius": 1.0, "angular_speed": 2.0 }"#,
        )
        .unwrap();
        assert_eq!(orbit.rotation, Vec3::ZERO);
        assert_eq!(orbit.phase, 0.0);
    }
}
