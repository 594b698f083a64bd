//! Scene descriptions and JSON scene loading.
//!
//! A scene file is a JSON document with three optional sections:
//!
//! ```json
//! {
//!   "camera": { "position": [0, 1, 2], "target": [0, 0, -5] },
//!   "render": { "width": 120, "height": 40, "max_depth": 8 },
//!   "objects": [
//!     {
//!       "shape": { "type": "sphere", "center": [0, 0, -5], "radius": 1 },
//!       "material": { "type": "metal", "albedo": [0.8, 0.6, 0.6], "fuzz": 0.2 },
//!       "orbit": { "origin": [0, 0, -5], "radius": 3, "angular_speed": 1.0 }
//!     }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use glyph_math::{Transform, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    Camera, Color, ConfigError, Cube, Dielectric, Lambertian, Material, Metal, Orbit,
    OrbitingSphere, Plane, RenderConfig, Scene, Sphere,
};

/// Errors that can occur while loading or building a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid object {index}: {reason}")]
    InvalidObject { index: usize, reason: String },

    #[error("Camera position and target coincide or are parallel to up")]
    DegenerateCamera,

    #[error("Invalid render settings: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Camera placement and viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDescription {
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub focus: f32,
    pub position: Vec3,
    /// Look at this point; without it the camera looks down -Z
    pub target: Option<Vec3>,
    pub up: Vec3,
}

impl Default for CameraDescription {
    fn default() -> Self {
        Self {
            viewport_width: 4.0,
            viewport_height: 2.0,
            focus: -1.0,
            position: Vec3::ZERO,
            target: None,
            up: Vec3::Y,
        }
    }
}

impl CameraDescription {
    pub fn build(&self) -> SceneResult<Camera> {
        let transform = match self.target {
            Some(target) => Transform::look_at(self.position, target, self.up)
                .ok_or(SceneError::DegenerateCamera)?,
            None => Transform::from_translation(self.position),
        };

        Ok(Camera::new()
            .with_viewport(self.viewport_width, self.viewport_height)
            .with_focus(self.focus)
            .with_transform(transform))
    }
}

/// Geometry of one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeDescription {
    Sphere {
        center: Vec3,
        radius: f32,
    },
    Plane {
        point: Vec3,
        normal: Vec3,
    },
    Cube {
        center: Vec3,
        size: f32,
        /// Euler XYZ angles in radians
        #[serde(default)]
        rotation: Vec3,
    },
}

/// Surface of one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDescription {
    Lambertian {
        albedo: Color,
    },
    Metal {
        albedo: Color,
        #[serde(default)]
        fuzz: f32,
    },
    Dielectric {
        refraction_index: f32,
    },
}

impl MaterialDescription {
    pub fn build(&self) -> Arc<dyn Material> {
        match *self {
            MaterialDescription::Lambertian { albedo } => Arc::new(Lambertian::new(albedo)),
            MaterialDescription::Metal { albedo, fuzz } => Arc::new(Metal::new(albedo, fuzz)),
            MaterialDescription::Dielectric { refraction_index } => {
                Arc::new(Dielectric::new(refraction_index))
            }
        }
    }
}

/// One primitive with its material and optional animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDescription {
    pub shape: ShapeDescription,
    pub material: MaterialDescription,
    /// Only spheres may orbit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbit: Option<Orbit>,
}

impl ObjectDescription {
    fn check(&self) -> Result<(), String> {
        match self.shape {
            ShapeDescription::Sphere { radius, .. } if radius <= 0.0 => {
                return Err(format!("sphere radius must be positive, got {radius}"));
            }
            ShapeDescription::Plane { normal, .. } if normal.length_squared() == 0.0 => {
                return Err("plane normal must be non-zero".to_string());
            }
            ShapeDescription::Cube { size, .. } if size <= 0.0 => {
                return Err(format!("cube size must be positive, got {size}"));
            }
            _ => {}
        }

        if let MaterialDescription::Dielectric { refraction_index } = self.material {
            if refraction_index <= 0.0 {
                return Err(format!(
                    "refraction index must be positive, got {refraction_index}"
                ));
            }
        }

        if self.orbit.is_some() && !matches!(self.shape, ShapeDescription::Sphere { .. }) {
            return Err("only spheres can orbit".to_string());
        }

        Ok(())
    }
}

/// A complete scene: camera, render settings and objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub camera: CameraDescription,
    pub render: RenderConfig,
    pub objects: Vec<ObjectDescription>,
}

impl SceneDescription {
    /// Parse a scene from JSON text.
    pub fn from_json(text: &str) -> SceneResult<Self> {
        let description: SceneDescription = serde_json::from_str(text)?;
        description.validate()?;
        Ok(description)
    }

    /// Load and validate a scene file.
    pub fn load<P: AsRef<Path>>(path: P) -> SceneResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let description = Self::from_json(&text)?;
        log::info!(
            "loaded scene {} ({} objects)",
            path.display(),
            description.objects.len()
        );
        Ok(description)
    }

    /// Check render settings and every object descriptor.
    pub fn validate(&self) -> SceneResult<()> {
        self.render.validate()?;

        for (index, object) in self.objects.iter().enumerate() {
            object
                .check()
                .map_err(|reason| SceneError::InvalidObject { index, reason })?;
        }

        Ok(())
    }

    /// Instantiate the scene and its camera.
    pub fn build(&self) -> SceneResult<(Scene, Camera)> {
        self.validate()?;

        let mut scene = Scene::new();
        for object in &self.objects {
            let material = object.material.build();

            match (&object.shape, object.orbit) {
                (ShapeDescription::Sphere { radius, .. }, Some(orbit)) => {
                    scene.add_orbiting(OrbitingSphere::new(*radius, material, orbit));
                }
                (ShapeDescription::Sphere { center, radius }, None) => {
                    scene.add(Box::new(Sphere::new(*center, *radius, material)));
                }
                (ShapeDescription::Plane { point, normal }, _) => {
                    scene.add(Box::new(Plane::new(*point, *normal, material)));
                }
                (
                    ShapeDescription::Cube {
                        center,
                        size,
                        rotation,
                    },
                    _,
                ) => {
                    let rotation = Transform::from_euler_xyz(rotation.x, rotation.y, rotation.z);
                    scene.add(Box::new(Cube::new(*center, *size, rotation, material)));
                }
            }
        }

        let camera = self.camera.build()?;
        log::debug!(
            "built scene: {} static, {} orbiting",
            scene.objects.len(),
            scene.orbiting.len()
        );

        Ok((scene, camera))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Hittable, Ray, RenderMode};
    use glyph_math::Interval;

    const SCENE: &str = r#"{
        "camera": { "position": [0.0, 0.0, 1.0] },
        "render": { "width": 40, "height": 20, "mode": "normals" },
        "objects": [
            {
                "shape": { "type": "sphere", "center": [0.0, 0.0, -5.0], "radius": 1.0 },
                "material": { "type": "lambertian", "albedo": [0.5, 0.5, 0.5] }
            },
            {
                "shape": { "type": "plane", "point": [0.0, -1.0, 0.0], "normal": [0.0, 1.0, 0.0] },
                "material": { "type": "metal", "albedo": [0.8, 0.8, 0.8] }
            },
            {
                "shape": { "type": "cube", "center": [3.0, 0.0, -6.0], "size": 1.0,
                           "rotation": [0.0, 0.5, 0.0] },
                "material": { "type": "dielectric", "refraction_index": 1.5 }
            },
            {
                "shape": { "type": "sphere", "center": [0.0, 0.0, 0.0], "radius": 0.3 },
                "material": { "type": "metal", "albedo": [1.0, 0.6, 0.6], "fuzz": 0.2 },
                "orbit": { "origin": [0.0, 0.0, -5.0], "radius": 2.0, "angular_speed": 1.0 }
            }
        ]
    }"#;

    fn sphere_object(radius: f32) -> ObjectDescription {
        ObjectDescription {
            shape: ShapeDescription::Sphere {
                center: Vec3::ZERO,
                radius,
            },
            material: MaterialDescription::Lambertian {
                albedo: Vec3::splat(0.5),
            },
            orbit: None,
        }
    }

    #[test]
    fn test_parse_scene() {
        let description = SceneDescription::from_json(SCENE).unwrap();
        assert_eq!(description.objects.len(), 4);
        assert_eq!(description.render.width, 40);
        assert_eq!(description.render.max_depth, 5);
        assert_eq!(description.render.mode, RenderMode::Normals);
        assert_eq!(
            description.objects[1].material,
            MaterialDescription::Metal {
                albedo: Vec3::splat(0.8),
                fuzz: 0.0
            }
        );
    }

    #[test]
    fn test_empty_document_is_valid() {
        let description = SceneDescription::from_json("{}").unwrap();
        assert!(description.objects.is_empty());
        assert_eq!(description.camera, CameraDescription::default());

        let (scene, camera) = description.build().unwrap();
        assert!(scene.is_empty());
        assert_eq!(camera.focus(), -1.0);
    }

    #[test]
    fn test_build_scene() {
        let (scene, camera) = SceneDescription::from_json(SCENE).unwrap().build().unwrap();
        assert_eq!(scene.objects.len(), 3);
        assert_eq!(scene.orbiting.len(), 1);
        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, 1.0));

        let ray = Ray::new(camera.position(), Vec3::NEG_Z);
        let rec = scene.hit(&ray, Interval::from_min(0.001)).unwrap();
        assert!((rec.t - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_camera_target() {
        let description = CameraDescription {
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Some(Vec3::new(5.0, 0.0, 5.0)),
            ..Default::default()
        };
        let camera = description.build().unwrap();
        let direction = camera.get_ray(0.5, 0.5).direction().normalize();
        assert!((direction - Vec3::X).length() < 1e-4);
    }

    #[test]
    fn test_degenerate_camera() {
        let description = CameraDescription {
            target: Some(Vec3::new(0.0, 5.0, 0.0)),
            ..Default::default()
        };
        assert!(matches!(
            description.build(),
            Err(SceneError::DegenerateCamera)
        ));
    }

    #[test]
    fn test_rejects_bad_objects() {
        let mut description = SceneDescription::default();
        description.objects.push(sphere_object(1.0));
        description.objects.push(sphere_object(-1.0));

        match description.validate() {
            Err(SceneError::InvalidObject { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected {other:?}"),
        }

        let plane = ObjectDescription {
            shape: ShapeDescription::Plane {
                point: Vec3::ZERO,
                normal: Vec3::ZERO,
            },
            ..sphere_object(1.0)
        };
        assert!(plane.check().is_err());

        let glass = ObjectDescription {
            material: MaterialDescription::Dielectric {
                refraction_index: 0.0,
            },
            ..sphere_object(1.0)
        };
        assert!(glass.check().is_err());
    }

    #[test]
    fn test_rejects_orbiting_cube() {
        let cube = ObjectDescription {
            shape: ShapeDescription::Cube {
                center: Vec3::ZERO,
                size: 1.0,
                rotation: Vec3::ZERO,
            },
            orbit: Some(Orbit::new(Vec3::ZERO, 1.0, 1.0)),
            ..sphere_object(1.0)
        };
        assert!(cube.check().is_err());
    }

    #[test]
    fn test_rejects_bad_render_settings() {
        let result = SceneDescription::from_json(r#"{ "render": { "max_depth": 0 } }"#);
        assert!(matches!(
            result,
            Err(SceneError::Config(ConfigError::ZeroDepth))
        ));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            SceneDescription::from_json("{ not json"),
            Err(SceneError::Parse(_))
        ));

        let unknown = r#"{ "objects": [ {
            "shape": { "type": "torus", "radius": 1.0 },
            "material": { "type": "lambertian", "albedo": [1, 1, 1] }
        } ] }"#;
        assert!(matches!(
            SceneDescription::from_json(unknown),
            Err(SceneError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = SceneDescription::load("/nonexistent/scene.json");
        assert!(matches!(result, Err(SceneError::Io { .. })));
    }
}
