//! Scene and animation configuration.
//!
//! Everything has a default, so an empty JSON object (or no file at all)
//! gives the built-in orbit scene: two patterned planes around a translucent
//! mirror sphere.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use strata_core::{
    Checkerboard, Color, Primitive, Scene, Sphere, DEFAULT_MAX_DEPTH, DEFAULT_REFLECTION_OFFSET,
};
use strata_math::Vec3;
use thiserror::Error;

use crate::camera_path::CameraPath;

/// Errors that can occur while loading a config.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

/// Top-level config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub primitives: Vec<PrimitiveConfig>,
    pub camera: CameraConfig,
    pub path: CameraPath,
    pub frames: u32,
    pub output: OutputConfig,
    /// Distance reflected rays are pushed off the surface they leave
    pub reflection_offset: f32,
}

/// One primitive in the scene.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PrimitiveConfig {
    Checkerboard {
        height: f32,
        #[serde(default = "unit")]
        scale: f32,
        #[serde(default)]
        reflectivity: u8,
        #[serde(default = "unit")]
        opacity: f32,
    },
    Sphere {
        #[serde(default)]
        center: [f32; 3],
        radius: f32,
        /// RGBA
        color: [u8; 4],
        #[serde(default)]
        mirror: u8,
    },
}

fn unit() -> f32 {
    1.0
}

/// Camera settings shared by every frame.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub width: u32,
    pub height: u32,
    pub fov_degrees: f32,
    pub max_depth: u32,
    /// Point the camera looks at
    pub target: [f32; 3],
}

/// Where frames go.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub directory: PathBuf,
    /// `ppm` or `png`
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            primitives: vec![
                PrimitiveConfig::Checkerboard {
                    height: -10.0,
                    scale: 0.5,
                    reflectivity: 191,
                    opacity: 1.0,
                },
                PrimitiveConfig::Checkerboard {
                    height: 10.0,
                    scale: 2.0,
                    reflectivity: 191,
                    opacity: 1.0,
                },
                PrimitiveConfig::Sphere {
                    center: [0.0; 3],
                    radius: 20.0,
                    color: [0, 0, 255, 191],
                    mirror: 127,
                },
            ],
            camera: CameraConfig::default(),
            path: CameraPath::default(),
            frames: 300,
            output: OutputConfig::default(),
            reflection_offset: DEFAULT_REFLECTION_OFFSET,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fov_degrees: 130.0,
            max_depth: DEFAULT_MAX_DEPTH,
            target: [0.0; 3],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("out"),
            format: "ppm".to_string(),
        }
    }
}

impl Config {
    /// Load and validate a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse and validate config JSON.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the renderer cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, message: &str| {
            Err(ConfigError::Invalid {
                field,
                message: message.to_string(),
            })
        };

        if self.frames == 0 {
            return invalid("frames", "must be at least 1");
        }
        if self.camera.width == 0 || self.camera.height == 0 {
            return invalid("camera", "width and height must be non-zero");
        }
        if !(self.camera.fov_degrees > 0.0 && self.camera.fov_degrees < 180.0) {
            return invalid("camera.fov_degrees", "must be between 0 and 180");
        }
        if !self.reflection_offset.is_finite() || self.reflection_offset < 0.0 {
            return invalid("reflection_offset", "must be a finite, non-negative distance");
        }
        for primitive in &self.primitives {
            if let PrimitiveConfig::Sphere { radius, .. } = primitive {
                if radius.is_nan() || *radius <= 0.0 {
                    return invalid("primitives.radius", "sphere radius must be positive");
                }
            }
        }
        self.path.validate()
    }

    /// Build the scene described by `primitives`.
    pub fn build_scene(&self) -> Scene {
        let mut scene = Scene::new().with_reflection_offset(self.reflection_offset);
        for primitive in &self.primitives {
            scene.add_boxed(primitive.build());
        }
        log::info!("Built scene with {} primitives", scene.len());
        scene
    }

    /// Camera target as a vector.
    pub fn target(&self) -> Vec3 {
        Vec3::from_array(self.camera.target)
    }
}

impl PrimitiveConfig {
    /// Instantiate the primitive.
    pub fn build(&self) -> Box<dyn Primitive> {
        match *self {
            PrimitiveConfig::Checkerboard {
                height,
                scale,
                reflectivity,
                opacity,
            } => Box::new(
                Checkerboard::new(height, scale)
                    .with_reflectivity(reflectivity)
                    .with_opacity(opacity),
            ),
            PrimitiveConfig::Sphere {
                center,
                radius,
                color: [r, g, b, a],
                mirror,
            } => Box::new(
                Sphere::new(Vec3::from_array(center), radius, Color::new(r, g, b, a)).with_mirror(mirror),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_math::Ray;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config.primitives.len(), 3);
        assert_eq!(config.frames, 300);
        assert_eq!(config.camera.width, 1280);
        assert_eq!(config.output.format, "ppm");
        assert_eq!(config.reflection_offset, DEFAULT_REFLECTION_OFFSET);
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "primitives": [
                { "type": "checkerboard", "height": -10, "scale": 0.5 },
                { "type": "sphere", "radius": 1, "color": [0, 255, 255, 223], "mirror": 64 }
            ],
            "camera": { "width": 64, "height": 48, "fov_degrees": 90, "max_depth": 2, "target": [0, 0, 0] },
            "path": { "kind": "turntable", "radius": 1.66 },
            "frames": 12,
            "output": { "directory": "frames", "format": "png" }
        }"#;

        let config = Config::from_json(json).unwrap();
        assert_eq!(
            config.primitives[0],
            PrimitiveConfig::Checkerboard {
                height: -10.0,
                scale: 0.5,
                reflectivity: 0,
                opacity: 1.0,
            }
        );
        assert_eq!(
            config.primitives[1],
            PrimitiveConfig::Sphere {
                center: [0.0; 3],
                radius: 1.0,
                color: [0, 255, 255, 223],
                mirror: 64,
            }
        );
        assert_eq!(config.camera.max_depth, 2);
        assert_eq!(config.frames, 12);
        assert_eq!(config.output.directory, PathBuf::from("frames"));
        assert!(matches!(config.path, CameraPath::Turntable { .. }));
    }

    #[test]
    fn test_unknown_primitive_is_rejected() {
        let err = Config::from_json(r#"{ "primitives": [{ "type": "torus" }] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_errors() {
        let err = Config::from_json(r#"{ "frames": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "frames", .. }));

        let err = Config::from_json(r#"{ "camera": { "fov_degrees": 180 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "camera.fov_degrees", .. }));

        let json = r#"{ "primitives": [{ "type": "sphere", "radius": 0, "color": [0, 0, 0, 255] }] }"#;
        let err = Config::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "primitives.radius", .. }));
    }

    #[test]
    fn test_build_scene() {
        let config = Config::default();
        let scene = config.build_scene();
        assert_eq!(scene.len(), 3);

        // From inside the sphere every direction hits something
        let color = scene.trace(&Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::X));
        assert!(color.a > 0);
    }
}
