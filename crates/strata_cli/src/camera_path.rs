//! Camera positions over an animation.

use std::f32::consts::TAU;

use serde::Deserialize;
use strata_math::{Vec3, Vec3Ext};

use crate::config::ConfigError;

/// How the camera moves from frame to frame. It always looks at the config's
/// target.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CameraPath {
    /// Elliptic spiral: `(rx cos a, sin(a/2) sqrt(a) lift, rz sin a)` with
    /// `a` sweeping `turns` full circles over the animation.
    Orbit {
        radius_x: f32,
        radius_z: f32,
        turns: f32,
        lift: f32,
    },
    /// Circle of `radius` around the target, `height` above it, one turn per
    /// animation.
    Turntable {
        radius: f32,
        #[serde(default)]
        height: f32,
    },
    /// Same position every frame.
    Fixed { position: [f32; 3] },
}

impl Default for CameraPath {
    fn default() -> Self {
        CameraPath::Orbit {
            radius_x: 10.0,
            radius_z: 30.0,
            turns: 2.0,
            lift: 9.0,
        }
    }
}

impl CameraPath {
    /// Camera position for `frame` out of `frames`. Only `turntable` is
    /// placed relative to `target`.
    pub fn position(&self, frame: u32, frames: u32, target: Vec3) -> Vec3 {
        let progress = frame as f32 / frames.max(1) as f32;

        match *self {
            CameraPath::Orbit {
                radius_x,
                radius_z,
                turns,
                lift,
            } => {
                let a = progress * turns * TAU;
                Vec3::new(
                    radius_x * a.cos(),
                    (a / 2.0).sin() * a.sqrt() * lift,
                    radius_z * a.sin(),
                )
            }
            CameraPath::Turntable { radius, height } => {
                target + Vec3::new(0.0, height, radius).rotated_about(Vec3::Y, progress * TAU)
            }
            CameraPath::Fixed { position } => Vec3::from_array(position),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let ok = match *self {
            CameraPath::Orbit {
                radius_x,
                radius_z,
                turns,
                lift,
            } => [radius_x, radius_z, turns, lift].iter().all(|v| v.is_finite()),
            CameraPath::Turntable { radius, height } => radius.is_finite() && height.is_finite(),
            CameraPath::Fixed { position } => position.iter().all(|v| v.is_finite()),
        };

        if ok {
            Ok(())
        } else {
            Err(ConfigError::Invalid {
                field: "path",
                message: "path parameters must be finite".to_string(),
            })
        }
    }
}
