use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// `{x, y, z}` triple as written in configuration documents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3Config {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3Config {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<Vec3Config> for Vector3<f64> {
    fn from(v: Vec3Config) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<Vector3<f64>> for Vec3Config {
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Surface selector plus the numeric parameters of that surface
///
/// Serializes to the display geometry document, e.g.
/// `{"model": "sphere", "radius": 1.0, "center": {"x": 0, "y": 0, "z": 0}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum SurfaceConfig {
    Cylinder {
        radius: f64,
        base: Vec3Config,
        /// Direction of the cylinder axis; its length is the height.
        axis: Vec3Config,
    },
    Sphere {
        radius: f64,
        center: Vec3Config,
    },
}

impl SurfaceConfig {
    pub fn model_name(&self) -> &'static str {
        match self {
            SurfaceConfig::Cylinder { .. } => "cylinder",
            SurfaceConfig::Sphere { .. } => "sphere",
        }
    }
}
