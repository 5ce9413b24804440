//! Parametric display surfaces
//!
//! Every surface is parameterized by a texture coordinate `(u, v)` in
//! `[0, 1]^2`. Models map texcoords to world positions and outward normals,
//! emit a renderable [`Mesh`], and report named landmarks for sanity checks.

mod catalog;
mod config;
mod cylinder;
mod mesh;
mod sphere;

pub use catalog::SurfaceCatalog;
pub use config::{SurfaceConfig, Vec3Config};
pub use cylinder::{Cylinder, DEFAULT_CYLINDER_SEGMENTS};
pub use mesh::{ColorBinding, Mesh, Primitive, PrimitiveIndices, PrimitiveMode, Rgba};
pub use sphere::{DEFAULT_SPHERE_AZIMUTH_STEPS, DEFAULT_SPHERE_ELEVATION_BANDS, Sphere};

use std::collections::BTreeMap;

use nalgebra::{Vector2, Vector3};

use crate::error::ConfigurationError;

/// Named world-space landmarks of a surface
pub type KeyPointMap = BTreeMap<String, Vector3<f64>>;

/// Geometry queries shared by all display surfaces
pub trait SurfaceGeometry {
    /// World position of texture coordinate `tc`
    fn texcoord_to_world(&self, tc: &Vector2<f64>) -> Vector3<f64>;

    /// Unit surface normal at texture coordinate `tc`
    fn texcoord_to_normal(&self, tc: &Vector2<f64>) -> Vector3<f64>;

    /// Sampled mesh of the whole surface
    ///
    /// With `texcoord_colors` each vertex is colored `(u, v, 0, 1)`,
    /// otherwise the mesh carries a single overall color.
    fn make_mesh(&self, texcoord_colors: bool) -> Mesh;

    /// Named landmarks used to check placement
    fn key_points(&self) -> KeyPointMap;
}

/// Closed set of supported display surfaces
#[derive(Debug, Clone)]
pub enum SurfaceModel {
    Cylinder(Cylinder),
    Sphere(Sphere),
}

impl SurfaceModel {
    /// Build and validate the model described by `config`
    pub fn from_config(config: &SurfaceConfig) -> Result<Self, ConfigurationError> {
        match *config {
            SurfaceConfig::Cylinder { radius, base, axis } => {
                Ok(Cylinder::new(radius, base.into(), axis.into())?.into())
            }
            SurfaceConfig::Sphere { radius, center } => {
                Ok(Sphere::new(radius, center.into())?.into())
            }
        }
    }

    /// Model discriminator as used in configuration documents
    pub fn name(&self) -> &'static str {
        match self {
            SurfaceModel::Cylinder(_) => "cylinder",
            SurfaceModel::Sphere(_) => "sphere",
        }
    }
}

impl From<Cylinder> for SurfaceModel {
    fn from(cylinder: Cylinder) -> Self {
        SurfaceModel::Cylinder(cylinder)
    }
}

impl From<Sphere> for SurfaceModel {
    fn from(sphere: Sphere) -> Self {
        SurfaceModel::Sphere(sphere)
    }
}

impl SurfaceGeometry for SurfaceModel {
    fn texcoord_to_world(&self, tc: &Vector2<f64>) -> Vector3<f64> {
        match self {
            SurfaceModel::Cylinder(c) => c.texcoord_to_world(tc),
            SurfaceModel::Sphere(s) => s.texcoord_to_world(tc),
        }
    }

    fn texcoord_to_normal(&self, tc: &Vector2<f64>) -> Vector3<f64> {
        match self {
            SurfaceModel::Cylinder(c) => c.texcoord_to_normal(tc),
            SurfaceModel::Sphere(s) => s.texcoord_to_normal(tc),
        }
    }

    fn make_mesh(&self, texcoord_colors: bool) -> Mesh {
        match self {
            SurfaceModel::Cylinder(c) => c.make_mesh(texcoord_colors),
            SurfaceModel::Sphere(s) => s.make_mesh(texcoord_colors),
        }
    }

    fn key_points(&self) -> KeyPointMap {
        match self {
            SurfaceModel::Cylinder(c) => c.key_points(),
            SurfaceModel::Sphere(s) => s.key_points(),
        }
    }
}
