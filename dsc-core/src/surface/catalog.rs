use nalgebra::{Vector2, Vector3};

use super::{KeyPointMap, Mesh, SurfaceConfig, SurfaceGeometry, SurfaceModel};
use crate::error::ConfigurationError;

/// Owner of the single active display surface
///
/// Calibration code talks to the catalog and stays agnostic of which
/// surface shape was configured.
#[derive(Debug, Clone)]
pub struct SurfaceCatalog {
    model: SurfaceModel,
}

impl SurfaceCatalog {
    /// Select and build the surface named by `config`
    pub fn from_config(config: &SurfaceConfig) -> Result<Self, ConfigurationError> {
        let model = SurfaceModel::from_config(config)?;
        tracing::info!(model = model.name(), "display surface selected");
        Ok(Self { model })
    }

    /// Wrap an already constructed model
    pub fn new(model: SurfaceModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &SurfaceModel {
        &self.model
    }

    pub fn into_model(self) -> SurfaceModel {
        self.model
    }
}

impl SurfaceGeometry for SurfaceCatalog {
    fn texcoord_to_world(&self, tc: &Vector2<f64>) -> Vector3<f64> {
        self.model.texcoord_to_world(tc)
    }

    fn texcoord_to_normal(&self, tc: &Vector2<f64>) -> Vector3<f64> {
        self.model.texcoord_to_normal(tc)
    }

    fn make_mesh(&self, texcoord_colors: bool) -> Mesh {
        self.model.make_mesh(texcoord_colors)
    }

    fn key_points(&self) -> KeyPointMap {
        self.model.key_points()
    }
}
