use std::f64::consts::PI;

use nalgebra::{UnitQuaternion, Vector2, Vector3};

use super::mesh::{MeshBuilder, Primitive, PrimitiveMode};
use super::{KeyPointMap, Mesh, SurfaceGeometry};
use crate::coordinate::rotation_from_z;
use crate::error::ConfigurationError;

/// Azimuth steps used by [`Cylinder::make_mesh`] unless overridden
pub const DEFAULT_CYLINDER_SEGMENTS: u32 = 256;

const OVERALL_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

/// Finite cylinder standing on `base` and extending along `axis`
///
/// `u` runs around the axis and `v` runs from the base (`v = 0`) to
/// `base + axis` (`v = 1`).
#[derive(Debug, Clone)]
pub struct Cylinder {
    radius: f64,
    base: Vector3<f64>,
    axis: Vector3<f64>,
    n_segments: u32,

    // derived
    rotation: UnitQuaternion<f64>,
    height: f64,
}

impl Cylinder {
    /// Create a cylinder; `axis` carries both direction and height
    pub fn new(
        radius: f64,
        base: Vector3<f64>,
        axis: Vector3<f64>,
    ) -> Result<Self, ConfigurationError> {
        if !radius.is_finite() {
            return Err(ConfigurationError::NonFinite { field: "radius" });
        }
        if radius <= 0.0 {
            return Err(ConfigurationError::NonPositiveRadius(radius));
        }
        if !base.iter().all(|c| c.is_finite()) {
            return Err(ConfigurationError::NonFinite { field: "base" });
        }
        if !axis.iter().all(|c| c.is_finite()) {
            return Err(ConfigurationError::NonFinite { field: "axis" });
        }

        let rotation = rotation_from_z(&axis).map_err(|_| ConfigurationError::DegenerateAxis)?;
        let height = axis.norm();

        tracing::debug!(radius, height, ?base, ?axis, "built cylinder surface");

        Ok(Self {
            radius,
            base,
            axis,
            n_segments: DEFAULT_CYLINDER_SEGMENTS,
            rotation,
            height,
        })
    }

    /// Override the number of azimuth steps in the emitted mesh
    pub fn with_segments(mut self, n_segments: u32) -> Result<Self, ConfigurationError> {
        if n_segments == 0 {
            return Err(ConfigurationError::ZeroSubdivision {
                field: "n_segments",
            });
        }
        self.n_segments = n_segments;
        Ok(self)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn base(&self) -> Vector3<f64> {
        self.base
    }

    pub fn axis(&self) -> Vector3<f64> {
        self.axis
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn segments(&self) -> u32 {
        self.n_segments
    }

    /// Rotation aligning +Z with the cylinder axis
    pub fn rotation(&self) -> &UnitQuaternion<f64> {
        &self.rotation
    }
}

impl SurfaceGeometry for Cylinder {
    fn texcoord_to_world(&self, tc: &Vector2<f64>) -> Vector3<f64> {
        // The half-turn offset is part of the texture layout shared with
        // other tools; texcoord_to_normal has none.
        let angle = tc.x * 2.0 * PI + PI;
        let local = Vector3::new(
            self.radius * angle.cos(),
            self.radius * angle.sin(),
            tc.y * self.height,
        );
        self.rotation * local + self.base
    }

    fn texcoord_to_normal(&self, tc: &Vector2<f64>) -> Vector3<f64> {
        let angle = tc.x * 2.0 * PI;
        self.rotation * Vector3::new(angle.cos(), angle.sin(), 0.0)
    }

    fn make_mesh(&self, texcoord_colors: bool) -> Mesh {
        let n_vertices = 2 * (self.n_segments as usize + 1);
        let mut builder = MeshBuilder::new(n_vertices, texcoord_colors);

        for i in 0..=self.n_segments {
            let frac = f64::from(i) / f64::from(self.n_segments);
            builder.push(self, Vector2::new(frac, 1.0));
            builder.push(self, Vector2::new(frac, 0.0));
        }

        builder.add_primitive(Primitive::range(
            PrimitiveMode::Points,
            0,
            builder.vertex_count() as u32,
        ));

        tracing::debug!(vertices = n_vertices, "emitted cylinder mesh");
        builder.finish(OVERALL_COLOR)
    }

    fn key_points(&self) -> KeyPointMap {
        let mut result = KeyPointMap::new();
        result.insert("base".to_string(), self.base);
        result.insert("top".to_string(), self.base + self.axis);
        result.insert(
            "(0,0)".to_string(),
            self.texcoord_to_world(&Vector2::new(0.0, 0.0)),
        );
        result.insert(
            "(0,1)".to_string(),
            self.texcoord_to_world(&Vector2::new(0.0, 1.0)),
        );
        result
    }
}
