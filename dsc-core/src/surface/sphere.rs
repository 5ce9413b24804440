use std::f64::consts::{FRAC_PI_2, PI};

use nalgebra::{Vector2, Vector3};

use super::mesh::{MeshBuilder, Primitive, PrimitiveMode};
use super::{KeyPointMap, Mesh, SurfaceGeometry};
use crate::error::ConfigurationError;

/// Longitude steps used by [`Sphere::make_mesh`] unless overridden
pub const DEFAULT_SPHERE_AZIMUTH_STEPS: u32 = 20;
/// Latitude bands used by [`Sphere::make_mesh`] unless overridden
pub const DEFAULT_SPHERE_ELEVATION_BANDS: u32 = 12;

const OVERALL_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Sphere around `center`; `u` is azimuth and `v` runs south to north pole
#[derive(Debug, Clone)]
pub struct Sphere {
    radius: f64,
    center: Vector3<f64>,
    n_az: u32,
    n_el: u32,
}

impl Sphere {
    pub fn new(radius: f64, center: Vector3<f64>) -> Result<Self, ConfigurationError> {
        if !radius.is_finite() {
            return Err(ConfigurationError::NonFinite { field: "radius" });
        }
        if radius <= 0.0 {
            return Err(ConfigurationError::NonPositiveRadius(radius));
        }
        if !center.iter().all(|c| c.is_finite()) {
            return Err(ConfigurationError::NonFinite { field: "center" });
        }

        tracing::debug!(radius, ?center, "built sphere surface");

        Ok(Self {
            radius,
            center,
            n_az: DEFAULT_SPHERE_AZIMUTH_STEPS,
            n_el: DEFAULT_SPHERE_ELEVATION_BANDS,
        })
    }

    /// Override mesh tessellation: `n_az` longitude steps, `n_el` latitude bands
    pub fn with_subdivisions(mut self, n_az: u32, n_el: u32) -> Result<Self, ConfigurationError> {
        if n_az == 0 {
            return Err(ConfigurationError::ZeroSubdivision { field: "n_az" });
        }
        if n_el == 0 {
            return Err(ConfigurationError::ZeroSubdivision { field: "n_el" });
        }
        self.n_az = n_az;
        self.n_el = n_el;
        Ok(self)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn center(&self) -> Vector3<f64> {
        self.center
    }

    /// (longitude steps, latitude bands)
    pub fn subdivisions(&self) -> (u32, u32) {
        (self.n_az, self.n_el)
    }

    fn direction(tc: &Vector2<f64>) -> Vector3<f64> {
        let az = tc.x * 2.0 * PI;
        let el = tc.y * PI - FRAC_PI_2;

        let (sa, ca) = az.sin_cos();
        let (se, ce) = el.sin_cos();
        Vector3::new(ca * ce, sa * ce, se)
    }
}

impl SurfaceGeometry for Sphere {
    fn texcoord_to_world(&self, tc: &Vector2<f64>) -> Vector3<f64> {
        self.center + Self::direction(tc) * self.radius
    }

    fn texcoord_to_normal(&self, tc: &Vector2<f64>) -> Vector3<f64> {
        Self::direction(tc)
    }

    fn make_mesh(&self, texcoord_colors: bool) -> Mesh {
        let ring = self.n_az as usize + 1;
        let mut builder = MeshBuilder::new(2 * ring * self.n_el as usize, texcoord_colors);

        // Each band repeats its rings and pole vertices are duplicated.
        for band in 0..self.n_el {
            let el_lo = f64::from(band) / f64::from(self.n_el);
            let el_hi = f64::from(band + 1) / f64::from(self.n_el);

            let mut strip = Vec::with_capacity(2 * ring);
            for step in 0..=self.n_az {
                let az = f64::from(step) / f64::from(self.n_az);
                strip.push(builder.push(self, Vector2::new(az, el_hi)));
                strip.push(builder.push(self, Vector2::new(az, el_lo)));
            }
            builder.add_primitive(Primitive::elements(PrimitiveMode::QuadStrip, strip));
        }

        tracing::debug!(
            vertices = builder.vertex_count(),
            bands = self.n_el,
            "emitted sphere mesh"
        );
        builder.finish(OVERALL_COLOR)
    }

    fn key_points(&self) -> KeyPointMap {
        let mut result = KeyPointMap::new();
        result.insert("center".to_string(), self.center);
        for (name, v) in [("(0,0)", 0.0), ("(0,0.5)", 0.5), ("(0,1)", 1.0)] {
            result.insert(name.to_string(), self.texcoord_to_world(&Vector2::new(0.0, v)));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{ColorBinding, PrimitiveIndices};

    #[test]
    fn test_sphere_poles() {
        let sphere = Sphere::new(2.0, Vector3::new(1.0, 1.0, 1.0)).unwrap();

        let south = sphere.texcoord_to_world(&Vector2::new(0.3, 0.0));
        assert!((south - Vector3::new(1.0, 1.0, -1.0)).norm() < 1e-12);

        let north = sphere.texcoord_to_world(&Vector2::new(0.8, 1.0));
        assert!((north - Vector3::new(1.0, 1.0, 3.0)).norm() < 1e-12);
    }

    #[test]
    fn test_sphere_equator() {
        let sphere = Sphere::new(1.0, Vector3::zeros()).unwrap();
        let p = sphere.texcoord_to_world(&Vector2::new(0.25, 0.5));
        assert!((p - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_sphere_normal_not_translated() {
        let sphere = Sphere::new(3.0, Vector3::new(10.0, 0.0, 0.0)).unwrap();
        let tc = Vector2::new(0.1, 0.6);
        let n = sphere.texcoord_to_normal(&tc);
        assert!((n.norm() - 1.0).abs() < 1e-12);

        let p = sphere.texcoord_to_world(&tc);
        assert!(((p - sphere.center()) / 3.0 - n).norm() < 1e-12);
    }

    #[test]
    fn test_sphere_key_points() {
        let sphere = Sphere::new(1.0, Vector3::new(0.0, 0.0, 2.0)).unwrap();
        let kp = sphere.key_points();

        assert_eq!(kp.len(), 4);
        assert_eq!(kp["center"], Vector3::new(0.0, 0.0, 2.0));
        assert!((kp["(0,0)"] - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-12);
        assert!((kp["(0,0.5)"] - Vector3::new(1.0, 0.0, 2.0)).norm() < 1e-12);
        assert!((kp["(0,1)"] - Vector3::new(0.0, 0.0, 3.0)).norm() < 1e-12);
    }

    #[test]
    fn test_sphere_rejects_bad_parameters() {
        let result = Sphere::new(-0.5, Vector3::zeros());
        assert_eq!(result.unwrap_err(), ConfigurationError::NonPositiveRadius(-0.5));

        let result = Sphere::new(1.0, Vector3::new(0.0, f64::NAN, 0.0));
        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::NonFinite { field: "center" }
        );
    }

    #[test]
    fn test_sphere_mesh_layout() {
        let sphere = Sphere::new(1.0, Vector3::zeros())
            .unwrap()
            .with_subdivisions(4, 3)
            .unwrap();
        let mesh = sphere.make_mesh(false);

        assert!(mesh.is_well_formed());
        assert_eq!(mesh.vertex_count(), 3 * 2 * 5);
        assert_eq!(mesh.primitives.len(), 3);
        assert_eq!(mesh.colors, ColorBinding::Overall([1.0, 1.0, 1.0, 1.0]));

        for (band, primitive) in mesh.primitives.iter().enumerate() {
            assert_eq!(primitive.mode, PrimitiveMode::QuadStrip);
            let first = (band * 10) as u32;
            let expected: Vec<u32> = (first..first + 10).collect();
            assert_eq!(primitive.indices, PrimitiveIndices::Elements(expected));
        }

        // upper ring vertex precedes the lower one
        assert!((mesh.texcoords[0] - Vector2::new(0.0, 1.0 / 3.0)).norm() < 1e-12);
        assert!((mesh.texcoords[1] - Vector2::new(0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_sphere_mesh_default_size() {
        let mesh = Sphere::new(1.0, Vector3::zeros()).unwrap().make_mesh(true);
        let expected = 2 * 21 * 12;
        assert_eq!(mesh.vertex_count(), expected);
        assert_eq!(mesh.primitives.len(), 12);
        assert!(matches!(&mesh.colors, ColorBinding::PerVertex(c) if c.len() == expected));
    }

    #[test]
    fn test_sphere_zero_subdivisions() {
        let sphere = Sphere::new(1.0, Vector3::zeros()).unwrap();
        assert!(sphere.clone().with_subdivisions(0, 4).is_err());
        assert_eq!(
            sphere.with_subdivisions(4, 0).unwrap_err(),
            ConfigurationError::ZeroSubdivision { field: "n_el" }
        );
    }
}
