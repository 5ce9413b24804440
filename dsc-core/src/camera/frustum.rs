use nalgebra::{Matrix4, Vector3};

use crate::coordinate::transform_point;
use crate::surface::{Primitive, PrimitiveMode, Rgba};

/// Wireframe of a camera's viewing volume for visual placement checks
///
/// Vertex 0 is the camera center, 1..=4 the near plane corners and 5..=8 the
/// far plane corners (bottom-left, bottom-right, top-right, top-left), all
/// in the camera frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrustumWireframe {
    pub vertices: Vec<Vector3<f64>>,
    pub color: Rgba,
    pub primitives: Vec<Primitive>,
    /// Places the camera-frame vertices in the world
    pub camera_to_world: Matrix4<f64>,
    pub near: f64,
    pub far: f64,
}

impl FrustumWireframe {
    /// Recover the clip planes and side planes from a row-vector convention
    /// perspective matrix
    pub(crate) fn from_projection(proj: &Matrix4<f64>, camera_to_world: Matrix4<f64>) -> Self {
        let near = proj[(3, 2)] / (proj[(2, 2)] - 1.0);
        let far = proj[(3, 2)] / (1.0 + proj[(2, 2)]);

        let left = |d: f64| d * (proj[(2, 0)] - 1.0) / proj[(0, 0)];
        let right = |d: f64| d * (1.0 + proj[(2, 0)]) / proj[(0, 0)];
        let top = |d: f64| d * (1.0 + proj[(2, 1)]) / proj[(1, 1)];
        let bottom = |d: f64| d * (proj[(2, 1)] - 1.0) / proj[(1, 1)];

        let mut vertices = Vec::with_capacity(9);
        vertices.push(Vector3::zeros());
        for d in [near, far] {
            vertices.push(Vector3::new(left(d), bottom(d), -d));
            vertices.push(Vector3::new(right(d), bottom(d), -d));
            vertices.push(Vector3::new(right(d), top(d), -d));
            vertices.push(Vector3::new(left(d), top(d), -d));
        }

        let primitives = vec![
            Primitive::elements(PrimitiveMode::Lines, vec![0, 5, 0, 6, 0, 7, 0, 8]),
            Primitive::elements(PrimitiveMode::LineLoop, vec![1, 2, 3, 4]),
            Primitive::elements(PrimitiveMode::LineLoop, vec![5, 6, 7, 8]),
        ];

        Self {
            vertices,
            color: [1.0, 1.0, 1.0, 1.0],
            primitives,
            camera_to_world,
            near,
            far,
        }
    }

    /// Vertices transformed into world space
    pub fn world_vertices(&self) -> Vec<Vector3<f64>> {
        self.vertices
            .iter()
            .map(|v| transform_point(v, &self.camera_to_world))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Symmetric frustum: 90 degree field of view, square viewport
    fn symmetric_projection(near: f64, far: f64) -> Matrix4<f64> {
        let depth = far - near;
        #[rustfmt::skip]
        let p = Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, -(far + near) / depth, -2.0 * far * near / depth,
            0.0, 0.0, -1.0, 0.0,
        );
        p.transpose()
    }

    #[test]
    fn test_frustum_recovers_clip_planes() {
        let f =
            FrustumWireframe::from_projection(&symmetric_projection(0.5, 5.0), Matrix4::identity());
        assert!((f.near - 0.5).abs() < 1e-12);
        assert!((f.far - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_frustum_corners() {
        let f =
            FrustumWireframe::from_projection(&symmetric_projection(1.0, 4.0), Matrix4::identity());
        assert_eq!(f.vertices.len(), 9);
        assert_eq!(f.vertices[0], Vector3::zeros());
        assert!((f.vertices[1] - Vector3::new(-1.0, -1.0, -1.0)).norm() < 1e-12);
        assert!((f.vertices[3] - Vector3::new(1.0, 1.0, -1.0)).norm() < 1e-12);
        assert!((f.vertices[7] - Vector3::new(4.0, 4.0, -4.0)).norm() < 1e-12);
        assert!((f.vertices[8] - Vector3::new(-4.0, 4.0, -4.0)).norm() < 1e-12);
    }

    #[test]
    fn test_frustum_primitives() {
        let f =
            FrustumWireframe::from_projection(&symmetric_projection(1.0, 4.0), Matrix4::identity());
        assert_eq!(f.primitives.len(), 3);
        assert_eq!(f.primitives[0].mode, PrimitiveMode::Lines);
        assert_eq!(f.primitives[0].index_list(), vec![0, 5, 0, 6, 0, 7, 0, 8]);
        assert_eq!(f.primitives[2].index_list(), vec![5, 6, 7, 8]);
        assert_eq!(f.color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_frustum_world_vertices_translate() {
        let mut to_world = Matrix4::identity();
        to_world[(3, 0)] = 10.0;
        let f = FrustumWireframe::from_projection(&symmetric_projection(1.0, 4.0), to_world);
        let world = f.world_vertices();
        assert_eq!(world[0], Vector3::new(10.0, 0.0, 0.0));
        assert!((world[1] - Vector3::new(9.0, -1.0, -1.0)).norm() < 1e-12);
    }
}
