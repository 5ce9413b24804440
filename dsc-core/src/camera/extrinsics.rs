use nalgebra::{Matrix3, Matrix4, RowVector4, Vector3};

use crate::coordinate::{embed_rotation, look_at_basis, transform_direction, transform_point};
use crate::error::{DscError, Result};

/// Camera pose given as eye position, look-at target and up hint
///
/// `up` need not be unit length or orthogonal to the viewing direction;
/// the orthonormal basis is derived once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extrinsics {
    eye: Vector3<f64>,
    center: Vector3<f64>,
    up: Vector3<f64>,
    basis: Matrix3<f64>,
}

impl Extrinsics {
    pub fn new(eye: Vector3<f64>, center: Vector3<f64>, up: Vector3<f64>) -> Result<Self> {
        for (name, v) in [("eye", &eye), ("center", &center), ("up", &up)] {
            if !v.iter().all(|c| c.is_finite()) {
                return Err(DscError::InvalidInput(format!(
                    "extrinsic `{}` must be finite",
                    name
                )));
            }
        }
        let basis = look_at_basis(&eye, &center, &up)?;

        Ok(Self {
            eye,
            center,
            up,
            basis,
        })
    }

    pub fn eye(&self) -> Vector3<f64> {
        self.eye
    }

    pub fn center(&self) -> Vector3<f64> {
        self.center
    }

    pub fn up(&self) -> Vector3<f64> {
        self.up
    }

    /// Look-at rotation embedded in a 4x4 matrix
    pub fn rotation(&self) -> Matrix4<f64> {
        embed_rotation(&self.basis)
    }

    /// Inverse of [`Extrinsics::rotation`]; the basis is orthonormal so this
    /// is its transpose.
    pub fn rotation_inverse(&self) -> Matrix4<f64> {
        embed_rotation(&self.basis.transpose())
    }

    /// Eye position expressed in the camera basis, negated
    pub fn translation(&self) -> Vector3<f64> {
        let h = RowVector4::new(self.eye.x, self.eye.y, self.eye.z, 1.0) * self.rotation();
        debug_assert_eq!(h[3], 1.0);
        -Vector3::new(h[0], h[1], h[2])
    }

    /// World to camera transform
    pub fn view(&self) -> Matrix4<f64> {
        let mut view = self.rotation();
        view.fixed_view_mut::<1, 3>(3, 0)
            .copy_from(&self.translation().transpose());
        view
    }

    /// Camera to world transform, the inverse of [`Extrinsics::view`]
    pub fn camera_to_world(&self) -> Matrix4<f64> {
        let mut m = self.rotation_inverse();
        m.fixed_view_mut::<1, 3>(3, 0).copy_from(&self.eye.transpose());
        m
    }

    pub fn world_to_camera_point(&self, world: &Vector3<f64>) -> Vector3<f64> {
        transform_point(world, &self.view())
    }

    pub fn camera_to_world_point(&self, xyz_c: &Vector3<f64>) -> Vector3<f64> {
        transform_direction(&(xyz_c - self.translation()), &self.rotation_inverse())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn pose() -> Extrinsics {
        Extrinsics::new(
            Vector3::new(-0.7, -1.4, 1.3),
            Vector3::new(-0.28, -0.65, 0.83),
            Vector3::new(-0.2, -0.43, -0.88),
        )
        .unwrap()
    }

    #[test]
    fn test_view_matches_nalgebra_look_at() {
        let e = pose();
        let expected = Matrix4::look_at_rh(
            &Point3::from(e.eye()),
            &Point3::from(e.center()),
            &e.up(),
        );
        assert_relative_eq!(e.view(), expected.transpose(), epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_inverse_is_inverse() {
        let e = pose();
        let product = e.rotation() * e.rotation_inverse();
        assert_relative_eq!(product, Matrix4::identity(), epsilon = 1e-12);

        let inverted = e.rotation().try_inverse().unwrap();
        assert_relative_eq!(inverted, e.rotation_inverse(), epsilon = 1e-12);
    }

    #[test]
    fn test_eye_maps_to_camera_origin() {
        let e = pose();
        let origin = e.world_to_camera_point(&e.eye());
        assert!(origin.norm() < 1e-12);
    }

    #[test]
    fn test_center_lies_on_negative_z() {
        let e = pose();
        let c = e.world_to_camera_point(&e.center());
        let dist = (e.center() - e.eye()).norm();
        assert_relative_eq!(c, Vector3::new(0.0, 0.0, -dist), epsilon = 1e-12);
    }

    #[test]
    fn test_camera_to_world_inverts_view() {
        let e = pose();
        let product = e.view() * e.camera_to_world();
        assert_relative_eq!(product, Matrix4::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_degenerate_pose() {
        let eye = Vector3::new(0.0, 0.0, 0.0);
        assert!(Extrinsics::new(eye, eye, Vector3::z()).is_err());
        assert!(Extrinsics::new(eye, Vector3::new(0.0, 0.0, -1.0), Vector3::z()).is_err());

        let result = Extrinsics::new(eye, Vector3::x(), Vector3::new(0.0, f64::NAN, 1.0));
        assert!(matches!(result, Err(DscError::InvalidInput(_))));
    }
}
