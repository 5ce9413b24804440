use std::f64::consts::PI;

use nalgebra::{Matrix3, Matrix4, RowVector4, UnitQuaternion, Vector3};

use crate::error::{DscError, Result};

// Below this length a vector is treated as zero when building a frame.
const DEGENERATE_LENGTH: f64 = 1e-12;

// `1 + cos(angle)` below this counts as a full u-turn.
const ANTIPARALLEL_THRESHOLD: f64 = 1e-7;

/// Rotation taking the canonical +Z axis onto `direction`
///
/// `direction` does not need to be unit length. When it points back along
/// -Z the result is a half turn about +Y, the axis orthogonal to +Z picked
/// by the scene graph's rotate-between rule.
pub fn rotation_from_z(direction: &Vector3<f64>) -> Result<UnitQuaternion<f64>> {
    let len = direction.norm();
    if !len.is_finite() || len < DEGENERATE_LENGTH {
        return Err(DscError::Numerical(
            "cannot align +Z with a zero-length direction".to_string(),
        ));
    }

    let half_turn = || UnitQuaternion::from_axis_angle(&Vector3::y_axis(), PI);
    if 1.0 + direction.z / len < ANTIPARALLEL_THRESHOLD {
        return Ok(half_turn());
    }
    Ok(UnitQuaternion::rotation_between(&Vector3::z(), direction).unwrap_or_else(half_turn))
}

/// Orthonormal look-at basis for a camera at `eye` looking at `center`
///
/// Columns are (side, true up, -forward), so a row point `p` expressed in
/// world axes maps to camera axes as `p * basis`.
pub fn look_at_basis(
    eye: &Vector3<f64>,
    center: &Vector3<f64>,
    up: &Vector3<f64>,
) -> Result<Matrix3<f64>> {
    let look = center - eye;
    if look.norm() < DEGENERATE_LENGTH {
        return Err(DscError::InvalidInput(
            "eye and center coincide".to_string(),
        ));
    }
    let forward = look.normalize();

    let side = forward.cross(up);
    if side.norm() < DEGENERATE_LENGTH {
        return Err(DscError::InvalidInput(
            "up vector is parallel to the viewing direction".to_string(),
        ));
    }
    let side = side.normalize();
    let true_up = side.cross(&forward).normalize();

    Ok(Matrix3::from_columns(&[side, true_up, -forward]))
}

/// Embed a 3x3 linear part into a homogeneous 4x4 matrix
pub fn embed_rotation(rotation: &Matrix3<f64>) -> Matrix4<f64> {
    let mut m = Matrix4::identity();
    m.fixed_view_mut::<3, 3>(0, 0).copy_from(rotation);
    m
}

/// Apply a row-vector convention matrix to a point, dividing by w
pub fn transform_point(point: &Vector3<f64>, m: &Matrix4<f64>) -> Vector3<f64> {
    let h = RowVector4::new(point.x, point.y, point.z, 1.0) * m;
    Vector3::new(h[0] / h[3], h[1] / h[3], h[2] / h[3])
}

/// Apply only the linear part of a row-vector convention matrix
pub fn transform_direction(direction: &Vector3<f64>, m: &Matrix4<f64>) -> Vector3<f64> {
    let h = RowVector4::new(direction.x, direction.y, direction.z, 0.0) * m;
    Vector3::new(h[0], h[1], h[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_from_z_identity() {
        let q = rotation_from_z(&Vector3::new(0.0, 0.0, 3.0)).unwrap();
        let v = q * Vector3::new(1.0, 2.0, 3.0);
        assert!((v - Vector3::new(1.0, 2.0, 3.0)).norm() < 1e-12);
    }

    #[test]
    fn test_rotation_from_z_to_x() {
        let q = rotation_from_z(&Vector3::new(2.0, 0.0, 0.0)).unwrap();
        let v = q * Vector3::z();
        assert!((v - Vector3::x()).norm() < 1e-12);
    }

    #[test]
    fn test_rotation_from_z_antiparallel() {
        let q = rotation_from_z(&Vector3::new(0.0, 0.0, -1.0)).unwrap();
        let v = q * Vector3::z();
        assert!((v + Vector3::z()).norm() < 1e-12);

        // half turn about +Y: x flips, y is kept
        assert!((q * Vector3::x() + Vector3::x()).norm() < 1e-12);
        assert!((q * Vector3::y() - Vector3::y()).norm() < 1e-12);
    }

    #[test]
    fn test_rotation_from_z_nearly_antiparallel() {
        let q = rotation_from_z(&Vector3::new(1e-5, 0.0, -1.0)).unwrap();
        assert!((q * Vector3::y() - Vector3::y()).norm() < 1e-12);
    }

    #[test]
    fn test_rotation_from_z_zero_length() {
        let result = rotation_from_z(&Vector3::zeros());
        assert!(matches!(result, Err(DscError::Numerical(_))));
    }

    #[test]
    fn test_look_at_basis_orthonormal() {
        let eye = Vector3::new(1.0, 2.0, 3.0);
        let center = Vector3::new(-1.0, 0.5, 0.0);
        let up = Vector3::new(0.2, 0.1, 1.0);
        let basis = look_at_basis(&eye, &center, &up).unwrap();

        let should_be_identity = basis.transpose() * basis;
        assert!((should_be_identity - Matrix3::identity()).norm() < 1e-12);
        assert!((basis.determinant() - 1.0).abs() < 1e-12);

        // third column is minus the viewing direction
        let forward = (center - eye).normalize();
        assert!((basis.column(2) + forward).norm() < 1e-12);
    }

    #[test]
    fn test_look_at_basis_degenerate() {
        let eye = Vector3::new(1.0, 1.0, 1.0);
        assert!(look_at_basis(&eye, &eye, &Vector3::z()).is_err());

        let center = Vector3::new(1.0, 1.0, 5.0);
        let result = look_at_basis(&eye, &center, &Vector3::z());
        assert!(matches!(result, Err(DscError::InvalidInput(_))));
    }

    #[test]
    fn test_transform_point_row_convention() {
        let mut m = Matrix4::identity();
        m[(3, 0)] = 1.0;
        m[(3, 1)] = -2.0;
        m[(3, 2)] = 0.5;

        let p = transform_point(&Vector3::new(1.0, 1.0, 1.0), &m);
        assert!((p - Vector3::new(2.0, -1.0, 1.5)).norm() < 1e-12);

        // directions ignore the translation row
        let d = transform_direction(&Vector3::new(1.0, 1.0, 1.0), &m);
        assert!((d - Vector3::new(1.0, 1.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_embed_rotation() {
        let r = Matrix3::new(0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0);
        let m = embed_rotation(&r);
        assert_eq!(m[(0, 1)], -1.0);
        assert_eq!(m[(1, 0)], 1.0);
        assert_eq!(m[(3, 3)], 1.0);
        assert_eq!(m[(3, 0)], 0.0);
        assert_eq!(m[(0, 3)], 0.0);
    }
}
