use nalgebra::{Matrix3, Matrix4};

use crate::error::{DscError, Result};

// Skew above this fraction of the focal length is logged as suspicious.
const SKEW_WARN_RATIO: f64 = 0.1;

/// Pinhole intrinsic matrix, upper triangular and normalized so `K22 = 1`
///
/// ```text
/// | K00 K01 K02 |
/// |  0  K11 K12 |
/// |  0   0   1  |
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intrinsics {
    k00: f64,
    k01: f64,
    k02: f64,
    k11: f64,
    k12: f64,
}

impl Intrinsics {
    /// Validate and store the five free entries of K
    ///
    /// All entries must be finite and both focal lengths positive.
    pub fn new(k00: f64, k01: f64, k02: f64, k11: f64, k12: f64) -> Result<Self> {
        if ![k00, k01, k02, k11, k12].iter().all(|k| k.is_finite()) {
            return Err(DscError::InvalidInput(
                "intrinsic parameters must be finite".to_string(),
            ));
        }
        if k00 <= 0.0 || k11 <= 0.0 {
            return Err(DscError::InvalidInput(format!(
                "focal lengths must be positive (K00={}, K11={})",
                k00, k11
            )));
        }
        if k01.abs() > SKEW_WARN_RATIO * k00 {
            tracing::warn!(k00, k01, "intrinsic skew is large relative to focal length");
        }

        Ok(Self {
            k00,
            k01,
            k02,
            k11,
            k12,
        })
    }

    /// The full 3x3 K
    pub fn matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.k00, self.k01, self.k02, //
            0.0, self.k11, self.k12, //
            0.0, 0.0, 1.0,
        )
    }

    /// Get focal lengths (K00, K11)
    pub fn focal_length(&self) -> (f64, f64) {
        (self.k00, self.k11)
    }

    /// Get principal point (K02, K12)
    pub fn principal_point(&self) -> (f64, f64) {
        (self.k02, self.k12)
    }

    pub fn skew(&self) -> f64 {
        self.k01
    }

    /// The five free entries in `(K00, K01, K02, K11, K12)` order
    pub fn to_array(&self) -> [f64; 5] {
        [self.k00, self.k01, self.k02, self.k11, self.k12]
    }

    /// OpenGL-style perspective matrix reproducing this pinhole on a
    /// `width` x `height` viewport
    ///
    /// `y_up` selects whether image rows grow upwards. The result is in
    /// row-vector convention, i.e. the transpose of the textbook
    /// column-vector matrix.
    pub fn gl_projection(
        &self,
        width: u32,
        height: u32,
        y_up: bool,
        znear: f64,
        zfar: f64,
    ) -> Result<Matrix4<f64>> {
        if !(znear > 0.0 && zfar > znear && zfar.is_finite()) {
            return Err(DscError::InvalidInput(format!(
                "clip planes must satisfy 0 < znear < zfar (znear={}, zfar={})",
                znear, zfar
            )));
        }

        let depth = zfar - znear;
        let q = -(zfar + znear) / depth;
        let qn = -2.0 * (zfar * znear) / depth;

        let w = f64::from(width);
        let h = f64::from(height);

        let (fy, cy) = if y_up {
            (-2.0 * self.k11 / h, (-2.0 * self.k12 + h) / h)
        } else {
            (2.0 * self.k11 / h, (2.0 * self.k12 - h) / h)
        };

        #[rustfmt::skip]
        let p = Matrix4::new(
            2.0 * self.k00 / w, -2.0 * self.k01 / w, (-2.0 * self.k02 + w) / w, 0.0,
            0.0,                fy,                  cy,                        0.0,
            0.0,                0.0,                 q,                         qn,
            0.0,                0.0,                 -1.0,                      0.0,
        );

        Ok(p.transpose())
    }
}
