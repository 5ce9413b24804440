//! Calibrated pinhole camera and its derived matrices

mod extrinsics;
mod frustum;
mod intrinsics;
mod pinhole;

pub use extrinsics::Extrinsics;
pub use frustum::FrustumWireframe;
pub use intrinsics::Intrinsics;
pub use pinhole::CalibratedCamera;

use nalgebra::Vector3;

/// Half-line in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vector3<f64>,
    /// Unit direction
    pub direction: Vector3<f64>,
}

impl Ray {
    /// Point at parameter `t` along the ray
    pub fn at(&self, t: f64) -> Vector3<f64> {
        self.origin + self.direction * t
    }
}
