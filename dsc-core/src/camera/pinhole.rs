use nalgebra::{Matrix3, Matrix4, Vector2, Vector3};

use super::{Extrinsics, FrustumWireframe, Intrinsics, Ray};
use crate::coordinate::transform_direction;
use crate::error::{DscError, InvalidStateError, Result};

/// Pinhole camera calibrated against a display surface
///
/// Image size and orientation are fixed at construction. Intrinsic and
/// extrinsic parameters are each installed once; queries that need them
/// fail with [`InvalidStateError`] until then.
///
/// Camera-frame coordinates look down -Z. Returned 4x4 matrices use the
/// row-vector convention (`p' = p * M`).
#[derive(Debug, Clone)]
pub struct CalibratedCamera {
    width: u32,
    height: u32,
    y_up: bool,
    intrinsics: Option<Intrinsics>,
    extrinsics: Option<Extrinsics>,
}

impl CalibratedCamera {
    /// Create an uncalibrated camera for a `width` x `height` image
    ///
    /// `y_up` tells whether image rows grow upwards.
    pub fn new(width: u32, height: u32, y_up: bool) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(DscError::InvalidInput(format!(
                "image size must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            y_up,
            intrinsics: None,
            extrinsics: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get image dimensions (width, height)
    pub fn image_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn y_up(&self) -> bool {
        self.y_up
    }

    /// Install intrinsics from the five free entries of K
    ///
    /// Nothing is stored if validation fails.
    pub fn set_intrinsic(
        &mut self,
        k00: f64,
        k01: f64,
        k02: f64,
        k11: f64,
        k12: f64,
    ) -> Result<()> {
        if self.intrinsics.is_some() {
            return Err(InvalidStateError::IntrinsicsAlreadySet.into());
        }
        let intrinsics = Intrinsics::new(k00, k01, k02, k11, k12)?;
        self.install_intrinsics(intrinsics)
    }

    /// Install already validated intrinsics
    pub fn install_intrinsics(&mut self, intrinsics: Intrinsics) -> Result<()> {
        if self.intrinsics.is_some() {
            return Err(InvalidStateError::IntrinsicsAlreadySet.into());
        }
        tracing::debug!(k = ?intrinsics.to_array(), "camera intrinsics set");
        self.intrinsics = Some(intrinsics);
        Ok(())
    }

    /// Install the pose; `up` is orthonormalized against the view direction
    pub fn set_extrinsic(
        &mut self,
        eye: Vector3<f64>,
        center: Vector3<f64>,
        up: Vector3<f64>,
    ) -> Result<()> {
        if self.extrinsics.is_some() {
            return Err(InvalidStateError::ExtrinsicsAlreadySet.into());
        }
        let extrinsics = Extrinsics::new(eye, center, up)?;
        self.install_extrinsics(extrinsics)
    }

    /// Install an already validated pose
    pub fn install_extrinsics(&mut self, extrinsics: Extrinsics) -> Result<()> {
        if self.extrinsics.is_some() {
            return Err(InvalidStateError::ExtrinsicsAlreadySet.into());
        }
        tracing::debug!(
            eye = ?extrinsics.eye(),
            center = ?extrinsics.center(),
            "camera extrinsics set"
        );
        self.extrinsics = Some(extrinsics);
        Ok(())
    }

    pub fn is_intrinsic_valid(&self) -> bool {
        self.intrinsics.is_some()
    }

    pub fn is_extrinsic_valid(&self) -> bool {
        self.extrinsics.is_some()
    }

    pub fn intrinsics(&self) -> Result<&Intrinsics> {
        self.intrinsics
            .as_ref()
            .ok_or_else(|| InvalidStateError::IntrinsicsNotSet.into())
    }

    pub fn extrinsics(&self) -> Result<&Extrinsics> {
        self.extrinsics
            .as_ref()
            .ok_or_else(|| InvalidStateError::ExtrinsicsNotSet.into())
    }

    pub fn intrinsic_matrix(&self) -> Result<Matrix3<f64>> {
        Ok(self.intrinsics()?.matrix())
    }

    pub fn eye(&self) -> Result<Vector3<f64>> {
        Ok(self.extrinsics()?.eye())
    }

    pub fn center(&self) -> Result<Vector3<f64>> {
        Ok(self.extrinsics()?.center())
    }

    pub fn up(&self) -> Result<Vector3<f64>> {
        Ok(self.extrinsics()?.up())
    }

    /// Perspective matrix matching the intrinsics on this image size
    pub fn projection(&self, znear: f64, zfar: f64) -> Result<Matrix4<f64>> {
        self.intrinsics()?
            .gl_projection(self.width, self.height, self.y_up, znear, zfar)
    }

    /// Look-at view matrix for the pose
    pub fn view(&self) -> Result<Matrix4<f64>> {
        Ok(self.extrinsics()?.view())
    }

    /// Rotation part of the look-at basis
    pub fn rotation(&self) -> Result<Matrix4<f64>> {
        Ok(self.extrinsics()?.rotation())
    }

    pub fn rotation_inverse(&self) -> Result<Matrix4<f64>> {
        Ok(self.extrinsics()?.rotation_inverse())
    }

    /// Eye position in the camera basis, negated
    pub fn translation(&self) -> Result<Vector3<f64>> {
        Ok(self.extrinsics()?.translation())
    }

    /// Direction through pixel `uv` in the camera frame, scaled to `distance`
    ///
    /// Skew is ignored. Lens distortion is not modelled, so `distorted`
    /// pixels are rejected.
    pub fn project_pixel_to_camera_frame(
        &self,
        uv: &Vector2<f64>,
        distorted: bool,
        distance: f64,
    ) -> Result<Vector3<f64>> {
        let intrinsics = self.intrinsics()?;
        if distorted {
            return Err(DscError::NotImplemented(
                "lens distortion model".to_string(),
            ));
        }

        let (fx, fy) = intrinsics.focal_length();
        let (cx, cy) = intrinsics.principal_point();

        let x = (uv.x - cx) / fx;
        let y = (uv.y - cy) / fy;
        // image space looks down +Z, the camera frame down -Z
        let z = -1.0;

        Ok(Vector3::new(x, y, z).normalize() * distance)
    }

    /// Pixel that [`Self::project_pixel_to_camera_frame`] maps onto the ray
    /// through `xyz_c`
    ///
    /// Returns `None` for points not in front of the camera.
    pub fn project_camera_frame_to_pixel(
        &self,
        xyz_c: &Vector3<f64>,
    ) -> Result<Option<Vector2<f64>>> {
        let intrinsics = self.intrinsics()?;
        if xyz_c.z >= 0.0 {
            return Ok(None);
        }

        let (fx, fy) = intrinsics.focal_length();
        let (cx, cy) = intrinsics.principal_point();
        let depth = -xyz_c.z;

        Ok(Some(Vector2::new(
            fx * xyz_c.x / depth + cx,
            fy * xyz_c.y / depth + cy,
        )))
    }

    /// Map a camera-frame point back to world coordinates
    pub fn project_camera_frame_to_3d(&self, xyz_c: &Vector3<f64>) -> Result<Vector3<f64>> {
        Ok(self.extrinsics()?.camera_to_world_point(xyz_c))
    }

    /// Map a world point into the camera frame
    pub fn project_3d_to_camera_frame(&self, world: &Vector3<f64>) -> Result<Vector3<f64>> {
        Ok(self.extrinsics()?.world_to_camera_point(world))
    }

    /// World-space ray from the eye through pixel `uv`
    pub fn pixel_ray(&self, uv: &Vector2<f64>) -> Result<Ray> {
        let extrinsics = self.extrinsics()?;
        let dir_c = self.project_pixel_to_camera_frame(uv, false, 1.0)?;

        Ok(Ray {
            origin: extrinsics.eye(),
            direction: transform_direction(&dir_c, &extrinsics.rotation_inverse()),
        })
    }

    /// Frustum wireframe reaching from `0.1 * size` to `size`
    pub fn make_rendering(&self, size: f64) -> Result<FrustumWireframe> {
        let extrinsics = self.extrinsics()?;
        let proj = self.projection(size * 0.1, size)?;
        Ok(FrustumWireframe::from_projection(
            &proj,
            extrinsics.camera_to_world(),
        ))
    }
}
