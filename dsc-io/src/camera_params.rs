use std::path::Path;

use dsc_core::{CalibratedCamera, Vec3Config};
use serde::{Deserialize, Serialize};

use crate::error::{IoError, Result};

/// On-disk form of a camera calibration
///
/// Either parameter block may be absent; the camera is then left
/// uncalibrated in that respect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraDocument {
    pub width: u32,
    pub height: u32,
    /// Whether image rows grow upwards; always written out explicitly
    pub y_up: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intrinsic: Option<IntrinsicDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extrinsic: Option<ExtrinsicDocument>,
}

/// The five free entries of the intrinsic matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntrinsicDocument {
    #[serde(rename = "K00")]
    pub k00: f64,
    #[serde(rename = "K01")]
    pub k01: f64,
    #[serde(rename = "K02")]
    pub k02: f64,
    #[serde(rename = "K11")]
    pub k11: f64,
    #[serde(rename = "K12")]
    pub k12: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtrinsicDocument {
    pub eye: Vec3Config,
    pub center: Vec3Config,
    pub up: Vec3Config,
}

impl CameraDocument {
    /// Capture whatever parameters `camera` currently holds
    pub fn from_camera(camera: &CalibratedCamera) -> Self {
        let intrinsic = camera.intrinsics().ok().map(|k| {
            let [k00, k01, k02, k11, k12] = k.to_array();
            IntrinsicDocument {
                k00,
                k01,
                k02,
                k11,
                k12,
            }
        });
        let extrinsic = camera.extrinsics().ok().map(|e| ExtrinsicDocument {
            eye: e.eye().into(),
            center: e.center().into(),
            up: e.up().into(),
        });

        Self {
            width: camera.width(),
            height: camera.height(),
            y_up: camera.y_up(),
            intrinsic,
            extrinsic,
        }
    }

    /// Build the camera, validating every parameter block
    pub fn into_camera(self) -> Result<CalibratedCamera> {
        let mut camera = CalibratedCamera::new(self.width, self.height, self.y_up)?;
        if let Some(k) = self.intrinsic {
            camera.set_intrinsic(k.k00, k.k01, k.k02, k.k11, k.k12)?;
        }
        if let Some(e) = self.extrinsic {
            camera.set_extrinsic(e.eye.into(), e.center.into(), e.up.into())?;
        }
        Ok(camera)
    }
}

/// Parse a camera calibration document
pub fn parse_camera(text: &str) -> Result<CalibratedCamera> {
    let document: CameraDocument = serde_json::from_str(text)?;
    document.into_camera()
}

/// Read a camera calibration document from disk
pub fn load_camera<P: AsRef<Path>>(path: P) -> Result<CalibratedCamera> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let camera = parse_camera(&text)?;

    tracing::info!(
        path = %path.display(),
        intrinsic = camera.is_intrinsic_valid(),
        extrinsic = camera.is_extrinsic_valid(),
        "loaded camera calibration"
    );
    Ok(camera)
}

/// Write `camera` as a calibration document
pub fn save_camera<P: AsRef<Path>>(path: P, camera: &CalibratedCamera) -> Result<()> {
    let path = path.as_ref();
    let text = serde_json::to_string_pretty(&CameraDocument::from_camera(camera))?;
    std::fs::write(path, text).map_err(|source| IoError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Calibration of the projector rig used during development
pub fn reference_camera() -> Result<CalibratedCamera> {
    CameraDocument {
        width: 752,
        height: 480,
        y_up: false,
        intrinsic: Some(IntrinsicDocument {
            k00: 604.39963621,
            k01: -7.33740535,
            k02: 356.25995387,
            k11: 578.11306274,
            k12: 257.36283644,
        }),
        extrinsic: Some(ExtrinsicDocument {
            eye: Vec3Config::new(-0.708471152493, -1.4184181224, 1.30394218099),
            center: Vec3Config::new(-0.280027771115, -0.647764804425, 0.832211609118),
            up: Vec3Config::new(-0.197303085284, -0.429683565144, -0.881160329556),
        }),
    }
    .into_camera()
}
