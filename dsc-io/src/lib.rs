//! Loading and saving calibration documents

pub mod camera_params;
pub mod error;
pub mod surface_config;

pub use camera_params::{
    load_camera, parse_camera, reference_camera, save_camera, CameraDocument, ExtrinsicDocument,
    IntrinsicDocument,
};
pub use error::{IoError, Result};
pub use surface_config::{load_catalog, load_surface_config, parse_surface_config};

// Re-export from dsc-core for convenience
pub use dsc_core::{CalibratedCamera, SurfaceCatalog, SurfaceConfig};
