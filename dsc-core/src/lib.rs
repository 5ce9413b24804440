//! Display surface models and calibrated camera geometry for projecting
//! onto non-planar screens.

pub mod camera;
pub mod coordinate;
pub mod error;
pub mod surface;

pub use camera::{CalibratedCamera, Extrinsics, FrustumWireframe, Intrinsics, Ray};
pub use error::{ConfigurationError, DscError, InvalidStateError, Result};
pub use surface::{
    Cylinder, KeyPointMap, Mesh, Sphere, SurfaceCatalog, SurfaceConfig, SurfaceGeometry,
    SurfaceModel, Vec3Config,
};
