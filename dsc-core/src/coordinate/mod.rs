//! Coordinate frame helpers shared by surface models and the camera
//!
//! Matrices returned by this crate follow the row-vector convention: a
//! homogeneous row point `p` maps to `p * M`.

mod transforms;

pub use transforms::{
    embed_rotation, look_at_basis, rotation_from_z, transform_direction, transform_point,
};
