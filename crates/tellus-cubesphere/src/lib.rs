//! Cube-sphere geometry: the six planet faces, per-face sampling bases,
//! and the warps between the cube surface and the sphere surface.
//!
//! Two pure mappings live here:
//! - [`map_to_sphere`]: cube face point → sphere point, used when sampling
//!   the height field so noise is evaluated on the sphere.
//! - [`map_sphere_to_cube`]: sphere point → cube surface point, used to
//!   reproject the camera into a face's local space for LOD selection.
//!
//! They are compatible approximations of the same geometric relationship,
//! not a bit-exact algebraic pair.

mod basis;
mod face;
mod inverse;
mod projection;

pub use basis::FaceBasis;
pub use face::Face;
pub use inverse::map_sphere_to_cube;
pub use projection::map_to_sphere;
