//! The six-face planet aggregate.
//!
//! [`Planet`] owns one [`tellus_lod::QuadTree`] per cube face, places them
//! in world space with the face model transforms, runs per-frame LOD
//! selection across all faces, and supports seeded regeneration and
//! ray picking against the planet sphere.

mod planet;
mod ray;

pub use planet::Planet;
pub use ray::Ray;
