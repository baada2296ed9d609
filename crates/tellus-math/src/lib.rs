//! Geometric primitives for terrain culling: half-space planes, view frustums, and AABBs.

mod aabb;
mod frustum;
mod plane;

pub use aabb::Aabb;
pub use frustum::Frustum;
pub use plane::Plane;
