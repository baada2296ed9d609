//! View frustum extracted from a view-projection matrix.

use glam::{DMat4, DVec3};

use crate::Plane;

/// A view frustum as six inward-facing planes.
///
/// Planes are extracted from `proj * view` with the Gribb/Hartmann row
/// method. Degenerate input matrices produce degenerate planes, which fail
/// open: they never cull (see [`Plane::signed_distance`]).
#[derive(Clone, Copy, Debug)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Frustum {
    /// Build a frustum from separate view and projection matrices.
    #[must_use]
    pub fn new(view: &DMat4, proj: &DMat4) -> Self {
        Self::from_view_proj(&(*proj * *view))
    }

    /// Build a frustum from a combined view-projection matrix.
    #[must_use]
    pub fn from_view_proj(mvp: &DMat4) -> Self {
        let r0 = mvp.row(0);
        let r1 = mvp.row(1);
        let r2 = mvp.row(2);
        let r3 = mvp.row(3);

        let rows = [
            r3 + r0, // left
            r3 - r0, // right
            r3 + r1, // bottom
            r3 - r1, // top
            r2 + r3, // near
            r3 - r2, // far
        ];

        Self {
            planes: rows.map(|r| Plane::from_coefficients(r.x, r.y, r.z, r.w)),
        }
    }

    /// Test a sphere against the frustum.
    ///
    /// Returns `false` iff the sphere lies entirely beyond some plane, i.e.
    /// the center's signed distance to that plane is less than `-radius`.
    /// A sphere touching or intersecting every plane's positive half-space
    /// is reported visible.
    #[must_use]
    pub fn test_sphere(&self, center: DVec3, radius: f64) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.signed_distance(center) >= -radius)
    }

    /// The six planes in left, right, bottom, top, near, far order.
    #[must_use]
    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }
}
