//! Half-space plane with signed point-distance queries.

use glam::DVec3;

/// A plane in Hessian normal form: `normal · p + d = 0`.
///
/// The normal is unit length for any non-degenerate plane. A plane built
/// from a zero-length normal stays degenerate and reports a signed distance
/// of zero for every point, so it never classifies anything as outside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    normal: DVec3,
    d: f64,
}

impl Plane {
    /// Construct a plane passing through `point` with the given `normal`.
    ///
    /// The normal is normalized; points on the side the normal faces get a
    /// positive signed distance.
    #[must_use]
    pub fn from_point_normal(point: DVec3, normal: DVec3) -> Self {
        let len = normal.length();
        if len < f64::EPSILON {
            return Self::degenerate();
        }
        let n = normal / len;
        Self {
            normal: n,
            d: -n.dot(point),
        }
    }

    /// Construct a plane from the four raw coefficients `ax + by + cz + d = 0`.
    ///
    /// The coefficients are normalized by the length of `(a, b, c)` on
    /// construction.
    #[must_use]
    pub fn from_coefficients(a: f64, b: f64, c: f64, d: f64) -> Self {
        let normal = DVec3::new(a, b, c);
        let len = normal.length();
        if len < f64::EPSILON {
            return Self::degenerate();
        }
        Self {
            normal: normal / len,
            d: d / len,
        }
    }

    fn degenerate() -> Self {
        Self {
            normal: DVec3::ZERO,
            d: 0.0,
        }
    }

    /// Whether this plane was built from a zero-length normal.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.normal == DVec3::ZERO
    }

    /// Signed distance from `point` to the plane.
    ///
    /// Positive on the side the normal faces, negative on the other side,
    /// zero for a degenerate plane (fail open: a degenerate plane never
    /// places a point outside).
    #[must_use]
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) + self.d
    }

    /// The unit normal, or zero for a degenerate plane.
    #[must_use]
    pub fn normal(&self) -> DVec3 {
        self.normal
    }
}
