//! Axis-aligned bounding box used for patch bounds in quadtree selection.

use glam::DVec3;

/// An axis-aligned bounding box given by its two opposite corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    min: DVec3,
    max: DVec3,
}

impl Aabb {
    /// Construct a box from two opposite corners.
    ///
    /// Components are sorted per axis, so the corners may be passed in any
    /// order.
    #[must_use]
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    #[must_use]
    pub fn min(&self) -> DVec3 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> DVec3 {
        self.max
    }

    /// Whether a sphere overlaps this box.
    ///
    /// Uses Arvo's method: accumulate the squared distance from the sphere
    /// center to the box along each axis and compare against the squared
    /// radius. Touching counts as overlapping.
    #[must_use]
    pub fn intersects_sphere(&self, center: DVec3, radius: f64) -> bool {
        let mut dist_sq = 0.0;
        for axis in 0..3 {
            let c = center[axis];
            if c < self.min[axis] {
                let d = self.min[axis] - c;
                dist_sq += d * d;
            } else if c > self.max[axis] {
                let d = c - self.max[axis];
                dist_sq += d * d;
            }
        }
        dist_sq <= radius * radius
    }

    /// Whether `point` lies inside or on the boundary of this box.
    #[must_use]
    pub fn contains_point(&self, point: DVec3) -> bool {
        (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }
}
