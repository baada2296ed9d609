//! Ray and ray-sphere intersection for terrain picking.

use glam::DVec3;

/// A ray with normalized direction.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    origin: DVec3,
    direction: DVec3,
}

impl Ray {
    /// Build a ray; the direction is normalized on construction.
    #[must_use]
    pub fn new(origin: DVec3, direction: DVec3) -> Ray {
        Ray {
            origin,
            direction: direction.normalize(),
        }
    }

    #[must_use]
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    #[must_use]
    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    /// Intersect with a sphere of the given radius centered on the origin.
    ///
    /// Solves the quadratic in the ray parameter and returns the nearer
    /// intersection point, or `None` when the ray misses or the sphere
    /// lies entirely behind the origin.
    #[must_use]
    pub fn intersect_sphere(&self, radius: f64) -> Option<DVec3> {
        let a = self.direction.dot(self.direction);
        let b = 2.0 * self.direction.dot(self.origin);
        let c = self.origin.dot(self.origin) - radius * radius;

        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return None;
        }

        let dist_sqrt = disc.sqrt();
        let q = if b < 0.0 {
            (-b - dist_sqrt) / 2.0
        } else {
            (-b + dist_sqrt) / 2.0
        };

        let mut t0 = q / a;
        let mut t1 = c / q;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        // Both hits behind the origin.
        if t1 < 0.0 {
            return None;
        }

        Some(self.origin + self.direction * t0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_direction_is_normalized() {
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -10.0));
        assert!((ray.direction().length() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_head_on_hit_lands_on_the_near_surface() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, 300.0), DVec3::new(0.0, 0.0, -1.0));
        let hit = ray.intersect_sphere(100.0).expect("ray should hit");
        assert!(
            (hit - DVec3::new(0.0, 0.0, 100.0)).length() < EPSILON,
            "expected near-surface hit, got {hit:?}"
        );
    }

    #[test]
    fn test_offset_ray_misses() {
        let ray = Ray::new(DVec3::new(0.0, 150.0, 300.0), DVec3::new(0.0, 0.0, -1.0));
        assert!(ray.intersect_sphere(100.0).is_none());
    }

    #[test]
    fn test_sphere_behind_the_origin_misses() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, 300.0), DVec3::new(0.0, 0.0, 1.0));
        assert!(ray.intersect_sphere(100.0).is_none());
    }

    #[test]
    fn test_grazing_ray_hits_the_rim() {
        let ray = Ray::new(DVec3::new(0.0, 100.0, 300.0), DVec3::new(0.0, 0.0, -1.0));
        let hit = ray.intersect_sphere(100.0).expect("tangent ray should hit");
        assert!((hit.y - 100.0).abs() < EPSILON);
        assert!(hit.z.abs() < 1e-4, "tangent point should sit at z = 0, got {}", hit.z);
    }
}
