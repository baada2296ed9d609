//! Cube-to-sphere warp used for height-field sampling.

use glam::DVec3;

/// Warp a point on a cube face onto the inscribed sphere.
///
/// The cube has extent `face_size` and is centered on the origin; input
/// coordinates are first normalized by the half-size `d = face_size / 2`,
/// then each component is scaled by the analytic factor
///
/// ```text
/// x' = x * sqrt(1 - y²/2 - z²/2 + y²z²/3)
/// ```
///
/// (and cyclic permutations). For a point on the cube surface this lands on
/// the sphere of radius `d` with far less area distortion than naive
/// normalization. The result keeps the input's units.
#[inline]
#[must_use]
pub fn map_to_sphere(p: DVec3, face_size: f64) -> DVec3 {
    let d = face_size / 2.0;
    let x = p.x / d;
    let y = p.y / d;
    let z = p.z / d;
    let (x2, y2, z2) = (x * x, y * y, z * z);

    DVec3::new(
        p.x * (1.0 - y2 * 0.5 - z2 * 0.5 + y2 * z2 / 3.0).sqrt(),
        p.y * (1.0 - z2 * 0.5 - x2 * 0.5 + z2 * x2 / 3.0).sqrt(),
        p.z * (1.0 - x2 * 0.5 - y2 * 0.5 + x2 * y2 / 3.0).sqrt(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_face_center_is_fixed() {
        // The center of the +z face is already on the sphere.
        let p = DVec3::new(0.0, 0.0, 1.0);
        let mapped = map_to_sphere(p, 2.0);
        assert!((mapped - p).length() < EPSILON, "face center moved: {mapped:?}");
    }

    #[test]
    fn test_surface_points_land_on_the_sphere() {
        let half = 1.0;
        for i in 0..=8 {
            for j in 0..=8 {
                let x = -half + i as f64 / 4.0;
                let y = -half + j as f64 / 4.0;
                let p = map_to_sphere(DVec3::new(x, y, half), 2.0 * half);
                assert!(
                    (p.length() - half).abs() < EPSILON,
                    "cube point ({x}, {y}, {half}) not on sphere: length {}",
                    p.length()
                );
            }
        }
    }

    #[test]
    fn test_corner_maps_onto_the_diagonal() {
        let p = map_to_sphere(DVec3::new(1.0, 1.0, 1.0), 2.0);
        let expected = DVec3::splat(1.0 / 3f64.sqrt());
        assert!(
            (p - expected).length() < EPSILON,
            "corner mapped to {p:?}, expected {expected:?}"
        );
    }

    #[test]
    fn test_scales_with_face_size() {
        let small = map_to_sphere(DVec3::new(0.5, 0.25, 1.0), 2.0);
        let large = map_to_sphere(DVec3::new(500.0, 250.0, 1000.0), 2000.0);
        assert!(
            (large - small * 1000.0).length() < 1e-9,
            "warp is not scale invariant"
        );
    }

    #[test]
    fn test_symmetry_under_axis_negation() {
        let p = map_to_sphere(DVec3::new(0.3, -0.7, 1.0), 2.0);
        let q = map_to_sphere(DVec3::new(-0.3, 0.7, -1.0), 2.0);
        assert!((p + q).length() < EPSILON);
    }
}
