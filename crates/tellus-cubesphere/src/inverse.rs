//! Sphere-to-cube reprojection.
//!
//! Closed-form inverse published by petrocket:
//! <http://stackoverflow.com/questions/2656899/mapping-a-sphere-to-a-cube>

use glam::DVec3;

const INVERSE_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Map a point on the unit sphere to the corresponding point on the unit
/// cube's surface.
///
/// The dominant axis (largest absolute component, ties resolved y, x, z)
/// selects the cube face and becomes exactly `±1`; the two remaining
/// coordinates come from a closed-form inverse of the quadratic warp,
/// clamped to `[-1, 1]` for numerical robustness. Exactly-zero input
/// components stay exactly zero, so the `sqrt` never sees a negative
/// near-zero argument on the axes.
#[must_use]
pub fn map_sphere_to_cube(p: DVec3) -> DVec3 {
    let fx = p.x.abs();
    let fy = p.y.abs();
    let fz = p.z.abs();

    if fy >= fx && fy >= fz {
        let (a, b) = unwarp_pair(p.x, p.z);
        DVec3::new(a, 1f64.copysign(p.y), b)
    } else if fx >= fy && fx >= fz {
        let (a, b) = unwarp_pair(p.y, p.z);
        DVec3::new(1f64.copysign(p.x), a, b)
    } else {
        let (a, b) = unwarp_pair(p.x, p.y);
        DVec3::new(a, b, 1f64.copysign(p.z))
    }
}

/// Recover the two non-dominant cube coordinates from their sphere values.
fn unwarp_pair(u: f64, v: f64) -> (f64, f64) {
    let a2 = u * u * 2.0;
    let b2 = v * v * 2.0;
    let inner = -a2 + b2 - 3.0;
    let innersqrt = -(inner * inner - 12.0 * a2).max(0.0).sqrt();

    let cube_u = if u == 0.0 {
        0.0
    } else {
        ((innersqrt + a2 - b2 + 3.0).max(0.0).sqrt() * INVERSE_SQRT_2)
            .min(1.0)
            .copysign(u)
    };
    let cube_v = if v == 0.0 {
        0.0
    } else {
        ((innersqrt - a2 + b2 + 3.0).max(0.0).sqrt() * INVERSE_SQRT_2)
            .min(1.0)
            .copysign(v)
    };

    (cube_u, cube_v)
}
