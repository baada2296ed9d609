//! The six faces of the planet cube.

use glam::DVec3;

/// One of the six cube faces covering the planet surface.
///
/// A face plus an axis-aligned chunk rectangle (origin and square size in
/// face-local units) addresses a unique region of the planet. Face-local
/// sampling space puts `Top` on the `+z` plane (see [`crate::FaceBasis`]);
/// the camera-side classification in [`Face::from_direction`] uses the
/// view-space convention where `Top` is `+y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Face {
    Top = 0,
    Front = 1,
    Right = 2,
    Left = 3,
    Back = 4,
    Bottom = 5,
}

impl Face {
    /// All six faces in canonical order.
    pub const ALL: [Face; 6] = [
        Face::Top,
        Face::Front,
        Face::Right,
        Face::Left,
        Face::Back,
        Face::Bottom,
    ];

    /// Stable index in `0..6`, matching the order of [`Face::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The face on the opposite side of the cube.
    #[must_use]
    pub fn opposite(self) -> Face {
        match self {
            Face::Top => Face::Bottom,
            Face::Bottom => Face::Top,
            Face::Front => Face::Back,
            Face::Back => Face::Front,
            Face::Right => Face::Left,
            Face::Left => Face::Right,
        }
    }

    /// Classify a direction from the planet center onto the face it pierces.
    ///
    /// Dominant-axis split in view space: `|y|` wins ties against `|x|`,
    /// which wins ties against `|z|`. `(0, 1, 0)` is `Top`, `(1, 0, 0)` is
    /// `Right`, `(0, 0, 1)` is `Front`.
    #[must_use]
    pub fn from_direction(dir: DVec3) -> Face {
        let fx = dir.x.abs();
        let fy = dir.y.abs();
        let fz = dir.z.abs();

        if fy >= fx && fy >= fz {
            if dir.y > 0.0 { Face::Top } else { Face::Bottom }
        } else if fx >= fy && fx >= fz {
            if dir.x > 0.0 { Face::Right } else { Face::Left }
        } else if dir.z > 0.0 {
            Face::Front
        } else {
            Face::Back
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_six_faces_have_distinct_indices() {
        let mut seen = [false; 6];
        for face in Face::ALL {
            assert!(!seen[face.index()], "duplicate index for {face:?}");
            seen[face.index()] = true;
        }
    }

    #[test]
    fn test_opposite_is_involution() {
        for face in Face::ALL {
            assert_eq!(face.opposite().opposite(), face);
        }
    }

    #[test]
    fn test_axis_directions_pick_the_expected_faces() {
        assert_eq!(Face::from_direction(DVec3::new(1.0, 0.0, 0.0)), Face::Right);
        assert_eq!(Face::from_direction(DVec3::new(-1.0, 0.0, 0.0)), Face::Left);
        assert_eq!(Face::from_direction(DVec3::new(0.0, 1.0, 0.0)), Face::Top);
        assert_eq!(Face::from_direction(DVec3::new(0.0, -1.0, 0.0)), Face::Bottom);
        assert_eq!(Face::from_direction(DVec3::new(0.0, 0.0, 1.0)), Face::Front);
        assert_eq!(Face::from_direction(DVec3::new(0.0, 0.0, -1.0)), Face::Back);
    }

    #[test]
    fn test_off_axis_direction_picks_dominant_axis() {
        assert_eq!(
            Face::from_direction(DVec3::new(0.2, -0.9, 0.3)),
            Face::Bottom
        );
        assert_eq!(Face::from_direction(DVec3::new(0.9, 0.2, 0.3)), Face::Right);
    }

    #[test]
    fn test_dominant_axis_tie_prefers_y_then_x() {
        assert_eq!(Face::from_direction(DVec3::new(1.0, 1.0, 0.0)), Face::Top);
        assert_eq!(Face::from_direction(DVec3::new(1.0, 0.0, 1.0)), Face::Right);
    }
}
