//! Per-face affine sampling bases.

use glam::DVec3;

use crate::Face;

/// Affine basis for walking a sample grid across one cube face.
///
/// `start` is the position of the first sample, `col_step` advances one
/// sample within a row and `row_step` advances between rows. The six bases
/// are chosen so that samples taken on the shared edge of two adjacent
/// faces land on exactly the same cube positions, which is what keeps the
/// height field continuous across face boundaries.
///
/// Coordinates live in the face-local sampling space: a cube of extent
/// `face_extent` centered on the origin, with `Top` on the `+z` plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceBasis {
    pub start: DVec3,
    pub col_step: DVec3,
    pub row_step: DVec3,
}

impl FaceBasis {
    /// Build the basis for a chunk on `face`.
    ///
    /// `fx` and `fy` are the chunk origin in face-local units measured from
    /// the face's `(0, 0)` corner; `step` is the distance between adjacent
    /// samples. The caller is responsible for shifting the origin back by
    /// any halo border it wants sampled.
    #[must_use]
    pub fn for_chunk(face: Face, face_extent: f64, fx: f64, fy: f64, step: f64) -> FaceBasis {
        let s = face_extent / 2.0;
        let (start, col_step, row_step) = match face {
            Face::Bottom => (
                DVec3::new(s - fy, s - fx, -s),
                DVec3::new(0.0, -step, 0.0),
                DVec3::new(-step, 0.0, 0.0),
            ),
            Face::Front => (
                DVec3::new(-s + fx, -s, -s + fy),
                DVec3::new(step, 0.0, 0.0),
                DVec3::new(0.0, 0.0, step),
            ),
            Face::Right => (
                DVec3::new(s, -s + fx, -s + fy),
                DVec3::new(0.0, step, 0.0),
                DVec3::new(0.0, 0.0, step),
            ),
            Face::Back => (
                DVec3::new(s - fx, s, -s + fy),
                DVec3::new(-step, 0.0, 0.0),
                DVec3::new(0.0, 0.0, step),
            ),
            Face::Left => (
                DVec3::new(-s, s - fx, -s + fy),
                DVec3::new(0.0, -step, 0.0),
                DVec3::new(0.0, 0.0, step),
            ),
            Face::Top => (
                DVec3::new(-s + fx, -s + fy, s),
                DVec3::new(step, 0.0, 0.0),
                DVec3::new(0.0, step, 0.0),
            ),
        };
        FaceBasis {
            start,
            col_step,
            row_step,
        }
    }

    /// Position of the sample at `(row, col)`.
    #[inline]
    #[must_use]
    pub fn point_at(&self, row: usize, col: usize) -> DVec3 {
        self.start + self.col_step * col as f64 + self.row_step * row as f64
    }
}
