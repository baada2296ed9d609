//! The height-source capability interface.

use tellus_cubesphere::Face;

use crate::FetchError;

/// Number of extra samples on every side of a fetched grid.
///
/// The halo gives the mesh builder enough neighborhood to estimate normals
/// at patch edges and keeps adjacent patches seam free.
pub const CHUNK_HALO: usize = 2;

/// Side length of the padded sample grid for a `dest_size` logical grid.
#[inline]
#[must_use]
pub fn padded_size(dest_size: u32) -> usize {
    dest_size as usize + 2 * CHUNK_HALO
}

/// A source of height samples for chunks of the planet surface.
///
/// Implementations must be deterministic pure functions of the chunk
/// address and their own configuration, and callable from the fetch worker
/// thread.
pub trait Generator: Send + Sync {
    /// Fill `out` with `padded_size(dest_size)²` row-major samples covering
    /// the `size`-sized square at `(x, y)` on `face`, plus a [`CHUNK_HALO`]
    /// border on every side. Samples are nominally in `[0, 1]`; ridged
    /// peaks may overshoot.
    fn fetch_data(
        &self,
        dest_size: u32,
        face: Face,
        x: u32,
        y: u32,
        size: u32,
        out: &mut [f32],
    ) -> Result<(), FetchError>;

    /// Edge length of a whole face, in the same units as chunk coordinates.
    fn size(&self) -> u32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_size_adds_halo_on_both_sides() {
        assert_eq!(padded_size(33), 37);
        assert_eq!(padded_size(1), 5);
    }
}
