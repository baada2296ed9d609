//! Height-fetch error type.

use thiserror::Error;

/// Why a height-data fetch could not be satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The output buffer cannot hold the padded sample grid.
    #[error("output buffer holds {got} samples but {needed} are required")]
    BufferTooSmall { needed: usize, got: usize },

    /// The requested chunk rectangle does not fit on the face.
    #[error("chunk at ({x}, {y}) size {size} lies outside a face of size {face_size}")]
    OutOfBounds {
        x: u32,
        y: u32,
        size: u32,
        face_size: u32,
    },
}
