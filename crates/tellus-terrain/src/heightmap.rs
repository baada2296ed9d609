//! Chunk factory over a height generator.

use std::sync::Arc;

use tellus_cubesphere::Face;

use crate::generator::Generator;
use crate::FetchError;

/// The height field of the whole planet.
///
/// Owns the face size and the generator; hands out [`HeightMapChunk`]s that
/// address square regions of one face. Samples are not cached here, every
/// chunk fetch goes back to the generator.
pub struct HeightMap {
    size: u32,
    generator: Arc<dyn Generator>,
}

impl HeightMap {
    #[must_use]
    pub fn new(generator: Arc<dyn Generator>) -> HeightMap {
        HeightMap {
            size: generator.size(),
            generator,
        }
    }

    /// Edge length of one face, in chunk-coordinate units.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Address the `size`-sized square at `(x, y)` on `face`.
    #[must_use]
    pub fn chunk(self: Arc<Self>, face: Face, x: u32, y: u32, size: u32) -> HeightMapChunk {
        HeightMapChunk {
            map: self,
            face,
            x,
            y,
            size,
        }
    }
}

/// A square region of one cube face, the addressable unit of height data.
///
/// Stateless beyond its addressing fields; each chunk is owned by exactly
/// one quadtree node.
#[derive(Clone)]
pub struct HeightMapChunk {
    map: Arc<HeightMap>,
    face: Face,
    x: u32,
    y: u32,
    size: u32,
}

impl HeightMapChunk {
    #[must_use]
    pub fn face(&self) -> Face {
        self.face
    }

    #[must_use]
    pub fn x(&self) -> u32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> u32 {
        self.y
    }

    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Fetch the padded sample grid for this chunk.
    pub fn fetch_data(&self, dest_size: u32, out: &mut [f32]) -> Result<(), FetchError> {
        self.map
            .generator
            .fetch_data(dest_size, self.face, self.x, self.y, self.size, out)
    }
}
