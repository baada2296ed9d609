//! Procedural height generation and asynchronous streaming.
//!
//! A [`Generator`] produces padded grids of height samples for chunks of a
//! cube face; [`RandomGenerator`] is the fractal-noise implementation.
//! [`HeightMap`] hands out [`HeightMapChunk`]s addressing regions of the
//! planet, and [`DataFetcher`] runs the expensive fetches on a single
//! dedicated worker thread, handing results back through [`FetchSlot`]s.

mod error;
mod fetcher;
mod generator;
mod heightmap;
mod random;

pub use error::FetchError;
pub use fetcher::{DataFetcher, FetchSlot, FetchState, FetchedData};
pub use generator::{CHUNK_HALO, Generator, padded_size};
pub use heightmap::{HeightMap, HeightMapChunk};
pub use random::RandomGenerator;
