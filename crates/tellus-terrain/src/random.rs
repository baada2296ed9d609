//! Fractal-noise height generator.

use noise::{
    Billow, Constant, Fbm, MultiFractal, NoiseFn, Perlin, RidgedMulti, ScaleBias, ScalePoint,
    Select,
};
use tellus_cubesphere::{Face, FaceBasis, map_to_sphere};

use crate::generator::{CHUNK_HALO, Generator, padded_size};
use crate::FetchError;

/// Chunk coordinates are divided by this before noise evaluation, so one
/// noise unit spans 8000 face units.
const WORLD_SCALE: f64 = 1.0 / 8000.0;

/// The `Select` modules only care about the lower bound; anything the
/// control fields can produce sits far below this.
const SELECT_UPPER_BOUND: f64 = 1000.0;

/// Procedural height source built from a fixed composition of fractal
/// noise fields.
///
/// Ridged 12-octave mountains and billowy 7-octave lowlands are each scaled
/// and biased into elevation contributions; a low-frequency definition
/// field blends between them with a soft threshold, and a very-low-frequency
/// continents field finally selects between a constant ocean floor and the
/// blended land, giving smooth coastlines. Deterministic in `(seed, position)`.
pub struct RandomGenerator {
    size: u32,
    pipeline: Box<dyn NoiseFn<f64, 3> + Send + Sync>,
}

impl RandomGenerator {
    /// Build the generator for a face of edge length `size`, seeded with `seed`.
    #[must_use]
    pub fn new(size: u32, seed: u32) -> Self {
        Self {
            size,
            pipeline: build_pipeline(seed),
        }
    }

}

fn build_pipeline(seed: u32) -> Box<dyn NoiseFn<f64, 3> + Send + Sync> {
    let mountains = ScalePoint::new(
        ScaleBias::new(RidgedMulti::<Perlin>::new(seed).set_octaves(12))
            .set_scale(3.0)
            .set_bias(0.5),
    )
    .set_all_scales(25.0, 25.0, 25.0, 1.0);

    let lowlands = ScalePoint::new(
        ScaleBias::new(Billow::<Perlin>::new(seed).set_octaves(7))
            .set_scale(0.2)
            .set_bias(-0.8),
    )
    .set_all_scales(50.0, 50.0, 50.0, 1.0);

    let mountain_definition =
        ScalePoint::new(Fbm::<Perlin>::new(seed).set_octaves(12)).set_all_scales(10.0, 10.0, 10.0, 1.0);

    // Control above the lower bound picks mountains, below picks lowlands,
    // with a soft band in between.
    let land = ScaleBias::new(
        Select::new(lowlands, mountains, mountain_definition)
            .set_bounds(0.5, SELECT_UPPER_BOUND)
            .set_falloff(0.1),
    )
    .set_scale(0.5)
    .set_bias(0.5);

    let continents = Fbm::<Perlin>::new(seed)
        .set_octaves(12)
        .set_frequency(1.0)
        .set_lacunarity(2.0)
        .set_persistence(0.625);

    let ocean = Constant::new(-1.0);

    Box::new(
        Select::new(ocean, land, continents)
            .set_bounds(0.0, SELECT_UPPER_BOUND)
            .set_falloff(0.1),
    )
}

impl Generator for RandomGenerator {
    fn fetch_data(
        &self,
        dest_size: u32,
        face: Face,
        x: u32,
        y: u32,
        size: u32,
        out: &mut [f32],
    ) -> Result<(), FetchError> {
        let padded = padded_size(dest_size);
        let needed = padded * padded;
        if out.len() < needed {
            return Err(FetchError::BufferTooSmall {
                needed,
                got: out.len(),
            });
        }
        if u64::from(x) + u64::from(size) > u64::from(self.size)
            || u64::from(y) + u64::from(size) > u64::from(self.size)
        {
            return Err(FetchError::OutOfBounds {
                x,
                y,
                size,
                face_size: self.size,
            });
        }

        let region = f64::from(size) * WORLD_SCALE;
        let face_extent = f64::from(self.size) * WORLD_SCALE;
        let step = region / f64::from(dest_size - 1);

        // Shift the origin back so the halo rows land outside the chunk.
        let fx = f64::from(x) * WORLD_SCALE - CHUNK_HALO as f64 * step;
        let fy = f64::from(y) * WORLD_SCALE - CHUNK_HALO as f64 * step;
        let basis = FaceBasis::for_chunk(face, face_extent, fx, fy, step);

        let mut idx = 0;
        for row in 0..padded {
            for col in 0..padded {
                let p = map_to_sphere(basis.point_at(row, col), face_extent);
                let value = self.pipeline.get([p.x, p.y, p.z]);
                out[idx] = ((value + 1.0) / 2.0) as f32;
                idx += 1;
            }
        }
        Ok(())
    }

    fn size(&self) -> u32 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FACE_SIZE: u32 = 8192;
    const MESH: u32 = 33;

    fn fetch(generator: &RandomGenerator, face: Face, x: u32, y: u32, size: u32) -> Vec<f32> {
        let padded = padded_size(MESH);
        let mut out = vec![0.0; padded * padded];
        generator
            .fetch_data(MESH, face, x, y, size, &mut out)
            .expect("fetch should succeed");
        out
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let a = RandomGenerator::new(FACE_SIZE, 2);
        let b = RandomGenerator::new(FACE_SIZE, 2);
        assert_eq!(
            fetch(&a, Face::Top, 0, 0, FACE_SIZE),
            fetch(&b, Face::Top, 0, 0, FACE_SIZE),
            "same seed must reproduce the same samples"
        );
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = RandomGenerator::new(FACE_SIZE, 2);
        let b = RandomGenerator::new(FACE_SIZE, 3);
        assert_ne!(
            fetch(&a, Face::Front, 0, 0, FACE_SIZE),
            fetch(&b, Face::Front, 0, 0, FACE_SIZE),
            "different seeds should change the terrain"
        );
    }

    #[test]
    fn test_samples_stay_in_the_terrain_band() {
        // Ocean floors normalize to 0 and the scaled ridged field tops out at
        // a raw 2.25, so normalized samples live in [0, 1.625].
        let generator = RandomGenerator::new(FACE_SIZE, 7);
        for face in Face::ALL {
            for value in fetch(&generator, face, 0, 0, FACE_SIZE) {
                assert!(
                    value.is_finite() && (-0.01..=1.63).contains(&value),
                    "sample {value} outside the terrain band on {face:?}"
                );
            }
        }
    }

    #[test]
    fn test_buffer_too_small_is_rejected() {
        let generator = RandomGenerator::new(FACE_SIZE, 2);
        let mut out = vec![0.0; 16];
        let err = generator
            .fetch_data(MESH, Face::Top, 0, 0, FACE_SIZE, &mut out)
            .unwrap_err();
        assert_eq!(
            err,
            FetchError::BufferTooSmall {
                needed: padded_size(MESH) * padded_size(MESH),
                got: 16
            }
        );
    }

    #[test]
    fn test_out_of_bounds_chunk_is_rejected() {
        let generator = RandomGenerator::new(FACE_SIZE, 2);
        let padded = padded_size(MESH);
        let mut out = vec![0.0; padded * padded];
        let err = generator
            .fetch_data(MESH, Face::Top, FACE_SIZE / 2, 0, FACE_SIZE, &mut out)
            .unwrap_err();
        assert!(matches!(err, FetchError::OutOfBounds { .. }));
    }

    #[test]
    fn test_adjacent_chunks_share_edge_samples() {
        // The last logical column of one chunk and the first logical column
        // of its right neighbor sample the same face positions.
        let generator = RandomGenerator::new(FACE_SIZE, 11);
        let half = FACE_SIZE / 2;
        let left = fetch(&generator, Face::Top, 0, 0, half);
        let right = fetch(&generator, Face::Top, half, 0, half);

        let padded = padded_size(MESH);
        let halo = CHUNK_HALO;
        for row in 0..padded {
            let a = left[row * padded + (padded - 1 - halo)];
            let b = right[row * padded + halo];
            assert!(
                (a - b).abs() < 1e-5,
                "edge samples diverge at row {row}: {a} vs {b}"
            );
        }
    }
}
