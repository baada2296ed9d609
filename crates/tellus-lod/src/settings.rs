//! LOD tuning parameters.

/// Tuning knobs for quadtree selection, shared by all six face trees.
#[derive(Clone, Copy, Debug)]
pub struct LodSettings {
    /// Samples per patch edge. Chunks at or below this size are terminal.
    pub mesh_size: u32,
    /// Scales the per-node culling radius; larger values keep more detail
    /// visible at distance.
    pub range_multiplier: f64,
    /// Fraction of the refinement range over which vertex morphing blends
    /// between LOD tiers.
    pub morph_blend: f64,
    /// Hard cap on subdivision depth.
    pub max_depth: u32,
}

impl LodSettings {
    /// Default tuning for a face of the given size.
    #[must_use]
    pub fn for_face_size(face_size: u32) -> LodSettings {
        let mesh_size = 33;
        LodSettings {
            mesh_size,
            range_multiplier: 150.0,
            morph_blend: 0.3,
            max_depth: Self::derive_max_depth(face_size, mesh_size),
        }
    }

    /// Number of times a face-sized chunk can split before reaching the
    /// terminal mesh size.
    #[must_use]
    pub fn derive_max_depth(face_size: u32, mesh_size: u32) -> u32 {
        let mut depth = 0;
        let mut size = face_size;
        while size > mesh_size {
            size /= 2;
            depth += 1;
        }
        depth
    }

    /// Ratio `(mesh_size - 1) / mesh_size`, used to place a chunk's grid in
    /// mesh space: samples cover the chunk plus one extra row, so origins
    /// shrink by this factor.
    #[must_use]
    pub fn mesh_ratio(&self) -> f64 {
        f64::from(self.mesh_size - 1) / f64::from(self.mesh_size)
    }

    /// Culling radius for a chunk of the given size.
    #[must_use]
    pub fn range_for(&self, chunk_size: u32) -> f64 {
        self.range_multiplier * f64::from(chunk_size) / f64::from(self.mesh_size)
    }

    /// Morph coefficients for a chunk of the given size.
    ///
    /// With `start` the culling radius and `end = start * (1 - blend)`
    /// (nudged up by 1% of the band so morphing completes just before the
    /// refinement boundary), the renderer computes its blend factor as
    /// `coeff0 - distance * coeff1`: 0 at `end`, 1 at `start`.
    #[must_use]
    pub fn morph_for(&self, chunk_size: u32) -> [f64; 2] {
        let start = self.range_for(chunk_size);
        let mut end = start - start * self.morph_blend;
        end += (start - end) * 0.01;
        [end / (end - start), 1.0 / (end - start)]
    }
}
