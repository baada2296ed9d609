//! Quadtree nodes and their render-facing state.

use std::sync::Arc;

use glam::DVec4;
use tellus_cubesphere::Face;
use tellus_terrain::FetchSlot;

/// Index of a node in its tree's arena.
///
/// Ids are only meaningful within the tree that issued them and stay valid
/// until that tree is rebuilt; nodes are never reparented or removed
/// individually.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which quadrants of a node the renderer must draw with the node's own
/// mesh because the corresponding child cannot cover them this frame.
///
/// Bit `i` maps to the child created `i`-th during subdivision:
/// bottom-left, top-left, top-right, bottom-right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawParts(u8);

impl DrawParts {
    pub const BOTTOM_LEFT: DrawParts = DrawParts(1);
    pub const TOP_LEFT: DrawParts = DrawParts(2);
    pub const TOP_RIGHT: DrawParts = DrawParts(4);
    pub const BOTTOM_RIGHT: DrawParts = DrawParts(8);

    #[must_use]
    pub fn empty() -> DrawParts {
        DrawParts(0)
    }

    #[must_use]
    pub fn all() -> DrawParts {
        DrawParts(0b1111)
    }

    pub(crate) fn set(&mut self, quadrant: usize) {
        debug_assert!(quadrant < 4);
        self.0 |= 1 << quadrant;
    }

    #[must_use]
    pub fn contains(self, quadrant: usize) -> bool {
        self.0 & (1 << quadrant) != 0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw bitmask, for handing to a shader.
    #[must_use]
    pub fn bits(self) -> u8 {
        self.0
    }
}

/// One LOD patch: a chunk of a face at some depth plus everything the
/// renderer needs to draw it.
///
/// Heights, the geometry descriptor and the morph coefficients are filled
/// in lazily the first time selection observes the fetch as complete.
pub struct QuadTreeNode {
    pub(crate) slot: Arc<FetchSlot>,
    pub(crate) depth: u32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Option<[NodeId; 4]>,
    pub(crate) min_height: f64,
    pub(crate) max_height: f64,
    pub(crate) geometry: DVec4,
    pub(crate) morph: [f64; 2],
    pub(crate) draw_parts: DrawParts,
    pub(crate) resolved: bool,
}

impl QuadTreeNode {
    pub(crate) fn new(slot: Arc<FetchSlot>, depth: u32, parent: Option<NodeId>) -> QuadTreeNode {
        QuadTreeNode {
            slot,
            depth,
            parent,
            children: None,
            min_height: 0.0,
            max_height: 0.0,
            geometry: DVec4::ZERO,
            morph: [0.0; 2],
            draw_parts: DrawParts::empty(),
            resolved: false,
        }
    }

    #[must_use]
    pub fn face(&self) -> Face {
        self.slot.chunk().face()
    }

    /// Chunk origin on the face.
    #[must_use]
    pub fn chunk_x(&self) -> u32 {
        self.slot.chunk().x()
    }

    #[must_use]
    pub fn chunk_y(&self) -> u32 {
        self.slot.chunk().y()
    }

    /// Chunk edge length; halves with every LOD level.
    #[must_use]
    pub fn chunk_size(&self) -> u32 {
        self.slot.chunk().size()
    }

    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> Option<[NodeId; 4]> {
        self.children
    }

    /// Smallest sampled height. Zero until fetched.
    #[must_use]
    pub fn min_height(&self) -> f64 {
        self.min_height
    }

    #[must_use]
    pub fn max_height(&self) -> f64 {
        self.max_height
    }

    /// Mesh-space placement `(x, y, size, size)` for the vertex shader.
    #[must_use]
    pub fn geometry(&self) -> DVec4 {
        self.geometry
    }

    /// Morph coefficients for pop-free LOD blending.
    #[must_use]
    pub fn morph(&self) -> [f64; 2] {
        self.morph
    }

    /// Quadrants this node must cover for its children this frame.
    #[must_use]
    pub fn draw_parts(&self) -> DrawParts {
        self.draw_parts
    }

    /// Whether height data is available.
    #[must_use]
    pub fn is_fetched(&self) -> bool {
        self.slot.is_fetched()
    }

    /// Whether the renderer has already created GPU resources.
    #[must_use]
    pub fn is_uploaded(&self) -> bool {
        self.slot.is_uploaded()
    }

    /// Take the fetched sample grid for upload; yields once.
    #[must_use]
    pub fn take_samples(&self) -> Option<Vec<f32>> {
        self.slot.take_samples()
    }

    /// Record that GPU resources now exist for this node.
    pub fn mark_uploaded(&self) {
        self.slot.mark_uploaded();
    }

    /// The underlying fetch handoff cell.
    #[must_use]
    pub fn slot(&self) -> &Arc<FetchSlot> {
        &self.slot
    }
}
