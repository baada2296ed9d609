//! Adaptive LOD quadtrees over the cube faces.
//!
//! Each face carries a [`QuadTree`] of terrain patches. Per frame,
//! [`QuadTree::find_nodes`] reprojects the camera into the face's local
//! space and walks the tree, lazily subdividing toward the camera,
//! seam-filling over children whose height data has not arrived yet, and
//! returning the set of nodes to draw.

mod node;
mod settings;
mod tree;

pub use node::{DrawParts, NodeId, QuadTreeNode};
pub use settings::LodSettings;
pub use tree::QuadTree;
