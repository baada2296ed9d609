//! Per-face quadtree and the LOD selection walk.

use std::sync::Arc;

use glam::{DMat4, DVec3, DVec4};
use tellus_cubesphere::{Face, map_sphere_to_cube};
use tellus_math::{Aabb, Frustum};
use tellus_terrain::{DataFetcher, FetchSlot, HeightMap};

use crate::LodSettings;
use crate::node::{DrawParts, NodeId, QuadTreeNode};

/// Adaptive quadtree covering one cube face.
///
/// Nodes live in an arena indexed by [`NodeId`]; rebuilding a face is a
/// matter of dropping the tree. The root chunk spans the whole face and is
/// fetched synchronously at construction, so the fallback path of
/// [`QuadTree::find_nodes`] always has data behind it.
pub struct QuadTree {
    face: Face,
    settings: LodSettings,
    transform: DMat4,
    inverse_transform: DMat4,
    heightmap: Arc<HeightMap>,
    fetcher: Arc<DataFetcher>,
    nodes: Vec<QuadTreeNode>,
    root: NodeId,
}

impl QuadTree {
    #[must_use]
    pub fn new(
        face: Face,
        heightmap: Arc<HeightMap>,
        fetcher: Arc<DataFetcher>,
        settings: LodSettings,
        transform: DMat4,
    ) -> QuadTree {
        let size = heightmap.size();
        let slot = FetchSlot::new(
            heightmap.clone().chunk(face, 0, 0, size),
            settings.mesh_size,
        );
        slot.fetch_blocking();

        let mut tree = QuadTree {
            face,
            settings,
            transform,
            inverse_transform: transform.inverse(),
            heightmap,
            fetcher,
            nodes: vec![QuadTreeNode::new(slot, 0, None)],
            root: NodeId(0),
        };
        tree.resolve(tree.root);
        tree
    }

    #[must_use]
    pub fn face(&self) -> Face {
        self.face
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn transform(&self) -> DMat4 {
        self.transform
    }

    #[must_use]
    pub fn settings(&self) -> &LodSettings {
        &self.settings
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &QuadTreeNode {
        &self.nodes[id.index()]
    }

    /// Number of nodes ever created for this face.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Select the nodes to draw this frame.
    ///
    /// `camera_world` is the camera position relative to the planet center.
    /// Mapping the node boxes onto the sphere would leave them neither
    /// axis-aligned nor boxes, so instead the camera is reprojected into
    /// cube space and then into this face's local frame; the vertex shader
    /// applies the same warp when it evaluates morph distances. An empty
    /// selection falls back to the root so the renderer always has
    /// something to draw.
    pub fn find_nodes(&mut self, camera_world: DVec3, frustum: &Frustum) -> Vec<NodeId> {
        let mut nodes = Vec::new();
        let distance = camera_world.length();
        if distance > 0.0 {
            let cube_cam = map_sphere_to_cube(camera_world / distance) * distance;
            let pos = self.inverse_transform.transform_point3(cube_cam);
            self.select_node(self.root, pos, frustum, &mut nodes);
        }
        if nodes.is_empty() {
            nodes.push(self.root);
        }
        nodes
    }

    /// Recursive selection in face-local space.
    ///
    /// Returns `false` iff this node's bounding box, inflated by its
    /// culling range, does not reach the camera; the caller then owns this
    /// node's quadrant.
    fn select_node(
        &mut self,
        id: NodeId,
        pos: DVec3,
        frustum: &Frustum,
        out: &mut Vec<NodeId>,
    ) -> bool {
        self.resolve(id);

        let (x, y, size, depth, min_height, max_height, children) = {
            let node = &self.nodes[id.index()];
            (
                node.chunk_x(),
                node.chunk_y(),
                node.chunk_size(),
                node.depth,
                node.min_height,
                node.max_height,
                node.children,
            )
        };
        self.nodes[id.index()].draw_parts = DrawParts::empty();

        let m = self.settings.mesh_ratio();
        let range = self.settings.range_for(size);
        let bounds = Aabb::new(
            DVec3::new(f64::from(x) * m, f64::from(y) * m, min_height),
            DVec3::new(
                f64::from(x) * m + f64::from(size),
                f64::from(y) * m + f64::from(size),
                max_height,
            ),
        );

        if !bounds.intersects_sphere(pos, range) {
            return false;
        }

        // Per-node frustum rejection is an extension point; the world-space
        // planes are not valid in this warped face-local frame.
        let _ = frustum;

        if size <= self.settings.mesh_size || depth >= self.settings.max_depth {
            out.push(id);
            return true;
        }

        if bounds.intersects_sphere(pos, range / 2.0) {
            if let Some(children) = children {
                let mut parts = DrawParts::empty();
                let mut pushed = false;
                for (quadrant, child) in children.into_iter().enumerate() {
                    let fetched = self.nodes[child.index()].is_fetched();
                    if !fetched || !self.select_node(child, pos, frustum, out) {
                        // The child cannot draw its quadrant this frame, so
                        // this node fills the seam.
                        if !pushed {
                            out.push(id);
                            pushed = true;
                        }
                        parts.set(quadrant);
                    }
                }
                self.nodes[id.index()].draw_parts = parts;
                return true;
            }
            // No children yet: create them, let their fetches run in the
            // background and draw this node whole this frame.
            self.subdivide(id);
        }

        out.push(id);
        true
    }

    /// Create the four children of `id` and enqueue their fetches.
    fn subdivide(&mut self, id: NodeId) {
        let (face, x, y, size, depth) = {
            let node = &self.nodes[id.index()];
            (
                node.face(),
                node.chunk_x(),
                node.chunk_y(),
                node.chunk_size(),
                node.depth,
            )
        };
        let s = size / 2;
        let quadrants = [(0, 0), (0, s), (s, s), (s, 0)];

        let mut children = [NodeId(0); 4];
        for (i, (dx, dy)) in quadrants.into_iter().enumerate() {
            let chunk = self.heightmap.clone().chunk(face, x + dx, y + dy, s);
            let slot = FetchSlot::new(chunk, self.settings.mesh_size);
            self.fetcher.fetch(slot.clone());
            children[i] = NodeId(self.nodes.len() as u32);
            self.nodes.push(QuadTreeNode::new(slot, depth + 1, Some(id)));
        }
        self.nodes[id.index()].children = Some(children);
        tracing::debug!(?face, x, y, child_size = s, depth = depth + 1, "subdivided patch");
    }

    /// Pull heights out of the slot and derive the render parameters, the
    /// first time the fetch is observed complete.
    fn resolve(&mut self, id: NodeId) {
        let settings = self.settings;
        let node = &mut self.nodes[id.index()];
        if node.resolved || !node.slot.is_fetched() {
            return;
        }
        if let Some((min, max)) = node.slot.height_range() {
            node.min_height = f64::from(min);
            node.max_height = f64::from(max);
        }

        let m = settings.mesh_ratio();
        let size = f64::from(node.chunk_size());
        node.geometry = DVec4::new(
            f64::from(node.chunk_x()) * m,
            f64::from(node.chunk_y()) * m,
            size,
            size,
        );
        node.morph = settings.morph_for(node.chunk_size());
        node.resolved = true;
    }
}
