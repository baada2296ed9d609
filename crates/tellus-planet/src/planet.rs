//! Six quadtrees and the glue that makes them a planet.

use std::sync::Arc;

use glam::{DMat4, DVec3};
use tellus_config::PlanetConfig;
use tellus_cubesphere::{Face, map_sphere_to_cube};
use tellus_lod::{LodSettings, NodeId, QuadTree};
use tellus_math::Frustum;
use tellus_terrain::{DataFetcher, HeightMap, RandomGenerator};

use crate::Ray;

/// A full planet: one adaptive quadtree per cube face over a shared height
/// field and fetch queue.
///
/// The renderer drives it with [`Planet::update`] once per frame and reads
/// back the per-face node lists; [`Planet::regenerate`] rebuilds the whole
/// terrain for a new seed.
pub struct Planet {
    config: PlanetConfig,
    settings: LodSettings,
    seed: u32,
    /// Indexed by `Face::index()`.
    trees: Vec<QuadTree>,
    nodes: [Vec<NodeId>; 6],
    camera_cube: DVec3,
    pick_position: Option<DVec3>,
}

impl Planet {
    #[must_use]
    pub fn new(config: PlanetConfig) -> Planet {
        let settings = settings_from(&config);
        let seed = config.seed;
        let trees = build_trees(config.face_size, seed, settings);
        Planet {
            config,
            settings,
            seed,
            trees,
            nodes: Default::default(),
            camera_cube: DVec3::ZERO,
            pick_position: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &PlanetConfig {
        &self.config
    }

    #[must_use]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    #[must_use]
    pub fn height_scale(&self) -> f64 {
        self.config.height_scale
    }

    #[must_use]
    pub fn water_level(&self) -> f64 {
        self.config.water_level()
    }

    /// Radius of the planet sphere in mesh-space units.
    #[must_use]
    pub fn radius(&self) -> f64 {
        let m = f64::from(self.config.mesh_size - 1) / f64::from(self.config.mesh_size);
        f64::from(self.config.face_size) / 2.0 * m
    }

    #[must_use]
    pub fn tree(&self, face: Face) -> &QuadTree {
        &self.trees[face.index()]
    }

    /// Node list produced by the last [`Planet::update`] for one face.
    #[must_use]
    pub fn nodes(&self, face: Face) -> &[NodeId] {
        &self.nodes[face.index()]
    }

    /// Camera position in cube space, cached for the vertex shader.
    #[must_use]
    pub fn camera_cube(&self) -> DVec3 {
        self.camera_cube
    }

    /// Most recent terrain pick, in cube space.
    #[must_use]
    pub fn pick_position(&self) -> Option<DVec3> {
        self.pick_position
    }

    /// Run LOD selection on every face for this frame.
    ///
    /// `camera` is the camera position relative to the planet center.
    pub fn update(&mut self, camera: DVec3, frustum: &Frustum) {
        for tree in &mut self.trees {
            let face = tree.face();
            self.nodes[face.index()] = tree.find_nodes(camera, frustum);
        }

        let distance = camera.length();
        self.camera_cube = if distance > 0.0 {
            map_sphere_to_cube(camera / distance) * distance
        } else {
            DVec3::ZERO
        };
    }

    /// Rebuild the whole terrain for a new seed.
    ///
    /// Stop-the-world: dropping the old trees releases the shared fetcher,
    /// whose drop drains the queue and joins the worker, so no stale fetch
    /// can outlive the old terrain.
    pub fn regenerate(&mut self, seed: u32) {
        tracing::info!(seed, "regenerating planet terrain");
        self.trees.clear();
        for nodes in &mut self.nodes {
            nodes.clear();
        }
        self.seed = seed;
        self.trees = build_trees(self.config.face_size, seed, self.settings);
    }

    /// Cast a ray at the planet sphere and remember where it hit.
    ///
    /// The hit point is reprojected into cube space, matching the space the
    /// node geometry lives in. A miss leaves the previous pick in place.
    pub fn pick(&mut self, ray: &Ray) -> Option<DVec3> {
        let hit = ray.intersect_sphere(self.radius())?;
        let distance = hit.length();
        let cube = map_sphere_to_cube(hit / distance) * distance;
        self.pick_position = Some(cube);
        Some(cube)
    }
}

fn settings_from(config: &PlanetConfig) -> LodSettings {
    let max_depth = if config.max_depth == 0 {
        LodSettings::derive_max_depth(config.face_size, config.mesh_size)
    } else {
        config.max_depth
    };
    LodSettings {
        mesh_size: config.mesh_size,
        range_multiplier: config.range_multiplier,
        morph_blend: config.morph_blend,
        max_depth,
    }
}

fn build_trees(face_size: u32, seed: u32, settings: LodSettings) -> Vec<QuadTree> {
    let generator = Arc::new(RandomGenerator::new(face_size, seed));
    let heightmap = Arc::new(HeightMap::new(generator));
    let fetcher = Arc::new(DataFetcher::new());

    Face::ALL
        .iter()
        .map(|&face| {
            QuadTree::new(
                face,
                heightmap.clone(),
                fetcher.clone(),
                settings,
                face_transform(face, face_size, settings.mesh_size),
            )
        })
        .collect()
}

/// Model transform placing one face's local grid on the cube in world space.
fn face_transform(face: Face, face_size: u32, mesh_size: u32) -> DMat4 {
    let m = f64::from(mesh_size - 1) / f64::from(mesh_size);
    let d = f64::from(face_size) / 2.0 * m;
    let translation = DMat4::from_translation(DVec3::new(-d, -d, d));

    let quarter = std::f64::consts::FRAC_PI_2;
    let rotation = match face {
        Face::Top => DMat4::IDENTITY,
        Face::Front => DMat4::from_rotation_x(quarter),
        Face::Right => DMat4::from_rotation_x(quarter) * DMat4::from_rotation_y(quarter),
        Face::Left => DMat4::from_rotation_x(quarter) * DMat4::from_rotation_y(3.0 * quarter),
        Face::Back => DMat4::from_rotation_x(quarter) * DMat4::from_rotation_y(2.0 * quarter),
        Face::Bottom => DMat4::from_rotation_y(2.0 * quarter) * DMat4::from_rotation_z(-quarter),
    };

    rotation * translation
}
