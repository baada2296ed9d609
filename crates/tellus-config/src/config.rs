//! Planet configuration struct with RON load/save.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Everything needed to build and tune a planet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    /// World seed for deterministic terrain.
    pub seed: u32,
    /// Edge length of one cube face in chunk-coordinate units.
    pub face_size: u32,
    /// Samples per patch edge; chunks at or below this size are terminal.
    pub mesh_size: u32,
    /// LOD culling radius multiplier.
    pub range_multiplier: f64,
    /// Fraction of the refinement range used for vertex morphing.
    pub morph_blend: f64,
    /// Subdivision depth cap; 0 derives it from `face_size` and `mesh_size`.
    pub max_depth: u32,
    /// Vertical exaggeration applied to the normalized height field.
    pub height_scale: f64,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            seed: 2,
            face_size: 8192,
            mesh_size: 33,
            range_multiplier: 150.0,
            morph_blend: 0.3,
            max_depth: 0,
            height_scale: 50.0,
        }
    }
}

impl PlanetConfig {
    /// Sea level, a fixed fraction of the height scale.
    #[must_use]
    pub fn water_level(&self) -> f64 {
        self.height_scale * 0.25
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("planet.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: PlanetConfig =
                ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            tracing::info!(path = %config_path.display(), "loaded planet config");
            Ok(config)
        } else {
            let config = PlanetConfig::default();
            config.save(config_dir)?;
            tracing::info!(path = %config_path.display(), "created default planet config");
            Ok(config)
        }
    }

    /// Save config to the given directory as `planet.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("planet.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = PlanetConfig::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("face_size: 8192"));
        assert!(ron_str.contains("seed: 2"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = PlanetConfig::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: PlanetConfig = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let ron_str = "(seed: 99)";
        let config: PlanetConfig = ron::from_str(ron_str).unwrap();
        assert_eq!(config.seed, 99);
        assert_eq!(config.face_size, 8192);
        assert_eq!(config.mesh_size, 33);
    }

    #[test]
    fn test_water_level_tracks_height_scale() {
        let config = PlanetConfig::default();
        assert_eq!(config.water_level(), 12.5);

        let tall = PlanetConfig {
            height_scale: 100.0,
            ..Default::default()
        };
        assert_eq!(tall.water_level(), 25.0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlanetConfig {
            seed: 7,
            face_size: 4096,
            ..Default::default()
        };

        config.save(dir.path()).unwrap();
        let loaded = PlanetConfig::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let created = PlanetConfig::load_or_create(dir.path()).unwrap();
        assert_eq!(created, PlanetConfig::default());
        assert!(dir.path().join("planet.ron").exists());
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("planet.ron"), "(seed: \"not a number\")").unwrap();
        let err = PlanetConfig::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
