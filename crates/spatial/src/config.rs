//! Index configuration.

use geometry::Rect;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Default config file, relative to the working directory.
pub const CONFIG_FILE: &str = "quadmap.toml";

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub boundary: BoundaryConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

impl Config {
    /// Load configuration from `quadmap.toml` or use defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_or_create(CONFIG_FILE)
    }

    /// Load configuration from `path`, writing the defaults there if the file
    /// does not exist.
    pub fn load_or_create(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_path(path)
        } else {
            info!("No {} found, creating default config", path.display());
            let default_config = Self::default();
            std::fs::write(path, toml::to_string_pretty(&default_config)?)?;
            Ok(default_config)
        }
    }

    /// Load configuration from an existing file.
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

/// Quadtree node settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct IndexConfig {
    /// Points a node holds before it subdivides.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Depth at which nodes stop subdividing.
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            max_depth: default_max_depth(),
        }
    }
}

fn default_capacity() -> usize {
    4
}
fn default_max_depth() -> u32 {
    crate::spatial::DEFAULT_MAX_DEPTH
}

/// Root boundary of the index.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BoundaryConfig {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default = "default_boundary_size")]
    pub width: f64,
    #[serde(default = "default_boundary_size")]
    pub height: f64,
}

impl BoundaryConfig {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: default_boundary_size(),
            height: default_boundary_size(),
        }
    }
}

fn default_boundary_size() -> f64 {
    1000.0
}

/// Demo binary settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DemoConfig {
    /// Extra random points scattered over the boundary.
    #[serde(default)]
    pub random_points: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            random_points: 0,
            seed: default_seed(),
        }
    }
}

fn default_seed() -> u64 {
    42
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[index]\ncapacity = 8\n\n[boundary]\nwidth = 50.0\n").unwrap();
        assert_eq!(config.index.capacity, 8);
        assert_eq!(config.index.max_depth, default_max_depth());
        assert_eq!(config.boundary.rect(), Rect::new(0.0, 0.0, 50.0, 1000.0));
        assert_eq!(config.demo, DemoConfig::default());
    }

    #[test]
    fn test_default_config_serializes() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let path = std::env::temp_dir().join(format!("quadmap-config-{}.toml", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let created = Config::load_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created, Config::default());

        std::fs::write(&path, "[demo]\nrandom_points = 12\n").unwrap();
        let loaded = Config::load_or_create(&path).unwrap();
        assert_eq!(loaded.demo.random_points, 12);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_from_path_rejects_bad_toml() {
        let path = std::env::temp_dir().join(format!("quadmap-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "[index]\ncapacity = \"four\"\n").unwrap();
        assert!(Config::from_path(&path).is_err());
        std::fs::remove_file(&path).unwrap();
    }
}
