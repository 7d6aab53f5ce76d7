//! Optional TOML run configuration with reference defaults.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use tinyworld_core::{GridVector, WalkabilityPolicy};

/// Configuration file consulted when no explicit path is given.
pub(crate) const DEFAULT_CONFIG_PATH: &str = "tinyworld.toml";

/// Run configuration merged from defaults, the optional TOML file, and
/// command-line overrides.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RunConfig {
    /// Title of the created window.
    pub(crate) window_title: String,
    /// Viewport width in grid cells.
    pub(crate) view_width: i32,
    /// Viewport height in grid cells.
    pub(crate) view_height: i32,
    /// Side length of a square cell in pixels.
    pub(crate) cell_size: i32,
    /// Level file loaded at startup.
    pub(crate) level: PathBuf,
    /// Movement gate applied to player steps.
    pub(crate) walkability: WalkabilityPolicy,
    /// Whether presentation synchronises with the display refresh rate.
    pub(crate) vsync: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            window_title: String::from("Tiny World"),
            view_width: 30,
            view_height: 20,
            cell_size: 32,
            level: PathBuf::from("assets/level.map"),
            walkability: WalkabilityPolicy::default(),
            vsync: true,
        }
    }
}

impl RunConfig {
    /// Loads the configuration.
    ///
    /// An explicitly provided path must exist and parse. Without one, the
    /// default path is consulted if present; otherwise the reference
    /// defaults apply.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read run configuration at {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse run configuration at {}", path.display()))
    }

    /// Viewport dimensions as a grid vector.
    pub(crate) fn view_size(&self) -> GridVector {
        GridVector::new(self.view_width, self.view_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_parameters() {
        let config = RunConfig::default();

        assert_eq!(config.window_title, "Tiny World");
        assert_eq!(config.view_size(), GridVector::new(30, 20));
        assert_eq!(config.cell_size, 32);
        assert_eq!(config.level, PathBuf::from("assets/level.map"));
        assert_eq!(config.walkability, WalkabilityPolicy::Unchecked);
        assert!(config.vsync);
    }

    #[test]
    fn partial_files_fall_back_to_defaults_per_field() {
        let config: RunConfig = toml::from_str(
            r#"
            cell_size = 16
            walkability = "solid_cells"
            "#,
        )
        .expect("partial configuration should parse");

        assert_eq!(config.cell_size, 16);
        assert_eq!(config.walkability, WalkabilityPolicy::SolidCells);
        assert_eq!(config.view_size(), GridVector::new(30, 20));
        assert_eq!(config.window_title, "Tiny World");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: std::result::Result<RunConfig, _> = toml::from_str("frame_cap = 144");

        assert!(result.is_err());
    }

    #[test]
    fn full_files_override_every_default() {
        let config: RunConfig = toml::from_str(
            r#"
            window_title = "Tinier World"
            view_width = 12
            view_height = 8
            cell_size = 64
            level = "maps/island.map"
            walkability = "unchecked"
            vsync = false
            "#,
        )
        .expect("full configuration should parse");

        assert_eq!(config.window_title, "Tinier World");
        assert_eq!(config.view_size(), GridVector::new(12, 8));
        assert_eq!(config.cell_size, 64);
        assert_eq!(config.level, PathBuf::from("maps/island.map"));
        assert!(!config.vsync);
    }
}
