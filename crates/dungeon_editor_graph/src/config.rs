// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor configuration.
//!
//! Stored as RON next to the project. Missing fields fall back to the
//! defaults below.

use crate::error::ConfigError;
use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current config format version
pub const CONFIG_FORMAT_VERSION: u32 = 1;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "room_graph_editor.ron";

/// Room graph editor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Format version
    pub version: u32,
    /// Size of newly created nodes
    pub node_size: Vec2,
    /// Where the entrance node goes when the first room is created
    pub entrance_position: Pos2,
    /// Stroke width of edges and the drag line
    pub connecting_line_width: f32,
    /// Arrowhead size along and across edges
    pub arrow_size: f32,
    /// Whether more than one entrance node may be created
    pub allow_multiple_entrances: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_FORMAT_VERSION,
            node_size: Vec2::new(160.0, 75.0),
            entrance_position: Pos2::new(200.0, 200.0),
            connecting_line_width: 3.0,
            arrow_size: 6.0,
            allow_multiple_entrances: false,
        }
    }
}

impl EditorConfig {
    /// Parse a config from RON text
    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = ron::from_str(content)?;

        if config.version > CONFIG_FORMAT_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: config.version,
                supported: CONFIG_FORMAT_VERSION,
            });
        }

        Ok(config)
    }

    /// Serialize to pretty RON
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&content)
    }

    /// Load a config file, or the defaults if it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No editor config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save to a config file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_ron()?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Config file path inside a project directory
    pub fn config_file_path(project_dir: &Path) -> PathBuf {
        project_dir.join(CONFIG_FILE_NAME)
    }
}
