//! Dock manager configuration persistence
//!
//! Stores decoration metrics and behaviour flags in
//! `~/.config/dockyard/config.yaml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::drag::{DEFAULT_DRAG_THRESHOLD, DEFAULT_HIT_TOLERANCE};
use crate::layout::{DockMetrics, LayoutOptions};
use crate::manager::ManagerFlags;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config directory available")]
    NoConfigDir,
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write config to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// Defaults applied to newly created splitters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitterDefaults {
    pub sash_size: i32,
    pub minimum_pane_size: i32,
    /// Share of a resize given to the first pane, 0.0..=1.0
    pub sash_gravity: f64,
    pub permit_unsplit_always: bool,
}

impl Default for SplitterDefaults {
    fn default() -> Self {
        Self {
            sash_size: 4,
            minimum_pane_size: 0,
            sash_gravity: 0.0,
            permit_unsplit_always: false,
        }
    }
}

/// Docking configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockConfig {
    #[serde(default)]
    pub metrics: DockMetrics,

    #[serde(default = "default_flags")]
    pub flags: ManagerFlags,

    /// New-dock size limit as a fraction of the container
    #[serde(default)]
    pub layout: LayoutOptions,

    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: i32,

    #[serde(default = "default_hit_tolerance")]
    pub hit_tolerance: i32,

    #[serde(default)]
    pub splitter: SplitterDefaults,
}

fn default_flags() -> ManagerFlags {
    ManagerFlags::DEFAULT
}

fn default_drag_threshold() -> i32 {
    DEFAULT_DRAG_THRESHOLD
}

fn default_hit_tolerance() -> i32 {
    DEFAULT_HIT_TOLERANCE
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            metrics: DockMetrics::default(),
            flags: default_flags(),
            layout: LayoutOptions::default(),
            drag_threshold: default_drag_threshold(),
            hit_tolerance: default_hit_tolerance(),
            splitter: SplitterDefaults::default(),
        }
    }
}

impl DockConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}", e);
                Self::default()
            }
        }
    }

    /// Read and parse a config file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: DockConfig =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.layout = LayoutOptions::default()
            .with_dock_constraint(config.layout.dock_constraint_x, config.layout.dock_constraint_y);
        Ok(config)
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = crate::config_paths::config_file().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
