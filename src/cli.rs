//! Command-line interface for inspecting perspectives
//!
//! Supports:
//! - Computing the layout a saved perspective produces
//! - Checking a perspective for malformed records
//!
//! A bare file name that does not exist in the working directory is looked
//! up in `~/.config/dockyard/perspectives/`.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::geometry::Rect;

/// Inspect dock layouts and perspective strings
#[derive(Parser, Debug)]
#[command(name = "dockyard", version, about = "Inspect dock layouts and perspective strings")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Lay out a perspective and print every pane and dock rectangle
    Layout {
        /// Perspective file
        #[arg(value_name = "PERSPECTIVE")]
        file: PathBuf,

        /// Container width in pixels
        #[arg(long, default_value_t = 800)]
        width: i32,

        /// Container height in pixels
        #[arg(long, default_value_t = 600)]
        height: i32,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Parse a perspective and report applied, unmatched and skipped records
    Check {
        /// Perspective file
        #[arg(value_name = "PERSPECTIVE")]
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// What the binary should do, after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Layout {
        path: PathBuf,
        container: Rect,
        format: OutputFormat,
    },
    Check {
        path: PathBuf,
    },
}

impl CliArgs {
    /// Validate parsed arguments into an action
    pub fn into_action(self) -> Result<Action, String> {
        match self.command {
            Command::Layout {
                file,
                width,
                height,
                json,
            } => {
                if width <= 0 || height <= 0 {
                    return Err(format!(
                        "Container size must be positive, got {}x{}",
                        width, height
                    ));
                }
                Ok(Action::Layout {
                    path: resolve_perspective_path(&file),
                    container: Rect::new(0, 0, width, height),
                    format: if json {
                        OutputFormat::Json
                    } else {
                        OutputFormat::Text
                    },
                })
            }
            Command::Check { file } => Ok(Action::Check {
                path: resolve_perspective_path(&file),
            }),
        }
    }
}

/// Use `path` as given if it exists or names a directory; otherwise look
/// for it in the perspectives directory, with or without the
/// `.perspective` extension
pub fn resolve_perspective_path(path: &Path) -> PathBuf {
    let bare = path.parent().is_none_or(|parent| parent.as_os_str().is_empty());
    if path.exists() || !bare {
        return path.to_path_buf();
    }
    let candidates = [
        crate::config_paths::perspectives_dir().map(|dir| dir.join(path)),
        path.to_str().and_then(crate::config_paths::perspective_file),
    ];
    candidates
        .into_iter()
        .flatten()
        .find(|candidate| candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}
