//! Diagnostics for the docking layout
//!
//! Structured logging with scoped filtering for tracking down layout and
//! drag problems.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=dockyard::manager=debug` - module-level filtering
//! - `RUST_LOG=dockyard::perspective=trace` - every parsed perspective field
//!
//! # Log Files
//!
//! Logs are written to `~/.config/dockyard/logs/dockyard.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use std::collections::BTreeMap;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config_paths::LOG_FILE_PREFIX;
use crate::geometry::Rect;
use crate::layout::Layout;
use crate::panel::{DockKey, PaneId};

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG, defaulting to warnings only.
/// File logging writes to `~/.config/dockyard/logs/dockyard.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Pane and dock rectangles of one layout, for diffing across updates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutSnapshot {
    pub container: Rect,
    pub panes: BTreeMap<PaneId, Rect>,
    pub docks: BTreeMap<DockKey, Rect>,
}

fn show(rect: &Rect) -> String {
    format!("({},{} {}x{})", rect.x, rect.y, rect.width, rect.height)
}

impl LayoutSnapshot {
    pub fn from_layout(layout: &Layout) -> Self {
        Self {
            container: layout.container,
            panes: layout.panes.clone(),
            docks: layout.docks.clone(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &LayoutSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.container != other.container {
            changes.push(format!(
                "container: {} → {}",
                show(&self.container),
                show(&other.container)
            ));
        }

        for (id, before) in &self.panes {
            match other.panes.get(id) {
                Some(after) if after != before => {
                    changes.push(format!("#{}: {} → {}", id.0, show(before), show(after)));
                }
                Some(_) => {}
                None => changes.push(format!("#{}: removed", id.0)),
            }
        }
        for (id, after) in &other.panes {
            if !self.panes.contains_key(id) {
                changes.push(format!("#{}: added at {}", id.0, show(after)));
            }
        }

        let before_docks = self.docks.len();
        let after_docks = other.docks.len();
        if before_docks != after_docks {
            changes.push(format!("dock count: {} → {}", before_docks, after_docks));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
