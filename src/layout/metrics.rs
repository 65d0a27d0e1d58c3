//! Metrics and layout options
//!
//! The host's art provider decides how large captions, sashes and buttons
//! are; the layout engine only consumes the numbers.

use serde::{Deserialize, Serialize};

/// Pixel sizes of the decorations the layout engine reserves space for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockMetrics {
    /// Height of a pane caption bar
    pub caption_size: i32,
    /// Thickness of dock and pane resize sashes
    pub sash_size: i32,
    /// Thickness of a toolbar gripper
    pub gripper_size: i32,
    /// Width of the border drawn around a pane
    pub pane_border_size: i32,
    /// Width and height of a caption button
    pub button_size: i32,
}

impl Default for DockMetrics {
    fn default() -> Self {
        Self {
            caption_size: 17,
            sash_size: 4,
            gripper_size: 9,
            pane_border_size: 1,
            button_size: 14,
        }
    }
}

/// Smallest extent a dock is ever given when first sized
pub const MIN_DOCK_SIZE: i32 = 10;

/// Extent used for panes that specify neither a best nor a minimum size
pub const FALLBACK_PANE_EXTENT: i32 = 100;

/// Tunables of the layout algorithm itself
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Fraction of the container width a new left/right dock may take
    pub dock_constraint_x: f64,
    /// Fraction of the container height a new top/bottom dock may take
    pub dock_constraint_y: f64,
}

/// Default share of the container a new dock may take
pub const DEFAULT_DOCK_CONSTRAINT: f64 = 1.0 / 3.0;

fn constraint_fraction(value: f64) -> f64 {
    if value.is_nan() {
        DEFAULT_DOCK_CONSTRAINT
    } else {
        value.clamp(0.0, 1.0)
    }
}

impl LayoutOptions {
    /// Set the new-dock constraint; values are clamped to `0.0..=1.0` and
    /// NaN falls back to [`DEFAULT_DOCK_CONSTRAINT`]
    pub fn with_dock_constraint(mut self, width_pct: f64, height_pct: f64) -> Self {
        self.dock_constraint_x = constraint_fraction(width_pct);
        self.dock_constraint_y = constraint_fraction(height_pct);
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            dock_constraint_x: DEFAULT_DOCK_CONSTRAINT,
            dock_constraint_y: DEFAULT_DOCK_CONSTRAINT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dock_constraint_clamps_and_rejects_nan() {
        let options = LayoutOptions::default().with_dock_constraint(f64::NAN, 1.5);
        assert_eq!(options.dock_constraint_x, DEFAULT_DOCK_CONSTRAINT);
        assert_eq!(options.dock_constraint_y, 1.0);

        let options = options.with_dock_constraint(-0.2, 0.25);
        assert_eq!(options.dock_constraint_x, 0.0);
        assert_eq!(options.dock_constraint_y, 0.25);
    }
}
