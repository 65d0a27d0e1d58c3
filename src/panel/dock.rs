//! Dock strips
//!
//! A dock groups the panes that share a direction, layer and row. Docks do
//! not own panes; they hold `PaneId`s into the manager's `PaneSet`.

use serde::{Deserialize, Serialize};

use super::pane::{DockDirection, PaneId};
use crate::geometry::{Orientation, Rect};

/// Identity of a dock: (direction, layer, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DockKey {
    pub direction: DockDirection,
    pub layer: i32,
    pub row: i32,
}

impl DockKey {
    pub fn new(direction: DockDirection, layer: i32, row: i32) -> Self {
        Self {
            direction,
            layer,
            row,
        }
    }
}

/// State for a single dock strip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockInfo {
    pub key: DockKey,

    /// Member panes, ordered by `position`
    pub panes: Vec<PaneId>,

    /// Rectangle from the most recent layout
    pub rect: Rect,

    /// Extent perpendicular to the dock's orientation (width for left/right,
    /// height for top/bottom); 0 until first sized
    pub size: i32,

    /// Smallest extent the dock may be resized to
    pub min_size: i32,

    /// Whether the dock has a resize sash
    pub resizable: bool,

    /// Whether the dock contains only toolbars
    pub toolbar: bool,

    /// Panes use absolute pixel offsets instead of proportions
    pub fixed: bool,
}

impl DockInfo {
    pub fn new(key: DockKey) -> Self {
        Self {
            key,
            panes: Vec::new(),
            rect: Rect::EMPTY,
            size: 0,
            min_size: 0,
            resizable: true,
            toolbar: false,
            fixed: false,
        }
    }

    pub fn with_size(key: DockKey, size: i32) -> Self {
        Self {
            size,
            ..Self::new(key)
        }
    }

    pub fn direction(&self) -> DockDirection {
        self.key.direction
    }

    pub fn layer(&self) -> i32 {
        self.key.layer
    }

    pub fn row(&self) -> i32 {
        self.key.row
    }

    /// Axis along which member panes are laid out
    pub fn orientation(&self) -> Orientation {
        self.key.direction.orientation()
    }

    pub fn is_horizontal(&self) -> bool {
        self.orientation() == Orientation::Horizontal
    }

    pub fn is_vertical(&self) -> bool {
        self.orientation() == Orientation::Vertical
    }

    pub fn is_center(&self) -> bool {
        self.key.direction == DockDirection::Center
    }

    pub fn contains(&self, pane: PaneId) -> bool {
        self.panes.contains(&pane)
    }

    /// Check if this dock has any panes
    pub fn has_panes(&self) -> bool {
        !self.panes.is_empty()
    }
}
