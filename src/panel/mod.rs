//! Pane and dock data model
//!
//! This module provides the value objects the docking manager works on.
//! Panes dock against the left, right, top or bottom edge (or the center) of
//! a managed container, grouped into docks by layer and row.
//!
//! ## Architecture
//!
//! - `PaneInfo`: layout descriptor for one pane (direction, layer, row,
//!   position, sizes, flags), built with chained setters
//! - `PaneFlags`: persisted state bits (dockable sides, caption, buttons, ...)
//! - `DockInfo`: one dock strip keyed by `DockKey` (direction, layer, row)
//! - `PaneSet`: the arena that owns all panes; docks refer to panes by `PaneId`
//!
//! ## Integration
//!
//! The model integrates with:
//! - Geometry via `compute_layout()` in `layout/engine.rs`
//! - Persistence via `perspective::save()` / `perspective::load()`
//! - Mutation and notifications via `DockManager` in `manager.rs`

mod dock;
mod pane;
mod set;

pub use dock::{DockInfo, DockKey};
pub use pane::{
    DockDirection, PaneButton, PaneFlags, PaneId, PaneInfo, Placement, WindowId,
    DEFAULT_PROPORTION,
};
pub use set::{AddPaneError, PaneSet};
