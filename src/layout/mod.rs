//! Dock layout computation
//!
//! This module computes every rectangle the docking manager hands to the
//! host: docks, panes, captions, grippers, buttons and resize sashes.
//!
//! ## Architecture
//!
//! - `engine`: `arrange_docks()` groups panes into docks, `compute_layout()`
//!   carves the container layer by layer
//! - `apportion`: proportional sizing with min/max clamping along one dock
//! - `parts`: tagged UI part rectangles and priority hit-testing
//! - `drop`: where a dragged pane lands, shared by commit and hint preview
//! - `metrics`: decoration sizes and the new-dock constraint
//!
//! Layout is a pure function of its inputs; the manager stores the result
//! and only recomputes it on `update()`.

mod apportion;
mod drop;
mod engine;
mod metrics;
mod parts;

pub use apportion::{apportion, Allocation};
pub use drop::{
    apply_drop, insert_dock_layer, insert_dock_row, insert_pane_position, DropContext,
    DropOutcome, LAYER_INSERT_ZONE, ROW_INSERT_ZONE,
};
pub use engine::{
    arrange_docks, compute_layout, dock_key_for, dock_min_extent, pane_extent, resolve_dock_size,
    Layout,
};
pub use metrics::{
    DockMetrics, LayoutOptions, DEFAULT_DOCK_CONSTRAINT, FALLBACK_PANE_EXTENT, MIN_DOCK_SIZE,
};
pub use parts::{hit_test, UiPart, UiPartKind};
