//! dockyard - layout core for dockable panes
//!
//! This crate computes where dockable panes go inside a managed container:
//! docks carved from the container edges in layers and rows, proportional
//! and fixed pane placement inside docks, sash and caption dragging,
//! drop placement, and perspective strings that save and restore the whole
//! arrangement. It also provides a two-pane splitter, a window with
//! draggable edges, and a dismissable info bar.
//!
//! Nothing here draws or owns windows. The host hands in its container
//! rectangle and pointer input, and reads back rectangles and events.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod drag;
pub mod events;
pub mod geometry;
pub mod infobar;
pub mod layout;
pub mod manager;
pub mod panel;
pub mod perspective;
pub mod sash;
pub mod splitter;
pub mod tracing;

// Re-export commonly used types
pub use config::DockConfig;
pub use events::{DockEvent, DockListener, EventControl};
pub use geometry::{Point, Rect, Size};
pub use layout::Layout;
pub use manager::{DockManager, ManagerFlags};
pub use panel::{DockDirection, PaneFlags, PaneId, PaneInfo, WindowId};
pub use splitter::SplitterWindow;
