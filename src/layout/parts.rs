//! UI parts and hit-testing
//!
//! Every layout produces a flat list of parts: the rectangles the host draws
//! (captions, grippers, buttons, borders, sashes) and the ones it routes
//! mouse input through. Hit-testing picks the most specific part under a
//! point, so a caption button wins over its caption and a caption wins over
//! the pane body.

use serde::Serialize;

use crate::geometry::{Orientation, Point, Rect};
use crate::panel::{DockKey, PaneButton, PaneId};

/// What a UI part represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UiPartKind {
    Caption,
    Gripper,
    /// Whole dock area; used for measurements, never hit
    Dock,
    /// Sash resizing a whole dock
    DockSizer,
    /// Content area where the pane's window goes
    Pane,
    /// Sash between two panes of the same dock
    PaneSizer,
    /// Center area when no center pane exists
    Background,
    PaneBorder,
    PaneButton(PaneButton),
}

/// A rectangle produced by layout, tagged with what it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UiPart {
    pub kind: UiPartKind,
    /// Orientation of the owning dock (sash movement axis for sizers)
    pub orientation: Orientation,
    pub dock: Option<DockKey>,
    /// For pane sizers, the pane preceding the sash
    pub pane: Option<PaneId>,
    pub rect: Rect,
}

impl UiPart {
    pub fn is_sizer(&self) -> bool {
        matches!(self.kind, UiPartKind::DockSizer | UiPartKind::PaneSizer)
    }
}

impl UiPartKind {
    fn priority(self) -> u8 {
        match self {
            UiPartKind::PaneButton(_) => 6,
            UiPartKind::DockSizer | UiPartKind::PaneSizer => 5,
            UiPartKind::Caption | UiPartKind::Gripper => 4,
            UiPartKind::Pane => 2,
            UiPartKind::PaneBorder => 1,
            UiPartKind::Background => 0,
            UiPartKind::Dock => 0,
        }
    }
}

/// Find the most specific part at `point`.
///
/// Sizers also match within `tolerance` pixels of their rectangle, but an
/// exact hit on any other part takes precedence over such a near miss.
pub fn hit_test(parts: &[UiPart], point: Point, tolerance: i32) -> Option<&UiPart> {
    let exact = parts
        .iter()
        .filter(|part| part.kind != UiPartKind::Dock && part.rect.contains(point))
        .max_by_key(|part| part.kind.priority());

    match exact {
        Some(part) if part.kind.priority() >= UiPartKind::Caption.priority() => Some(part),
        _ => parts
            .iter()
            .find(|part| part.is_sizer() && part.rect.inflate(tolerance).contains(point))
            .or(exact),
    }
}
