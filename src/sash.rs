//! Window with draggable edges
//!
//! A `SashWindow` lets the user resize a window by dragging any of its
//! enabled edges. It never resizes itself: releasing a drag produces a
//! `SashDragged` describing the proposed rectangle and the host decides
//! whether to apply it with `set_rect`.

use serde::{Deserialize, Serialize};

use crate::drag::{DragController, DragEnd, DEFAULT_HIT_TOLERANCE};
use crate::geometry::{Orientation, Point, Rect};

/// Width of a visible sash strip
pub const DEFAULT_SASH_BORDER: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SashEdge {
    Top,
    Right,
    Bottom,
    Left,
}

impl SashEdge {
    pub const ALL: [SashEdge; 4] = [SashEdge::Top, SashEdge::Right, SashEdge::Bottom, SashEdge::Left];

    fn index(self) -> usize {
        self as usize
    }

    /// Axis the edge moves along
    pub fn axis(self) -> Orientation {
        match self {
            SashEdge::Top | SashEdge::Bottom => Orientation::Vertical,
            SashEdge::Left | SashEdge::Right => Orientation::Horizontal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct EdgeState {
    shown: bool,
    margin: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SashDragStatus {
    Ok,
    /// The pointer crossed the opposite edge or the size hit a limit; the
    /// rect is clamped
    OutOfRange,
}

/// A finished edge drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SashDragged {
    pub edge: SashEdge,
    pub rect: Rect,
    pub status: SashDragStatus,
}

#[derive(Debug, Clone)]
pub struct SashWindow {
    rect: Rect,
    edges: [EdgeState; 4],
    border_size: i32,
    extra_border_size: i32,
    min_width: i32,
    min_height: i32,
    max_width: i32,
    max_height: i32,
    drag: DragController<SashEdge>,
}

impl Default for SashWindow {
    fn default() -> Self {
        Self::new(Rect::EMPTY)
    }
}

impl SashWindow {
    /// `rect` is in the parent's coordinates, like every point passed in
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            edges: [EdgeState::default(); 4],
            border_size: DEFAULT_SASH_BORDER,
            extra_border_size: 0,
            min_width: 0,
            min_height: 0,
            max_width: i32::MAX,
            max_height: i32::MAX,
            drag: DragController::new(0, DEFAULT_HIT_TOLERANCE),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub fn set_sash_visible(&mut self, edge: SashEdge, shown: bool) {
        let margin = if shown {
            self.border_size + self.extra_border_size
        } else {
            0
        };
        self.edges[edge.index()] = EdgeState { shown, margin };
    }

    pub fn sash_visible(&self, edge: SashEdge) -> bool {
        self.edges[edge.index()].shown
    }

    pub fn edge_margin(&self, edge: SashEdge) -> i32 {
        self.edges[edge.index()].margin
    }

    /// Applies to edges made visible afterwards
    pub fn set_default_border_size(&mut self, width: i32) {
        self.border_size = width.max(0);
    }

    pub fn default_border_size(&self) -> i32 {
        self.border_size
    }

    pub fn set_extra_border_size(&mut self, width: i32) {
        self.extra_border_size = width.max(0);
    }

    pub fn extra_border_size(&self) -> i32 {
        self.extra_border_size
    }

    pub fn set_minimum_size_x(&mut self, min: i32) {
        self.min_width = min.max(0);
    }

    pub fn set_minimum_size_y(&mut self, min: i32) {
        self.min_height = min.max(0);
    }

    pub fn set_maximum_size_x(&mut self, max: i32) {
        self.max_width = max.max(0);
    }

    pub fn set_maximum_size_y(&mut self, max: i32) {
        self.max_height = max.max(0);
    }

    pub fn minimum_size(&self) -> (i32, i32) {
        (self.min_width, self.min_height)
    }

    pub fn maximum_size(&self) -> (i32, i32) {
        (self.max_width, self.max_height)
    }

    /// Area left for the content window once the sash strips are taken out
    pub fn client_rect(&self) -> Rect {
        let margin = |edge: SashEdge| self.edge_margin(edge);
        let x = self.rect.x + margin(SashEdge::Left);
        let y = self.rect.y + margin(SashEdge::Top);
        Rect::new(
            x,
            y,
            (self.rect.width - margin(SashEdge::Left) - margin(SashEdge::Right)).max(0),
            (self.rect.height - margin(SashEdge::Top) - margin(SashEdge::Bottom)).max(0),
        )
    }

    /// Visible edge under `point`, within `tolerance` of its strip
    pub fn sash_hit_test(&self, point: Point, tolerance: i32) -> Option<SashEdge> {
        if !self.rect.inflate(tolerance).contains(point) {
            return None;
        }
        let r = self.rect;
        SashEdge::ALL.into_iter().find(|edge| {
            let state = self.edges[edge.index()];
            if !state.shown {
                return false;
            }
            let reach = state.margin + tolerance;
            match edge {
                SashEdge::Top => point.y < r.y + reach,
                SashEdge::Bottom => point.y >= r.bottom() - reach,
                SashEdge::Left => point.x < r.x + reach,
                SashEdge::Right => point.x >= r.right() - reach,
            }
        })
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    pub fn is_dragging(&self) -> bool {
        self.drag.is_armed() || self.drag.is_dragging()
    }

    pub fn dragging_edge(&self) -> Option<SashEdge> {
        self.drag.target().copied()
    }

    /// Tracker line for the edge being dragged
    pub fn drag_hint(&self) -> Option<Rect> {
        self.drag.state().and_then(|state| state.hint)
    }

    pub fn on_pointer_down(&mut self, point: Point) -> bool {
        match self.sash_hit_test(point, self.drag.tolerance) {
            Some(edge) => self.drag.press(edge, point, 0),
            None => false,
        }
    }

    pub fn on_pointer_move(&mut self, point: Point) -> bool {
        self.drag.motion(point);
        let Some(edge) = self.dragging_edge() else {
            return false;
        };
        let tracker = match edge.axis() {
            Orientation::Vertical => Rect::new(self.rect.x, point.y, self.rect.width, 1),
            Orientation::Horizontal => Rect::new(point.x, self.rect.y, 1, self.rect.height),
        };
        self.drag.set_hint(Some(tracker));
        true
    }

    /// Finish an edge drag. A press and release without movement still
    /// reports the (unchanged) rectangle.
    pub fn on_pointer_up(&mut self, point: Point) -> Option<SashDragged> {
        let edge = match self.drag.release(point) {
            DragEnd::Nothing => return None,
            DragEnd::Click { target, .. } => target,
            DragEnd::Commit(commit) => commit.target,
        };
        let dragged = self.dragged_rect(edge, point);
        tracing::debug!(?edge, rect = ?dragged.rect, status = ?dragged.status, "Sash dragged");
        Some(dragged)
    }

    pub fn on_capture_lost(&mut self) -> bool {
        self.drag.abort().is_some()
    }

    /// Rectangle the window would have with `edge` released at `point`
    pub fn dragged_rect(&self, edge: SashEdge, point: Point) -> SashDragged {
        let r = self.rect;
        let mut status = SashDragStatus::Ok;

        let (raw, min, max) = match edge {
            SashEdge::Top => (r.bottom() - point.y, self.min_height, self.max_height),
            SashEdge::Bottom => (point.y - r.y, self.min_height, self.max_height),
            SashEdge::Left => (r.right() - point.x, self.min_width, self.max_width),
            SashEdge::Right => (point.x - r.x, self.min_width, self.max_width),
        };

        let size = if raw < 0 {
            status = SashDragStatus::OutOfRange;
            r.length(edge.axis())
        } else {
            if raw < min || raw > max {
                status = SashDragStatus::OutOfRange;
            }
            raw.clamp(min, max.max(min))
        };

        let rect = match edge {
            SashEdge::Top => Rect::new(r.x, r.bottom() - size, r.width, size),
            SashEdge::Bottom => Rect::new(r.x, r.y, r.width, size),
            SashEdge::Left => Rect::new(r.right() - size, r.y, size, r.height),
            SashEdge::Right => Rect::new(r.x, r.y, size, r.height),
        };

        SashDragged { edge, rect, status }
    }
}
