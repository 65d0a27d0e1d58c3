//! Two-pane splitter
//!
//! A `SplitterWindow` shows one window, or two windows separated by a
//! draggable sash. The sash position is the size of the first pane in
//! pixels along the split axis.
//!
//! Position arguments follow one convention everywhere: a positive value is
//! taken as is, zero means "half", and a negative value counts back from
//! the far edge. A position requested before the splitter has a size is
//! remembered and applied on the first `resize`.

use thiserror::Error;

use crate::config::SplitterDefaults;
use crate::drag::{DragController, DragEnd, DragMotion, HintMode};
use crate::geometry::{Orientation, Point, Rect, Size};
use crate::panel::WindowId;

/// Dragging the sash this close to an edge unsplits, when unsplitting is
/// permitted
pub const UNSPLIT_THRESHOLD: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitMode {
    /// One pane above the other; the sash moves along y
    Horizontal,
    /// Panes side by side; the sash moves along x
    #[default]
    Vertical,
}

impl SplitMode {
    /// Axis the sash moves along
    pub fn axis(self) -> Orientation {
        match self {
            SplitMode::Horizontal => Orientation::Vertical,
            SplitMode::Vertical => Orientation::Horizontal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("splitter is already split")]
    AlreadySplit,
    #[error("splitter is not split")]
    NotSplit,
    #[error("both panes cannot show the same window")]
    SameWindow,
    #[error("window {0:?} is not in this splitter")]
    UnknownWindow(WindowId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitterEvent {
    /// The sash is about to move to `position`. Listeners may veto or
    /// substitute another position.
    SashPositionChanging { position: i32 },
    SashPositionChanged { old: i32, new: i32 },
    Unsplit { removed: WindowId },
    /// Vetoing stops the default unsplit
    DoubleClicked { point: Point },
}

/// Handed to splitter listeners alongside each event
#[derive(Debug)]
pub struct SplitterControl {
    vetoed: bool,
    position: i32,
}

impl SplitterControl {
    fn new(position: i32) -> Self {
        Self {
            vetoed: false,
            position,
        }
    }

    pub fn veto(&mut self) {
        self.vetoed = true;
    }

    pub fn is_vetoed(&self) -> bool {
        self.vetoed
    }

    /// Proposed sash position of a `SashPositionChanging` event
    pub fn position(&self) -> i32 {
        self.position
    }

    pub fn set_position(&mut self, position: i32) {
        self.position = position;
    }
}

pub trait SplitterListener {
    fn on_event(&mut self, event: &SplitterEvent, control: &mut SplitterControl);
}

impl<F> SplitterListener for F
where
    F: FnMut(&SplitterEvent, &mut SplitterControl),
{
    fn on_event(&mut self, event: &SplitterEvent, control: &mut SplitterControl) {
        self(event, control)
    }
}

/// Drag target of the splitter's only handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sash;

pub struct SplitterWindow {
    mode: SplitMode,
    window1: Option<WindowId>,
    window2: Option<WindowId>,
    size: Size,
    sash_position: i32,
    /// Position asked for before the splitter had a size
    requested: Option<i32>,
    sash_size: i32,
    gravity: f64,
    minimum_pane_size: i32,
    permit_unsplit_always: bool,
    drag: DragController<Sash>,
    listeners: Vec<Box<dyn SplitterListener>>,
}

impl Default for SplitterWindow {
    fn default() -> Self {
        Self::new(&SplitterDefaults::default())
    }
}

impl SplitterWindow {
    pub fn new(defaults: &SplitterDefaults) -> Self {
        Self {
            mode: SplitMode::default(),
            window1: None,
            window2: None,
            size: Size::new(0, 0),
            sash_position: 0,
            requested: None,
            sash_size: defaults.sash_size.max(0),
            gravity: defaults.sash_gravity.clamp(0.0, 1.0),
            minimum_pane_size: defaults.minimum_pane_size.max(0),
            permit_unsplit_always: defaults.permit_unsplit_always,
            drag: DragController::default(),
            listeners: Vec::new(),
        }
    }

    pub fn with_hint_mode(mut self, mode: HintMode) -> Self {
        self.drag.hint_mode = mode;
        self
    }

    pub fn add_listener<L: SplitterListener + 'static>(&mut self, listener: L) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, event: SplitterEvent, position: i32) -> SplitterControl {
        let mut control = SplitterControl::new(position);
        for listener in self.listeners.iter_mut() {
            listener.on_event(&event, &mut control);
        }
        control
    }

    // ------------------------------------------------------------------
    // Windows
    // ------------------------------------------------------------------

    pub fn window1(&self) -> Option<WindowId> {
        self.window1
    }

    pub fn window2(&self) -> Option<WindowId> {
        self.window2
    }

    pub fn is_split(&self) -> bool {
        self.window2.is_some()
    }

    pub fn split_mode(&self) -> SplitMode {
        self.mode
    }

    pub fn set_split_mode(&mut self, mode: SplitMode) {
        self.mode = mode;
    }

    /// Show a single window, unsplit
    pub fn initialize(&mut self, window: WindowId) {
        self.window1 = Some(window);
        self.window2 = None;
        self.sash_position = 0;
        self.requested = None;
    }

    pub fn split_vertically(
        &mut self,
        window1: WindowId,
        window2: WindowId,
        position: i32,
    ) -> Result<(), SplitError> {
        self.split(SplitMode::Vertical, window1, window2, position)
    }

    pub fn split_horizontally(
        &mut self,
        window1: WindowId,
        window2: WindowId,
        position: i32,
    ) -> Result<(), SplitError> {
        self.split(SplitMode::Horizontal, window1, window2, position)
    }

    fn split(
        &mut self,
        mode: SplitMode,
        window1: WindowId,
        window2: WindowId,
        position: i32,
    ) -> Result<(), SplitError> {
        if self.is_split() {
            return Err(SplitError::AlreadySplit);
        }
        if window1 == window2 {
            return Err(SplitError::SameWindow);
        }

        self.mode = mode;
        self.window1 = Some(window1);
        self.window2 = Some(window2);
        self.set_sash_position(position);
        tracing::debug!(?mode, ?window1, ?window2, position, "Split");
        Ok(())
    }

    /// Remove one window (the second when `remove` is `None`), leaving the
    /// other filling the splitter
    pub fn unsplit(&mut self, remove: Option<WindowId>) -> Result<WindowId, SplitError> {
        let (Some(first), Some(second)) = (self.window1, self.window2) else {
            return Err(SplitError::NotSplit);
        };

        let removed = match remove {
            None => second,
            Some(window) if window == second => second,
            Some(window) if window == first => {
                self.window1 = Some(second);
                first
            }
            Some(window) => return Err(SplitError::UnknownWindow(window)),
        };
        self.window2 = None;
        self.sash_position = 0;

        self.notify(SplitterEvent::Unsplit { removed }, 0);
        tracing::debug!(?removed, "Unsplit");
        Ok(removed)
    }

    pub fn replace_window(&mut self, old: WindowId, new: WindowId) -> Result<(), SplitError> {
        if self.window1 == Some(old) {
            self.window1 = Some(new);
        } else if self.window2 == Some(old) {
            self.window2 = Some(new);
        } else {
            return Err(SplitError::UnknownWindow(old));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Sash
    // ------------------------------------------------------------------

    pub fn sash_position(&self) -> i32 {
        self.sash_position
    }

    pub fn sash_size(&self) -> i32 {
        self.sash_size
    }

    /// Move the sash without notifying listeners
    pub fn set_sash_position(&mut self, position: i32) {
        if self.window_size() <= 0 {
            self.requested = Some(position);
            return;
        }
        self.requested = None;
        self.sash_position = self.adjust(self.convert(position));
    }

    pub fn sash_gravity(&self) -> f64 {
        self.gravity
    }

    /// Share of a resize that goes to the first pane, clamped to 0.0..=1.0
    pub fn set_sash_gravity(&mut self, gravity: f64) {
        self.gravity = gravity.clamp(0.0, 1.0);
    }

    pub fn minimum_pane_size(&self) -> i32 {
        self.minimum_pane_size
    }

    pub fn set_minimum_pane_size(&mut self, size: i32) {
        self.minimum_pane_size = size.max(0);
        if self.is_split() && self.window_size() > 0 {
            self.sash_position = self.adjust(self.sash_position);
        }
    }

    /// Allow dragging to an edge to unsplit even with a minimum pane size
    pub fn permit_unsplit_always(&mut self, permit: bool) {
        self.permit_unsplit_always = permit;
    }

    fn unsplit_allowed(&self) -> bool {
        self.permit_unsplit_always || self.minimum_pane_size == 0
    }

    fn window_size(&self) -> i32 {
        self.size.along(self.mode.axis())
    }

    fn convert(&self, position: i32) -> i32 {
        match position {
            0 => self.window_size() / 2,
            p if p < 0 => self.window_size() + p,
            p => p,
        }
    }

    /// Keep both panes at least `minimum_pane_size` wide
    fn adjust(&self, position: i32) -> i32 {
        let min = self.minimum_pane_size;
        let mut position = position.max(min);
        let max = self.window_size() - min - self.sash_size;
        if max > 0 && position > max && max >= min {
            position = max;
        }
        position
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    pub fn size(&self) -> Size {
        self.size
    }

    /// The splitter itself was resized; the sash moves by the gravity share
    /// of the change
    pub fn resize(&mut self, size: Size) {
        let old_size = self.window_size();
        self.size = size;
        let new_size = self.window_size();

        if !self.is_split() || new_size <= 0 {
            return;
        }
        if let Some(requested) = self.requested.take() {
            self.sash_position = self.adjust(self.convert(requested));
            return;
        }

        let mut position = self.sash_position;
        if old_size > 0 && new_size != old_size {
            position += ((new_size - old_size) as f64 * self.gravity) as i32;
        }
        let position = self.adjust(position);
        if position != self.sash_position {
            let old = self.sash_position;
            self.sash_position = position;
            self.notify(SplitterEvent::SashPositionChanged { old, new: position }, position);
        }
    }

    fn full_rect(&self) -> Rect {
        Rect::new(0, 0, self.size.width.max(0), self.size.height.max(0))
    }

    fn sash_rect_at(&self, position: i32) -> Rect {
        self.full_rect()
            .slice(self.mode.axis(), position, self.sash_size)
    }

    /// Sash strip, when split
    pub fn sash_rect(&self) -> Option<Rect> {
        self.is_split()
            .then(|| self.sash_rect_at(self.sash_position))
    }

    /// Rectangles of the first and (when split) second pane
    pub fn pane_rects(&self) -> (Option<Rect>, Option<Rect>) {
        let full = self.full_rect();
        if !self.is_split() {
            return (self.window1.map(|_| full), None);
        }

        let axis = self.mode.axis();
        let total = full.length(axis);
        let first = self.sash_position.clamp(0, total);
        let second_start = (first + self.sash_size).min(total);
        (
            Some(full.slice(axis, 0, first)),
            Some(full.slice(axis, second_start, total - second_start)),
        )
    }

    pub fn sash_hit_test(&self, point: Point) -> bool {
        self.sash_rect()
            .is_some_and(|rect| rect.inflate(self.drag.tolerance).contains(point))
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Outline of the sash while dragging in outline mode
    pub fn drag_hint(&self) -> Option<Rect> {
        self.drag.state().and_then(|state| state.hint)
    }

    pub fn on_pointer_down(&mut self, point: Point) -> bool {
        if !self.sash_hit_test(point) {
            return false;
        }
        self.drag.press(Sash, point, self.sash_position)
    }

    pub fn on_pointer_move(&mut self, point: Point) -> bool {
        if self.drag.motion(point) == DragMotion::None {
            return self.drag.is_armed();
        }
        let Some(state) = self.drag.state() else {
            return false;
        };
        let candidate = state.start_offset + state.delta_along(self.mode.axis());

        let Some(position) = self.position_changing(candidate) else {
            return true;
        };
        match self.drag.hint_mode {
            HintMode::LiveResize => {
                if position > 0 && position < self.window_size() {
                    self.sash_position = position;
                }
            }
            HintMode::Outline => {
                let hint = self.sash_rect_at(position);
                self.drag.set_hint(Some(hint));
            }
        }
        true
    }

    pub fn on_pointer_up(&mut self, point: Point) -> bool {
        let commit = match self.drag.release(point) {
            DragEnd::Nothing => return false,
            DragEnd::Click { .. } => return true,
            DragEnd::Commit(commit) => commit,
        };

        let old = commit.start_offset;
        let candidate = old + commit.delta_along(self.mode.axis());
        let Some(position) = self.position_changing(candidate) else {
            self.sash_position = old;
            return true;
        };

        if self.unsplit_allowed() && position <= 0 {
            self.sash_position = old;
            if let Some(first) = self.window1 {
                let _ = self.unsplit(Some(first));
            }
        } else if self.unsplit_allowed() && position >= self.window_size() {
            self.sash_position = old;
            let _ = self.unsplit(None);
        } else {
            self.sash_position = position;
            if position != old {
                self.notify(SplitterEvent::SashPositionChanged { old, new: position }, position);
            }
        }
        true
    }

    /// Abandon the drag and put the sash back where it started
    pub fn on_capture_lost(&mut self) -> bool {
        match self.drag.abort() {
            Some(state) => {
                self.sash_position = state.start_offset;
                true
            }
            None => false,
        }
    }

    /// Double click on the sash. Unsplits unless vetoed or a minimum pane
    /// size is set.
    pub fn on_double_click(&mut self, point: Point) -> bool {
        if !self.sash_hit_test(point) {
            return false;
        }
        let control = self.notify(SplitterEvent::DoubleClicked { point }, self.sash_position);
        if !control.is_vetoed() && self.unsplit_allowed() {
            let _ = self.unsplit(None);
        }
        true
    }

    /// Snap to the edges when unsplitting is allowed, clamp to the minimum
    /// pane size otherwise, then let listeners veto or adjust. `None` means
    /// vetoed.
    fn position_changing(&mut self, candidate: i32) -> Option<i32> {
        let window_size = self.window_size();
        let mut position = candidate;
        let mut unsplitting = false;

        if self.unsplit_allowed() {
            if position <= UNSPLIT_THRESHOLD {
                position = 0;
                unsplitting = true;
            } else if position >= window_size - UNSPLIT_THRESHOLD {
                position = window_size;
                unsplitting = true;
            }
        }
        if !unsplitting {
            position = self.adjust(position);
        }

        let control = self.notify(SplitterEvent::SashPositionChanging { position }, position);
        if control.is_vetoed() {
            tracing::debug!(position, "Sash move vetoed");
            None
        } else {
            Some(control.position())
        }
    }
}
