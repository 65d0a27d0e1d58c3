//! Docking manager
//!
//! `DockManager` owns the pane set for one managed container, rebuilds the
//! docks and the layout on `update()`, turns pointer input into sash
//! resizes and pane moves, and notifies listeners.
//!
//! Mutations (adding, closing, moving panes) only touch the model. Nothing
//! is visible in `layout()` until the next `update()`, so any number of
//! changes are applied together.
//!
//! ```
//! use dockyard::config::DockConfig;
//! use dockyard::geometry::Rect;
//! use dockyard::manager::DockManager;
//! use dockyard::panel::{PaneInfo, WindowId};
//!
//! let mut manager = DockManager::new(DockConfig::default());
//! manager.set_container(Rect::new(0, 0, 800, 600));
//! let explorer = manager
//!     .add_pane(WindowId(1), PaneInfo::default().name("explorer").left().best_size(200, 100))
//!     .unwrap();
//! manager.update();
//! assert_eq!(manager.layout().pane_rect(explorer).map(|r| r.x), Some(0));
//! ```

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::config::DockConfig;
use crate::drag::{DragController, DragEnd, DragMotion, HintMode};
use crate::events::{dispatch, DockEvent, DockListener, DockRequest};
use crate::geometry::{Orientation, Point, Rect};
use crate::layout::{
    apply_drop, arrange_docks, compute_layout, dock_key_for, dock_min_extent, insert_dock_layer,
    insert_dock_row, insert_pane_position, DockMetrics, DropContext, DropOutcome, Layout,
    UiPartKind, MIN_DOCK_SIZE,
};
use crate::panel::{
    AddPaneError, DockDirection, DockInfo, DockKey, PaneButton, PaneFlags, PaneId, PaneInfo,
    PaneSet, WindowId, DEFAULT_PROPORTION,
};
use crate::perspective::{self, LoadReport, PerspectiveError};
use crate::tracing::LayoutSnapshot;

bitflags! {
    /// Manager behaviour switches
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ManagerFlags: u32 {
        const ALLOW_FLOATING = 1 << 0;
        /// Track an active pane on pointer presses
        const ALLOW_ACTIVE_PANE = 1 << 1;
        // Drawing hints for the host, see `DockManager::hint_style`
        const TRANSPARENT_DRAG = 1 << 2;
        const TRANSPARENT_HINT = 1 << 3;
        const VENETIAN_BLINDS_HINT = 1 << 4;
        const RECTANGLE_HINT = 1 << 5;
        const HINT_FADE = 1 << 6;
        /// Apply sash drags on every motion instead of on release
        const LIVE_RESIZE = 1 << 8;

        const DEFAULT = Self::ALLOW_FLOATING.bits()
            | Self::TRANSPARENT_HINT.bits()
            | Self::LIVE_RESIZE.bits();
    }
}

/// How the host should draw the drop hint and the dragged pane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintStyle {
    pub kind: HintKind,
    /// Fade the hint in instead of showing it at once
    pub fade: bool,
    /// Draw the pane being dragged semi-transparent
    pub transparent_drag: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintKind {
    Transparent,
    VenetianBlinds,
    Rectangle,
}

/// How far `insert_pane` shifts existing panes to make room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertLevel {
    /// Shift positions inside the target dock
    Pane,
    /// Shift rows of the target layer
    Row,
    /// Shift whole layers on the target side
    Dock,
}

/// What a pointer gesture is acting on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// Resize sash of a whole dock
    DockSash(DockKey),
    /// Sash between `pane` and the pane after it
    PaneSash { dock: DockKey, pane: PaneId },
    /// Caption or gripper drag; `offset` is the grip point inside the pane
    PaneMove { pane: PaneId, offset: Point },
    Button { pane: PaneId, button: PaneButton },
}

impl DragTarget {
    pub fn pane(&self) -> Option<PaneId> {
        match *self {
            DragTarget::DockSash(_) => None,
            DragTarget::PaneSash { pane, .. }
            | DragTarget::PaneMove { pane, .. }
            | DragTarget::Button { pane, .. } => Some(pane),
        }
    }
}

/// Model state captured when a drag starts, restored on cancel
#[derive(Debug, Clone)]
struct Snapshot {
    panes: PaneSet,
    docks: Vec<DockInfo>,
    layout: Layout,
    dirty: bool,
}

/// Upper bound on listener follow-up requests applied in one go
const MAX_DEFERRED_REQUESTS: usize = 256;

/// Docking manager for one container
pub struct DockManager {
    panes: PaneSet,
    docks: Vec<DockInfo>,
    layout: Layout,
    container: Rect,
    drag: DragController<DragTarget>,
    config: DockConfig,
    listeners: Vec<Box<dyn DockListener>>,
    snapshot: Option<Snapshot>,
    pending: Vec<DockRequest>,
    draining: bool,
    deferred_update: bool,
    dirty: bool,
}

fn hint_mode_for(flags: ManagerFlags) -> HintMode {
    if flags.contains(ManagerFlags::LIVE_RESIZE) {
        HintMode::LiveResize
    } else {
        HintMode::Outline
    }
}

impl DockManager {
    pub fn new(config: DockConfig) -> Self {
        Self {
            panes: PaneSet::new(),
            docks: Vec::new(),
            layout: Layout::default(),
            container: Rect::EMPTY,
            drag: DragController::new(config.drag_threshold, config.hit_tolerance)
                .with_hint_mode(hint_mode_for(config.flags)),
            config,
            listeners: Vec::new(),
            snapshot: None,
            pending: Vec::new(),
            draining: false,
            deferred_update: false,
            dirty: false,
        }
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    pub fn metrics(&self) -> &DockMetrics {
        &self.config.metrics
    }

    pub fn set_metrics(&mut self, metrics: DockMetrics) {
        self.config.metrics = metrics;
        self.dirty = true;
    }

    pub fn flags(&self) -> ManagerFlags {
        self.config.flags
    }

    pub fn has_flag(&self, flag: ManagerFlags) -> bool {
        self.config.flags.contains(flag)
    }

    /// Drop hint appearance picked from the flags. A transparent hint wins
    /// over venetian blinds, and a plain rectangle is the fallback.
    pub fn hint_style(&self) -> HintStyle {
        let flags = self.config.flags;
        let kind = if flags.contains(ManagerFlags::TRANSPARENT_HINT) {
            HintKind::Transparent
        } else if flags.contains(ManagerFlags::VENETIAN_BLINDS_HINT) {
            HintKind::VenetianBlinds
        } else {
            HintKind::Rectangle
        };
        HintStyle {
            kind,
            fade: flags.contains(ManagerFlags::HINT_FADE),
            transparent_drag: flags.contains(ManagerFlags::TRANSPARENT_DRAG),
        }
    }

    pub fn set_flags(&mut self, flags: ManagerFlags) {
        self.config.flags = flags;
        self.drag.hint_mode = hint_mode_for(flags);
    }

    /// Fractions of the container a new dock may take, clamped to 0..=1
    pub fn set_dock_size_constraint(&mut self, width_pct: f64, height_pct: f64) {
        self.config.layout = self.config.layout.with_dock_constraint(width_pct, height_pct);
        self.dirty = true;
    }

    pub fn dock_size_constraint(&self) -> (f64, f64) {
        (
            self.config.layout.dock_constraint_x,
            self.config.layout.dock_constraint_y,
        )
    }

    pub fn container(&self) -> Rect {
        self.container
    }

    /// The managed window was resized
    pub fn set_container(&mut self, container: Rect) {
        if self.container != container {
            self.container = container;
            self.dirty = true;
        }
    }

    pub fn add_listener<L: DockListener + 'static>(&mut self, listener: L) {
        self.listeners.push(Box::new(listener));
    }

    // ========================================================================
    // Pane set
    // ========================================================================

    /// Manage `window` as a new pane
    pub fn add_pane(&mut self, window: WindowId, info: PaneInfo) -> Result<PaneId, AddPaneError> {
        let mut info = info.window(window);
        if info.proportion == 0 {
            info.proportion = DEFAULT_PROPORTION;
        }
        let id = self.panes.insert(info)?;
        tracing::debug!(?id, ?window, "Added pane");
        self.dirty = true;
        Ok(id)
    }

    /// Shorthand for a default pane docked at `direction`
    pub fn add_pane_to(
        &mut self,
        window: WindowId,
        direction: DockDirection,
        caption: &str,
    ) -> Result<PaneId, AddPaneError> {
        self.add_pane(
            window,
            PaneInfo::default().direction(direction).caption(caption),
        )
    }

    /// Add a pane and place it as if it had been dropped at `drop_point`
    pub fn add_pane_at(
        &mut self,
        window: WindowId,
        info: PaneInfo,
        drop_point: Point,
    ) -> Result<PaneId, AddPaneError> {
        let id = self.add_pane(window, info)?;
        self.drop_pane(id, drop_point, Point::default());
        Ok(id)
    }

    /// Insert a pane at `location`, shifting existing panes out of the way.
    /// An already managed window is moved instead of added.
    pub fn insert_pane(
        &mut self,
        window: WindowId,
        location: PaneInfo,
        level: InsertLevel,
    ) -> Result<PaneId, AddPaneError> {
        match level {
            InsertLevel::Pane => insert_pane_position(
                &mut self.panes,
                dock_key_for(&location),
                location.position,
                None,
            ),
            InsertLevel::Row => insert_dock_row(
                &mut self.panes,
                location.direction,
                location.layer,
                location.row,
                None,
            ),
            InsertLevel::Dock => {
                insert_dock_layer(&mut self.panes, location.direction, location.layer, None)
            }
        }

        let Some(id) = self.panes.id_by_window(window) else {
            return self.add_pane(window, location);
        };
        if let Some(pane) = self.panes.get_mut(id) {
            pane.flags.remove(PaneFlags::FLOATING);
            pane.direction = location.direction;
            pane.layer = location.layer;
            pane.row = location.row;
            pane.position = location.position;
        }
        self.dirty = true;
        Ok(id)
    }

    /// Stop managing `window`. Returns false if it was not managed.
    pub fn detach_pane(&mut self, window: WindowId) -> bool {
        let Some(id) = self.panes.id_by_window(window) else {
            return false;
        };
        if self.drag.target().and_then(|target| target.pane()) == Some(id) {
            self.cancel_drag();
        }
        self.remove_pane(id);
        true
    }

    fn remove_pane(&mut self, id: PaneId) {
        self.panes.remove(id);
        for dock in &mut self.docks {
            dock.panes.retain(|pane| *pane != id);
        }
        tracing::debug!(?id, "Removed pane");
        self.dirty = true;
    }

    pub fn panes(&self) -> &PaneSet {
        &self.panes
    }

    pub fn docks(&self) -> &[DockInfo] {
        &self.docks
    }

    pub fn pane(&self, name: &str) -> Option<&PaneInfo> {
        self.panes.by_name(name)
    }

    /// Mutable access to a pane; changes show up at the next `update()`
    pub fn pane_mut(&mut self, name: &str) -> Option<&mut PaneInfo> {
        self.dirty = true;
        self.panes.by_name_mut(name)
    }

    pub fn pane_by_window(&self, window: WindowId) -> Option<&PaneInfo> {
        self.panes.by_window(window)
    }

    pub fn pane_by_id(&self, id: PaneId) -> Option<&PaneInfo> {
        self.panes.get(id)
    }

    pub fn pane_id(&self, name: &str) -> Option<PaneId> {
        self.panes.id_by_name(name)
    }

    pub fn show_pane(&mut self, id: PaneId, show: bool) -> bool {
        match self.panes.get_mut(id) {
            Some(pane) => {
                pane.flags.set(PaneFlags::HIDDEN, !show);
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Layout
    // ========================================================================

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Whether changes are waiting for `update()`
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Apply every pending change: rebuild docks, recompute the layout and
    /// notify listeners.
    pub fn update(&mut self) {
        let before = LayoutSnapshot::from_layout(&self.layout);
        self.relayout();
        self.dirty = false;

        if let Some(diff) = before.diff(&LayoutSnapshot::from_layout(&self.layout)) {
            tracing::debug!(%diff, "Layout updated");
        }

        self.assert_invariants();
        self.notify(DockEvent::LayoutChanged);
        self.drain_requests();
    }

    fn relayout(&mut self) {
        let previous = std::mem::take(&mut self.docks);
        let metrics = self.config.metrics;
        let mut docks = arrange_docks(&mut self.panes, &previous, &metrics);
        let layout = compute_layout(
            &self.panes,
            &docks,
            self.container,
            &metrics,
            &self.config.layout,
        );

        for dock in &mut docks {
            if dock.size <= 0 {
                if let Some(size) = layout.dock_sizes.get(&dock.key) {
                    dock.size = *size;
                }
            }
            dock.rect = layout.dock_rect(dock.key).unwrap_or(Rect::EMPTY);
        }
        for (id, pane) in self.panes.iter_mut() {
            pane.rect = layout.pane_rect(id).unwrap_or(Rect::EMPTY);
        }

        self.docks = docks;
        self.layout = layout;
    }

    // ========================================================================
    // Pane actions
    // ========================================================================

    /// Send an event to the listeners, queueing their requests. Returns
    /// false when a vetoable event was vetoed.
    fn notify(&mut self, event: DockEvent) -> bool {
        let mut control = dispatch(&mut self.listeners, &event);
        self.pending.extend(control.take_requests());
        !(event.is_vetoable() && control.is_vetoed())
    }

    fn drain_requests(&mut self) {
        if self.draining {
            return;
        }
        self.draining = true;

        let mut applied = 0;
        let mut update_requested = false;
        while !self.pending.is_empty() {
            if applied == MAX_DEFERRED_REQUESTS {
                tracing::warn!(
                    dropped = self.pending.len(),
                    "Too many deferred requests, dropping the rest"
                );
                self.pending.clear();
                break;
            }
            applied += 1;

            match self.pending.remove(0) {
                DockRequest::AddPane(window, info) => {
                    if let Err(e) = self.add_pane(window, info) {
                        tracing::warn!(?window, "Requested pane not added: {}", e);
                    }
                }
                DockRequest::DetachPane(window) => {
                    self.detach_pane(window);
                }
                DockRequest::ClosePane(id) => {
                    self.close_pane(id);
                }
                DockRequest::ShowPane(id) => {
                    self.show_pane(id, true);
                }
                DockRequest::HidePane(id) => {
                    self.show_pane(id, false);
                }
                DockRequest::Update => {
                    self.dirty = true;
                    update_requested = true;
                }
            }
        }

        self.draining = false;

        if update_requested && !self.deferred_update {
            self.deferred_update = true;
            self.update();
            self.deferred_update = false;
        }
    }

    /// Close a pane: hide it, or remove it when it is destroy-on-close.
    /// Returns false if the pane is unknown or already hidden, and when a
    /// listener vetoes.
    pub fn close_pane(&mut self, id: PaneId) -> bool {
        if !self.panes.get(id).is_some_and(|pane| pane.is_shown()) {
            return false;
        }
        if !self.notify(DockEvent::PaneClose { pane: id }) {
            self.drain_requests();
            return false;
        }

        if self.panes.get(id).is_some_and(|pane| pane.is_maximized()) {
            self.restore_others(id);
        }

        let destroy = self
            .panes
            .get(id)
            .is_some_and(|pane| pane.has_flag(PaneFlags::DESTROY_ON_CLOSE));
        if destroy {
            self.remove_pane(id);
        } else if let Some(pane) = self.panes.get_mut(id) {
            pane.flags.insert(PaneFlags::HIDDEN);
            pane.flags.remove(PaneFlags::ACTIVE);
            self.dirty = true;
        }

        self.drain_requests();
        true
    }

    /// Hide every other docked pane and let `id` fill the container
    pub fn maximize_pane(&mut self, id: PaneId) -> bool {
        if !self.panes.contains(id) {
            return false;
        }
        if !self.notify(DockEvent::PaneMaximize { pane: id }) {
            self.drain_requests();
            return false;
        }

        for (other, pane) in self.panes.iter_mut() {
            if other == id || pane.has_flag(PaneFlags::FLOATING) {
                continue;
            }
            let hidden = pane.has_flag(PaneFlags::HIDDEN);
            pane.flags.set(PaneFlags::SAVED_HIDDEN, hidden);
            pane.flags.remove(PaneFlags::MAXIMIZED);
            pane.flags.insert(PaneFlags::HIDDEN);
        }
        if let Some(pane) = self.panes.get_mut(id) {
            pane.flags.insert(PaneFlags::MAXIMIZED);
            pane.flags.remove(PaneFlags::HIDDEN);
        }
        self.dirty = true;

        self.drain_requests();
        true
    }

    /// Undo `maximize_pane`
    pub fn restore_pane(&mut self, id: PaneId) -> bool {
        if !self.panes.get(id).is_some_and(|pane| pane.is_maximized()) {
            return false;
        }
        if !self.notify(DockEvent::PaneRestore { pane: id }) {
            self.drain_requests();
            return false;
        }
        self.restore_others(id);
        self.drain_requests();
        true
    }

    pub fn restore_maximized_pane(&mut self) -> bool {
        let maximized = self
            .panes
            .iter()
            .find(|(_, pane)| pane.is_maximized())
            .map(|(id, _)| id);
        match maximized {
            Some(id) => self.restore_pane(id),
            None => false,
        }
    }

    fn restore_others(&mut self, id: PaneId) {
        for (other, pane) in self.panes.iter_mut() {
            if other == id {
                pane.flags.remove(PaneFlags::MAXIMIZED);
            } else if !pane.has_flag(PaneFlags::FLOATING) {
                let hidden = pane.has_flag(PaneFlags::SAVED_HIDDEN);
                pane.flags.set(PaneFlags::HIDDEN, hidden);
                pane.flags.remove(PaneFlags::SAVED_HIDDEN);
            }
        }
        self.dirty = true;
    }

    /// Make `id` the active pane
    pub fn activate_pane(&mut self, id: PaneId) -> bool {
        if !self.panes.contains(id) {
            return false;
        }
        if !self.notify(DockEvent::PaneActivated { pane: id }) {
            self.drain_requests();
            return false;
        }
        for (other, pane) in self.panes.iter_mut() {
            pane.flags.set(PaneFlags::ACTIVE, other == id);
        }
        self.drain_requests();
        true
    }

    /// Report a caption button click and run the button's action
    pub fn click_pane_button(&mut self, id: PaneId, button: PaneButton) -> bool {
        if !self.panes.contains(id) {
            return false;
        }
        if !self.notify(DockEvent::PaneButton { pane: id, button }) {
            self.drain_requests();
            return false;
        }

        let handled = match button {
            PaneButton::Close => self.close_pane(id),
            PaneButton::Maximize => {
                if self.panes.get(id).is_some_and(|pane| pane.is_maximized()) {
                    self.restore_pane(id)
                } else {
                    self.maximize_pane(id)
                }
            }
            PaneButton::Pin => {
                let floatable = self.panes.get(id).is_some_and(|pane| pane.is_floatable());
                if floatable && self.has_flag(ManagerFlags::ALLOW_FLOATING) {
                    if let Some(pane) = self.panes.get_mut(id) {
                        pane.flags.insert(PaneFlags::FLOATING);
                    }
                    self.dirty = true;
                    true
                } else {
                    false
                }
            }
            // Left to the host
            PaneButton::Minimize
            | PaneButton::Custom1
            | PaneButton::Custom2
            | PaneButton::Custom3 => true,
        };

        self.drain_requests();
        handled
    }

    // ========================================================================
    // Drop placement
    // ========================================================================

    fn drop_context(&self, grip_offset: Point) -> DropContext {
        DropContext {
            allow_floating: self.has_flag(ManagerFlags::ALLOW_FLOATING),
            grip_offset,
        }
    }

    /// Where `pane` would end up if released at `point`, in the layout that
    /// would result. `None` means it would float (or cannot move).
    pub fn calculate_hint_rect(&self, pane: PaneId, point: Point, offset: Point) -> Option<Rect> {
        let mut scratch = self.panes.clone();
        let context = self.drop_context(offset);
        match apply_drop(&mut scratch, &self.layout, pane, point, &context) {
            DropOutcome::Floated => None,
            DropOutcome::Unchanged => {
                let current = self.layout.pane_rect(pane)?;
                (!current.is_empty()).then_some(current)
            }
            DropOutcome::Docked => {
                let docks = arrange_docks(&mut scratch, &self.docks, &self.config.metrics);
                let layout = compute_layout(
                    &scratch,
                    &docks,
                    self.container,
                    &self.config.metrics,
                    &self.config.layout,
                );
                layout.pane_rect(pane)
            }
        }
    }

    /// Move `pane` to wherever a release at `point` puts it
    pub fn drop_pane(&mut self, pane: PaneId, point: Point, offset: Point) -> DropOutcome {
        let context = self.drop_context(offset);
        let outcome = apply_drop(&mut self.panes, &self.layout, pane, point, &context);
        if outcome != DropOutcome::Unchanged {
            tracing::debug!(?pane, ?outcome, "Dropped pane");
            self.dirty = true;
        }
        outcome
    }

    // ========================================================================
    // Pointer input
    // ========================================================================

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Hint rectangle of the drag in flight
    pub fn drag_hint(&self) -> Option<Rect> {
        self.drag.state().and_then(|state| state.hint)
    }

    /// Pointer pressed. Returns true when the press started a gesture.
    pub fn on_pointer_down(&mut self, point: Point) -> bool {
        if self.drag.is_dragging() {
            return false;
        }
        let Some(part) = self.layout.hit_test(point, self.drag.tolerance).copied() else {
            return false;
        };

        match (part.kind, part.dock, part.pane) {
            (UiPartKind::DockSizer, Some(key), _) => {
                let resizable = self.docks.iter().any(|dock| dock.key == key && dock.resizable);
                if !resizable {
                    return false;
                }
                let perpendicular = key.direction.orientation().flip();
                let extent = self.layout.dock_rect(key).map_or(0, |r| r.length(perpendicular));
                self.drag.press(DragTarget::DockSash(key), point, extent)
            }
            (UiPartKind::PaneSizer, Some(key), Some(pane)) => {
                if self.sash_neighbour(key, pane).is_none() {
                    return false;
                }
                let orientation = key.direction.orientation();
                let length = self.layout.pane_rect(pane).map_or(0, |r| r.length(orientation));
                self.drag
                    .press(DragTarget::PaneSash { dock: key, pane }, point, length)
            }
            (UiPartKind::Caption | UiPartKind::Gripper, _, Some(pane)) => {
                if self.has_flag(ManagerFlags::ALLOW_ACTIVE_PANE) {
                    self.activate_pane(pane);
                }
                let movable = self.panes.get(pane).is_some_and(|info| info.is_movable());
                let Some(rect) = self.layout.pane_rect(pane).filter(|_| movable) else {
                    return false;
                };
                let offset = Point::new(point.x - rect.x, point.y - rect.y);
                self.drag
                    .press(DragTarget::PaneMove { pane, offset }, point, 0)
            }
            (UiPartKind::PaneButton(button), _, Some(pane)) => {
                self.drag.press(DragTarget::Button { pane, button }, point, 0)
            }
            (UiPartKind::Pane | UiPartKind::PaneBorder, _, Some(pane)) => {
                if self.has_flag(ManagerFlags::ALLOW_ACTIVE_PANE) {
                    self.activate_pane(pane);
                }
                false
            }
            _ => false,
        }
    }

    /// Pointer moved. Returns true while a gesture is in progress.
    pub fn on_pointer_move(&mut self, point: Point) -> bool {
        match self.drag.motion(point) {
            DragMotion::None => self.drag.is_armed(),
            DragMotion::Started => {
                self.snapshot = Some(self.take_snapshot());
                self.drag_moved();
                true
            }
            DragMotion::Moved => {
                self.drag_moved();
                true
            }
        }
    }

    /// Pointer released. Returns true when the release ended a gesture.
    pub fn on_pointer_up(&mut self, point: Point) -> bool {
        let handled = match self.drag.release(point) {
            DragEnd::Nothing => false,
            DragEnd::Click { target, point } => {
                self.finish_click(target, point);
                true
            }
            DragEnd::Commit(commit) => {
                let delta = Point::new(commit.end.x - commit.start.x, commit.end.y - commit.start.y);
                match commit.target {
                    DragTarget::DockSash(_) | DragTarget::PaneSash { .. } => {
                        self.commit_sash(commit.target, commit.start_offset, delta);
                    }
                    DragTarget::PaneMove { pane, offset } => {
                        self.rewind();
                        self.snapshot = None;
                        if self.drop_pane(pane, commit.end, offset) != DropOutcome::Unchanged {
                            self.update();
                        }
                    }
                    DragTarget::Button { .. } => {
                        self.snapshot = None;
                        self.finish_click(commit.target, commit.end);
                    }
                }
                true
            }
        };
        self.drain_requests();
        handled
    }

    /// The host lost pointer capture. Any drag is cancelled and the model
    /// goes back to exactly where it was when the drag started.
    pub fn on_capture_lost(&mut self) -> bool {
        self.cancel_drag()
    }

    fn cancel_drag(&mut self) -> bool {
        let cancelled = self.drag.abort();
        if let Some(snapshot) = self.snapshot.take() {
            self.panes = snapshot.panes;
            self.docks = snapshot.docks;
            self.layout = snapshot.layout;
            self.dirty = snapshot.dirty;
        }
        if let Some(state) = &cancelled {
            tracing::debug!(target = ?state.target, "Drag cancelled");
        }
        cancelled.is_some()
    }

    fn take_snapshot(&self) -> Snapshot {
        Snapshot {
            panes: self.panes.clone(),
            docks: self.docks.clone(),
            layout: self.layout.clone(),
            dirty: self.dirty,
        }
    }

    /// Go back to the drag-start state but keep the snapshot
    fn rewind(&mut self) {
        if let Some(snapshot) = &self.snapshot {
            self.panes = snapshot.panes.clone();
            self.docks = snapshot.docks.clone();
            self.layout = snapshot.layout.clone();
        }
    }

    fn finish_click(&mut self, target: DragTarget, point: Point) {
        if let DragTarget::Button { pane, button } = target {
            let still_over = self
                .layout
                .hit_test(point, 0)
                .is_some_and(|part| part.kind == UiPartKind::PaneButton(button) && part.pane == Some(pane));
            if still_over {
                self.click_pane_button(pane, button);
            }
        }
    }

    fn drag_moved(&mut self) {
        let Some(state) = self.drag.state().cloned() else {
            return;
        };

        let hint = match state.target {
            DragTarget::DockSash(_) | DragTarget::PaneSash { .. } => {
                self.apply_sash_drag(state.target, state.start_offset, state.delta());
                let hint = self.sizer_rect(state.target);
                if self.drag.hint_mode == HintMode::Outline {
                    self.rewind();
                }
                hint
            }
            DragTarget::PaneMove { pane, offset } => {
                self.calculate_hint_rect(pane, state.current, offset)
            }
            DragTarget::Button { .. } => None,
        };
        self.drag.set_hint(hint);
    }

    fn commit_sash(&mut self, target: DragTarget, start_offset: i32, delta: Point) {
        let new = self.apply_sash_drag(target, start_offset, delta);
        let allowed = self.notify(DockEvent::SashPositionChanged {
            old: start_offset,
            new,
        });

        if allowed {
            self.snapshot = None;
            tracing::debug!(?target, old = start_offset, new, "Sash moved");
        } else {
            self.rewind();
            self.snapshot = None;
        }
        self.update();
    }

    /// Apply a sash drag on top of the drag-start state. Returns the new
    /// dock size or pane length.
    fn apply_sash_drag(&mut self, target: DragTarget, start_offset: i32, delta: Point) -> i32 {
        self.rewind();
        let base = self.layout.clone();

        let result = match target {
            DragTarget::DockSash(key) => {
                let size = self.dragged_dock_size(&base, key, start_offset, delta);
                if let Some(dock) = self.docks.iter_mut().find(|dock| dock.key == key) {
                    dock.size = size;
                }
                size
            }
            DragTarget::PaneSash { dock, pane } => {
                let moved = delta.along(dock.direction.orientation());
                self.split_pane_sash(&base, dock, pane, moved)
                    .unwrap_or(start_offset)
            }
            DragTarget::PaneMove { .. } | DragTarget::Button { .. } => start_offset,
        };

        self.relayout();
        result
    }

    fn dragged_dock_size(&self, base: &Layout, key: DockKey, start: i32, delta: Point) -> i32 {
        let perpendicular = key.direction.orientation().flip();
        let sign = match key.direction {
            DockDirection::Right | DockDirection::Bottom => -1,
            _ => 1,
        };

        let min = self
            .docks
            .iter()
            .find(|dock| dock.key == key)
            .map_or(MIN_DOCK_SIZE, |dock| {
                dock_min_extent(dock, &self.panes, &self.config.metrics)
            });
        let current = base.dock_rect(key).map_or(start, |r| r.length(perpendicular));
        let max = (current + base.center.length(perpendicular).max(0)).max(min);

        (start + delta.along(perpendicular) * sign).clamp(min, max)
    }

    fn sash_neighbour(&self, key: DockKey, pane: PaneId) -> Option<PaneId> {
        let dock = self.docks.iter().find(|dock| dock.key == key)?;
        let index = dock.panes.iter().position(|id| *id == pane)?;
        let next = *dock.panes.get(index + 1)?;
        let proportional = |id: PaneId| {
            self.panes
                .get(id)
                .is_some_and(|info| info.is_resizable() && info.proportion > 0)
        };
        (proportional(pane) && proportional(next)).then_some(next)
    }

    /// Move the sash between `pane` and its successor by `moved` pixels by
    /// rebalancing their proportions. Returns the new length of `pane`.
    fn split_pane_sash(&mut self, base: &Layout, key: DockKey, pane: PaneId, moved: i32) -> Option<i32> {
        let next = self.sash_neighbour(key, pane)?;
        let orientation = key.direction.orientation();
        let length_a = base.pane_rect(pane)?.length(orientation);
        let length_b = base.pane_rect(next)?.length(orientation);
        let total = length_a + length_b;
        if total <= 0 {
            return None;
        }

        let min_of = |id: PaneId| {
            self.panes
                .get(id)
                .map_or(0, |info| info.min_size.along(orientation).max(0))
        };
        let (min_a, min_b) = (min_of(pane), min_of(next));
        let new_a = (length_a + moved).clamp(min_a, (total - min_b).max(min_a));

        let weight_of = |id: PaneId| self.panes.get(id).map_or(0, |info| info.proportion);
        let weight = (weight_of(pane) + weight_of(next)).max(2);
        let share_a = ((weight as i64 * new_a as i64) / total as i64) as i32;
        let share_a = share_a.clamp(1, weight - 1);

        if let Some(info) = self.panes.get_mut(pane) {
            info.proportion = share_a;
        }
        if let Some(info) = self.panes.get_mut(next) {
            info.proportion = weight - share_a;
        }
        Some(new_a)
    }

    fn sizer_rect(&self, target: DragTarget) -> Option<Rect> {
        self.layout
            .parts
            .iter()
            .find(|part| match target {
                DragTarget::DockSash(key) => {
                    part.kind == UiPartKind::DockSizer && part.dock == Some(key)
                }
                DragTarget::PaneSash { pane, .. } => {
                    part.kind == UiPartKind::PaneSizer && part.pane == Some(pane)
                }
                _ => false,
            })
            .map(|part| part.rect)
    }

    // ========================================================================
    // Perspectives
    // ========================================================================

    pub fn save_perspective(&self) -> String {
        perspective::save(&self.panes, &self.docks)
    }

    /// Merge a saved perspective into the live panes. Saved dock sizes
    /// replace the current ones; docks without a saved size are sized anew.
    pub fn load_perspective(&mut self, input: &str, update: bool) -> Result<LoadReport, PerspectiveError> {
        let report = perspective::load(input, &mut self.panes)?;

        self.docks = report
            .dock_sizes
            .iter()
            .map(|(key, size)| DockInfo::with_size(*key, *size))
            .collect();
        self.dirty = true;

        if update {
            self.update();
        }
        Ok(report)
    }

    // ========================================================================
    // Invariants
    // ========================================================================

    /// Panic if the docks and panes disagree. Debug builds only.
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self) {
        let mut seen: Vec<PaneId> = Vec::new();
        for dock in &self.docks {
            let mut last_position = i32::MIN;
            for id in &dock.panes {
                let Some(pane) = self.panes.get(*id) else {
                    panic!("Dock {:?} references missing pane {:?}", dock.key, id);
                };
                assert!(
                    pane.is_docked(),
                    "Pane {:?} in dock {:?} is not docked and visible",
                    id,
                    dock.key
                );
                assert!(
                    pane.position >= last_position,
                    "Dock {:?} is not ordered by position",
                    dock.key
                );
                last_position = pane.position;
                assert!(!seen.contains(id), "Pane {:?} is in more than one dock", id);
                seen.push(*id);
            }
        }

        let maximized = self
            .panes
            .iter()
            .filter(|(_, pane)| pane.is_shown() && pane.is_maximized())
            .count();
        assert!(maximized <= 1, "{} panes are maximized", maximized);

        for (id, pane) in self.panes.iter() {
            assert_eq!(
                self.panes.id_by_name(&pane.name),
                Some(id),
                "Pane name {:?} is not unique",
                pane.name
            );
        }
    }

    #[cfg(not(debug_assertions))]
    pub fn assert_invariants(&self) {}
}
