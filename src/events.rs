//! Manager notifications
//!
//! Listeners are registered on the `DockManager` and receive every
//! `DockEvent`. A listener can veto the pane events before they take effect
//! and can queue follow-up requests. Requests are applied by the manager
//! after dispatch returns, so a listener never re-enters the manager.

use crate::panel::{PaneButton, PaneId, PaneInfo, WindowId};

/// Something that happened (or is about to happen) in the manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockEvent {
    /// A caption button was clicked; sent before the button's action
    PaneButton { pane: PaneId, button: PaneButton },
    PaneClose { pane: PaneId },
    PaneMaximize { pane: PaneId },
    PaneRestore { pane: PaneId },
    PaneActivated { pane: PaneId },
    /// A sash drag is about to be committed. Values are the dock size, or
    /// the length of the pane before a pane sash.
    SashPositionChanged { old: i32, new: i32 },
    /// `update()` produced a new layout
    LayoutChanged,
}

impl DockEvent {
    /// Whether a veto stops the change the event announces
    pub fn is_vetoable(&self) -> bool {
        !matches!(self, DockEvent::LayoutChanged)
    }

    pub fn pane(&self) -> Option<PaneId> {
        match *self {
            DockEvent::PaneButton { pane, .. }
            | DockEvent::PaneClose { pane }
            | DockEvent::PaneMaximize { pane }
            | DockEvent::PaneRestore { pane }
            | DockEvent::PaneActivated { pane } => Some(pane),
            DockEvent::SashPositionChanged { .. } | DockEvent::LayoutChanged => None,
        }
    }
}

/// Follow-up work a listener asks the manager to do.
///
/// Requests run after the listeners return. Model changes still wait for
/// `update()` unless an [`DockRequest::Update`] is queued too.
#[derive(Debug, Clone, PartialEq)]
pub enum DockRequest {
    /// Manage a new window, as `DockManager::add_pane`
    AddPane(WindowId, PaneInfo),
    /// Stop managing a window, as `DockManager::detach_pane`
    DetachPane(WindowId),
    ClosePane(PaneId),
    ShowPane(PaneId),
    HidePane(PaneId),
    /// Recompute the layout once the queued requests have run. An update
    /// requested while handling that recomputation only marks the layout
    /// dirty.
    Update,
}

/// Handed to listeners alongside each event
#[derive(Debug, Default)]
pub struct EventControl {
    vetoed: bool,
    requests: Vec<DockRequest>,
}

impl EventControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn veto(&mut self) {
        self.vetoed = true;
    }

    pub fn is_vetoed(&self) -> bool {
        self.vetoed
    }

    pub fn request(&mut self, request: DockRequest) {
        self.requests.push(request);
    }

    pub fn take_requests(&mut self) -> Vec<DockRequest> {
        std::mem::take(&mut self.requests)
    }
}

/// Receiver of manager notifications
pub trait DockListener {
    fn on_event(&mut self, event: &DockEvent, control: &mut EventControl);
}

impl<F> DockListener for F
where
    F: FnMut(&DockEvent, &mut EventControl),
{
    fn on_event(&mut self, event: &DockEvent, control: &mut EventControl) {
        self(event, control)
    }
}

/// Send `event` to every listener and collect vetoes and requests.
///
/// Every listener sees the event even after an earlier one vetoed it.
pub fn dispatch(listeners: &mut [Box<dyn DockListener>], event: &DockEvent) -> EventControl {
    let mut control = EventControl::new();
    for listener in listeners.iter_mut() {
        listener.on_event(event, &mut control);
    }
    if control.is_vetoed() {
        tracing::debug!(?event, "Event vetoed");
    }
    control
}
