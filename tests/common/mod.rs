//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use dockyard::config::DockConfig;
use dockyard::events::{DockEvent, EventControl};
use dockyard::geometry::{Point, Rect};
use dockyard::manager::DockManager;
use dockyard::panel::{PaneId, PaneInfo, WindowId};

/// Events a listener has seen, in order
pub type EventLog = Rc<RefCell<Vec<DockEvent>>>;

/// Manager with default config and an 800x600 container
pub fn manager() -> DockManager {
    let mut manager = DockManager::new(DockConfig::default());
    manager.set_container(Rect::new(0, 0, 800, 600));
    manager
}

/// Default pane docked left with a best width of 200
pub fn explorer() -> PaneInfo {
    PaneInfo::default().name("explorer").left().best_size(200, 100)
}

pub fn center() -> PaneInfo {
    PaneInfo::default().name("center").center_pane()
}

/// Manager holding `explorer()` and `center()`, laid out
pub fn explorer_and_center() -> (DockManager, PaneId, PaneId) {
    let mut manager = manager();
    let explorer = manager.add_pane(WindowId(1), explorer()).unwrap();
    let center = manager.add_pane(WindowId(2), center()).unwrap();
    manager.update();
    (manager, explorer, center)
}

/// Attach a listener that records every event
pub fn record_events(manager: &mut DockManager) -> EventLog {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    manager.add_listener(move |event: &DockEvent, _: &mut EventControl| {
        sink.borrow_mut().push(*event);
    });
    log
}

/// Events other than `LayoutChanged`
pub fn pane_events(log: &EventLog) -> Vec<DockEvent> {
    log.borrow()
        .iter()
        .filter(|event| **event != DockEvent::LayoutChanged)
        .copied()
        .collect()
}

/// Press, move through `path`, release at the last point
pub fn drag(manager: &mut DockManager, from: Point, path: &[Point]) -> bool {
    if !manager.on_pointer_down(from) {
        return false;
    }
    let mut last = from;
    for point in path {
        manager.on_pointer_move(*point);
        last = *point;
    }
    manager.on_pointer_up(last)
}
