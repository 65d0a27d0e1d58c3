//! Tests for the two-pane splitter

use std::cell::RefCell;
use std::rc::Rc;

use dockyard::config::SplitterDefaults;
use dockyard::drag::HintMode;
use dockyard::geometry::{Point, Rect, Size};
use dockyard::panel::WindowId;
use dockyard::splitter::{SplitError, SplitterControl, SplitterEvent, SplitterWindow};

type Log = Rc<RefCell<Vec<SplitterEvent>>>;

fn split_at_200(min: i32) -> (SplitterWindow, Log) {
    let mut splitter = SplitterWindow::new(&SplitterDefaults {
        minimum_pane_size: min,
        ..SplitterDefaults::default()
    });
    splitter.resize(Size::new(800, 400));
    splitter
        .split_vertically(WindowId(1), WindowId(2), 200)
        .unwrap();

    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    splitter.add_listener(move |event: &SplitterEvent, _: &mut SplitterControl| {
        sink.borrow_mut().push(*event);
    });
    (splitter, log)
}

fn drag(splitter: &mut SplitterWindow, from: i32, to: i32) -> bool {
    assert!(splitter.on_pointer_down(Point::new(from, 100)));
    splitter.on_pointer_move(Point::new(to, 100));
    splitter.on_pointer_up(Point::new(to, 100))
}

fn changed(log: &Log) -> Vec<SplitterEvent> {
    log.borrow()
        .iter()
        .filter(|event| !matches!(event, SplitterEvent::SashPositionChanging { .. }))
        .copied()
        .collect()
}

// ============================================================================
// Dragging
// ============================================================================

#[test]
fn test_drag_sash_fifty_pixels() {
    let (mut splitter, log) = split_at_200(50);

    assert!(drag(&mut splitter, 201, 251));

    assert_eq!(splitter.sash_position(), 250);
    assert_eq!(
        changed(&log),
        vec![SplitterEvent::SashPositionChanged { old: 200, new: 250 }]
    );
    assert!(log
        .borrow()
        .contains(&SplitterEvent::SashPositionChanging { position: 250 }));
}

#[test]
fn test_outline_drag_moves_only_the_hint() {
    let (mut splitter, _) = split_at_200(50);

    splitter.on_pointer_down(Point::new(201, 100));
    splitter.on_pointer_move(Point::new(301, 100));

    assert_eq!(splitter.sash_position(), 200);
    assert_eq!(splitter.drag_hint(), Some(Rect::new(300, 0, 4, 400)));
}

#[test]
fn test_live_drag_moves_the_sash() {
    let mut splitter = SplitterWindow::default().with_hint_mode(HintMode::LiveResize);
    splitter.resize(Size::new(800, 400));
    splitter
        .split_vertically(WindowId(1), WindowId(2), 200)
        .unwrap();

    splitter.on_pointer_down(Point::new(201, 100));
    splitter.on_pointer_move(Point::new(301, 100));
    assert_eq!(splitter.sash_position(), 300);
}

#[test]
fn test_drag_clamps_to_minimum_pane_size() {
    let (mut splitter, log) = split_at_200(50);

    drag(&mut splitter, 201, 2);

    assert_eq!(splitter.sash_position(), 50);
    assert!(splitter.is_split());
    assert_eq!(
        changed(&log),
        vec![SplitterEvent::SashPositionChanged { old: 200, new: 50 }]
    );
}

#[test]
fn test_drag_to_edge_unsplits_without_minimum() {
    let (mut splitter, log) = split_at_200(0);

    drag(&mut splitter, 201, 2);

    assert!(!splitter.is_split());
    assert_eq!(splitter.window1(), Some(WindowId(2)));
    assert_eq!(
        changed(&log),
        vec![SplitterEvent::Unsplit {
            removed: WindowId(1)
        }]
    );
}

#[test]
fn test_drag_to_far_edge_removes_second_window() {
    let (mut splitter, log) = split_at_200(0);

    drag(&mut splitter, 201, 798);

    assert!(!splitter.is_split());
    assert_eq!(splitter.window1(), Some(WindowId(1)));
    assert_eq!(
        changed(&log),
        vec![SplitterEvent::Unsplit {
            removed: WindowId(2)
        }]
    );
}

#[test]
fn test_permit_unsplit_always_overrides_minimum() {
    let (mut splitter, _) = split_at_200(50);
    splitter.permit_unsplit_always(true);

    drag(&mut splitter, 201, 1);
    assert!(!splitter.is_split());
}

#[test]
fn test_vetoed_change_keeps_position() {
    let (mut splitter, log) = split_at_200(0);
    splitter.add_listener(|event: &SplitterEvent, control: &mut SplitterControl| {
        if matches!(event, SplitterEvent::SashPositionChanging { .. }) {
            control.veto();
        }
    });

    drag(&mut splitter, 201, 251);

    assert_eq!(splitter.sash_position(), 200);
    assert!(changed(&log).is_empty());
}

#[test]
fn test_listener_can_substitute_position() {
    let (mut splitter, _) = split_at_200(0);
    splitter.add_listener(|event: &SplitterEvent, control: &mut SplitterControl| {
        if matches!(event, SplitterEvent::SashPositionChanging { .. }) {
            let snapped = control.position() / 100 * 100;
            control.set_position(snapped);
        }
    });

    drag(&mut splitter, 201, 251);
    assert_eq!(splitter.sash_position(), 200);

    drag(&mut splitter, 201, 341);
    assert_eq!(splitter.sash_position(), 300);
}

#[test]
fn test_capture_lost_restores_position() {
    let mut splitter = SplitterWindow::default().with_hint_mode(HintMode::LiveResize);
    splitter.resize(Size::new(800, 400));
    splitter
        .split_vertically(WindowId(1), WindowId(2), 200)
        .unwrap();

    splitter.on_pointer_down(Point::new(201, 100));
    splitter.on_pointer_move(Point::new(400, 100));
    assert!(splitter.on_capture_lost());

    assert_eq!(splitter.sash_position(), 200);
    assert!(!splitter.is_dragging());
}

#[test]
fn test_press_off_sash_is_ignored() {
    let (mut splitter, _) = split_at_200(0);
    assert!(!splitter.on_pointer_down(Point::new(100, 100)));
    // Within the hit tolerance
    assert!(splitter.on_pointer_down(Point::new(205, 100)));
}

// ============================================================================
// Double click and resize
// ============================================================================

#[test]
fn test_double_click_unsplits() {
    let (mut splitter, log) = split_at_200(0);

    assert!(splitter.on_double_click(Point::new(201, 100)));
    assert!(!splitter.is_split());
    assert!(log.borrow().contains(&SplitterEvent::DoubleClicked {
        point: Point::new(201, 100)
    }));
}

#[test]
fn test_double_click_vetoed_or_minimum_keeps_split() {
    let (mut splitter, _) = split_at_200(50);
    splitter.on_double_click(Point::new(201, 100));
    assert!(splitter.is_split());

    let (mut splitter, _) = split_at_200(0);
    splitter.add_listener(|_: &SplitterEvent, control: &mut SplitterControl| control.veto());
    splitter.on_double_click(Point::new(201, 100));
    assert!(splitter.is_split());
}

#[test]
fn test_gravity_shares_resize() {
    let (mut splitter, log) = split_at_200(0);
    splitter.set_sash_gravity(0.5);

    splitter.resize(Size::new(1000, 400));

    assert_eq!(splitter.sash_position(), 300);
    assert_eq!(
        changed(&log),
        vec![SplitterEvent::SashPositionChanged { old: 200, new: 300 }]
    );
}

#[test]
fn test_zero_gravity_keeps_first_pane() {
    let (mut splitter, log) = split_at_200(0);
    splitter.resize(Size::new(1000, 400));
    assert_eq!(splitter.sash_position(), 200);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_shrinking_clamps_sash() {
    let (mut splitter, _) = split_at_200(50);
    splitter.set_sash_position(700);
    splitter.resize(Size::new(400, 400));
    assert_eq!(splitter.sash_position(), 400 - 50 - 4);
}

// ============================================================================
// Windows
// ============================================================================

#[test]
fn test_unsplit_and_replace() {
    let (mut splitter, _) = split_at_200(0);

    assert_eq!(
        splitter.replace_window(WindowId(9), WindowId(3)),
        Err(SplitError::UnknownWindow(WindowId(9)))
    );
    splitter.replace_window(WindowId(2), WindowId(3)).unwrap();
    assert_eq!(splitter.window2(), Some(WindowId(3)));

    assert_eq!(splitter.unsplit(None), Ok(WindowId(3)));
    assert_eq!(splitter.unsplit(None), Err(SplitError::NotSplit));
    assert_eq!(
        splitter.pane_rects(),
        (Some(Rect::new(0, 0, 800, 400)), None)
    );
    assert_eq!(splitter.sash_rect(), None);
}

#[test]
fn test_same_window_cannot_split() {
    let mut splitter = SplitterWindow::default();
    assert_eq!(
        splitter.split_horizontally(WindowId(1), WindowId(1), 0),
        Err(SplitError::SameWindow)
    );
}

#[test]
fn test_horizontal_split_slices_height() {
    let mut splitter = SplitterWindow::default();
    splitter.resize(Size::new(800, 400));
    splitter
        .split_horizontally(WindowId(1), WindowId(2), 100)
        .unwrap();

    assert_eq!(
        splitter.pane_rects(),
        (
            Some(Rect::new(0, 0, 800, 100)),
            Some(Rect::new(0, 104, 800, 296))
        )
    );
}
