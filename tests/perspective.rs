//! Tests for saving and loading perspective strings

mod common;

use common::{explorer, manager};
use dockyard::geometry::{Point, Rect};
use dockyard::manager::DockManager;
use dockyard::panel::{DockDirection, DockKey, PaneFlags, PaneInfo, WindowId};
use dockyard::perspective::{self, PerspectiveError};

/// A workspace with panes on several sides, a floating pane and a moved sash
fn arranged() -> DockManager {
    let mut manager = manager();
    manager.add_pane(WindowId(1), explorer()).unwrap();
    manager
        .add_pane(
            WindowId(2),
            PaneInfo::default()
                .name("output")
                .caption("Output; build|test=1")
                .bottom()
                .best_size(100, 150)
                .min_size(50, 40),
        )
        .unwrap();
    manager
        .add_pane(
            WindowId(3),
            PaneInfo::default()
                .name("properties")
                .right()
                .layer(1)
                .maximize_button(true),
        )
        .unwrap();
    manager
        .add_pane(
            WindowId(4),
            PaneInfo::default()
                .name("find")
                .float()
                .floating_position(40, 50)
                .floating_size(300, 200),
        )
        .unwrap();
    manager
        .add_pane(WindowId(5), PaneInfo::default().name("editor").center_pane())
        .unwrap();
    manager.update();

    common::drag(&mut manager, Point::new(197, 200), &[Point::new(237, 200)]);
    manager
}

/// Same names and windows, every pane left at its defaults
fn fresh() -> DockManager {
    let mut manager = manager();
    for (index, name) in ["explorer", "output", "properties", "find", "editor"]
        .into_iter()
        .enumerate()
    {
        manager
            .add_pane(WindowId(index as u64 + 1), PaneInfo::default().name(name))
            .unwrap();
    }
    manager
}

#[test]
fn test_round_trip_restores_every_pane() {
    let saved_manager = arranged();
    let saved = saved_manager.save_perspective();

    let mut restored = fresh();
    let report = restored.load_perspective(&saved, true).unwrap();
    assert_eq!(report.applied, 5);
    assert_eq!(report.unmatched, 0);
    assert_eq!(report.skipped, 0);

    for (id, pane) in saved_manager.panes().iter() {
        assert_eq!(restored.pane_by_id(id), Some(pane), "pane {}", pane.name);
    }
    assert_eq!(restored.layout(), saved_manager.layout());
    assert_eq!(restored.save_perspective(), saved);
}

#[test]
fn test_round_trip_keeps_dragged_dock_size() {
    let saved = arranged().save_perspective();
    assert!(saved.contains("dock_size(4,0,0)=240|"), "{}", saved);

    let mut restored = fresh();
    restored.load_perspective(&saved, true).unwrap();
    let left = restored
        .docks()
        .iter()
        .find(|dock| dock.key == DockKey::new(DockDirection::Left, 0, 0))
        .unwrap();
    assert_eq!(left.size, 240);
}

#[test]
fn test_load_without_update_waits() {
    let saved = arranged().save_perspective();
    let mut restored = fresh();
    restored.update();
    let before = restored.layout().clone();

    restored.load_perspective(&saved, false).unwrap();
    assert!(restored.is_dirty());
    assert_eq!(restored.layout(), &before);
    assert_eq!(
        restored.pane("output").unwrap().direction,
        DockDirection::Bottom
    );
}

#[test]
fn test_partial_merge() {
    let mut source = manager();
    source
        .add_pane(WindowId(1), explorer().best_size(220, 100).layer(2))
        .unwrap();
    source
        .add_pane(WindowId(2), PaneInfo::default().name("output").bottom())
        .unwrap();
    source.update();
    let saved = source.save_perspective();

    let mut target = manager();
    target
        .add_pane(WindowId(7), explorer().right().best_size(90, 90))
        .unwrap();
    target
        .add_pane(
            WindowId(8),
            PaneInfo::default().name("extra").top().best_size(10, 20),
        )
        .unwrap();
    let extra_before = target.pane("extra").unwrap().clone();

    let report = target.load_perspective(&saved, false).unwrap();
    assert_eq!(report.applied, 1);
    assert_eq!(report.unmatched, 1);
    assert_eq!(report.skipped, 0);

    let explorer = target.pane("explorer").unwrap();
    assert_eq!(explorer.direction, DockDirection::Left);
    assert_eq!(explorer.layer, 2);
    assert_eq!(explorer.best_size.width, 220);
    // The live pane keeps its window
    assert_eq!(explorer.window, Some(WindowId(7)));

    assert_eq!(target.pane("extra"), Some(&extra_before));
    assert!(target.pane("output").is_none());
}

#[test]
fn test_malformed_records_are_skipped() {
    let mut manager = manager();
    let a = manager
        .add_pane(WindowId(1), PaneInfo::default().name("a"))
        .unwrap();
    let b = manager
        .add_pane(WindowId(2), PaneInfo::default().name("b").top())
        .unwrap();

    let input = "layout2|\
                 name=a;state=0;dir=4;layer=0;row=0;pos=0;bestw=250|\
                 garbage|\
                 name=b;state=x;dir=2;layer=0;row=0;pos=0|\
                 name=c;state=0;dir=9;layer=0;row=0;pos=0|\
                 dock_size(4,0,0)=250|\
                 dock_size(9,0,0)=1|";

    let report = manager.load_perspective(input, true).unwrap();
    assert_eq!(report.applied, 1);
    assert_eq!(report.skipped, 4);
    assert_eq!(
        report.dock_sizes,
        vec![(DockKey::new(DockDirection::Left, 0, 0), 250)]
    );

    // The record that parsed replaced every flag
    let a = manager.pane_by_id(a).unwrap();
    assert_eq!(a.flags, PaneFlags::empty());
    assert_eq!(a.best_size.width, 250);
    // Below the top dock of "b"
    assert_eq!(
        manager.layout().dock_rect(DockKey::new(DockDirection::Left, 0, 0)),
        Some(Rect::new(0, 117, 250, 483))
    );

    // The broken record left its pane alone
    assert_eq!(manager.pane_by_id(b).unwrap().direction, DockDirection::Top);
}

#[test]
fn test_bad_header_fails_whole_load() {
    let mut manager = manager();
    manager
        .add_pane(WindowId(1), PaneInfo::default().name("a"))
        .unwrap();

    assert_eq!(
        manager.load_perspective("", true),
        Err(PerspectiveError::Empty)
    );
    assert_eq!(
        manager.load_perspective("layout1|name=a;state=0;dir=1;layer=0;row=0;pos=0|", true),
        Err(PerspectiveError::UnsupportedVersion("layout1".to_string()))
    );
    assert_eq!(manager.pane("a").unwrap().direction, DockDirection::Left);
}

#[test]
fn test_pane_record_format() {
    let pane = PaneInfo::new().name("x");
    assert_eq!(
        perspective::save_pane(&pane),
        "name=x;caption=;state=0;dir=4;layer=0;row=0;pos=0;prop=0;\
         bestw=-1;besth=-1;minw=-1;minh=-1;maxw=-1;maxh=-1;\
         floatx=-1;floaty=-1;floatw=-1;floath=-1"
    );
}

#[test]
fn test_special_characters_survive() {
    let pane = PaneInfo::default()
        .name("log|1")
        .caption(r"a;b=c\");
    let record = perspective::save_pane(&pane);
    assert!(record.starts_with(r"name=log\|1;caption=a\;b\=c\\;"), "{}", record);

    let parsed = perspective::parse_pane(&record).unwrap();
    assert_eq!(parsed.name, "log|1");
    assert_eq!(parsed.caption.as_deref(), Some(r"a;b=c\"));
}

#[test]
fn test_pane_names_lists_wellformed_records() {
    let saved = arranged().save_perspective();
    assert_eq!(
        perspective::pane_names(&saved).unwrap(),
        vec!["explorer", "output", "properties", "find", "editor"]
    );
}
