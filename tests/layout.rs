//! Tests for dock arrangement and rectangle computation

mod common;

use common::{explorer, explorer_and_center, manager};
use dockyard::geometry::{Orientation, Point, Rect};
use dockyard::layout::{
    arrange_docks, compute_layout, DockMetrics, LayoutOptions, UiPartKind,
};
use dockyard::panel::{DockDirection, DockKey, PaneButton, PaneInfo, PaneSet, WindowId};

fn left_key() -> DockKey {
    DockKey::new(DockDirection::Left, 0, 0)
}

// ============================================================================
// Basic placement
// ============================================================================

#[test]
fn test_left_pane_takes_best_width() {
    let (manager, explorer, center) = explorer_and_center();
    let layout = manager.layout();

    assert_eq!(layout.dock_rect(left_key()), Some(Rect::new(0, 0, 200, 600)));
    assert_eq!(layout.pane_rect(center), Some(Rect::new(200, 0, 600, 600)));
    assert_eq!(layout.pane_rect(explorer), Some(Rect::new(0, 0, 196, 600)));
    assert_eq!(layout.center, Rect::new(200, 0, 600, 600));

    let dock = &manager.docks()[0];
    assert_eq!(dock.key, left_key());
    assert_eq!(dock.size, 200);
}

#[test]
fn test_new_dock_limited_to_a_third() {
    let mut manager = manager();
    manager
        .add_pane(WindowId(1), explorer().best_size(500, 100))
        .unwrap();
    manager.update();

    // 800 / 3
    assert_eq!(
        manager.layout().dock_rect(left_key()),
        Some(Rect::new(0, 0, 266, 600))
    );
}

#[test]
fn test_dock_constraint_is_configurable() {
    let mut manager = manager();
    manager.set_dock_size_constraint(0.5, 0.5);
    manager
        .add_pane(WindowId(1), explorer().best_size(500, 100))
        .unwrap();
    manager.update();

    assert_eq!(
        manager.layout().dock_rect(left_key()),
        Some(Rect::new(0, 0, 400, 600))
    );
}

#[test]
fn test_pane_minimum_beats_dock_constraint() {
    let mut manager = manager();
    let explorer = manager
        .add_pane(
            WindowId(1),
            explorer().best_size(100, 100).min_size(400, -1),
        )
        .unwrap();
    let center = manager.add_pane(WindowId(2), common::center()).unwrap();
    manager.update();

    let layout = manager.layout();
    // 400 for the pane plus the 4 px sash, above the 266 px cap
    assert_eq!(layout.dock_rect(left_key()), Some(Rect::new(0, 0, 404, 600)));
    assert_eq!(layout.pane_rect(explorer), Some(Rect::new(0, 0, 400, 600)));
    assert_eq!(layout.pane_rect(center), Some(Rect::new(404, 0, 396, 600)));
    assert_eq!(manager.docks()[0].size, 404);
}

#[test]
fn test_pane_minimum_larger_than_container_overflows() {
    let mut manager = manager();
    let explorer = manager
        .add_pane(WindowId(1), explorer().min_size(900, -1))
        .unwrap();
    manager.add_pane(WindowId(2), common::center()).unwrap();
    manager.update();

    let layout = manager.layout();
    assert_eq!(layout.dock_rect(left_key()), Some(Rect::new(0, 0, 904, 600)));
    assert_eq!(layout.pane_rect(explorer), Some(Rect::new(0, 0, 900, 600)));
    assert!(layout.center.is_empty());
}

#[test]
fn test_bottom_dock_minimum_includes_caption() {
    let mut manager = manager();
    let output = manager
        .add_pane(
            WindowId(1),
            PaneInfo::default()
                .name("output")
                .bottom()
                .best_size(100, 100)
                .min_size(-1, 300),
        )
        .unwrap();
    manager.update();

    let key = DockKey::new(DockDirection::Bottom, 0, 0);
    // 300 + 4 px sash + 17 px caption, above the 200 px cap
    assert_eq!(manager.layout().dock_rect(key), Some(Rect::new(0, 279, 800, 321)));
    assert!(manager.layout().pane_rect(output).unwrap().height >= 300);
}

#[test]
fn test_top_dock_adds_caption_height() {
    let mut manager = manager();
    let id = manager
        .add_pane(
            WindowId(1),
            PaneInfo::default().name("toolbox").top().best_size(100, 50),
        )
        .unwrap();
    manager.update();

    let key = DockKey::new(DockDirection::Top, 0, 0);
    assert_eq!(manager.layout().dock_rect(key), Some(Rect::new(0, 0, 800, 67)));
    // Sash on the bottom edge of the dock
    assert_eq!(manager.layout().pane_rect(id), Some(Rect::new(0, 0, 800, 63)));
}

#[test]
fn test_higher_layer_claims_outer_edge() {
    let mut manager = manager();
    let outer = manager
        .add_pane(WindowId(1), explorer().name("outer").layer(1).best_size(100, 100))
        .unwrap();
    let inner = manager
        .add_pane(WindowId(2), explorer().name("inner").best_size(150, 100))
        .unwrap();
    manager.update();

    let layout = manager.layout();
    assert_eq!(
        layout.dock_rect(DockKey::new(DockDirection::Left, 1, 0)),
        Some(Rect::new(0, 0, 100, 600))
    );
    assert_eq!(layout.dock_rect(left_key()), Some(Rect::new(100, 0, 150, 600)));
    assert_eq!(layout.pane_rect(outer), Some(Rect::new(0, 0, 96, 600)));
    assert_eq!(layout.pane_rect(inner), Some(Rect::new(100, 0, 146, 600)));
    assert_eq!(layout.center, Rect::new(250, 0, 550, 600));
}

#[test]
fn test_top_dock_spans_full_width_of_its_layer() {
    let mut manager = manager();
    manager
        .add_pane(WindowId(1), explorer().best_size(200, 100))
        .unwrap();
    manager
        .add_pane(
            WindowId(2),
            PaneInfo::default().name("output").bottom().best_size(100, 100),
        )
        .unwrap();
    manager.update();

    let layout = manager.layout();
    let bottom = layout
        .dock_rect(DockKey::new(DockDirection::Bottom, 0, 0))
        .unwrap();
    let left = layout.dock_rect(left_key()).unwrap();

    // Bottom is placed before left within a layer
    assert_eq!(bottom, Rect::new(0, 483, 800, 117));
    assert_eq!(left, Rect::new(0, 0, 200, 483));
}

#[test]
fn test_no_center_pane_leaves_background() {
    let mut manager = manager();
    manager.add_pane(WindowId(1), explorer()).unwrap();
    manager.update();

    let background: Vec<_> = manager
        .layout()
        .parts
        .iter()
        .filter(|part| part.kind == UiPartKind::Background)
        .collect();
    assert_eq!(background.len(), 1);
    assert_eq!(background[0].rect, Rect::new(200, 0, 600, 600));
}

// ============================================================================
// Proportional sizing
// ============================================================================

fn three_in_left_dock(proportions: [i32; 3]) -> (PaneSet, Vec<dockyard::panel::PaneId>) {
    let mut set = PaneSet::new();
    let ids = proportions
        .iter()
        .enumerate()
        .map(|(index, proportion)| {
            set.insert(
                PaneInfo::default()
                    .name(format!("pane{}", index))
                    .left()
                    .position(index as i32)
                    .proportion(*proportion)
                    .best_size(200, 100)
                    .window(WindowId(index as u64 + 1)),
            )
            .unwrap()
        })
        .collect();
    (set, ids)
}

#[test]
fn test_allocations_sum_to_dock_length() {
    for proportions in [[1, 1, 1], [1, 2, 3], [7, 100_000, 13], [5, 5, 100]] {
        let (mut set, ids) = three_in_left_dock(proportions);
        let metrics = DockMetrics::default();
        let docks = arrange_docks(&mut set, &[], &metrics);
        let layout = compute_layout(
            &set,
            &docks,
            Rect::new(0, 0, 800, 601),
            &metrics,
            &LayoutOptions::default(),
        );

        let total: i32 = ids
            .iter()
            .map(|id| layout.pane_rect(*id).unwrap().height)
            .sum();
        // Two pane sashes between three panes
        assert_eq!(total + 2 * metrics.sash_size, 601, "proportions {:?}", proportions);
    }
}

#[test]
fn test_min_size_redistributes_within_dock() {
    let (mut set, ids) = three_in_left_dock([1, 1, 1]);
    set.get_mut(ids[0]).unwrap().min_size = dockyard::geometry::Size::new(0, 500);

    let metrics = DockMetrics::default();
    let docks = arrange_docks(&mut set, &[], &metrics);
    let layout = compute_layout(
        &set,
        &docks,
        Rect::new(0, 0, 800, 600),
        &metrics,
        &LayoutOptions::default(),
    );

    let heights: Vec<i32> = ids
        .iter()
        .map(|id| layout.pane_rect(*id).unwrap().height)
        .collect();
    assert_eq!(heights, vec![500, 46, 46]);
}

#[test]
fn test_min_size_larger_than_container_overflows() {
    let (mut set, ids) = three_in_left_dock([1, 1, 1]);
    set.get_mut(ids[0]).unwrap().min_size = dockyard::geometry::Size::new(0, 700);

    let metrics = DockMetrics::default();
    let docks = arrange_docks(&mut set, &[], &metrics);
    let layout = compute_layout(
        &set,
        &docks,
        Rect::new(0, 0, 800, 600),
        &metrics,
        &LayoutOptions::default(),
    );

    let first = layout.pane_rect(ids[0]).unwrap();
    assert_eq!(first.y, 0);
    assert_eq!(first.height, 700);
    assert_eq!(layout.pane_rect(ids[1]).unwrap().height, 0);
    assert_eq!(layout.pane_rect(ids[2]).unwrap().height, 0);
}

#[test]
fn test_fixed_pane_keeps_best_size() {
    let mut manager = manager();
    let fixed = manager
        .add_pane(WindowId(1), explorer().name("fixed").best_size(200, 120).fixed())
        .unwrap();
    let fixed_key = DockKey::new(DockDirection::Left, 0, 0);
    manager.update();

    let rect = manager.layout().pane_rect(fixed).unwrap();
    assert_eq!(rect.height, 120);
    assert_eq!(rect.y, 0);
    assert!(manager.layout().dock_rect(fixed_key).is_some());
}

// ============================================================================
// Idempotence and degenerate input
// ============================================================================

#[test]
fn test_update_twice_gives_same_layout() {
    let (mut manager, _, _) = explorer_and_center();
    manager
        .add_pane(
            WindowId(3),
            PaneInfo::default().name("output").bottom().best_size(100, 150),
        )
        .unwrap();
    manager.update();
    let first = manager.layout().clone();

    manager.update();
    assert_eq!(manager.layout(), &first);
}

#[test]
fn test_compute_layout_is_pure() {
    let (mut set, _) = three_in_left_dock([1, 2, 3]);
    let metrics = DockMetrics::default();
    let docks = arrange_docks(&mut set, &[], &metrics);
    let container = Rect::new(0, 0, 1024, 768);
    let options = LayoutOptions::default();

    let first = compute_layout(&set, &docks, container, &metrics, &options);
    let second = compute_layout(&set, &docks, container, &metrics, &options);
    assert_eq!(first, second);
}

#[test]
fn test_empty_container_gives_empty_rects() {
    let mut manager = manager();
    let explorer = manager.add_pane(WindowId(1), explorer()).unwrap();
    manager.set_container(Rect::new(0, 0, 0, 600));
    manager.update();

    let layout = manager.layout();
    assert_eq!(layout.pane_rect(explorer), Some(Rect::EMPTY));
    assert_eq!(layout.dock_rect(left_key()), Some(Rect::EMPTY));
    assert_eq!(layout.center, Rect::EMPTY);
    assert!(layout.parts.is_empty());
}

#[test]
fn test_hidden_pane_gets_no_rect() {
    let (mut manager, explorer, center) = explorer_and_center();
    manager.show_pane(explorer, false);
    manager.update();

    assert_eq!(manager.layout().pane_rect(explorer), None);
    assert_eq!(
        manager.layout().pane_rect(center),
        Some(Rect::new(0, 0, 800, 600))
    );
    assert!(manager.docks().iter().all(|dock| dock.key != left_key()));
}

// ============================================================================
// UI parts
// ============================================================================

#[test]
fn test_caption_and_close_button_rects() {
    let (manager, explorer, _) = explorer_and_center();
    let layout = manager.layout();

    let caption = layout
        .parts_of(explorer)
        .find(|part| part.kind == UiPartKind::Caption)
        .unwrap();
    assert_eq!(caption.rect, Rect::new(1, 1, 194, 17));

    let close = layout
        .parts_of(explorer)
        .find(|part| part.kind == UiPartKind::PaneButton(PaneButton::Close))
        .unwrap();
    assert_eq!(close.rect, Rect::new(181, 2, 14, 14));

    assert_eq!(
        layout.content_rect(explorer),
        Some(Rect::new(1, 18, 194, 581))
    );
}

#[test]
fn test_hit_test_prefers_button_over_caption() {
    let (manager, _, _) = explorer_and_center();
    let layout = manager.layout();

    let part = layout.hit_test(Point::new(185, 8), 2).unwrap();
    assert_eq!(part.kind, UiPartKind::PaneButton(PaneButton::Close));

    let part = layout.hit_test(Point::new(50, 8), 2).unwrap();
    assert_eq!(part.kind, UiPartKind::Caption);

    let part = layout.hit_test(Point::new(50, 300), 2).unwrap();
    assert_eq!(part.kind, UiPartKind::Pane);
}

#[test]
fn test_hit_test_finds_dock_sash_within_tolerance() {
    let (manager, _, _) = explorer_and_center();
    let layout = manager.layout();

    let sash = layout.hit_test(Point::new(197, 300), 2).unwrap();
    assert_eq!(sash.kind, UiPartKind::DockSizer);
    assert_eq!(sash.rect, Rect::new(196, 0, 4, 600));
    assert_eq!(sash.orientation, Orientation::Horizontal);

    // Just inside the center pane, within tolerance of the sash
    let near = layout.hit_test(Point::new(201, 300), 2).unwrap();
    assert_eq!(near.kind, UiPartKind::DockSizer);
}
