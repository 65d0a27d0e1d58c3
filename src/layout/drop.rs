//! Drop placement
//!
//! Decides where a pane lands when it is released at a point: a new outer
//! layer when the point is near the container edge, a new row near a dock's
//! outer edge, a slot inside a dock when hovering one of its panes, or a new
//! innermost dock when hovering a quarter zone of the center area. The same
//! code runs against a scratch copy of the pane set to compute the hint
//! rectangle while a drag is in flight.

use super::engine::{dock_key_for, Layout};
use super::parts::UiPartKind;
use crate::geometry::{Point, Rect};
use crate::panel::{DockDirection, DockKey, PaneFlags, PaneId, PaneSet};

/// Distance from the container edge that inserts a new outer layer
pub const LAYER_INSERT_ZONE: i32 = 10;

/// Distance from a dock's outer edge that inserts a new row
pub const ROW_INSERT_ZONE: i32 = 10;

/// What a drop did to the dragged pane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Docked,
    Floated,
    Unchanged,
}

/// Inputs that do not come from the layout
#[derive(Debug, Clone, Copy, Default)]
pub struct DropContext {
    pub allow_floating: bool,
    /// Pointer offset inside the pane at the start of the drag
    pub grip_offset: Point,
}

/// Shift every docked pane at `direction` from `layer` outward by one layer
pub fn insert_dock_layer(panes: &mut PaneSet, direction: DockDirection, layer: i32, skip: Option<PaneId>) {
    for (id, pane) in panes.iter_mut() {
        if Some(id) != skip && pane.is_docked() && pane.direction == direction && pane.layer >= layer {
            pane.layer += 1;
        }
    }
}

/// Shift rows `row..` of a dock layer by one to make room
pub fn insert_dock_row(
    panes: &mut PaneSet,
    direction: DockDirection,
    layer: i32,
    row: i32,
    skip: Option<PaneId>,
) {
    for (id, pane) in panes.iter_mut() {
        if Some(id) != skip
            && pane.is_docked()
            && pane.direction == direction
            && pane.layer == layer
            && pane.row >= row
        {
            pane.row += 1;
        }
    }
}

/// Shift positions `position..` inside one dock by one to make room
pub fn insert_pane_position(panes: &mut PaneSet, key: DockKey, position: i32, skip: Option<PaneId>) {
    for (id, pane) in panes.iter_mut() {
        if Some(id) != skip
            && pane.is_docked()
            && dock_key_for(pane) == key
            && pane.position >= position
        {
            pane.position += 1;
        }
    }
}

fn max_layer(panes: &PaneSet, directions: &[DockDirection], skip: PaneId) -> Option<i32> {
    panes
        .iter()
        .filter(|(id, pane)| *id != skip && pane.is_docked() && directions.contains(&pane.direction))
        .map(|(_, pane)| pane.layer)
        .max()
}

fn max_row(panes: &PaneSet, direction: DockDirection, layer: i32, skip: PaneId) -> Option<i32> {
    panes
        .iter()
        .filter(|(id, pane)| {
            *id != skip && pane.is_docked() && pane.direction == direction && pane.layer == layer
        })
        .map(|(_, pane)| pane.row)
        .max()
}

/// Directions whose docks a new outer layer at `direction` must clear
fn layer_neighbours(direction: DockDirection) -> [DockDirection; 3] {
    match direction {
        DockDirection::Left | DockDirection::Right => {
            [direction, DockDirection::Top, DockDirection::Bottom]
        }
        _ => [direction, DockDirection::Left, DockDirection::Right],
    }
}

fn edge_zone(container: Rect, point: Point) -> Option<DockDirection> {
    if point.x < container.x + LAYER_INSERT_ZONE {
        Some(DockDirection::Left)
    } else if point.x >= container.right() - LAYER_INSERT_ZONE {
        Some(DockDirection::Right)
    } else if point.y < container.y + LAYER_INSERT_ZONE {
        Some(DockDirection::Top)
    } else if point.y >= container.bottom() - LAYER_INSERT_ZONE {
        Some(DockDirection::Bottom)
    } else {
        None
    }
}

/// Side of `area` whose outer quarter contains `point`, `Center` otherwise
fn quarter_zone(area: Rect, point: Point) -> DockDirection {
    let dx = point.x - area.x;
    let dy = point.y - area.y;
    let zone_w = area.width / 4;
    let zone_h = area.height / 4;

    if dx < zone_w {
        DockDirection::Left
    } else if dx >= area.width - zone_w {
        DockDirection::Right
    } else if dy < zone_h {
        DockDirection::Top
    } else if dy >= area.height - zone_h {
        DockDirection::Bottom
    } else {
        DockDirection::Center
    }
}

fn dock_at(panes: &mut PaneSet, dragged: PaneId, key: DockKey, position: i32) -> DropOutcome {
    match panes.get_mut(dragged) {
        Some(pane) => {
            pane.flags.remove(PaneFlags::FLOATING);
            pane.direction = key.direction;
            pane.layer = key.layer;
            pane.row = key.row;
            pane.position = position;
            DropOutcome::Docked
        }
        None => DropOutcome::Unchanged,
    }
}

fn float_at(panes: &mut PaneSet, dragged: PaneId, point: Point, context: &DropContext) -> DropOutcome {
    let Some(pane) = panes.get_mut(dragged) else {
        return DropOutcome::Unchanged;
    };
    if !context.allow_floating || !pane.is_floatable() {
        return DropOutcome::Unchanged;
    }

    pane.flags.insert(PaneFlags::FLOATING);
    pane.floating_pos = Point::new(
        point.x - context.grip_offset.x,
        point.y - context.grip_offset.y,
    );
    if pane.floating_size.is_unset() && !pane.rect.is_empty() {
        pane.floating_size = pane.rect.size();
    }
    DropOutcome::Floated
}

/// Move `dragged` to wherever a release at `point` puts it.
///
/// `layout` must be the layout the pointer is hovering. Other panes may be
/// renumbered to make room.
pub fn apply_drop(
    panes: &mut PaneSet,
    layout: &Layout,
    dragged: PaneId,
    point: Point,
    context: &DropContext,
) -> DropOutcome {
    let Some(pane) = panes.get(dragged).cloned() else {
        return DropOutcome::Unchanged;
    };
    if !pane.is_movable() {
        return DropOutcome::Unchanged;
    }

    let container = layout.container;
    if !container.contains(point) {
        return float_at(panes, dragged, point, context);
    }

    if let Some(direction) = edge_zone(container, point) {
        if pane.is_dockable_at(direction) {
            let layer = max_layer(panes, &layer_neighbours(direction), dragged).map_or(0, |l| l + 1);
            return dock_at(panes, dragged, DockKey::new(direction, layer, 0), 0);
        }
    }

    let Some(part) = layout.hit_test(point, 0).copied() else {
        return float_at(panes, dragged, point, context);
    };

    match (part.kind, part.pane) {
        (UiPartKind::Background, _) => drop_in_center_area(panes, dragged, part.rect, None, point, context),
        (UiPartKind::DockSizer | UiPartKind::PaneSizer, _) => DropOutcome::Unchanged,
        (_, Some(target)) if target == dragged => DropOutcome::Unchanged,
        (_, Some(target)) => {
            let Some(target_pane) = panes.get(target).cloned() else {
                return DropOutcome::Unchanged;
            };
            let target_rect = layout.pane_rect(target).unwrap_or(part.rect);
            if target_pane.direction == DockDirection::Center {
                return drop_in_center_area(panes, dragged, target_rect, Some(target), point, context);
            }

            let key = dock_key_for(&target_pane);
            if !pane.is_dockable_at(key.direction) {
                return float_at(panes, dragged, point, context);
            }

            let dock_rect = layout.dock_rect(key).unwrap_or(target_rect);
            let from_outer_edge = match key.direction {
                DockDirection::Left => point.x - dock_rect.x,
                DockDirection::Right => dock_rect.right() - 1 - point.x,
                DockDirection::Top => point.y - dock_rect.y,
                _ => dock_rect.bottom() - 1 - point.y,
            };
            if from_outer_edge < ROW_INSERT_ZONE {
                insert_dock_row(panes, key.direction, key.layer, key.row, Some(dragged));
                return dock_at(panes, dragged, key, 0);
            }

            let orientation = key.direction.orientation();
            if pane.is_fixed() && target_pane.is_fixed() {
                let offset = point.along(orientation)
                    - dock_rect.start(orientation)
                    - context.grip_offset.along(orientation);
                return dock_at(panes, dragged, key, offset.max(0));
            }

            let middle = target_rect.start(orientation) + target_rect.length(orientation) / 2;
            let position = if point.along(orientation) < middle {
                target_pane.position
            } else {
                target_pane.position + 1
            };
            insert_pane_position(panes, key, position, Some(dragged));
            dock_at(panes, dragged, key, position)
        }
        (_, None) => DropOutcome::Unchanged,
    }
}

/// Drop on the center pane or on the empty background
fn drop_in_center_area(
    panes: &mut PaneSet,
    dragged: PaneId,
    area: Rect,
    center_pane: Option<PaneId>,
    point: Point,
    context: &DropContext,
) -> DropOutcome {
    let direction = quarter_zone(area, point);
    let center_key = DockKey::new(DockDirection::Center, 0, 0);

    if direction == DockDirection::Center {
        return match center_pane.and_then(|id| panes.get(id)).map(|p| p.position) {
            Some(position) => {
                insert_pane_position(panes, center_key, position + 1, Some(dragged));
                dock_at(panes, dragged, center_key, position + 1)
            }
            None => dock_at(panes, dragged, center_key, 0),
        };
    }

    let dockable = panes.get(dragged).is_some_and(|pane| pane.is_dockable_at(direction));
    if !dockable {
        return float_at(panes, dragged, point, context);
    }

    let row = max_row(panes, direction, 0, dragged).map_or(0, |r| r + 1);
    dock_at(panes, dragged, DockKey::new(direction, 0, row), 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{arrange_docks, compute_layout, DockMetrics, LayoutOptions};
    use crate::panel::PaneInfo;

    fn layout_of(set: &mut PaneSet) -> Layout {
        let metrics = DockMetrics::default();
        let docks = arrange_docks(set, &[], &metrics);
        compute_layout(set, &docks, Rect::new(0, 0, 800, 600), &metrics, &LayoutOptions::default())
    }

    fn context() -> DropContext {
        DropContext {
            allow_floating: true,
            grip_offset: Point::new(5, 5),
        }
    }

    #[test]
    fn test_edge_zone_creates_outer_layer() {
        let mut set = PaneSet::new();
        set.insert(PaneInfo::default().name("left").left().best_size(150, 100))
            .unwrap();
        let dragged = set
            .insert(PaneInfo::default().name("bottom").bottom().best_size(100, 80))
            .unwrap();
        let layout = layout_of(&mut set);

        let outcome = apply_drop(&mut set, &layout, dragged, Point::new(2, 300), &context());
        assert_eq!(outcome, DropOutcome::Docked);
        let pane = set.get(dragged).unwrap();
        assert_eq!(pane.direction, DockDirection::Left);
        assert_eq!(pane.layer, 1);
    }

    #[test]
    fn test_hovering_pane_joins_its_dock() {
        let mut set = PaneSet::new();
        let target = set
            .insert(PaneInfo::default().name("left").left().best_size(200, 100))
            .unwrap();
        let dragged = set
            .insert(PaneInfo::default().name("bottom").bottom().best_size(100, 80))
            .unwrap();
        let layout = layout_of(&mut set);

        // Lower half of the left pane, away from the dock's outer edge
        let outcome = apply_drop(&mut set, &layout, dragged, Point::new(100, 450), &context());
        assert_eq!(outcome, DropOutcome::Docked);
        let pane = set.get(dragged).unwrap();
        assert_eq!(pane.direction, DockDirection::Left);
        assert_eq!(pane.position, 1);
        assert_eq!(set.get(target).unwrap().position, 0);
    }

    #[test]
    fn test_center_quarter_zone_creates_inner_dock() {
        let mut set = PaneSet::new();
        set.insert(PaneInfo::default().name("center").center_pane())
            .unwrap();
        let dragged = set
            .insert(PaneInfo::default().name("tool").left().best_size(150, 100))
            .unwrap();
        let layout = layout_of(&mut set);
        let center = layout.center;

        let point = Point::new(center.right() - 20, center.y + center.height / 2);
        let outcome = apply_drop(&mut set, &layout, dragged, point, &context());
        assert_eq!(outcome, DropOutcome::Docked);
        let pane = set.get(dragged).unwrap();
        assert_eq!(pane.direction, DockDirection::Right);
        assert_eq!(pane.layer, 0);
    }

    #[test]
    fn test_outside_container_floats() {
        let mut set = PaneSet::new();
        let dragged = set
            .insert(PaneInfo::default().name("p").left().best_size(150, 100))
            .unwrap();
        let layout = layout_of(&mut set);

        let outcome = apply_drop(&mut set, &layout, dragged, Point::new(900, 50), &context());
        assert_eq!(outcome, DropOutcome::Floated);
        let pane = set.get(dragged).unwrap();
        assert!(pane.is_floating());
        assert_eq!(pane.floating_pos, Point::new(895, 45));
    }

    #[test]
    fn test_floating_refused_when_not_allowed() {
        let mut set = PaneSet::new();
        let dragged = set
            .insert(PaneInfo::default().name("p").left().best_size(150, 100))
            .unwrap();
        let layout = layout_of(&mut set);
        let context = DropContext::default();

        let outcome = apply_drop(&mut set, &layout, dragged, Point::new(900, 50), &context);
        assert_eq!(outcome, DropOutcome::Unchanged);
        assert!(set.get(dragged).unwrap().is_docked());
    }

    #[test]
    fn test_insert_row_shifts_outer_rows() {
        let mut set = PaneSet::new();
        let a = set.insert(PaneInfo::default().name("a").left().row(0)).unwrap();
        let b = set.insert(PaneInfo::default().name("b").left().row(1)).unwrap();
        insert_dock_row(&mut set, DockDirection::Left, 0, 1, None);
        assert_eq!(set.get(a).unwrap().row, 0);
        assert_eq!(set.get(b).unwrap().row, 2);
    }
}
