//! Layout engine
//!
//! Turns the pane set and its docks into rectangles. Docks are arranged
//! like an onion: the highest layer claims space from the outer edge of the
//! container first, each lower layer takes its share of what remains, and the
//! center pane receives the rest. Within a layer, top and bottom docks span
//! the full remaining width; left and right docks span the height left
//! between them. Row 0 is the outermost row of a layer.

use std::collections::{BTreeMap, BTreeSet};

use super::apportion::{apportion, Allocation};
use super::metrics::{DockMetrics, LayoutOptions, FALLBACK_PANE_EXTENT, MIN_DOCK_SIZE};
use super::parts::{hit_test, UiPart, UiPartKind};
use crate::geometry::{Orientation, Point, Rect};
use crate::panel::{DockDirection, DockInfo, DockKey, PaneFlags, PaneId, PaneInfo, PaneSet};

/// Result of one layout pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    /// Rectangle the layout was computed for
    pub container: Rect,
    /// Outer rectangle of each laid-out pane, decorations included
    pub panes: BTreeMap<PaneId, Rect>,
    /// Area left for each pane's window after caption, gripper and border
    pub contents: BTreeMap<PaneId, Rect>,
    pub docks: BTreeMap<DockKey, Rect>,
    /// Resolved dock sizes; new docks get their size here
    pub dock_sizes: BTreeMap<DockKey, i32>,
    /// What remained after all edge docks were placed
    pub center: Rect,
    pub parts: Vec<UiPart>,
}

impl Layout {
    pub fn pane_rect(&self, pane: PaneId) -> Option<Rect> {
        self.panes.get(&pane).copied()
    }

    pub fn content_rect(&self, pane: PaneId) -> Option<Rect> {
        self.contents.get(&pane).copied()
    }

    pub fn dock_rect(&self, key: DockKey) -> Option<Rect> {
        self.docks.get(&key).copied()
    }

    /// Most specific UI part under `point`
    pub fn hit_test(&self, point: Point, tolerance: i32) -> Option<&UiPart> {
        hit_test(&self.parts, point, tolerance)
    }

    pub fn parts_of(&self, pane: PaneId) -> impl Iterator<Item = &UiPart> {
        self.parts.iter().filter(move |part| part.pane == Some(pane))
    }
}

/// Dock a pane belongs to. Center panes all share one dock.
pub fn dock_key_for(pane: &PaneInfo) -> DockKey {
    match pane.direction {
        DockDirection::Center => DockKey::new(DockDirection::Center, 0, 0),
        direction => DockKey::new(direction, pane.layer, pane.row),
    }
}

/// Extent a pane asks for along `axis`: best size, else minimum size
pub fn pane_extent(pane: &PaneInfo, axis: Orientation) -> i32 {
    let best = pane.best_size.along(axis);
    if best > 0 {
        return best;
    }
    let min = pane.min_size.along(axis);
    if min > 0 {
        return min;
    }
    FALLBACK_PANE_EXTENT
}

fn min_along(pane: &PaneInfo, axis: Orientation) -> i32 {
    pane.min_size.along(axis).max(0)
}

fn max_along(pane: &PaneInfo, axis: Orientation) -> Option<i32> {
    let max = pane.max_size.along(axis);
    (max >= 0).then_some(max)
}

/// Rebuild the dock list from the docked, visible panes.
///
/// Sizes of docks that already existed in `previous` are kept. Positions in
/// proportional docks are renumbered 0..n; in fixed docks they are pixel
/// offsets and are pushed apart so panes never overlap.
pub fn arrange_docks(panes: &mut PaneSet, previous: &[DockInfo], metrics: &DockMetrics) -> Vec<DockInfo> {
    let mut groups: BTreeMap<DockKey, Vec<PaneId>> = BTreeMap::new();
    for (id, pane) in panes.iter() {
        if !pane.is_docked() || pane.direction == DockDirection::None {
            continue;
        }
        groups.entry(dock_key_for(pane)).or_default().push(id);
    }

    let mut docks = Vec::with_capacity(groups.len());
    for (key, mut members) in groups {
        members.sort_by_key(|id| panes.get(*id).map_or(0, |pane| pane.position));

        let size = previous
            .iter()
            .find(|dock| dock.key == key)
            .map_or(0, |dock| dock.size);
        let mut dock = DockInfo::with_size(key, size);

        let infos: Vec<&PaneInfo> = members.iter().filter_map(|id| panes.get(*id)).collect();
        let any_dock_fixed = infos.iter().any(|p| p.has_flag(PaneFlags::DOCK_FIXED));
        dock.toolbar = infos.iter().all(|p| p.is_toolbar());
        dock.fixed = infos.iter().all(|p| p.is_fixed()) || any_dock_fixed;
        dock.resizable = !dock.toolbar
            && !any_dock_fixed
            && key.direction != DockDirection::Center
            && infos.iter().any(|p| p.is_resizable());

        let perpendicular = dock.orientation().flip();
        let sash = if dock.resizable { metrics.sash_size } else { 0 };
        dock.min_size = infos
            .iter()
            .map(|p| min_along(p, perpendicular))
            .max()
            .unwrap_or(0)
            + sash;

        let orientation = dock.orientation();
        let mut offset = 0;
        for (index, id) in members.iter().enumerate() {
            if let Some(pane) = panes.get_mut(*id) {
                if dock.fixed {
                    pane.position = pane.position.max(offset);
                    offset = pane.position + pane_extent(pane, orientation);
                } else {
                    pane.position = index as i32;
                }
            }
        }

        dock.panes = members;
        docks.push(dock);
    }

    docks
}

fn has_caption_bar(dock: &DockInfo, panes: &PaneSet) -> bool {
    dock.is_horizontal()
        && dock
            .panes
            .iter()
            .filter_map(|id| panes.get(*id))
            .any(|pane| pane.has_caption())
}

/// Smallest extent a dock may have across its axis: the largest pane
/// minimum plus the sash, and the caption bar for top and bottom docks
pub fn dock_min_extent(dock: &DockInfo, panes: &PaneSet, metrics: &DockMetrics) -> i32 {
    let caption = if has_caption_bar(dock, panes) {
        metrics.caption_size
    } else {
        0
    };
    (dock.min_size + caption).max(MIN_DOCK_SIZE)
}

/// Size a dock should have in this container.
///
/// Docks that were sized before keep their size. A new dock takes the
/// largest extent its panes ask for (plus a caption bar for top and bottom
/// docks with captioned panes), limited by the dock constraint. Either way
/// the size never drops below [`dock_min_extent`], even past the constraint.
pub fn resolve_dock_size(
    dock: &DockInfo,
    panes: &PaneSet,
    container: Rect,
    metrics: &DockMetrics,
    options: &LayoutOptions,
) -> i32 {
    let min = dock_min_extent(dock, panes, metrics);
    if dock.size > 0 {
        return dock.size.max(min);
    }

    let perpendicular = dock.orientation().flip();
    let mut wanted = dock
        .panes
        .iter()
        .filter_map(|id| panes.get(*id))
        .map(|pane| pane_extent(pane, perpendicular))
        .max()
        .unwrap_or(0);
    if has_caption_bar(dock, panes) {
        wanted += metrics.caption_size;
    }

    let cap = if dock.is_horizontal() {
        options.dock_constraint_y * container.height as f64
    } else {
        options.dock_constraint_x * container.width as f64
    } as i32;

    wanted.min(cap).max(min)
}

/// Compute rectangles for every visible docked pane, dock and UI part.
///
/// A container with zero or negative size yields empty rectangles for
/// everything; that is a degenerate layout, not an error.
pub fn compute_layout(
    panes: &PaneSet,
    docks: &[DockInfo],
    container: Rect,
    metrics: &DockMetrics,
    options: &LayoutOptions,
) -> Layout {
    let mut layout = Layout {
        container,
        ..Layout::default()
    };

    if container.is_empty() {
        for dock in docks {
            layout.docks.insert(dock.key, Rect::EMPTY);
            layout.dock_sizes.insert(dock.key, dock.size);
            for id in &dock.panes {
                layout.panes.insert(*id, Rect::EMPTY);
                layout.contents.insert(*id, Rect::EMPTY);
            }
        }
        layout.center = Rect::EMPTY;
        return layout;
    }

    let maximized = docks
        .iter()
        .flat_map(|dock| dock.panes.iter())
        .find(|id| panes.get(**id).is_some_and(|pane| pane.is_maximized()));
    if let Some(&id) = maximized {
        for dock in docks {
            layout.dock_sizes.insert(dock.key, dock.size);
        }
        if let Some(pane) = panes.get(id) {
            let key = DockKey::new(DockDirection::Center, 0, 0);
            place_pane(&mut layout, id, pane, key, Orientation::Horizontal, container, metrics);
        }
        layout.center = container;
        return layout;
    }

    let mut remaining = container;
    let layers: BTreeSet<i32> = docks
        .iter()
        .filter(|dock| !dock.is_center())
        .map(|dock| dock.layer())
        .collect();

    for layer in layers.into_iter().rev() {
        for direction in DockDirection::EDGES {
            for dock in docks
                .iter()
                .filter(|d| d.direction() == direction && d.layer() == layer)
            {
                let size = resolve_dock_size(dock, panes, container, metrics, options);
                let perpendicular = dock.orientation().flip();
                // Pane minimums win over the container; the dock overflows
                let room = remaining
                    .length(perpendicular)
                    .max(dock_min_extent(dock, panes, metrics));
                let extent = size.min(room).max(0);
                let rect = carve(&mut remaining, direction, extent);
                layout.dock_sizes.insert(dock.key, size);
                layout_dock(&mut layout, dock, rect, panes, metrics);
            }
        }
    }

    layout.center = remaining;
    match docks.iter().find(|dock| dock.is_center()) {
        Some(center) => {
            layout.dock_sizes.insert(center.key, center.size);
            layout_dock(&mut layout, center, remaining, panes, metrics);
        }
        None => layout.parts.push(UiPart {
            kind: UiPartKind::Background,
            orientation: Orientation::Horizontal,
            dock: None,
            pane: None,
            rect: remaining,
        }),
    }

    layout
}

/// Cut a strip of `extent` pixels off the `direction` edge of `remaining`
fn carve(remaining: &mut Rect, direction: DockDirection, extent: i32) -> Rect {
    let r = *remaining;
    match direction {
        DockDirection::Top => {
            remaining.y += extent;
            remaining.height = (r.height - extent).max(0);
            Rect::new(r.x, r.y, r.width, extent)
        }
        DockDirection::Bottom => {
            remaining.height = (r.height - extent).max(0);
            Rect::new(r.x, r.bottom() - extent, r.width, extent)
        }
        DockDirection::Left => {
            remaining.x += extent;
            remaining.width = (r.width - extent).max(0);
            Rect::new(r.x, r.y, extent, r.height)
        }
        DockDirection::Right => {
            remaining.width = (r.width - extent).max(0);
            Rect::new(r.right() - extent, r.y, extent, r.height)
        }
        DockDirection::Center | DockDirection::None => r,
    }
}

/// The sash strip sits on the dock's inner edge, inside the dock's extent
fn split_dock_sash(rect: Rect, direction: DockDirection, sash: i32) -> (Rect, Rect) {
    match direction {
        DockDirection::Left => (
            Rect::new(rect.x, rect.y, rect.width - sash, rect.height),
            Rect::new(rect.right() - sash, rect.y, sash, rect.height),
        ),
        DockDirection::Right => (
            Rect::new(rect.x + sash, rect.y, rect.width - sash, rect.height),
            Rect::new(rect.x, rect.y, sash, rect.height),
        ),
        DockDirection::Top => (
            Rect::new(rect.x, rect.y, rect.width, rect.height - sash),
            Rect::new(rect.x, rect.bottom() - sash, rect.width, sash),
        ),
        DockDirection::Bottom => (
            Rect::new(rect.x, rect.y + sash, rect.width, rect.height - sash),
            Rect::new(rect.x, rect.y, rect.width, sash),
        ),
        DockDirection::Center | DockDirection::None => (rect, Rect::EMPTY),
    }
}

fn layout_dock(
    layout: &mut Layout,
    dock: &DockInfo,
    rect: Rect,
    panes: &PaneSet,
    metrics: &DockMetrics,
) {
    let orientation = dock.orientation();
    let perpendicular = orientation.flip();

    layout.docks.insert(dock.key, rect);
    layout.parts.push(UiPart {
        kind: UiPartKind::Dock,
        orientation,
        dock: Some(dock.key),
        pane: None,
        rect,
    });

    let mut content = rect;
    if dock.resizable {
        let sash = metrics.sash_size.min(rect.length(perpendicular)).max(0);
        let (inner, sash_rect) = split_dock_sash(rect, dock.direction(), sash);
        content = inner;
        layout.parts.push(UiPart {
            kind: UiPartKind::DockSizer,
            orientation: perpendicular,
            dock: Some(dock.key),
            pane: None,
            rect: sash_rect,
        });
    }

    let members: Vec<(PaneId, &PaneInfo)> = dock
        .panes
        .iter()
        .filter_map(|id| panes.get(*id).map(|pane| (*id, pane)))
        .collect();

    if dock.fixed {
        for (id, pane) in members {
            let items = [Allocation::fixed(pane_extent(pane, orientation))
                .with_min(min_along(pane, orientation))
                .with_max(max_along(pane, orientation))];
            let length = apportion(0, &items)[0];
            let rect = content.slice(orientation, pane.position, length);
            place_pane(layout, id, pane, dock.key, orientation, rect, metrics);
        }
        return;
    }

    let count = members.len() as i32;
    let sash = if count > 1 { metrics.sash_size } else { 0 };
    let available = (content.length(orientation) - sash * (count - 1).max(0)).max(0);

    let items: Vec<Allocation> = members
        .iter()
        .map(|(_, pane)| allocation_for(pane, orientation))
        .collect();
    let sizes = apportion(available, &items);

    let mut offset = 0;
    for (index, ((id, pane), size)) in members.iter().zip(sizes).enumerate() {
        let rect = content.slice(orientation, offset, size);
        place_pane(layout, *id, pane, dock.key, orientation, rect, metrics);
        offset += size;

        if (index as i32) < count - 1 {
            layout.parts.push(UiPart {
                kind: UiPartKind::PaneSizer,
                orientation,
                dock: Some(dock.key),
                pane: Some(*id),
                rect: content.slice(orientation, offset, sash),
            });
            offset += sash;
        }
    }
}

fn allocation_for(pane: &PaneInfo, orientation: Orientation) -> Allocation {
    let base = if pane.is_resizable() && pane.proportion > 0 {
        Allocation::flexible(pane.proportion)
    } else {
        Allocation::fixed(pane_extent(pane, orientation))
    };
    base.with_min(min_along(pane, orientation))
        .with_max(max_along(pane, orientation))
}

/// Record a pane's rectangle and emit its decoration parts
fn place_pane(
    layout: &mut Layout,
    id: PaneId,
    pane: &PaneInfo,
    key: DockKey,
    orientation: Orientation,
    rect: Rect,
    metrics: &DockMetrics,
) {
    layout.panes.insert(id, rect);

    let mut push = |kind: UiPartKind, rect: Rect| {
        layout.parts.push(UiPart {
            kind,
            orientation,
            dock: Some(key),
            pane: Some(id),
            rect,
        });
    };

    let mut inner = rect;
    if pane.has_border() {
        push(UiPartKind::PaneBorder, rect);
        inner = rect.deflate(metrics.pane_border_size);
    }

    if pane.has_gripper() {
        if pane.has_gripper_top() {
            let height = metrics.gripper_size.min(inner.height).max(0);
            push(
                UiPartKind::Gripper,
                Rect::new(inner.x, inner.y, inner.width, height),
            );
            inner.y += height;
            inner.height -= height;
        } else {
            let width = metrics.gripper_size.min(inner.width).max(0);
            push(
                UiPartKind::Gripper,
                Rect::new(inner.x, inner.y, width, inner.height),
            );
            inner.x += width;
            inner.width -= width;
        }
    }

    if pane.has_caption() {
        let height = metrics.caption_size.min(inner.height).max(0);
        let caption = Rect::new(inner.x, inner.y, inner.width, height);
        push(UiPartKind::Caption, caption);
        inner.y += height;
        inner.height -= height;

        let size = metrics.button_size;
        for (slot, button) in pane.buttons().enumerate() {
            let x = caption.right() - (slot as i32 + 1) * size;
            if x < caption.x {
                break;
            }
            let y = caption.y + ((caption.height - size) / 2).max(0);
            push(
                UiPartKind::PaneButton(button),
                Rect::new(x, y, size, size.min(caption.height)),
            );
        }
    }

    push(UiPartKind::Pane, inner);
    layout.contents.insert(id, inner);
}
