//! Pane descriptors
//!
//! A `PaneInfo` describes one managed region: where it wants to dock, how
//! large it wants to be and which decorations it carries. Setters follow a
//! consuming builder style so descriptors read as a chain:
//!
//! ```
//! use dockyard::panel::PaneInfo;
//!
//! let info = PaneInfo::default()
//!     .name("explorer")
//!     .caption("Explorer")
//!     .left()
//!     .layer(1)
//!     .best_size(200, 100);
//! assert_eq!(info.layer, 1);
//! ```

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::geometry::{Orientation, Point, Rect, Size};

/// Handle to a window owned by the host framework.
///
/// The layout core never creates or destroys windows; it only remembers
/// which host window a pane wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

/// Unique identifier for a pane inside a `PaneSet`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PaneId(pub u64);

/// Side of the container a pane docks against
///
/// The numeric values are persisted in perspective strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DockDirection {
    None = 0,
    Top = 1,
    Right = 2,
    Bottom = 3,
    Left = 4,
    Center = 5,
}

impl DockDirection {
    /// Directions that carve space from the container edge
    pub const EDGES: [DockDirection; 4] = [
        DockDirection::Top,
        DockDirection::Bottom,
        DockDirection::Left,
        DockDirection::Right,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<DockDirection> {
        match code {
            0 => Some(DockDirection::None),
            1 => Some(DockDirection::Top),
            2 => Some(DockDirection::Right),
            3 => Some(DockDirection::Bottom),
            4 => Some(DockDirection::Left),
            5 => Some(DockDirection::Center),
            _ => None,
        }
    }

    /// Axis along which panes of a dock in this direction are laid out
    pub fn orientation(self) -> Orientation {
        match self {
            DockDirection::Left | DockDirection::Right => Orientation::Vertical,
            _ => Orientation::Horizontal,
        }
    }

    pub fn is_horizontal(self) -> bool {
        self.orientation() == Orientation::Horizontal
    }

    pub fn is_vertical(self) -> bool {
        self.orientation() == Orientation::Vertical
    }

    /// Flag that allows docking on this side
    pub fn dockable_flag(self) -> PaneFlags {
        match self {
            DockDirection::Top => PaneFlags::TOP_DOCKABLE,
            DockDirection::Bottom => PaneFlags::BOTTOM_DOCKABLE,
            DockDirection::Left => PaneFlags::LEFT_DOCKABLE,
            DockDirection::Right => PaneFlags::RIGHT_DOCKABLE,
            DockDirection::None | DockDirection::Center => PaneFlags::empty(),
        }
    }
}

bitflags! {
    /// Pane state bits. Values are part of the persisted perspective format.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct PaneFlags: u32 {
        const FLOATING = 1 << 0;
        const HIDDEN = 1 << 1;
        const LEFT_DOCKABLE = 1 << 2;
        const RIGHT_DOCKABLE = 1 << 3;
        const TOP_DOCKABLE = 1 << 4;
        const BOTTOM_DOCKABLE = 1 << 5;
        const FLOATABLE = 1 << 6;
        const MOVABLE = 1 << 7;
        const RESIZABLE = 1 << 8;
        const PANE_BORDER = 1 << 9;
        const CAPTION = 1 << 10;
        const GRIPPER = 1 << 11;
        const DESTROY_ON_CLOSE = 1 << 12;
        const TOOLBAR = 1 << 13;
        const ACTIVE = 1 << 14;
        const GRIPPER_TOP = 1 << 15;
        const MAXIMIZED = 1 << 16;
        const DOCK_FIXED = 1 << 17;

        const BUTTON_CLOSE = 1 << 21;
        const BUTTON_MAXIMIZE = 1 << 22;
        const BUTTON_MINIMIZE = 1 << 23;
        const BUTTON_PIN = 1 << 24;

        const BUTTON_CUSTOM1 = 1 << 26;
        const BUTTON_CUSTOM2 = 1 << 27;
        const BUTTON_CUSTOM3 = 1 << 28;

        const SAVED_HIDDEN = 1 << 30;
        const ACTION_PANE = 1 << 31;

        const DOCKABLE = Self::LEFT_DOCKABLE.bits()
            | Self::RIGHT_DOCKABLE.bits()
            | Self::TOP_DOCKABLE.bits()
            | Self::BOTTOM_DOCKABLE.bits();
    }
}

/// Buttons a pane caption can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaneButton {
    Close,
    Maximize,
    Minimize,
    Pin,
    Custom1,
    Custom2,
    Custom3,
}

impl PaneButton {
    /// Caption buttons in right-to-left drawing order
    pub const ALL: [PaneButton; 7] = [
        PaneButton::Close,
        PaneButton::Maximize,
        PaneButton::Minimize,
        PaneButton::Pin,
        PaneButton::Custom1,
        PaneButton::Custom2,
        PaneButton::Custom3,
    ];

    pub fn flag(self) -> PaneFlags {
        match self {
            PaneButton::Close => PaneFlags::BUTTON_CLOSE,
            PaneButton::Maximize => PaneFlags::BUTTON_MAXIMIZE,
            PaneButton::Minimize => PaneFlags::BUTTON_MINIMIZE,
            PaneButton::Pin => PaneFlags::BUTTON_PIN,
            PaneButton::Custom1 => PaneFlags::BUTTON_CUSTOM1,
            PaneButton::Custom2 => PaneFlags::BUTTON_CUSTOM2,
            PaneButton::Custom3 => PaneFlags::BUTTON_CUSTOM3,
        }
    }
}

/// Where a pane currently lives. Exactly one applies at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Docked,
    Floating,
    Hidden,
}

/// Default weight of a pane inside a proportional dock
pub const DEFAULT_PROPORTION: i32 = 100_000;

/// Layout descriptor for one managed pane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaneInfo {
    /// Unique name; used as the key in perspective strings
    pub name: String,
    /// Caption text
    pub caption: String,
    /// Host window shown in this pane
    pub window: Option<WindowId>,
    /// Host frame holding the pane while floating
    pub frame: Option<WindowId>,
    pub flags: PaneFlags,
    pub direction: DockDirection,
    /// Onion layer, 0 is innermost
    pub layer: i32,
    /// Row inside the dock layer, 0 is outermost
    pub row: i32,
    /// Order within the row (pixel offset in fixed docks)
    pub position: i32,
    /// Weight within a proportional dock
    pub proportion: i32,
    pub best_size: Size,
    pub min_size: Size,
    pub max_size: Size,
    pub floating_pos: Point,
    pub floating_size: Size,
    /// Rectangle from the most recent layout
    #[serde(skip)]
    pub rect: Rect,
}

impl PaneInfo {
    /// A bare descriptor with no flags set
    pub fn new() -> Self {
        Self {
            name: String::new(),
            caption: String::new(),
            window: None,
            frame: None,
            flags: PaneFlags::empty(),
            direction: DockDirection::Left,
            layer: 0,
            row: 0,
            position: 0,
            proportion: 0,
            best_size: Size::UNSET,
            min_size: Size::UNSET,
            max_size: Size::UNSET,
            floating_pos: Point::new(-1, -1),
            floating_size: Size::UNSET,
            rect: Rect::EMPTY,
        }
    }

    // ------------------------------------------------------------------
    // Builder
    // ------------------------------------------------------------------

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    pub fn window(mut self, window: WindowId) -> Self {
        self.window = Some(window);
        self
    }

    pub fn direction(mut self, direction: DockDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn left(self) -> Self {
        self.direction(DockDirection::Left)
    }

    pub fn right(self) -> Self {
        self.direction(DockDirection::Right)
    }

    pub fn top(self) -> Self {
        self.direction(DockDirection::Top)
    }

    pub fn bottom(self) -> Self {
        self.direction(DockDirection::Bottom)
    }

    pub fn center(self) -> Self {
        self.direction(DockDirection::Center)
    }

    pub fn layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    pub fn row(mut self, row: i32) -> Self {
        self.row = row;
        self
    }

    pub fn position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    pub fn proportion(mut self, proportion: i32) -> Self {
        self.proportion = proportion;
        self
    }

    pub fn best_size(mut self, width: i32, height: i32) -> Self {
        self.best_size = Size::new(width, height);
        self
    }

    pub fn min_size(mut self, width: i32, height: i32) -> Self {
        self.min_size = Size::new(width, height);
        self
    }

    pub fn max_size(mut self, width: i32, height: i32) -> Self {
        self.max_size = Size::new(width, height);
        self
    }

    pub fn floating_position(mut self, x: i32, y: i32) -> Self {
        self.floating_pos = Point::new(x, y);
        self
    }

    pub fn floating_size(mut self, width: i32, height: i32) -> Self {
        self.floating_size = Size::new(width, height);
        self
    }

    pub fn set_flag(mut self, flag: PaneFlags, on: bool) -> Self {
        self.flags.set(flag, on);
        self
    }

    pub fn caption_visible(self, visible: bool) -> Self {
        self.set_flag(PaneFlags::CAPTION, visible)
    }

    pub fn pane_border(self, visible: bool) -> Self {
        self.set_flag(PaneFlags::PANE_BORDER, visible)
    }

    pub fn gripper(self, visible: bool) -> Self {
        self.set_flag(PaneFlags::GRIPPER, visible)
    }

    pub fn gripper_top(self, at_top: bool) -> Self {
        self.set_flag(PaneFlags::GRIPPER_TOP, at_top)
    }

    pub fn close_button(self, visible: bool) -> Self {
        self.set_flag(PaneFlags::BUTTON_CLOSE, visible)
    }

    pub fn maximize_button(self, visible: bool) -> Self {
        self.set_flag(PaneFlags::BUTTON_MAXIMIZE, visible)
    }

    pub fn minimize_button(self, visible: bool) -> Self {
        self.set_flag(PaneFlags::BUTTON_MINIMIZE, visible)
    }

    pub fn pin_button(self, visible: bool) -> Self {
        self.set_flag(PaneFlags::BUTTON_PIN, visible)
    }

    pub fn destroy_on_close(self, destroy: bool) -> Self {
        self.set_flag(PaneFlags::DESTROY_ON_CLOSE, destroy)
    }

    pub fn left_dockable(self, dockable: bool) -> Self {
        self.set_flag(PaneFlags::LEFT_DOCKABLE, dockable)
    }

    pub fn right_dockable(self, dockable: bool) -> Self {
        self.set_flag(PaneFlags::RIGHT_DOCKABLE, dockable)
    }

    pub fn top_dockable(self, dockable: bool) -> Self {
        self.set_flag(PaneFlags::TOP_DOCKABLE, dockable)
    }

    pub fn bottom_dockable(self, dockable: bool) -> Self {
        self.set_flag(PaneFlags::BOTTOM_DOCKABLE, dockable)
    }

    pub fn dockable(self, dockable: bool) -> Self {
        self.set_flag(PaneFlags::DOCKABLE, dockable)
    }

    pub fn floatable(self, floatable: bool) -> Self {
        self.set_flag(PaneFlags::FLOATABLE, floatable)
    }

    pub fn movable(self, movable: bool) -> Self {
        self.set_flag(PaneFlags::MOVABLE, movable)
    }

    pub fn resizable(self, resizable: bool) -> Self {
        self.set_flag(PaneFlags::RESIZABLE, resizable)
    }

    /// Fixed-size pane; the antonym of `resizable(true)`
    pub fn fixed(self) -> Self {
        self.resizable(false)
    }

    /// The containing dock gets no resize sash
    pub fn dock_fixed(self, fixed: bool) -> Self {
        self.set_flag(PaneFlags::DOCK_FIXED, fixed)
    }

    pub fn show(self, show: bool) -> Self {
        self.set_flag(PaneFlags::HIDDEN, !show)
    }

    pub fn hide(self) -> Self {
        self.show(false)
    }

    pub fn float(self) -> Self {
        self.set_flag(PaneFlags::FLOATING, true)
    }

    pub fn dock(self) -> Self {
        self.set_flag(PaneFlags::FLOATING, false)
    }

    /// Standard settings for a regular docked pane
    pub fn default_pane(mut self) -> Self {
        self.flags |= PaneFlags::DOCKABLE
            | PaneFlags::FLOATABLE
            | PaneFlags::MOVABLE
            | PaneFlags::RESIZABLE
            | PaneFlags::CAPTION
            | PaneFlags::PANE_BORDER
            | PaneFlags::BUTTON_CLOSE;
        self
    }

    /// Standard settings for a toolbar: gripper, no caption, not resizable,
    /// placed on an outer layer
    pub fn toolbar_pane(mut self) -> Self {
        self = self.default_pane();
        self.flags |= PaneFlags::TOOLBAR | PaneFlags::GRIPPER;
        self.flags -= PaneFlags::RESIZABLE | PaneFlags::CAPTION;
        if self.layer == 0 {
            self.layer = 10;
        }
        self
    }

    /// Standard settings for the center pane: no caption, no buttons
    pub fn center_pane(mut self) -> Self {
        self.flags = PaneFlags::empty();
        self.center().pane_border(true).resizable(true)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// A descriptor is usable once it wraps a host window
    pub fn is_ok(&self) -> bool {
        self.window.is_some()
    }

    pub fn has_flag(&self, flag: PaneFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn placement(&self) -> Placement {
        if self.flags.contains(PaneFlags::HIDDEN) {
            Placement::Hidden
        } else if self.flags.contains(PaneFlags::FLOATING) {
            Placement::Floating
        } else {
            Placement::Docked
        }
    }

    pub fn is_shown(&self) -> bool {
        !self.flags.contains(PaneFlags::HIDDEN)
    }

    pub fn is_docked(&self) -> bool {
        self.placement() == Placement::Docked
    }

    pub fn is_floating(&self) -> bool {
        self.placement() == Placement::Floating
    }

    pub fn is_toolbar(&self) -> bool {
        self.has_flag(PaneFlags::TOOLBAR)
    }

    pub fn is_resizable(&self) -> bool {
        self.has_flag(PaneFlags::RESIZABLE)
    }

    pub fn is_fixed(&self) -> bool {
        !self.is_resizable()
    }

    pub fn is_floatable(&self) -> bool {
        self.has_flag(PaneFlags::FLOATABLE)
    }

    pub fn is_movable(&self) -> bool {
        self.has_flag(PaneFlags::MOVABLE)
    }

    pub fn is_maximized(&self) -> bool {
        self.has_flag(PaneFlags::MAXIMIZED)
    }

    pub fn is_dockable(&self) -> bool {
        self.flags.intersects(PaneFlags::DOCKABLE)
    }

    pub fn is_dockable_at(&self, direction: DockDirection) -> bool {
        match direction {
            DockDirection::Center => true,
            DockDirection::None => false,
            edge => self.flags.contains(edge.dockable_flag()),
        }
    }

    pub fn has_caption(&self) -> bool {
        self.has_flag(PaneFlags::CAPTION)
    }

    pub fn has_gripper(&self) -> bool {
        self.has_flag(PaneFlags::GRIPPER)
    }

    pub fn has_gripper_top(&self) -> bool {
        self.has_flag(PaneFlags::GRIPPER_TOP)
    }

    pub fn has_border(&self) -> bool {
        self.has_flag(PaneFlags::PANE_BORDER)
    }

    pub fn has_button(&self, button: PaneButton) -> bool {
        self.flags.contains(button.flag())
    }

    /// Buttons shown in the caption, in right-to-left order
    pub fn buttons(&self) -> impl Iterator<Item = PaneButton> + '_ {
        PaneButton::ALL
            .into_iter()
            .filter(move |button| self.has_button(*button))
    }

    /// Copy every layout field from `source`, keeping this pane's window,
    /// floating frame and computed rectangle.
    pub fn safe_set(&mut self, source: &PaneInfo) {
        let window = self.window;
        let frame = self.frame;
        let rect = self.rect;
        *self = source.clone();
        self.window = window;
        self.frame = frame;
        self.rect = rect;
    }
}

impl Default for PaneInfo {
    fn default() -> Self {
        PaneInfo::new().default_pane()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pane_flags() {
        let info = PaneInfo::default();
        assert!(info.is_dockable());
        assert!(info.is_floatable());
        assert!(info.is_resizable());
        assert!(info.has_caption());
        assert!(info.has_button(PaneButton::Close));
        assert!(!info.has_button(PaneButton::Maximize));
        assert_eq!(info.direction, DockDirection::Left);
    }

    #[test]
    fn test_placement_is_exclusive() {
        let info = PaneInfo::default();
        assert_eq!(info.placement(), Placement::Docked);

        let floating = info.clone().float();
        assert_eq!(floating.placement(), Placement::Floating);
        assert!(!floating.is_docked());

        // Hidden dominates floating
        let hidden = floating.hide();
        assert_eq!(hidden.placement(), Placement::Hidden);
        assert!(!hidden.is_floating());
        assert!(!hidden.is_docked());
    }

    #[test]
    fn test_toolbar_pane_moves_to_outer_layer() {
        let toolbar = PaneInfo::new().toolbar_pane().top();
        assert!(toolbar.is_toolbar());
        assert!(!toolbar.has_caption());
        assert!(toolbar.is_fixed());
        assert_eq!(toolbar.layer, 10);

        let explicit = PaneInfo::new().layer(3).toolbar_pane();
        assert_eq!(explicit.layer, 3);
    }

    #[test]
    fn test_safe_set_keeps_window() {
        let mut live = PaneInfo::default().name("a").window(WindowId(7));
        let saved = PaneInfo::default().name("a").right().layer(2).row(1);
        live.safe_set(&saved);
        assert_eq!(live.window, Some(WindowId(7)));
        assert_eq!(live.direction, DockDirection::Right);
        assert_eq!(live.layer, 2);
        assert_eq!(live.row, 1);
    }

    #[test]
    fn test_direction_codes_round_trip() {
        for code in 0..=5 {
            let dir = DockDirection::from_code(code).unwrap();
            assert_eq!(dir.code(), code);
        }
        assert_eq!(DockDirection::from_code(9), None);
    }

    #[test]
    fn test_buttons_listed_in_order() {
        let info = PaneInfo::new()
            .pin_button(true)
            .close_button(true)
            .maximize_button(true);
        let buttons: Vec<_> = info.buttons().collect();
        assert_eq!(
            buttons,
            vec![PaneButton::Close, PaneButton::Maximize, PaneButton::Pin]
        );
    }
}
