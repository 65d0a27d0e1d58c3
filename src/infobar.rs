//! Dismissable message bar
//!
//! An `InfoBar` sits at the top or bottom of a container and shows a short
//! message with an optional icon, user buttons and a checkbox. Clicking any
//! button dismisses it. With no user buttons a close button is shown
//! instead.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Identifier of an info bar button, chosen by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ButtonId(pub i32);

impl ButtonId {
    /// The built-in close button
    pub const CLOSE: ButtonId = ButtonId(5106);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InfoIcon {
    #[default]
    None,
    Information,
    Warning,
    Error,
    Question,
}

/// Where the bar sits in its container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarPlacement {
    Top,
    Bottom,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShowEffect {
    None,
    SlideToTop,
    SlideToBottom,
    SlideToLeft,
    SlideToRight,
    Blend,
    Expand,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoButton {
    Close,
    User { id: ButtonId, label: String },
}

impl InfoButton {
    pub fn id(&self) -> ButtonId {
        match self {
            InfoButton::Close => ButtonId::CLOSE,
            InfoButton::User { id, .. } => *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Checkbox {
    text: String,
    checked: bool,
}

#[derive(Debug, Clone, Default)]
pub struct InfoBar {
    shown: bool,
    message: String,
    icon: InfoIcon,
    /// User buttons in insertion order
    buttons: Vec<(ButtonId, String)>,
    checkbox: Checkbox,
    placement: BarPlacement,
    show_effect: Option<ShowEffect>,
    hide_effect: Option<ShowEffect>,
    effect_duration: Duration,
}

impl InfoBar {
    pub fn new(placement: BarPlacement) -> Self {
        Self {
            placement,
            ..Self::default()
        }
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn icon(&self) -> InfoIcon {
        self.icon
    }

    pub fn placement(&self) -> BarPlacement {
        self.placement
    }

    pub fn set_placement(&mut self, placement: BarPlacement) {
        self.placement = placement;
    }

    /// Show `text`, replacing any current message. Returns the effect to
    /// animate with when the bar was hidden, `None` if it was already up.
    pub fn show_message(&mut self, text: &str, icon: InfoIcon) -> Option<ShowEffect> {
        self.message = text.to_string();
        self.icon = icon;
        if self.shown {
            return None;
        }
        self.shown = true;
        tracing::debug!(message = text, ?icon, "Info bar shown");
        Some(self.show_effect())
    }

    /// Hide the bar. Returns the effect to animate with, `None` if it was
    /// not shown.
    pub fn dismiss(&mut self) -> Option<ShowEffect> {
        if !self.shown {
            return None;
        }
        self.shown = false;
        Some(self.hide_effect())
    }

    /// A button was clicked; every button dismisses the bar
    pub fn click_button(&mut self, id: ButtonId) -> Option<ShowEffect> {
        if !self.has_button_id(id) {
            return None;
        }
        self.dismiss()
    }

    // ------------------------------------------------------------------
    // Buttons
    // ------------------------------------------------------------------

    /// Add a user button. Re-adding an id replaces its label.
    pub fn add_button(&mut self, id: ButtonId, label: &str) {
        match self.buttons.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, existing)) => *existing = label.to_string(),
            None => self.buttons.push((id, label.to_string())),
        }
    }

    pub fn remove_button(&mut self, id: ButtonId) -> bool {
        let before = self.buttons.len();
        self.buttons.retain(|(existing, _)| *existing != id);
        if self.buttons.len() == before {
            tracing::warn!(?id, "Info bar button not found");
            return false;
        }
        true
    }

    /// Number of user buttons; the close button does not count
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    pub fn button_id(&self, index: usize) -> Option<ButtonId> {
        self.buttons.get(index).map(|(id, _)| *id)
    }

    /// Whether a visible button has `id`, including the close button
    pub fn has_button_id(&self, id: ButtonId) -> bool {
        self.buttons().iter().any(|button| button.id() == id)
    }

    /// Buttons currently on the bar, in display order
    pub fn buttons(&self) -> Vec<InfoButton> {
        if self.buttons.is_empty() {
            return vec![InfoButton::Close];
        }
        self.buttons
            .iter()
            .map(|(id, label)| InfoButton::User {
                id: *id,
                label: label.clone(),
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Checkbox
    // ------------------------------------------------------------------

    /// Show a checkbox below the message; empty text hides it
    pub fn show_checkbox(&mut self, text: &str, checked: bool) {
        self.checkbox = Checkbox {
            text: text.to_string(),
            checked,
        };
    }

    pub fn checkbox_text(&self) -> Option<&str> {
        (!self.checkbox.text.is_empty()).then_some(self.checkbox.text.as_str())
    }

    pub fn is_checkbox_checked(&self) -> bool {
        self.checkbox.checked
    }

    /// The user toggled the checkbox
    pub fn set_checkbox_checked(&mut self, checked: bool) {
        self.checkbox.checked = checked;
    }

    // ------------------------------------------------------------------
    // Effects
    // ------------------------------------------------------------------

    pub fn set_show_hide_effects(&mut self, show: ShowEffect, hide: ShowEffect) {
        self.show_effect = Some(show);
        self.hide_effect = Some(hide);
    }

    /// Explicit show effect, or a slide away from the bar's edge
    pub fn show_effect(&self) -> ShowEffect {
        self.show_effect.unwrap_or(match self.placement {
            BarPlacement::Top => ShowEffect::SlideToBottom,
            BarPlacement::Bottom => ShowEffect::SlideToTop,
            BarPlacement::Unknown => ShowEffect::None,
        })
    }

    /// Explicit hide effect, or a slide back into the bar's edge
    pub fn hide_effect(&self) -> ShowEffect {
        self.hide_effect.unwrap_or(match self.placement {
            BarPlacement::Top => ShowEffect::SlideToTop,
            BarPlacement::Bottom => ShowEffect::SlideToBottom,
            BarPlacement::Unknown => ShowEffect::None,
        })
    }

    pub fn set_effect_duration(&mut self, duration: Duration) {
        self.effect_duration = duration;
    }

    pub fn effect_duration(&self) -> Duration {
        self.effect_duration
    }
}
