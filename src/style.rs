//! Widget appearance.
//!
//! A [`Style`] holds the glyphs drawn for checkboxes and select options and
//! the focused/unfocused attributes of each widget kind. The default style
//! is the classic boot menu look.

use crate::attr::{A_NORMAL, A_REVERSE, A_UNDERLINE};
use crate::types::AttrT;

/// Focused and unfocused display attributes of a widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttrPair {
    /// Background attribute while the widget holds focus.
    pub focused: AttrT,
    /// Background attribute otherwise.
    pub unfocused: AttrT,
}

impl AttrPair {
    /// Create an attribute pair.
    pub const fn new(focused: AttrT, unfocused: AttrT) -> Self {
        Self { focused, unfocused }
    }

    /// Pick the attribute for a focus state.
    pub const fn get(self, focused: bool) -> AttrT {
        if focused {
            self.focused
        } else {
            self.unfocused
        }
    }
}

/// Glyphs and attributes used when creating widgets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Style {
    /// Checkbox glyph when checked.
    pub checkbox_checked: String,
    /// Checkbox glyph when unchecked.
    pub checkbox_unchecked: String,
    /// Select option glyph when selected.
    pub select_selected: String,
    /// Select option glyph when not selected.
    pub select_unselected: String,

    /// Label attributes.
    pub label: AttrPair,
    /// Checkbox attributes.
    pub checkbox: AttrPair,
    /// Textbox attributes.
    pub textbox: AttrPair,
    /// Select attributes, applied to the focused option row.
    pub select: AttrPair,
    /// Button attributes.
    pub button: AttrPair,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            checkbox_checked: "[*]".to_string(),
            checkbox_unchecked: "[ ]".to_string(),
            select_selected: "(*)".to_string(),
            select_unselected: "( )".to_string(),
            label: AttrPair::new(A_NORMAL, A_NORMAL),
            checkbox: AttrPair::new(A_REVERSE, A_NORMAL),
            textbox: AttrPair::new(A_REVERSE, A_UNDERLINE),
            select: AttrPair::new(A_REVERSE, A_NORMAL),
            button: AttrPair::new(A_REVERSE, A_NORMAL),
        }
    }
}

impl Style {
    /// Glyph for a checkbox state.
    pub fn checkbox_glyph(&self, checked: bool) -> &str {
        if checked {
            &self.checkbox_checked
        } else {
            &self.checkbox_unchecked
        }
    }

    /// Glyph for a select option state.
    pub fn select_glyph(&self, selected: bool) -> &str {
        if selected {
            &self.select_selected
        } else {
            &self.select_unselected
        }
    }
}
