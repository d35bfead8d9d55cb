//! Two-state checkboxes.

use tracing::trace;

use crate::error::Result;
use crate::form::{field_opts_off, new_field, set_field_buffer, FieldOpts, FieldRef};
use crate::key::is_select_key;
use crate::style::Style;
use crate::types::Coord;
use crate::wide::string_width;

/// A checkbox: one read-only field showing the checked or unchecked glyph.
#[derive(Debug)]
pub struct Checkbox {
    pub(crate) field: FieldRef,
    checked: bool,
}

impl Checkbox {
    pub(crate) fn new(y: Coord, x: Coord, checked: bool, style: &Style) -> Result<(Self, Coord)> {
        let width = string_width(style.checkbox_glyph(true)) as Coord;
        let field = new_field(1, width.max(1), y, x)?;
        field_opts_off(&field, FieldOpts::O_EDIT);

        let checkbox = Self { field, checked };
        checkbox.update_glyph(style);
        Ok((checkbox, width))
    }

    /// Whether the box is checked.
    pub fn value(&self) -> bool {
        self.checked
    }

    fn update_glyph(&self, style: &Style) {
        set_field_buffer(&self.field, style.checkbox_glyph(self.checked));
    }

    /// Toggle on a select key.
    pub(crate) fn process_key(&mut self, key: i32, style: &Style) -> bool {
        if !is_select_key(key) {
            return false;
        }
        self.checked = !self.checked;
        self.update_glyph(style);
        trace!(checked = self.checked, "checkbox toggled");
        true
    }
}
