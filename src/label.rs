//! Static text labels.

use crate::error::Result;
use crate::form::{field_opts_off, new_field, set_field_buffer, FieldOpts, FieldRef};
use crate::types::Coord;
use crate::wide::string_width;

/// A label: one inactive field showing fixed text.
#[derive(Debug)]
pub struct Label {
    pub(crate) field: FieldRef,
    text: String,
}

impl Label {
    /// Create the label field. Returns the label and its display width.
    pub(crate) fn new(y: Coord, x: Coord, text: &str) -> Result<(Self, Coord)> {
        let width = string_width(text) as Coord;
        // Fields cannot be zero-width; an empty label still occupies a cell.
        let field = new_field(1, width.max(1), y, x)?;
        field_opts_off(&field, FieldOpts::O_ACTIVE);
        set_field_buffer(&field, text);

        Ok((
            Self {
                field,
                text: text.to_string(),
            },
            width,
        ))
    }

    /// The label text.
    pub fn text(&self) -> &str {
        &self.text
    }
}
