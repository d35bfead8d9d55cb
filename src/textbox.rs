//! Single-line text entry.

use crate::error::Result;
use crate::form::{
    field_opts_off, new_field, set_field_buffer, FieldOpts, FieldRef, Form, REQ_BEG_FIELD,
    REQ_DEL_CHAR, REQ_END_FIELD, REQ_LEFT_CHAR, REQ_RIGHT_CHAR,
};
use crate::key::{KEY_BACKSPACE, KEY_DC, KEY_END, KEY_HOME, KEY_LEFT, KEY_RIGHT};
use crate::types::Coord;

/// A textbox: one editable, horizontally scrolling field.
#[derive(Debug)]
pub struct Textbox {
    pub(crate) field: FieldRef,
}

impl Textbox {
    pub(crate) fn new(y: Coord, x: Coord, len: Coord, text: &str) -> Result<Self> {
        let field = new_field(1, len, y, x)?;
        field_opts_off(
            &field,
            FieldOpts::O_STATIC | FieldOpts::O_WRAP | FieldOpts::O_BLANK,
        );
        set_field_buffer(&field, text);
        Ok(Self { field })
    }

    /// The entered text with surrounding whitespace removed.
    pub fn value(&self) -> String {
        self.field.borrow().buffer().trim().to_string()
    }

    /// Edit the field through the form.
    ///
    /// Every key is consumed. Editing requests that the form denies, such
    /// as moving left from the first column, leave the field unchanged.
    pub(crate) fn process_key(form: &mut Form, key: i32) -> bool {
        let _ = match key {
            KEY_HOME => form.driver(REQ_BEG_FIELD),
            KEY_END => form.driver(REQ_END_FIELD),
            KEY_LEFT => form.driver(REQ_LEFT_CHAR),
            KEY_RIGHT => form.driver(REQ_RIGHT_CHAR),
            KEY_BACKSPACE => form
                .driver(REQ_LEFT_CHAR)
                .and_then(|()| form.driver(REQ_DEL_CHAR)),
            KEY_DC => form.driver(REQ_DEL_CHAR),
            _ => form.driver(key),
        };
        true
    }
}
