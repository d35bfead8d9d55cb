//! Push buttons.

use std::fmt;

use tracing::debug;

use crate::error::{Error, Result};
use crate::form::{field_opts_off, new_field, set_field_buffer, FieldOpts, FieldRef};
use crate::key::is_select_key;
use crate::types::Coord;
use crate::wide::{char_width, truncate_to_width};

/// Callback fired when a button is activated.
pub type ClickCallback = Box<dyn FnMut()>;

/// A button: one read-only field showing a bracketed, centered label.
pub struct Button {
    pub(crate) field: FieldRef,
    text: String,
    click: Option<ClickCallback>,
}

/// Center `text` in `size` columns between brackets.
///
/// Text wider than `size` is cut off on the right.
pub fn button_label(text: &str, size: usize) -> String {
    let text = truncate_to_width(text, size);
    let len: usize = text.chars().map(char_width).sum();
    let left = (size - len) / 2;
    let right = size - len - left;
    format!("[{}{}{}]", " ".repeat(left), text, " ".repeat(right))
}

impl Button {
    /// Create the button field. Returns the button and its display width,
    /// brackets included.
    pub(crate) fn new(y: Coord, x: Coord, size: Coord, text: &str) -> Result<(Self, Coord)> {
        if size < 0 {
            return Err(Error::InvalidArgument(
                "button size must not be negative".into(),
            ));
        }
        let width = size + 2;
        let field = new_field(1, width, y, x)?;
        field_opts_off(&field, FieldOpts::O_EDIT);
        set_field_buffer(&field, &button_label(text, size as usize));

        Ok((
            Self {
                field,
                text: text.to_string(),
                click: None,
            },
            width,
        ))
    }

    /// The label text, as given.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether a click callback is installed.
    pub fn has_click(&self) -> bool {
        self.click.is_some()
    }

    pub(crate) fn set_click(&mut self, click: ClickCallback) {
        self.click = Some(click);
    }

    /// Fire the click callback on a select key.
    ///
    /// Without a callback, no key is handled.
    pub(crate) fn process_key(&mut self, key: i32) -> bool {
        let Some(click) = self.click.as_mut() else {
            return false;
        };
        if !is_select_key(key) {
            return false;
        }
        debug!(text = %self.text, "button clicked");
        click();
        true
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("field", &self.field)
            .field("text", &self.text)
            .field("click", &self.click.is_some())
            .finish()
    }
}
