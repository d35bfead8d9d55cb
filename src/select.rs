//! Single-choice option lists.
//!
//! A select spans one row per option. Each option is its own field, so the
//! form's field navigation moves between options, and a select key picks
//! the option under the cursor. Exactly one option is selected whenever
//! the list is non-empty.

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::form::{
    field_opts_off, move_field, new_field, set_field_buffer, set_field_visible, FieldOpts,
    FieldRef, Form,
};
use crate::key::is_select_key;
use crate::style::Style;
use crate::types::Coord;

/// Callback fired with the newly selected option's value.
pub type ChangeCallback = Box<dyn FnMut(i32)>;

/// One row of a select.
#[derive(Debug)]
pub struct SelectOption {
    value: i32,
    text: String,
    pub(crate) field: FieldRef,
}

impl SelectOption {
    /// Opaque value reported for this option.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Option text, without the selection glyph.
    pub fn text(&self) -> &str {
        &self.text
    }

    fn show(&self, selected: bool, style: &Style) {
        set_field_buffer(
            &self.field,
            &format!("{} {}", style.select_glyph(selected), self.text),
        );
    }
}

/// A select widget.
pub struct Select {
    options: Vec<SelectOption>,
    selected: usize,
    top: Coord,
    left: Coord,
    size: Coord,
    on_change: Option<ChangeCallback>,
}

impl Select {
    pub(crate) fn new(y: Coord, x: Coord, len: Coord) -> Result<Self> {
        if len <= 0 {
            return Err(Error::InvalidArgument(
                "select width must be positive".into(),
            ));
        }
        Ok(Self {
            options: Vec::new(),
            selected: 0,
            top: y,
            left: x,
            size: len,
            on_change: None,
        })
    }

    /// The options, in display order.
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Number of rows the select occupies.
    pub fn height(&self) -> Coord {
        self.options.len() as Coord
    }

    /// Index of the selected option, if there are any options.
    pub fn selected_index(&self) -> Option<usize> {
        if self.options.is_empty() {
            None
        } else {
            Some(self.selected)
        }
    }

    /// Value of the selected option, or -1 when the list is empty.
    pub fn value(&self) -> i32 {
        self.options.get(self.selected).map_or(-1, SelectOption::value)
    }

    pub(crate) fn set_on_change(&mut self, callback: ChangeCallback) {
        self.on_change = Some(callback);
    }

    /// Append an option and return its new field.
    ///
    /// The first option is always selected. Selecting a later option
    /// deselects the current one.
    pub(crate) fn add_option(
        &mut self,
        value: i32,
        text: &str,
        selected: bool,
        style: &Style,
    ) -> Result<FieldRef> {
        let idx = self.options.len();
        let field = new_field(1, self.size, self.top + idx as Coord, self.left)?;
        field_opts_off(&field, FieldOpts::O_WRAP | FieldOpts::O_EDIT);

        let selected = selected || idx == 0;
        if selected {
            if let Some(old) = self.options.get(self.selected) {
                old.show(false, style);
            }
            self.selected = idx;
        }

        let option = SelectOption {
            value,
            text: text.to_string(),
            field: field.clone(),
        };
        option.show(selected, style);
        self.options.push(option);
        Ok(field)
    }

    /// Remove every option and return their fields.
    pub(crate) fn drop_options(&mut self) -> Vec<FieldRef> {
        self.selected = 0;
        self.options.drain(..).map(|opt| opt.field).collect()
    }

    /// Row of an option field within the select.
    pub(crate) fn option_index(&self, field: &FieldRef) -> Option<usize> {
        self.options.iter().position(|opt| Rc::ptr_eq(&opt.field, field))
    }

    pub(crate) fn fields(&self) -> Vec<FieldRef> {
        self.options.iter().map(|opt| opt.field.clone()).collect()
    }

    pub(crate) fn set_visible(&self, visible: bool) {
        for opt in &self.options {
            set_field_visible(&opt.field, visible);
        }
    }

    pub(crate) fn move_to(&mut self, y: Coord, x: Coord) -> Result<()> {
        for (i, opt) in self.options.iter().enumerate() {
            move_field(&opt.field, y + i as Coord, x)?;
        }
        self.top = y;
        self.left = x;
        Ok(())
    }

    /// Select the option under the form cursor on a select key.
    ///
    /// Any select key is consumed, even when the cursor is not on one of
    /// this select's options.
    pub(crate) fn process_key(&mut self, form: &Form, key: i32, style: &Style) -> bool {
        if !is_select_key(key) {
            return false;
        }

        let Some(new_idx) = form
            .current_field()
            .and_then(|field| self.option_index(&field))
        else {
            return true;
        };
        if new_idx == self.selected {
            return true;
        }

        self.options[self.selected].show(false, style);
        self.options[new_idx].show(true, style);
        self.selected = new_idx;

        let value = self.options[new_idx].value;
        debug!(index = new_idx, value, "select option changed");
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(value);
        }
        true
    }
}

impl fmt::Debug for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Select")
            .field("options", &self.options)
            .field("selected", &self.selected)
            .field("top", &self.top)
            .field("left", &self.left)
            .field("size", &self.size)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::REQ_NEXT_FIELD;
    use std::cell::RefCell;

    fn buffers(select: &Select) -> Vec<String> {
        select
            .options()
            .iter()
            .map(|opt| opt.field.borrow().buffer())
            .collect()
    }

    #[test]
    fn test_first_option_forced_selected() {
        let style = Style::default();
        let mut select = Select::new(0, 0, 20).unwrap();
        assert_eq!(select.value(), -1);
        assert_eq!(select.selected_index(), None);

        select.add_option(10, "disk", false, &style).unwrap();
        select.add_option(20, "network", false, &style).unwrap();
        assert_eq!(select.value(), 10);
        assert_eq!(select.height(), 2);
        assert_eq!(buffers(&select), ["(*) disk", "( ) network"]);
    }

    #[test]
    fn test_later_selected_option_wins() {
        let style = Style::default();
        let mut select = Select::new(3, 2, 20).unwrap();
        select.add_option(1, "a", false, &style).unwrap();
        let field = select.add_option(2, "b", true, &style).unwrap();

        assert_eq!(select.value(), 2);
        assert_eq!(buffers(&select), ["( ) a", "(*) b"]);
        assert_eq!((field.borrow().row(), field.borrow().col()), (4, 2));
    }

    #[test]
    fn test_select_key_changes_selection() {
        let style = Style::default();
        let mut select = Select::new(0, 0, 20).unwrap();
        select.add_option(1, "a", false, &style).unwrap();
        select.add_option(2, "b", false, &style).unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        select.set_on_change(Box::new(move |v| sink.borrow_mut().push(v)));

        let mut form = Form::new(&select.fields());
        form.post().unwrap();

        assert!(select.process_key(&form, ' ' as i32, &style));
        assert!(seen.borrow().is_empty());

        form.driver(REQ_NEXT_FIELD).unwrap();
        assert!(select.process_key(&form, '\n' as i32, &style));
        assert_eq!(*seen.borrow(), [2]);
        assert_eq!(buffers(&select), ["( ) a", "(*) b"]);

        assert!(!select.process_key(&form, 'x' as i32, &style));
    }

    #[test]
    fn test_foreign_field_is_ignored() {
        let style = Style::default();
        let mut select = Select::new(0, 0, 20).unwrap();
        select.add_option(1, "a", false, &style).unwrap();

        let other = new_field(1, 5, 5, 0).unwrap();
        let mut form = Form::new(&[other]);
        form.post().unwrap();

        assert!(select.process_key(&form, ' ' as i32, &style));
        assert_eq!(select.value(), 1);
    }

    #[test]
    fn test_move_and_drop() {
        let style = Style::default();
        let mut select = Select::new(0, 0, 20).unwrap();
        select.add_option(1, "a", false, &style).unwrap();
        select.add_option(2, "b", false, &style).unwrap();

        select.move_to(5, 3).unwrap();
        let rows: Vec<_> = select
            .options()
            .iter()
            .map(|opt| opt.field.borrow().row())
            .collect();
        assert_eq!(rows, [5, 6]);

        let third = select.add_option(3, "c", false, &style).unwrap();
        assert_eq!(third.borrow().row(), 7);

        assert_eq!(select.drop_options().len(), 3);
        assert_eq!(select.height(), 0);
        assert_eq!(select.value(), -1);
    }
}
