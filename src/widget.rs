//! The widget capability shared by all widget kinds.
//!
//! A [`Widget`] couples one kind-specific state ([`WidgetKind`]) with the
//! geometry and display attributes every kind has. Key handling,
//! visibility and movement dispatch on the kind; kinds built from a single
//! field share the default behaviour of acting on that field directly.
//!
//! Widgets live inside a [`WidgetSet`](crate::widgetset::WidgetSet) and are
//! addressed by handle. Each kind has its own typed handle that converts
//! into the generic [`WidgetId`] with [`base`](CheckboxId::base) or `into()`.

use slotmap::new_key_type;
use tracing::trace;

use crate::attr::attr_name;
use crate::button::Button;
use crate::checkbox::Checkbox;
use crate::error::Result;
use crate::form::{move_field, set_field_back, set_field_visible, FieldRef, Form};
use crate::label::Label;
use crate::select::Select;
use crate::style::{AttrPair, Style};
use crate::textbox::Textbox;
use crate::types::{AttrT, Coord};

new_key_type! {
    /// Handle to any widget in a widget set.
    pub struct WidgetId;
}

macro_rules! typed_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) WidgetId);

        impl $name {
            /// The generic widget handle.
            pub fn base(self) -> WidgetId {
                self.0
            }
        }

        impl From<$name> for WidgetId {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

typed_handle!(
    /// Handle to a label.
    LabelId
);
typed_handle!(
    /// Handle to a checkbox.
    CheckboxId
);
typed_handle!(
    /// Handle to a textbox.
    TextboxId
);
typed_handle!(
    /// Handle to a select.
    SelectId
);
typed_handle!(
    /// Handle to a button.
    ButtonId
);

/// Kind-specific widget state.
#[derive(Debug)]
pub enum WidgetKind {
    /// Static text.
    Label(Label),
    /// Two-state toggle.
    Checkbox(Checkbox),
    /// Editable text.
    Textbox(Textbox),
    /// Single choice among options.
    Select(Select),
    /// Push button.
    Button(Button),
}

impl WidgetKind {
    /// Short kind name, for log output.
    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::Label(_) => "label",
            WidgetKind::Checkbox(_) => "checkbox",
            WidgetKind::Textbox(_) => "textbox",
            WidgetKind::Select(_) => "select",
            WidgetKind::Button(_) => "button",
        }
    }

    /// The single field of kinds that have exactly one.
    fn single_field(&self) -> Option<&FieldRef> {
        match self {
            WidgetKind::Label(w) => Some(&w.field),
            WidgetKind::Checkbox(w) => Some(&w.field),
            WidgetKind::Textbox(w) => Some(&w.field),
            WidgetKind::Button(w) => Some(&w.field),
            WidgetKind::Select(_) => None,
        }
    }
}

/// A widget: kind-specific state plus shared geometry and attributes.
#[derive(Debug)]
pub struct Widget {
    kind: WidgetKind,
    attrs: AttrPair,
    height: Coord,
    width: Coord,
    focus_y: Coord,
    x: Coord,
    y: Coord,
}

impl Widget {
    pub(crate) fn new(kind: WidgetKind, attrs: AttrPair, y: Coord, x: Coord, width: Coord) -> Self {
        let widget = Self {
            kind,
            attrs,
            height: 1,
            width,
            focus_y: 0,
            x,
            y,
        };
        for field in widget.fields() {
            set_field_back(&field, attrs.unfocused);
        }
        widget
    }

    /// Kind-specific state.
    pub fn kind(&self) -> &WidgetKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut WidgetKind {
        &mut self.kind
    }

    /// Rows occupied. A select has one row per option.
    pub fn height(&self) -> Coord {
        match &self.kind {
            WidgetKind::Select(select) => select.height(),
            _ => self.height,
        }
    }

    /// Columns occupied.
    pub fn width(&self) -> Coord {
        self.width
    }

    /// Column of the top-left corner.
    pub fn x(&self) -> Coord {
        self.x
    }

    /// Row of the top-left corner.
    pub fn y(&self) -> Coord {
        self.y
    }

    /// Position as `(y, x)`.
    pub fn position(&self) -> (Coord, Coord) {
        (self.y, self.x)
    }

    /// Row offset of the focused sub-element.
    pub fn focus_y(&self) -> Coord {
        self.focus_y
    }

    /// Background attribute while focused.
    pub fn focused_attr(&self) -> AttrT {
        self.attrs.focused
    }

    /// Background attribute while not focused.
    pub fn unfocused_attr(&self) -> AttrT {
        self.attrs.unfocused
    }

    /// All fields of the widget, top to bottom.
    pub fn fields(&self) -> Vec<FieldRef> {
        match &self.kind {
            WidgetKind::Select(select) => select.fields(),
            kind => kind.single_field().into_iter().cloned().collect(),
        }
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        match &self.kind {
            WidgetKind::Select(select) => select.set_visible(visible),
            kind => {
                if let Some(field) = kind.single_field() {
                    set_field_visible(field, visible);
                }
            }
        }
    }

    pub(crate) fn move_to(&mut self, y: Coord, x: Coord) -> Result<()> {
        match &mut self.kind {
            WidgetKind::Select(select) => select.move_to(y, x)?,
            kind => {
                if let Some(field) = kind.single_field() {
                    move_field(field, y, x)?;
                }
            }
        }
        self.y = y;
        self.x = x;
        Ok(())
    }

    /// Apply the focused or unfocused attribute to one of the widget's fields.
    pub(crate) fn focus_change(&self, field: &FieldRef, focused: bool) {
        let attr = self.attrs.get(focused);
        trace!(kind = self.kind.name(), attr = %attr_name(attr), "focus change");
        set_field_back(field, attr);
    }

    /// Track which of the widget's fields holds the cursor.
    pub(crate) fn field_focus(&mut self, field: &FieldRef) {
        if let WidgetKind::Select(select) = &self.kind {
            if let Some(idx) = select.option_index(field) {
                self.focus_y = idx as Coord;
            }
        }
    }

    pub(crate) fn reset_focus_y(&mut self) {
        self.focus_y = 0;
    }

    /// Handle a key while one of the widget's fields is current.
    pub(crate) fn process_key(&mut self, form: &mut Form, key: i32, style: &Style) -> bool {
        match &mut self.kind {
            WidgetKind::Label(_) => false,
            WidgetKind::Checkbox(checkbox) => checkbox.process_key(key, style),
            WidgetKind::Textbox(_) => Textbox::process_key(form, key),
            WidgetKind::Select(select) => select.process_key(form, key, style),
            WidgetKind::Button(button) => button.process_key(key),
        }
    }
}
