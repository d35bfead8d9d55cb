//! Widget sets: the widgets of one screen, their form, and focus.
//!
//! A [`WidgetSet`] owns every widget created through its factories and a
//! [`FieldRegistry`] of their fields in creation order. Posting builds a
//! [`Form`] from the registry and binds it to the set's host windows;
//! unposting drops the form but remembers the focused field, so a later
//! post puts the cursor back where it was.
//!
//! Input is fed one decoded key at a time to [`WidgetSet::process_key`]:
//! navigation keys move focus between fields, everything else goes to the
//! focused widget.
//!
//! # Example
//!
//! ```rust
//! use nc_widgets::key::KEY_TAB;
//! use nc_widgets::window::Window;
//! use nc_widgets::widgetset::WidgetSet;
//!
//! # fn main() -> nc_widgets::Result<()> {
//! let main = Window::new(24, 80, 0, 0)?.into_shared();
//! let sub = main.borrow().derwin(20, 76, 2, 2)?.into_shared();
//!
//! let mut set = WidgetSet::new(main, sub);
//! let auto_boot = set.add_checkbox(0, 0, true)?;
//! set.add_button(2, 0, 6, "OK")?;
//! set.post()?;
//!
//! assert!(set.process_key(' ' as i32));
//! assert!(!set.checkbox(auto_boot)?.value());
//! assert!(set.process_key(KEY_TAB));
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use slotmap::SlotMap;
use tracing::{debug, trace};

use crate::button::Button;
use crate::checkbox::Checkbox;
use crate::error::{Error, Result};
use crate::form::{
    set_field_back, FieldId, FieldRef, Form, REQ_END_FIELD, REQ_FIRST_FIELD, REQ_LAST_FIELD,
    REQ_NEXT_FIELD, REQ_PREV_FIELD,
};
use crate::key::{keyname, KEY_BTAB, KEY_DOWN, KEY_NPAGE, KEY_PPAGE, KEY_TAB, KEY_UP};
use crate::label::Label;
use crate::registry::{FieldRegistry, DEFAULT_CAPACITY};
use crate::select::Select;
use crate::style::Style;
use crate::textbox::Textbox;
use crate::types::Coord;
use crate::widget::{
    ButtonId, CheckboxId, LabelId, SelectId, TextboxId, Widget, WidgetId, WidgetKind,
};
use crate::window::WindowRef;

/// Callback fired whenever a widget gains focus.
pub type FocusCallback = Box<dyn FnMut(WidgetId, &Widget)>;

/// Map a navigation key to the form request that moves focus.
fn navigation_request(key: i32) -> Option<i32> {
    match key {
        KEY_BTAB | KEY_UP => Some(REQ_PREV_FIELD),
        KEY_TAB | KEY_DOWN => Some(REQ_NEXT_FIELD),
        KEY_PPAGE => Some(REQ_FIRST_FIELD),
        KEY_NPAGE => Some(REQ_LAST_FIELD),
        _ => None,
    }
}

/// Resolve a field to the widget that owns it.
///
/// # Panics
///
/// Panics if the field was not created by a widget of this set. Every field
/// in the form comes from the registry, so this is a broken invariant.
fn owner(owners: &HashMap<FieldId, WidgetId>, field: &FieldRef) -> WidgetId {
    let id = field.borrow().id();
    *owners
        .get(&id)
        .unwrap_or_else(|| panic!("field {id:?} has no owning widget"))
}

/// The widgets of one screen.
pub struct WidgetSet {
    main_window: WindowRef,
    sub_window: WindowRef,
    /// Present iff the set is posted.
    form: Option<Form>,
    registry: FieldRegistry,
    owners: HashMap<FieldId, WidgetId>,
    widgets: SlotMap<WidgetId, Widget>,
    widget_focus: Option<FocusCallback>,
    /// Field focused at the last unpost.
    cur_field: Option<FieldRef>,
    style: Style,
}

/// Builder for widget sets.
///
/// # Example
///
/// ```rust
/// use nc_widgets::style::Style;
/// use nc_widgets::window::Window;
/// use nc_widgets::widgetset::WidgetSet;
///
/// # fn main() -> nc_widgets::Result<()> {
/// let main = Window::new(24, 80, 0, 0)?.into_shared();
/// let set = WidgetSet::builder()
///     .windows(main.clone(), main)
///     .style(Style::default())
///     .capacity(32)
///     .build()?;
/// assert_eq!(set.field_count(), 0);
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct WidgetSetBuilder {
    main_window: Option<WindowRef>,
    sub_window: Option<WindowRef>,
    style: Style,
    capacity: Option<usize>,
}

impl WidgetSetBuilder {
    /// Create a builder with the default style and capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host windows. Fields are drawn into `sub`.
    #[must_use]
    pub fn windows(mut self, main: WindowRef, sub: WindowRef) -> Self {
        self.main_window = Some(main);
        self.sub_window = Some(sub);
        self
    }

    /// Set the glyphs and attributes for new widgets.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the initial field registry capacity.
    #[must_use]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Build the widget set.
    pub fn build(self) -> Result<WidgetSet> {
        let (Some(main_window), Some(sub_window)) = (self.main_window, self.sub_window) else {
            return Err(Error::InvalidArgument(
                "widget set needs host windows".into(),
            ));
        };
        let capacity = self.capacity.unwrap_or(DEFAULT_CAPACITY);
        if capacity == 0 {
            return Err(Error::InvalidArgument(
                "registry capacity must be positive".into(),
            ));
        }

        Ok(WidgetSet {
            main_window,
            sub_window,
            form: None,
            registry: FieldRegistry::with_capacity(capacity),
            owners: HashMap::new(),
            widgets: SlotMap::with_key(),
            widget_focus: None,
            cur_field: None,
            style: self.style,
        })
    }
}

impl WidgetSet {
    /// Create an empty widget set drawing into `sub` inside `main`.
    pub fn new(main: WindowRef, sub: WindowRef) -> Self {
        Self {
            main_window: main,
            sub_window: sub,
            form: None,
            registry: FieldRegistry::new(),
            owners: HashMap::new(),
            widgets: SlotMap::with_key(),
            widget_focus: None,
            cur_field: None,
            style: Style::default(),
        }
    }

    /// Create a widget set builder.
    pub fn builder() -> WidgetSetBuilder {
        WidgetSetBuilder::new()
    }

    /// Replace the host windows. Takes effect on the next post.
    pub fn set_windows(&mut self, main: WindowRef, sub: WindowRef) {
        self.main_window = main;
        self.sub_window = sub;
    }

    /// The main host window.
    pub fn main_window(&self) -> &WindowRef {
        &self.main_window
    }

    /// The host window fields are drawn into.
    pub fn sub_window(&self) -> &WindowRef {
        &self.sub_window
    }

    /// Install the callback fired whenever a widget gains focus.
    pub fn set_widget_focus<F>(&mut self, callback: F)
    where
        F: FnMut(WidgetId, &Widget) + 'static,
    {
        self.widget_focus = Some(Box::new(callback));
    }

    /// The style new widgets are created with.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Number of registered fields.
    pub fn field_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of live widgets.
    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    /// Check whether the set is posted.
    pub fn is_posted(&self) -> bool {
        self.form.is_some()
    }

    /// The posted form.
    pub fn form(&self) -> Option<&Form> {
        self.form.as_ref()
    }

    // ------------------------------------------------------------------
    // Posting
    // ------------------------------------------------------------------

    /// Post the set: build a form from the registered fields and focus the
    /// first field, or the field that was focused when last unposted.
    pub fn post(&mut self) -> Result<()> {
        if self.form.is_some() {
            return Err(Error::Posted);
        }

        let mut form = Form::new(self.registry.fields());
        form.set_window(self.main_window.clone());
        form.set_sub(self.sub_window.clone());
        form.post()?;
        if let Some(field) = &self.cur_field {
            form.set_current_field(field)?;
        }
        form.driver(REQ_END_FIELD)?;

        debug!(fields = form.field_count(), "widget set posted");
        self.form = Some(form);
        self.focus_current();
        self.redraw();
        Ok(())
    }

    /// Unpost the set, remembering the focused field.
    pub fn unpost(&mut self) -> Result<()> {
        let mut form = self.form.take().ok_or(Error::NotPosted)?;
        self.cur_field = form.current_field();
        form.unpost()?;
        debug!("widget set unposted");
        Ok(())
    }

    /// Redraw the posted form into the host window.
    pub fn redraw(&self) {
        if let Some(form) = &self.form {
            form.render();
        }
    }

    // ------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------

    /// The widget owning the form's current field.
    pub fn focused_widget(&self) -> Option<WidgetId> {
        let field = self.form.as_ref()?.current_field()?;
        Some(owner(&self.owners, &field))
    }

    /// Apply focus to the form's current field and notify.
    fn focus_current(&mut self) {
        let Some(field) = self.form.as_ref().and_then(Form::current_field) else {
            return;
        };
        let id = owner(&self.owners, &field);
        let widget = &mut self.widgets[id];
        widget.focus_change(&field, true);
        widget.field_focus(&field);
        debug!(?id, kind = widget.kind().name(), "widget focused");
        if let Some(callback) = self.widget_focus.as_mut() {
            callback(id, &*widget);
        }
    }

    /// Process one key.
    ///
    /// Back-tab and up move to the previous field, tab and down to the
    /// next, page-up to the first and page-down to the last; these are
    /// always handled. Other keys go to the focused widget, and the
    /// widget's answer is returned. An unposted set handles nothing.
    ///
    /// # Panics
    ///
    /// Panics if the focused field does not belong to a widget of this set.
    pub fn process_key(&mut self, key: impl Into<i32>) -> bool {
        let key = key.into();
        let Some(form) = self.form.as_mut() else {
            trace!(key = keyname(key), "key ignored, widget set not posted");
            return false;
        };
        let Some(field) = form.current_field() else {
            return false;
        };
        let id = owner(&self.owners, &field);

        if let Some(req) = navigation_request(key) {
            trace!(key = keyname(key), "focus navigation");
            self.widgets[id].focus_change(&field, false);
            // Field moves cannot fail on a posted form.
            let _ = form.driver(req);
            let _ = form.driver(REQ_END_FIELD);
            self.focus_current();
            self.redraw();
            return true;
        }

        let handled = self.widgets[id].process_key(form, key, &self.style);
        trace!(key = keyname(key), handled, "key delegated");
        self.redraw();
        handled
    }

    // ------------------------------------------------------------------
    // Widget creation
    // ------------------------------------------------------------------

    fn register(&mut self, id: WidgetId, field: FieldRef) {
        self.owners.insert(field.borrow().id(), id);
        self.registry.add(field);
    }

    fn deregister(&mut self, field: &FieldRef) {
        self.registry.remove(field);
        self.owners.remove(&field.borrow().id());
        if self
            .cur_field
            .as_ref()
            .is_some_and(|cur| Rc::ptr_eq(cur, field))
        {
            self.cur_field = None;
        }
    }

    /// Bring a posted form in line with the registry.
    fn reconnect(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        let before = form.current_field();
        form.replace_fields(self.registry.fields());
        let after = form.current_field();

        let moved = match (&before, &after) {
            (Some(a), Some(b)) => !Rc::ptr_eq(a, b),
            (None, None) => false,
            _ => true,
        };
        if moved {
            if let Some(field) = &after {
                let _ = form.driver(REQ_END_FIELD);
                trace!(field = ?field.borrow().id(), "focus moved by structural change");
            }
            self.focus_current();
        }
        self.redraw();
    }

    fn insert(&mut self, widget: Widget) -> WidgetId {
        let fields = widget.fields();
        let kind = widget.kind().name();
        let (y, x) = widget.position();
        let id = self.widgets.insert(widget);
        for field in fields {
            self.register(id, field);
        }
        debug!(?id, kind, y, x, "widget created");
        self.reconnect();
        id
    }

    /// Add a label.
    pub fn add_label(&mut self, y: Coord, x: Coord, text: &str) -> Result<LabelId> {
        let (label, width) = Label::new(y, x, text)?;
        let widget = Widget::new(WidgetKind::Label(label), self.style.label, y, x, width);
        Ok(LabelId(self.insert(widget)))
    }

    /// Add a checkbox.
    pub fn add_checkbox(&mut self, y: Coord, x: Coord, checked: bool) -> Result<CheckboxId> {
        let (checkbox, width) = Checkbox::new(y, x, checked, &self.style)?;
        let widget = Widget::new(
            WidgetKind::Checkbox(checkbox),
            self.style.checkbox,
            y,
            x,
            width,
        );
        Ok(CheckboxId(self.insert(widget)))
    }

    /// Add a textbox `len` columns wide, holding `text`.
    pub fn add_textbox(&mut self, y: Coord, x: Coord, len: Coord, text: &str) -> Result<TextboxId> {
        let textbox = Textbox::new(y, x, len, text)?;
        let widget = Widget::new(WidgetKind::Textbox(textbox), self.style.textbox, y, x, len);
        Ok(TextboxId(self.insert(widget)))
    }

    /// Add an empty select whose options are `len` columns wide.
    pub fn add_select(&mut self, y: Coord, x: Coord, len: Coord) -> Result<SelectId> {
        let select = Select::new(y, x, len)?;
        let widget = Widget::new(WidgetKind::Select(select), self.style.select, y, x, len);
        Ok(SelectId(self.insert(widget)))
    }

    /// Add a button showing `text` centered in `size` columns, between
    /// brackets.
    ///
    /// The widget is `size + 2` columns wide: its reported width includes
    /// the brackets, so place the next widget at `x + size + 2`.
    pub fn add_button(&mut self, y: Coord, x: Coord, size: Coord, text: &str) -> Result<ButtonId> {
        let (button, width) = Button::new(y, x, size, text)?;
        let widget = Widget::new(WidgetKind::Button(button), self.style.button, y, x, width);
        Ok(ButtonId(self.insert(widget)))
    }

    // ------------------------------------------------------------------
    // Widget access
    // ------------------------------------------------------------------

    /// Look up any widget.
    pub fn widget(&self, id: impl Into<WidgetId>) -> Result<&Widget> {
        self.widgets.get(id.into()).ok_or(Error::UnknownWidget)
    }

    fn widget_mut(&mut self, id: impl Into<WidgetId>) -> Result<&mut Widget> {
        self.widgets.get_mut(id.into()).ok_or(Error::UnknownWidget)
    }

    /// Iterate over all widgets.
    pub fn widgets(&self) -> impl Iterator<Item = (WidgetId, &Widget)> {
        self.widgets.iter()
    }

    /// Look up a label.
    pub fn label(&self, id: LabelId) -> Result<&Label> {
        match self.widget(id)?.kind() {
            WidgetKind::Label(label) => Ok(label),
            _ => Err(Error::UnknownWidget),
        }
    }

    /// Look up a checkbox.
    pub fn checkbox(&self, id: CheckboxId) -> Result<&Checkbox> {
        match self.widget(id)?.kind() {
            WidgetKind::Checkbox(checkbox) => Ok(checkbox),
            _ => Err(Error::UnknownWidget),
        }
    }

    /// Look up a textbox.
    pub fn textbox(&self, id: TextboxId) -> Result<&Textbox> {
        match self.widget(id)?.kind() {
            WidgetKind::Textbox(textbox) => Ok(textbox),
            _ => Err(Error::UnknownWidget),
        }
    }

    /// Look up a select.
    pub fn select(&self, id: SelectId) -> Result<&Select> {
        match self.widget(id)?.kind() {
            WidgetKind::Select(select) => Ok(select),
            _ => Err(Error::UnknownWidget),
        }
    }

    /// Look up a button.
    pub fn button(&self, id: ButtonId) -> Result<&Button> {
        match self.widget(id)?.kind() {
            WidgetKind::Button(button) => Ok(button),
            _ => Err(Error::UnknownWidget),
        }
    }

    fn select_mut(&mut self, id: SelectId) -> Result<&mut Select> {
        match self.widget_mut(id)?.kind_mut() {
            WidgetKind::Select(select) => Ok(select),
            _ => Err(Error::UnknownWidget),
        }
    }

    // ------------------------------------------------------------------
    // Widget mutation
    // ------------------------------------------------------------------

    /// Show or hide a widget.
    pub fn set_widget_visible(&mut self, id: impl Into<WidgetId>, visible: bool) -> Result<()> {
        self.widget_mut(id)?.set_visible(visible);
        self.redraw();
        Ok(())
    }

    /// Move a widget's top-left corner.
    pub fn move_widget(&mut self, id: impl Into<WidgetId>, y: Coord, x: Coord) -> Result<()> {
        self.widget_mut(id)?.move_to(y, x)?;
        self.redraw();
        Ok(())
    }

    /// Append an option to a select.
    ///
    /// The first option added is selected whatever `selected` says.
    pub fn select_add_option(
        &mut self,
        id: SelectId,
        value: i32,
        text: &str,
        selected: bool,
    ) -> Result<()> {
        let widget = self
            .widgets
            .get_mut(id.base())
            .ok_or(Error::UnknownWidget)?;
        let unfocused = widget.unfocused_attr();
        let WidgetKind::Select(select) = widget.kind_mut() else {
            return Err(Error::UnknownWidget);
        };
        let field = select.add_option(value, text, selected, &self.style)?;
        set_field_back(&field, unfocused);

        trace!(?id, value, text, "select option added");
        self.register(id.base(), field);
        self.reconnect();
        Ok(())
    }

    /// Remove every option of a select.
    pub fn select_drop_options(&mut self, id: SelectId) -> Result<()> {
        let fields = self.select_mut(id)?.drop_options();
        self.widget_mut(id)?.reset_focus_y();

        debug!(?id, count = fields.len(), "select options dropped");
        for field in &fields {
            self.deregister(field);
        }
        self.reconnect();
        Ok(())
    }

    /// Install the callback fired when the user changes a select's option.
    pub fn select_on_change<F>(&mut self, id: SelectId, on_change: F) -> Result<()>
    where
        F: FnMut(i32) + 'static,
    {
        self.select_mut(id)?.set_on_change(Box::new(on_change));
        Ok(())
    }

    /// Install the callback fired when a button is activated.
    pub fn button_on_click<F>(&mut self, id: ButtonId, click: F) -> Result<()>
    where
        F: FnMut() + 'static,
    {
        match self.widget_mut(id)?.kind_mut() {
            WidgetKind::Button(button) => {
                button.set_click(Box::new(click));
                Ok(())
            }
            _ => Err(Error::UnknownWidget),
        }
    }

    /// Destroy a widget and deregister its fields.
    pub fn remove_widget(&mut self, id: impl Into<WidgetId>) -> Result<()> {
        let id = id.into();
        let widget = self.widgets.remove(id).ok_or(Error::UnknownWidget)?;
        for field in widget.fields() {
            self.deregister(&field);
        }
        debug!(?id, kind = widget.kind().name(), "widget removed");
        self.reconnect();
        Ok(())
    }
}

impl Drop for WidgetSet {
    fn drop(&mut self) {
        if let Some(mut form) = self.form.take() {
            let _ = form.unpost();
        }
    }
}

impl fmt::Debug for WidgetSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetSet")
            .field("widgets", &self.widgets.len())
            .field("fields", &self.registry.len())
            .field("posted", &self.form.is_some())
            .finish()
    }
}
