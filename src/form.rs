//! Form library for nc-widgets.
//!
//! This module provides the field and form primitives the widget toolkit
//! is built on: fields hold a text buffer, display attributes and option
//! flags; a form is an ordered collection of fields that can be posted to
//! a pair of windows and driven with navigation and editing requests.
//!
//! Fields are shared through [`FieldRef`] handles. The same field can be
//! held by a widget, a widget set's registry and a posted form at once,
//! and is identified by its [`FieldId`] rather than by address.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

use crate::attr::A_NORMAL;
use crate::error::{Error, Result};
use crate::key::{KEY_MAX, KEY_MIN};
use crate::types::{AttrT, Coord};
use crate::window::{Cell, Window, WindowRef};

// ============================================================================
// Field option flags
// ============================================================================

bitflags::bitflags! {
    /// Field option flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FieldOpts: u32 {
        /// Field is visible.
        const O_VISIBLE = 0x0001;
        /// Field is active (can be visited).
        const O_ACTIVE = 0x0002;
        /// Field contents are displayed as entered.
        const O_PUBLIC = 0x0004;
        /// Field can be edited.
        const O_EDIT = 0x0008;
        /// Field wraps at end of line.
        const O_WRAP = 0x0010;
        /// Field is cleared when typing at its first position.
        const O_BLANK = 0x0020;
        /// Skip to next field when the current one fills.
        const O_AUTOSKIP = 0x0040;
        /// Field may be left blank.
        const O_NULLOK = 0x0080;
        /// Field is limited to its displayed size.
        const O_STATIC = 0x0100;
    }
}

// ============================================================================
// Form request codes
// ============================================================================

/// Form request: move to next field.
pub const REQ_NEXT_FIELD: i32 = 0x304;
/// Form request: move to previous field.
pub const REQ_PREV_FIELD: i32 = 0x305;
/// Form request: move to first field.
pub const REQ_FIRST_FIELD: i32 = 0x306;
/// Form request: move to last field.
pub const REQ_LAST_FIELD: i32 = 0x307;
/// Form request: move to beginning of field.
pub const REQ_BEG_FIELD: i32 = 0x316;
/// Form request: move to end of field.
pub const REQ_END_FIELD: i32 = 0x317;
/// Form request: move left in field.
pub const REQ_LEFT_CHAR: i32 = 0x31a;
/// Form request: move right in field.
pub const REQ_RIGHT_CHAR: i32 = 0x31b;
/// Form request: delete a character.
pub const REQ_DEL_CHAR: i32 = 0x321;
/// Form request: delete previous character.
pub const REQ_DEL_PREV: i32 = 0x322;
/// Form request: clear field.
pub const REQ_CLR_FIELD: i32 = 0x327;

/// Lowest code reserved for form requests.
pub const MIN_FORM_COMMAND: i32 = 0x300;
/// Highest code reserved for form requests.
pub const MAX_FORM_COMMAND: i32 = 0x33f;

/// The character a request inserts, if any.
///
/// Control characters, special key codes and reserved request codes insert
/// nothing.
fn insertable_char(req: i32) -> Option<char> {
    if (KEY_MIN..=KEY_MAX).contains(&req)
        || (MIN_FORM_COMMAND..=MAX_FORM_COMMAND).contains(&req)
    {
        return None;
    }
    u32::try_from(req)
        .ok()
        .and_then(char::from_u32)
        .filter(|ch| !ch.is_control())
}

// ============================================================================
// Field
// ============================================================================

/// Process-unique identity of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(u64);

static NEXT_FIELD_ID: AtomicU64 = AtomicU64::new(1);

impl FieldId {
    fn next() -> Self {
        Self(NEXT_FIELD_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw identifier value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Shared handle to a field.
pub type FieldRef = Rc<RefCell<Field>>;

/// A form field.
pub struct Field {
    /// Field identity.
    id: FieldId,
    /// Field position (row).
    row: Coord,
    /// Field position (column).
    col: Coord,
    /// Field height.
    height: Coord,
    /// Field width.
    width: Coord,
    /// Field options.
    opts: FieldOpts,
    /// Field buffer (content).
    buffer: Vec<char>,
    /// Foreground attribute.
    fore: AttrT,
    /// Background attribute.
    back: AttrT,
    /// Pad character.
    pad: char,
    /// Cursor position within the buffer.
    cursor: usize,
}

impl Field {
    /// Create a new field.
    ///
    /// Fails when the size is not positive or the position is negative.
    pub fn new(height: Coord, width: Coord, row: Coord, col: Coord) -> Result<Self> {
        if height <= 0 || width <= 0 {
            return Err(Error::InvalidArgument(
                "field dimensions must be positive".into(),
            ));
        }
        if row < 0 || col < 0 {
            return Err(Error::InvalidArgument(
                "field position must be non-negative".into(),
            ));
        }

        Ok(Self {
            id: FieldId::next(),
            row,
            col,
            height,
            width,
            opts: FieldOpts::O_VISIBLE
                | FieldOpts::O_ACTIVE
                | FieldOpts::O_PUBLIC
                | FieldOpts::O_EDIT
                | FieldOpts::O_WRAP
                | FieldOpts::O_BLANK
                | FieldOpts::O_AUTOSKIP
                | FieldOpts::O_NULLOK
                | FieldOpts::O_STATIC,
            buffer: Vec::new(),
            fore: A_NORMAL,
            back: A_NORMAL,
            pad: ' ',
            cursor: 0,
        })
    }

    /// Get the field identity.
    pub fn id(&self) -> FieldId {
        self.id
    }

    /// Get the field buffer content.
    pub fn buffer(&self) -> String {
        self.buffer.iter().collect()
    }

    /// Set the field buffer content.
    ///
    /// Static fields keep at most `height * width` characters. The cursor
    /// returns to the start of the field.
    pub fn set_buffer(&mut self, value: &str) {
        let limit = if self.opts.contains(FieldOpts::O_STATIC) {
            self.capacity()
        } else {
            usize::MAX
        };
        self.buffer = value.chars().take(limit).collect();
        self.cursor = 0;
    }

    /// Number of character cells the field displays.
    pub fn capacity(&self) -> usize {
        (self.height * self.width) as usize
    }

    /// Get field dimensions as (height, width, row, col).
    pub fn dimensions(&self) -> (Coord, Coord, Coord, Coord) {
        (self.height, self.width, self.row, self.col)
    }

    /// Get field row position.
    pub fn row(&self) -> Coord {
        self.row
    }

    /// Get field column position.
    pub fn col(&self) -> Coord {
        self.col
    }

    /// Get field height.
    pub fn height(&self) -> Coord {
        self.height
    }

    /// Get field width.
    pub fn width(&self) -> Coord {
        self.width
    }

    /// Move the field to a new position.
    pub fn move_to(&mut self, row: Coord, col: Coord) -> Result<()> {
        if row < 0 || col < 0 {
            return Err(Error::InvalidArgument(
                "field position must be non-negative".into(),
            ));
        }
        self.row = row;
        self.col = col;
        Ok(())
    }

    /// Set field options.
    pub fn set_opts(&mut self, opts: FieldOpts) {
        self.opts = opts;
    }

    /// Get field options.
    pub fn opts(&self) -> FieldOpts {
        self.opts
    }

    /// Turn on field options.
    pub fn opts_on(&mut self, opts: FieldOpts) {
        self.opts |= opts;
    }

    /// Turn off field options.
    pub fn opts_off(&mut self, opts: FieldOpts) {
        self.opts &= !opts;
    }

    /// Check if the field is visible.
    pub fn is_visible(&self) -> bool {
        self.opts.contains(FieldOpts::O_VISIBLE)
    }

    /// Check if the field can receive focus (visible and active).
    pub fn is_selectable(&self) -> bool {
        self.opts
            .contains(FieldOpts::O_VISIBLE | FieldOpts::O_ACTIVE)
    }

    /// Set foreground attribute.
    pub fn set_fore(&mut self, attr: AttrT) {
        self.fore = attr;
    }

    /// Get foreground attribute.
    pub fn fore(&self) -> AttrT {
        self.fore
    }

    /// Set background attribute.
    pub fn set_back(&mut self, attr: AttrT) {
        self.back = attr;
    }

    /// Get background attribute.
    pub fn back(&self) -> AttrT {
        self.back
    }

    /// Set pad character.
    pub fn set_pad(&mut self, pad: char) {
        self.pad = pad;
    }

    /// Get pad character.
    pub fn pad(&self) -> char {
        self.pad
    }

    /// Get the cursor position within the buffer.
    pub fn cursor_col(&self) -> usize {
        self.cursor
    }

    fn check_editable(&self) -> Result<()> {
        if self.opts.contains(FieldOpts::O_EDIT) {
            Ok(())
        } else {
            Err(Error::RequestDenied)
        }
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, ch: char) -> Result<()> {
        self.check_editable()?;

        if self.opts.contains(FieldOpts::O_BLANK) && self.cursor == 0 {
            self.buffer.clear();
        }
        if self.opts.contains(FieldOpts::O_STATIC) && self.buffer.len() >= self.capacity() {
            return Err(Error::RequestDenied);
        }

        self.buffer.insert(self.cursor, ch);
        self.cursor += 1;
        Ok(())
    }

    /// Delete the character at the cursor.
    ///
    /// At the end of the buffer this is a no-op.
    pub fn delete_char(&mut self) -> Result<()> {
        self.check_editable()?;
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
        Ok(())
    }

    /// Delete the character before the cursor.
    pub fn delete_prev(&mut self) -> Result<()> {
        self.check_editable()?;
        if self.cursor == 0 {
            return Err(Error::RequestDenied);
        }
        self.cursor -= 1;
        self.buffer.remove(self.cursor);
        Ok(())
    }

    /// Move cursor left. Denied at the start of the field.
    pub fn cursor_left(&mut self) -> Result<()> {
        if self.cursor == 0 {
            return Err(Error::RequestDenied);
        }
        self.cursor -= 1;
        Ok(())
    }

    /// Move cursor right. Denied at the end of the buffer.
    pub fn cursor_right(&mut self) -> Result<()> {
        if self.cursor >= self.buffer.len() {
            return Err(Error::RequestDenied);
        }
        self.cursor += 1;
        Ok(())
    }

    /// Move cursor to beginning of field.
    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor past the last non-blank character.
    pub fn cursor_end(&mut self) {
        self.cursor = self
            .buffer
            .iter()
            .rposition(|c| !c.is_whitespace())
            .map_or(0, |pos| pos + 1);
    }

    /// Clear the field.
    pub fn clear(&mut self) -> Result<()> {
        self.check_editable()?;
        self.buffer.clear();
        self.cursor = 0;
        Ok(())
    }

    /// Render the field into a window, clipping cells outside of it.
    pub fn render(&self, win: &mut Window, is_current: bool) {
        if !self.is_visible() {
            return;
        }

        let capacity = self.capacity();
        let offset = if self.opts.contains(FieldOpts::O_STATIC) {
            0
        } else {
            self.cursor.saturating_sub(capacity.saturating_sub(1))
        };
        let attr = self.fore | self.back;
        let is_public = self.opts.contains(FieldOpts::O_PUBLIC);

        for i in 0..capacity {
            let y = self.row + (i as Coord) / self.width;
            let x = self.col + (i as Coord) % self.width;
            let ch = match self.buffer.get(offset + i) {
                Some(&ch) if !is_public && ch != self.pad => '*',
                Some(&ch) => ch,
                None => self.pad,
            };
            win.put_cell(y, x, Cell { ch, attr });
        }

        if is_current {
            let pos = self.cursor.saturating_sub(offset).min(capacity - 1) as Coord;
            // Cursor placement is best effort for clipped fields.
            let _ = win.mv(self.row + pos / self.width, self.col + pos % self.width);
        }
    }
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("id", &self.id)
            .field("row", &self.row)
            .field("col", &self.col)
            .field("height", &self.height)
            .field("width", &self.width)
            .field("buffer", &self.buffer())
            .finish()
    }
}

// ============================================================================
// Form
// ============================================================================

/// A form containing fields.
pub struct Form {
    /// The form fields, in navigation order.
    fields: Vec<FieldRef>,
    /// Current field index; `None` only when the form has no fields.
    current: Option<usize>,
    /// The form window.
    window: Option<WindowRef>,
    /// The form sub-window, where fields are drawn.
    sub_window: Option<WindowRef>,
    /// Whether the form is posted.
    posted: bool,
}

impl Form {
    /// Create a new form over a sequence of shared fields.
    ///
    /// The first selectable field becomes current.
    pub fn new(fields: &[FieldRef]) -> Self {
        let mut form = Self {
            fields: fields.to_vec(),
            current: None,
            window: None,
            sub_window: None,
            posted: false,
        };
        form.current = form.first_selectable();
        form
    }

    /// Get the number of fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Get all form fields.
    pub fn fields(&self) -> &[FieldRef] {
        &self.fields
    }

    /// Get a field by index.
    pub fn field(&self, index: usize) -> Option<FieldRef> {
        self.fields.get(index).cloned()
    }

    /// Find the index of a field in this form.
    pub fn field_index(&self, field: &FieldRef) -> Option<usize> {
        self.fields.iter().position(|f| Rc::ptr_eq(f, field))
    }

    /// Replace the form fields.
    ///
    /// Unlike curses this is allowed while posted: the current field is
    /// kept when it is still connected, otherwise the first selectable
    /// field becomes current.
    pub fn replace_fields(&mut self, fields: &[FieldRef]) {
        let current = self.current_field();
        self.fields = fields.to_vec();
        self.current = current
            .and_then(|field| self.field_index(&field))
            .or_else(|| self.first_selectable());
    }

    /// Get the current field.
    pub fn current_field(&self) -> Option<FieldRef> {
        self.current.and_then(|idx| self.field(idx))
    }

    /// Get the current field index.
    pub fn current_field_index(&self) -> Option<usize> {
        self.current
    }

    /// Make a connected field current.
    pub fn set_current_field(&mut self, field: &FieldRef) -> Result<()> {
        let idx = self
            .field_index(field)
            .ok_or_else(|| Error::InvalidArgument("field is not connected to the form".into()))?;
        self.current = Some(idx);
        Ok(())
    }

    /// Set the form window.
    pub fn set_window(&mut self, window: WindowRef) {
        self.window = Some(window);
    }

    /// Get the form window.
    pub fn window(&self) -> Option<&WindowRef> {
        self.window.as_ref()
    }

    /// Set the form sub-window.
    pub fn set_sub(&mut self, window: WindowRef) {
        self.sub_window = Some(window);
    }

    /// Get the form sub-window.
    pub fn sub_window(&self) -> Option<&WindowRef> {
        self.sub_window.as_ref()
    }

    /// Post the form and draw it.
    pub fn post(&mut self) -> Result<()> {
        if self.posted {
            return Err(Error::Posted);
        }
        if self.fields.is_empty() {
            return Err(Error::NotConnected);
        }
        if self.current.is_none() {
            self.current = self.first_selectable();
        }
        self.posted = true;
        self.render();
        Ok(())
    }

    /// Unpost the form and erase its window.
    pub fn unpost(&mut self) -> Result<()> {
        if !self.posted {
            return Err(Error::NotPosted);
        }
        if let Some(win) = self.draw_window() {
            win.borrow_mut().erase();
        }
        self.posted = false;
        Ok(())
    }

    /// Check if the form is posted.
    pub fn is_posted(&self) -> bool {
        self.posted
    }

    /// First selectable field, or the first field when none is selectable.
    fn first_selectable(&self) -> Option<usize> {
        if self.fields.is_empty() {
            return None;
        }
        self.fields
            .iter()
            .position(|f| f.borrow().is_selectable())
            .or(Some(0))
    }

    fn last_selectable(&self) -> Option<usize> {
        self.fields.iter().rposition(|f| f.borrow().is_selectable())
    }

    /// Step to the next selectable field in either direction, wrapping.
    fn step(&self, from: usize, forward: bool) -> usize {
        let n = self.fields.len();
        (1..=n)
            .map(|offset| {
                if forward {
                    (from + offset) % n
                } else {
                    (from + n - offset) % n
                }
            })
            .find(|&idx| self.fields[idx].borrow().is_selectable())
            .unwrap_or(from)
    }

    /// Process a form request.
    ///
    /// Printable characters are inserted into the current field. Codes in
    /// the special key and request ranges are not characters.
    pub fn driver(&mut self, req: i32) -> Result<()> {
        if !self.posted {
            return Err(Error::NotPosted);
        }
        let current = self.current.ok_or(Error::NotConnected)?;
        let result = self.dispatch(current, req);
        if let Err(ref err) = result {
            trace!(req, %err, "form request not applied");
        }
        result
    }

    fn dispatch(&mut self, current: usize, req: i32) -> Result<()> {
        let field = &self.fields[current];
        match req {
            REQ_NEXT_FIELD => self.current = Some(self.step(current, true)),
            REQ_PREV_FIELD => self.current = Some(self.step(current, false)),
            REQ_FIRST_FIELD => {
                if let Some(idx) = self.fields.iter().position(|f| f.borrow().is_selectable()) {
                    self.current = Some(idx);
                }
            }
            REQ_LAST_FIELD => {
                if let Some(idx) = self.last_selectable() {
                    self.current = Some(idx);
                }
            }
            REQ_BEG_FIELD => field.borrow_mut().cursor_home(),
            REQ_END_FIELD => field.borrow_mut().cursor_end(),
            REQ_LEFT_CHAR => return field.borrow_mut().cursor_left(),
            REQ_RIGHT_CHAR => return field.borrow_mut().cursor_right(),
            REQ_DEL_CHAR => return field.borrow_mut().delete_char(),
            REQ_DEL_PREV => return field.borrow_mut().delete_prev(),
            REQ_CLR_FIELD => return field.borrow_mut().clear(),
            _ => match insertable_char(req) {
                Some(ch) => return field.borrow_mut().insert_char(ch),
                None => return Err(Error::UnknownRequest(req)),
            },
        }
        Ok(())
    }

    fn draw_window(&self) -> Option<&WindowRef> {
        self.sub_window.as_ref().or(self.window.as_ref())
    }

    /// Redraw the sub-window (or the window when no sub-window is set)
    /// with every visible field. Does nothing while unposted.
    pub fn render(&self) {
        if !self.posted {
            return;
        }
        let Some(win) = self.draw_window() else {
            return;
        };
        let mut win = win.borrow_mut();
        win.erase();
        for (idx, field) in self.fields.iter().enumerate() {
            if Some(idx) != self.current {
                field.borrow().render(&mut win, false);
            }
        }
        // The current field goes last so the cursor ends up inside it.
        if let Some(field) = self.current_field() {
            field.borrow().render(&mut win, true);
        }
    }

    /// Get the contents of all fields.
    pub fn data(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.borrow().buffer()).collect()
    }
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("field_count", &self.fields.len())
            .field("current", &self.current)
            .field("posted", &self.posted)
            .finish()
    }
}

// ============================================================================
// Free functions for curses compatibility
// ============================================================================

/// Create a new shared field.
///
/// This is the curses `new_field()` function.
pub fn new_field(height: Coord, width: Coord, row: Coord, col: Coord) -> Result<FieldRef> {
    Ok(Rc::new(RefCell::new(Field::new(height, width, row, col)?)))
}

/// Set field buffer content.
///
/// This is the curses `set_field_buffer()` function.
pub fn set_field_buffer(field: &FieldRef, value: &str) {
    field.borrow_mut().set_buffer(value);
}

/// Set the background attribute.
///
/// This is the curses `set_field_back()` function.
pub fn set_field_back(field: &FieldRef, attr: AttrT) {
    field.borrow_mut().set_back(attr);
}

/// Turn on field options.
///
/// This is the curses `field_opts_on()` function.
pub fn field_opts_on(field: &FieldRef, opts: FieldOpts) {
    field.borrow_mut().opts_on(opts);
}

/// Turn off field options.
///
/// This is the curses `field_opts_off()` function.
pub fn field_opts_off(field: &FieldRef, opts: FieldOpts) {
    field.borrow_mut().opts_off(opts);
}

/// Show or hide a field.
pub fn set_field_visible(field: &FieldRef, visible: bool) {
    if visible {
        field_opts_on(field, FieldOpts::O_VISIBLE);
    } else {
        field_opts_off(field, FieldOpts::O_VISIBLE);
    }
}

/// Move a field to a new position.
///
/// This is the curses `move_field()` function.
pub fn move_field(field: &FieldRef, row: Coord, col: Coord) -> Result<()> {
    field.borrow_mut().move_to(row, col)
}
