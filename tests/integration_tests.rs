//! Integration tests for nc-widgets
//!
//! These tests drive a widget set through `process_key` the way a boot menu
//! screen does, and verify the results by examining widget values, field
//! attributes and the host window contents.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use nc_widgets::attr::{A_NORMAL, A_REVERSE, A_UNDERLINE};
use nc_widgets::key::*;
use nc_widgets::window::{Window, WindowRef};
use nc_widgets::{Error, WidgetId, WidgetSet};

fn screen() -> (WindowRef, WindowRef) {
    let main = Window::new(24, 80, 0, 0).unwrap().into_shared();
    let sub = main.borrow().derwin(20, 76, 2, 2).unwrap().into_shared();
    (main, sub)
}

fn new_set() -> WidgetSet {
    let (main, sub) = screen();
    WidgetSet::new(main, sub)
}

/// Background attribute of a widget's field at `row` within the widget.
fn back_of(set: &WidgetSet, id: impl Into<WidgetId>, row: usize) -> u32 {
    set.widget(id).unwrap().fields()[row].borrow().back()
}

/// Test the complete checkbox and button round trip
#[test]
fn test_checkbox_button_scenario() {
    let mut set = new_set();
    let checkbox = set.add_checkbox(0, 0, false).unwrap();
    let button = set.add_button(1, 0, 6, "OK").unwrap();

    let clicked = Rc::new(Cell::new(false));
    let flag = clicked.clone();
    set.button_on_click(button, move || flag.set(true)).unwrap();

    set.post().unwrap();
    assert_eq!(set.focused_widget(), Some(checkbox.base()));

    // Tab moves to the button
    assert!(set.process_key(Key::Tab));
    assert_eq!(set.focused_widget(), Some(button.base()));

    // Enter clicks it
    assert!(set.process_key('\n' as i32));
    assert!(clicked.get());

    // Shift-tab returns to the checkbox
    assert!(set.process_key(KEY_BTAB));
    assert_eq!(set.focused_widget(), Some(checkbox.base()));

    // Space checks it
    assert!(set.process_key(' ' as i32));
    assert!(set.checkbox(checkbox).unwrap().value());
}

/// Test that two select keys leave a checkbox unchanged
#[test]
fn test_checkbox_toggle_twice() {
    let mut set = new_set();
    let checkbox = set.add_checkbox(0, 0, true).unwrap();
    set.post().unwrap();

    assert!(set.process_key(KEY_ENTER));
    assert!(!set.checkbox(checkbox).unwrap().value());
    assert!(set.process_key('\r' as i32));
    assert!(set.checkbox(checkbox).unwrap().value());

    // Other keys are not handled
    assert!(!set.process_key(Key::Char('q')));
    assert!(set.checkbox(checkbox).unwrap().value());
}

/// Test textbox value trimming
#[test]
fn test_textbox_value_trimmed() {
    let mut set = new_set();
    let textbox = set.add_textbox(0, 0, 30, "   hello world   ").unwrap();
    assert_eq!(set.textbox(textbox).unwrap().value(), "hello world");
}

/// Test textbox editing keys
#[test]
fn test_textbox_editing() {
    let mut set = new_set();
    let textbox = set.add_textbox(0, 0, 20, "root=sda").unwrap();
    set.post().unwrap();

    // Cursor starts at the end of the text
    assert!(set.process_key('1' as i32));
    assert_eq!(set.textbox(textbox).unwrap().value(), "root=sda1");

    assert!(set.process_key(KEY_BACKSPACE));
    assert!(set.process_key(KEY_LEFT));
    assert!(set.process_key(KEY_DC));
    assert_eq!(set.textbox(textbox).unwrap().value(), "root=sd");

    assert!(set.process_key(KEY_HOME));
    assert!(set.process_key(KEY_BACKSPACE));
    assert_eq!(set.textbox(textbox).unwrap().value(), "root=sd");

    assert!(set.process_key(KEY_END));
    assert!(set.process_key('b' as i32));
    assert_eq!(set.textbox(textbox).unwrap().value(), "root=sdb");
}

/// Test that the first select option is selected regardless of its flag
#[test]
fn test_select_first_option_selected() {
    let mut set = new_set();
    let select = set.add_select(0, 0, 20).unwrap();
    assert_eq!(set.select(select).unwrap().value(), -1);

    set.select_add_option(select, 7, "first", false).unwrap();
    set.select_add_option(select, 8, "second", false).unwrap();

    let s = set.select(select).unwrap();
    assert_eq!(s.value(), 7);
    assert_eq!(s.selected_index(), Some(0));
    assert_eq!(s.height(), 2);
    assert_eq!(set.widget(select).unwrap().height(), 2);
}

/// Test that selecting another option fires on_change exactly once
#[test]
fn test_select_change() {
    let mut set = new_set();
    let select = set.add_select(3, 4, 20).unwrap();
    for (value, text) in [(100, "disk"), (200, "network"), (300, "usb")] {
        set.select_add_option(select, value, text, false).unwrap();
    }

    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = changes.clone();
    set.select_on_change(select, move |v| sink.borrow_mut().push(v))
        .unwrap();

    set.post().unwrap();
    let before: Vec<_> = set
        .widget(select)
        .unwrap()
        .fields()
        .iter()
        .map(|f| {
            let f = f.borrow();
            (f.row(), f.col(), f.is_visible())
        })
        .collect();

    // Move to the last option and pick it
    assert!(set.process_key(KEY_DOWN));
    assert!(set.process_key(KEY_DOWN));
    assert_eq!(set.widget(select).unwrap().focus_y(), 2);
    assert!(set.process_key(' ' as i32));

    assert_eq!(*changes.borrow(), [300]);
    assert_eq!(set.select(select).unwrap().value(), 300);

    // Selecting the same option again changes nothing
    assert!(set.process_key(' ' as i32));
    assert_eq!(changes.borrow().len(), 1);

    let after: Vec<_> = set
        .widget(select)
        .unwrap()
        .fields()
        .iter()
        .map(|f| {
            let f = f.borrow();
            (f.row(), f.col(), f.is_visible())
        })
        .collect();
    assert_eq!(before, after);

    let sub = set.sub_window().clone();
    assert_eq!(sub.borrow().mvinstr(3, 4, 10).unwrap(), "( ) disk  ");
    assert_eq!(sub.borrow().mvinstr(5, 4, 7).unwrap(), "(*) usb");
}

/// Test dropping select options
#[test]
fn test_select_drop_options() {
    let mut set = new_set();
    set.add_label(0, 0, "Boot device").unwrap();
    let select = set.add_select(1, 0, 20).unwrap();
    for value in 0..5 {
        set.select_add_option(select, value, &format!("option {value}"), value == 3)
            .unwrap();
    }
    assert_eq!(set.select(select).unwrap().value(), 3);
    assert_eq!(set.field_count(), 6);

    set.select_drop_options(select).unwrap();
    assert_eq!(set.field_count(), 1);
    assert_eq!(set.widget(select).unwrap().height(), 0);
    assert_eq!(set.widget(select).unwrap().focus_y(), 0);
    assert_eq!(set.select(select).unwrap().value(), -1);

    // The select can be refilled
    set.select_add_option(select, 9, "again", false).unwrap();
    assert_eq!(set.select(select).unwrap().value(), 9);
}

/// Test dropping the focused select's options while posted
#[test]
fn test_select_drop_options_while_focused() {
    let mut set = new_set();
    let checkbox = set.add_checkbox(0, 0, false).unwrap();
    let select = set.add_select(1, 0, 20).unwrap();
    set.select_add_option(select, 1, "a", false).unwrap();
    set.select_add_option(select, 2, "b", false).unwrap();
    set.post().unwrap();

    set.process_key(KEY_NPAGE);
    assert_eq!(set.focused_widget(), Some(select.base()));

    set.select_drop_options(select).unwrap();
    assert_eq!(set.focused_widget(), Some(checkbox.base()));
    assert_eq!(back_of(&set, checkbox, 0), A_REVERSE);
}

/// Test a button without a click callback
#[test]
fn test_button_without_click() {
    let mut set = new_set();
    let button = set.add_button(0, 0, 8, "Cancel").unwrap();
    set.post().unwrap();

    assert!(!set.button(button).unwrap().has_click());
    assert!(!set.process_key(' ' as i32));
    assert!(!set.process_key(KEY_ENTER));

    let sub = set.sub_window().clone();
    assert_eq!(sub.borrow().mvinstr(0, 0, 10).unwrap(), "[ Cancel ]");
}

/// Test label input handling
#[test]
fn test_label_never_handles_keys() {
    let mut set = new_set();
    let label = set.add_label(0, 0, "Only a label").unwrap();
    set.post().unwrap();

    // With nothing else to focus, the label holds the cursor
    assert_eq!(set.focused_widget(), Some(label.base()));
    assert!(!set.process_key(' ' as i32));
    assert!(!set.process_key('a' as i32));
    assert_eq!(set.label(label).unwrap().text(), "Only a label");
}

/// Test navigation attributes
#[test]
fn test_navigation_attributes() {
    let mut set = new_set();
    let textbox = set.add_textbox(0, 0, 10, "").unwrap();
    let checkbox = set.add_checkbox(1, 0, false).unwrap();
    let button = set.add_button(2, 0, 4, "Go").unwrap();
    set.post().unwrap();

    assert_eq!(back_of(&set, textbox, 0), A_REVERSE);
    assert_eq!(back_of(&set, checkbox, 0), A_NORMAL);

    for (key, focused) in [
        (KEY_TAB, checkbox.base()),
        (KEY_NPAGE, button.base()),
        (KEY_PPAGE, textbox.base()),
        (KEY_BTAB, button.base()),
        (KEY_UP, checkbox.base()),
        (KEY_DOWN, button.base()),
    ] {
        assert!(set.process_key(key));
        assert_eq!(set.focused_widget(), Some(focused));

        let reversed = [textbox.base(), checkbox.base(), button.base()]
            .into_iter()
            .filter(|&id| back_of(&set, id, 0) == A_REVERSE)
            .collect::<Vec<_>>();
        assert_eq!(reversed, [focused]);
    }

    assert_eq!(back_of(&set, textbox, 0), A_UNDERLINE);
}

/// Test that reposting restores focus
#[test]
fn test_unpost_repost_restores_focus() {
    let mut set = new_set();
    set.add_checkbox(0, 0, false).unwrap();
    let second = set.add_checkbox(1, 0, false).unwrap();
    set.post().unwrap();
    set.process_key(KEY_TAB);

    set.unpost().unwrap();
    assert!(!set.is_posted());
    assert!(!set.process_key(' ' as i32));

    let focused = Rc::new(RefCell::new(Vec::new()));
    let sink = focused.clone();
    set.set_widget_focus(move |id, _| sink.borrow_mut().push(id));

    set.post().unwrap();
    assert_eq!(set.focused_widget(), Some(second.base()));
    assert_eq!(*focused.borrow(), [second.base()]);
}

/// Test rebinding the host windows
#[test]
fn test_set_windows() {
    let mut set = new_set();
    set.add_label(0, 0, "moved").unwrap();

    let (main, sub) = screen();
    set.set_windows(main, sub.clone());
    set.post().unwrap();
    assert_eq!(sub.borrow().mvinstr(0, 0, 5).unwrap(), "moved");
}

/// Test hiding and moving widgets
#[test]
fn test_visibility_and_move() {
    let mut set = new_set();
    let a = set.add_checkbox(0, 0, false).unwrap();
    let b = set.add_checkbox(1, 0, false).unwrap();
    let c = set.add_checkbox(2, 0, false).unwrap();
    set.post().unwrap();

    set.set_widget_visible(b, false).unwrap();
    assert!(set.process_key(KEY_TAB));
    assert_eq!(set.focused_widget(), Some(c.base()));

    set.set_widget_visible(b, true).unwrap();
    set.move_widget(a, 5, 10).unwrap();
    let widget = set.widget(a).unwrap();
    assert_eq!(widget.position(), (5, 10));
    assert_eq!((widget.height(), widget.width()), (1, 3));

    let sub = set.sub_window().clone();
    assert_eq!(sub.borrow().mvinstr(5, 10, 3).unwrap(), "[ ]");
}

/// Test stale handles
#[test]
fn test_stale_handles() {
    let mut set = new_set();
    let checkbox = set.add_checkbox(0, 0, false).unwrap();
    let select = set.add_select(1, 0, 10).unwrap();
    set.select_add_option(select, 1, "x", false).unwrap();

    set.remove_widget(checkbox).unwrap();
    set.remove_widget(select).unwrap();
    assert_eq!(set.field_count(), 0);
    assert_eq!(set.widget_count(), 0);

    assert_eq!(set.checkbox(checkbox).unwrap_err(), Error::UnknownWidget);
    assert_eq!(
        set.select_add_option(select, 2, "y", false),
        Err(Error::UnknownWidget)
    );
    assert_eq!(set.post(), Err(Error::NotConnected));
}

/// Test registry growth past the initial capacity
#[test]
fn test_many_widgets() {
    let mut set = new_set();
    let ids: Vec<_> = (0..20).map(|row| set.add_checkbox(row, 0, false).unwrap()).collect();
    assert_eq!(set.field_count(), 20);
    set.post().unwrap();

    for id in &ids[1..] {
        assert!(set.process_key(KEY_DOWN));
        assert_eq!(set.focused_widget(), Some(id.base()));
    }
    assert!(set.process_key(KEY_DOWN));
    assert_eq!(set.focused_widget(), Some(ids[0].base()));
}
