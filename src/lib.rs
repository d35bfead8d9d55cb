//! # nc-widgets
//!
//! A text-mode widget toolkit for boot menus, built on a small in-memory
//! curses-style form layer.
//!
//! A [`WidgetSet`](widgetset::WidgetSet) holds the widgets of one screen:
//! labels, checkboxes, textboxes, selects and buttons. Posting the set
//! draws its fields into a host window; decoded key codes are then fed to
//! [`WidgetSet::process_key`](widgetset::WidgetSet::process_key), which
//! either moves focus between widgets or hands the key to the focused one.
//!
//! ## Features
//!
//! - **wide** (default): measure label and button text in terminal display
//!   columns (`unicode-width`) instead of characters
//!
//! ## Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use nc_widgets::key::{KEY_BTAB, KEY_TAB};
//! use nc_widgets::window::Window;
//! use nc_widgets::WidgetSet;
//!
//! fn main() -> nc_widgets::Result<()> {
//!     let screen = Window::new(24, 80, 0, 0)?.into_shared();
//!     let mut set = WidgetSet::new(screen.clone(), screen);
//!
//!     let verbose = set.add_checkbox(0, 0, false)?;
//!     let ok = set.add_button(1, 0, 6, "OK")?;
//!
//!     let clicked = Rc::new(Cell::new(false));
//!     let flag = clicked.clone();
//!     set.button_on_click(ok, move || flag.set(true))?;
//!
//!     set.post()?;
//!     set.process_key(KEY_TAB);
//!     set.process_key('\n' as i32);
//!     set.process_key(KEY_BTAB);
//!     set.process_key(' ' as i32);
//!
//!     assert!(clicked.get());
//!     assert!(set.checkbox(verbose)?.value());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod attr;
pub mod button;
pub mod checkbox;
pub mod error;
pub mod form;
pub mod key;
pub mod label;
pub mod registry;
pub mod select;
pub mod style;
pub mod textbox;
pub mod types;
pub mod wide;
pub mod widget;
pub mod widgetset;
pub mod window;

pub use error::{Error, Result};
pub use style::{AttrPair, Style};
pub use widget::{ButtonId, CheckboxId, LabelId, SelectId, TextboxId, Widget, WidgetId, WidgetKind};
pub use widgetset::{WidgetSet, WidgetSetBuilder};
