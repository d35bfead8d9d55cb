//! Key code definitions for nc-widgets.
//!
//! Widgets receive already-decoded key codes: plain characters are passed
//! as their code point, special keys use the X/Open XSI Curses `KEY_*`
//! values below.

/// Tab character.
pub const KEY_TAB: i32 = 0o11;

/// Newline character.
pub const KEY_NEWLINE: i32 = 0o12;

/// Carriage return character.
pub const KEY_RETURN: i32 = 0o15;

/// Escape character.
pub const KEY_ESCAPE: i32 = 0o33;

/// Space character.
pub const KEY_SPACE: i32 = 0o40;

/// Lowest special key code.
pub const KEY_MIN: i32 = 0o401;

/// Highest special key code.
pub const KEY_MAX: i32 = 0o777;

/// Down arrow key.
pub const KEY_DOWN: i32 = 0o402;

/// Up arrow key.
pub const KEY_UP: i32 = 0o403;

/// Left arrow key.
pub const KEY_LEFT: i32 = 0o404;

/// Right arrow key.
pub const KEY_RIGHT: i32 = 0o405;

/// Home key.
pub const KEY_HOME: i32 = 0o406;

/// Backspace key.
pub const KEY_BACKSPACE: i32 = 0o407;

/// Function key F0.
pub const KEY_F0: i32 = 0o410;

/// Function key F(n).
#[inline]
pub const fn key_f(n: i32) -> i32 {
    KEY_F0 + n
}

/// Delete character key.
pub const KEY_DC: i32 = 0o512;

/// Next page key (Page Down).
pub const KEY_NPAGE: i32 = 0o522;

/// Previous page key (Page Up).
pub const KEY_PPAGE: i32 = 0o523;

/// Enter/send key.
pub const KEY_ENTER: i32 = 0o527;

/// Back tab key.
pub const KEY_BTAB: i32 = 0o541;

/// End key.
pub const KEY_END: i32 = 0o550;

/// Check whether a key activates the focused widget.
///
/// Space, carriage return, newline and `KEY_ENTER` all count: terminals
/// disagree on what the Enter key sends.
#[inline]
pub fn is_select_key(code: i32) -> bool {
    matches!(code, KEY_SPACE | KEY_RETURN | KEY_NEWLINE | KEY_ENTER)
}

/// Key enumeration for type-safe key handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A regular character.
    Char(char),
    /// Down arrow.
    Down,
    /// Up arrow.
    Up,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Backspace.
    Backspace,
    /// Delete character.
    Delete,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Enter/Return.
    Enter,
    /// Tab.
    Tab,
    /// Back-tab (Shift+Tab).
    BackTab,
    /// Escape.
    Escape,
    /// Function key (0-64).
    F(u8),
    /// Unknown key code.
    Unknown(i32),
}

impl Key {
    /// Convert from a raw key code.
    pub fn from_code(code: i32) -> Self {
        match code {
            KEY_TAB => Key::Tab,
            KEY_NEWLINE | KEY_RETURN | KEY_ENTER => Key::Enter,
            KEY_ESCAPE => Key::Escape,
            0x20..=0x7e => Key::Char(code as u8 as char),
            0x7f | KEY_BACKSPACE => Key::Backspace,
            0x80..=0xff => Key::Char(code as u8 as char),

            KEY_DOWN => Key::Down,
            KEY_UP => Key::Up,
            KEY_LEFT => Key::Left,
            KEY_RIGHT => Key::Right,
            KEY_HOME => Key::Home,
            KEY_END => Key::End,
            KEY_DC => Key::Delete,
            KEY_PPAGE => Key::PageUp,
            KEY_NPAGE => Key::PageDown,
            KEY_BTAB => Key::BackTab,

            k if (KEY_F0..=KEY_F0 + 64).contains(&k) => Key::F((k - KEY_F0) as u8),

            _ => Key::Unknown(code),
        }
    }

    /// Convert to a raw key code.
    ///
    /// `Key::Enter` maps to `KEY_ENTER`; the carriage return and newline
    /// characters both decode to it.
    pub fn to_code(self) -> i32 {
        match self {
            Key::Char(c) => c as i32,
            Key::Down => KEY_DOWN,
            Key::Up => KEY_UP,
            Key::Left => KEY_LEFT,
            Key::Right => KEY_RIGHT,
            Key::Home => KEY_HOME,
            Key::End => KEY_END,
            Key::Backspace => KEY_BACKSPACE,
            Key::Delete => KEY_DC,
            Key::PageUp => KEY_PPAGE,
            Key::PageDown => KEY_NPAGE,
            Key::Enter => KEY_ENTER,
            Key::Tab => KEY_TAB,
            Key::BackTab => KEY_BTAB,
            Key::Escape => KEY_ESCAPE,
            Key::F(n) => KEY_F0 + n as i32,
            Key::Unknown(code) => code,
        }
    }
}

impl From<i32> for Key {
    fn from(code: i32) -> Self {
        Key::from_code(code)
    }
}

impl From<Key> for i32 {
    fn from(key: Key) -> Self {
        key.to_code()
    }
}

/// Get the curses name of a key code, for log output.
pub fn keyname(code: i32) -> &'static str {
    match code {
        KEY_TAB => "^I",
        KEY_NEWLINE => "^J",
        KEY_RETURN => "^M",
        KEY_ESCAPE => "^[",
        KEY_SPACE => "SPACE",
        0x7f => "^?",
        KEY_DOWN => "KEY_DOWN",
        KEY_UP => "KEY_UP",
        KEY_LEFT => "KEY_LEFT",
        KEY_RIGHT => "KEY_RIGHT",
        KEY_HOME => "KEY_HOME",
        KEY_BACKSPACE => "KEY_BACKSPACE",
        KEY_DC => "KEY_DC",
        KEY_NPAGE => "KEY_NPAGE",
        KEY_PPAGE => "KEY_PPAGE",
        KEY_ENTER => "KEY_ENTER",
        KEY_END => "KEY_END",
        KEY_BTAB => "KEY_BTAB",
        0x21..=0x7e => "CHAR",
        _ => "UNKNOWN",
    }
}
