//! Video attributes for nc-widgets.
//!
//! Widgets switch field background attributes when they gain and lose
//! focus. The values match the X/Open XSI Curses attribute bits.

use crate::types::AttrT;

/// Attribute shift - characters occupy bits 0-7.
pub const NCURSES_ATTR_SHIFT: u32 = 8;

/// Helper function for attribute bit positioning.
#[inline]
pub const fn ncurses_bits(mask: u32, shift: u32) -> AttrT {
    mask << (shift + NCURSES_ATTR_SHIFT)
}

/// Normal display (no attributes).
pub const A_NORMAL: AttrT = 0;

/// Mask for extracting the character portion of a chtype.
pub const A_CHARTEXT: AttrT = (1 << NCURSES_ATTR_SHIFT) - 1;

/// Mask for extracting all attributes (everything except the character).
pub const A_ATTRIBUTES: AttrT = !A_CHARTEXT;

/// Standout mode (typically reverse video).
pub const A_STANDOUT: AttrT = ncurses_bits(1, 8);

/// Underline mode.
pub const A_UNDERLINE: AttrT = ncurses_bits(1, 9);

/// Reverse video mode.
pub const A_REVERSE: AttrT = ncurses_bits(1, 10);

/// Blinking text.
pub const A_BLINK: AttrT = ncurses_bits(1, 11);

/// Half-bright or dim text.
pub const A_DIM: AttrT = ncurses_bits(1, 12);

/// Bold or extra-bright text.
pub const A_BOLD: AttrT = ncurses_bits(1, 13);

/// Invisible text.
pub const A_INVIS: AttrT = ncurses_bits(1, 15);

/// Names for each attribute bit, in display order.
const ATTR_NAMES: [(AttrT, &str); 7] = [
    (A_STANDOUT, "A_STANDOUT"),
    (A_UNDERLINE, "A_UNDERLINE"),
    (A_REVERSE, "A_REVERSE"),
    (A_BLINK, "A_BLINK"),
    (A_DIM, "A_DIM"),
    (A_BOLD, "A_BOLD"),
    (A_INVIS, "A_INVIS"),
];

/// Return a readable representation of video attributes.
///
/// Used in log output, e.g. `"A_REVERSE|A_BOLD"`. Attributes with no bits
/// set render as `"A_NORMAL"`.
pub fn attr_name(attr: AttrT) -> String {
    let parts: Vec<&str> = ATTR_NAMES
        .iter()
        .filter(|(bit, _)| attr & bit != 0)
        .map(|(_, name)| *name)
        .collect();

    if parts.is_empty() {
        "A_NORMAL".to_string()
    } else {
        parts.join("|")
    }
}
