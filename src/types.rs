//! Core type definitions for nc-widgets.

/// Video attribute type.
///
/// Attributes use the curses bit layout: bits 0-7 are reserved for the
/// character in a packed `chtype`, attributes start at bit 8.
pub type AttrT = u32;

/// Screen coordinate type.
///
/// Used for window sizes, cursor positions and field positions.
pub type Coord = i32;
