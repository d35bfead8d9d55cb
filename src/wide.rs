//! Display width of widget text.
//!
//! With the `wide` feature, widths are terminal display columns as
//! reported by `unicode-width`, so CJK text in a label or button takes two
//! columns per character. Without it, every character counts as one column.

/// Get the display width of a character.
#[cfg(feature = "wide")]
pub fn char_width(ch: char) -> usize {
    unicode_width::UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// Get the display width of a character.
#[cfg(not(feature = "wide"))]
pub fn char_width(_ch: char) -> usize {
    1
}

/// Get the display width of a string.
#[cfg(feature = "wide")]
pub fn string_width(s: &str) -> usize {
    use unicode_width::UnicodeWidthStr;
    s.width()
}

/// Get the display width of a string.
#[cfg(not(feature = "wide"))]
pub fn string_width(s: &str) -> usize {
    s.chars().count()
}

/// Longest prefix of `s` that fits in `cols` display columns.
pub fn truncate_to_width(s: &str, cols: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in s.char_indices() {
        used += char_width(ch);
        if used > cols {
            return &s[..idx];
        }
    }
    s
}
