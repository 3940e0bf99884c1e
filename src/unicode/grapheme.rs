//! Grapheme cluster iteration.

use unicode_segmentation::UnicodeSegmentation;

/// Iterate over extended grapheme clusters in a string.
pub fn graphemes(s: &str) -> impl Iterator<Item = &str> {
    s.graphemes(true)
}

/// Whether a grapheme is a line terminator typed or stored by the user.
#[must_use]
pub fn is_hard_newline(grapheme: &str) -> bool {
    matches!(grapheme, "\n" | "\r\n" | "\r")
}
