//! Unicode utilities for grapheme splitting and display width.

mod grapheme;
mod width;

pub use grapheme::{graphemes, is_hard_newline};
pub use width::{WidthMethod, display_width, display_width_char, display_width_with_method};
