//! Document core: cell storage, word wrap, navigation and undo.
//!
//! Key types:
//!
//! - [`CharacterStore`]: ordered cells plus the cursor
//! - [`reflow`]: greedy word wrap producing a [`LineIndex`]
//! - [`Navigator`]: coordinate and directional cursor moves
//! - [`History`]: bounded undo/redo of single-cell edits
//!
//! # Examples
//!
//! ```
//! use flowtext::config::FontSpec;
//! use flowtext::metrics::MonospaceMetrics;
//! use flowtext::text::{CellContent, CharacterStore, LayoutParams, reflow};
//!
//! let mut store = CharacterStore::new();
//! for ch in "hello world".chars() {
//!     store.insert_after_cursor(CellContent::from_char(ch));
//! }
//!
//! // Ten units per column, five columns per line
//! let metrics = MonospaceMetrics::new(1.0, 1.0);
//! let font = FontSpec::new("Mono", 10);
//! let index = reflow(&mut store, LayoutParams::new(0.0, 50.0), &metrics, &font);
//! assert_eq!(index.line_count(), 2);
//! ```

mod history;
mod line_index;
mod navigator;
mod reflow;
mod store;

pub use history::{
    DEFAULT_HISTORY_CAPACITY, EditEvent, EditKind, History, ReplayMode, StoreChange,
};
pub use line_index::LineIndex;
pub use navigator::{CursorGeometry, Geometry, Navigator, Vertical, cursor_geometry};
pub use reflow::{LayoutParams, reflow};
pub use store::{Cell, CellContent, CellId, Cells, CharacterStore};
