//! `flowtext` - word-wrapping text buffer core for interactive editors
//!
//! Stores a document as an ordered arena of cells, reflows it into lines
//! under a width limit, maps between pixel coordinates and cursor positions,
//! and keeps a bounded undo/redo log. Windowing, input dispatch, rendering
//! and glyph measurement stay with the host, behind the [`Metrics`],
//! [`PresentationSink`] and [`Persistence`] traits.

// Crate-level lint configuration
#![forbid(unsafe_code)]
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_precision_loss)] // Line counts as f64 coordinates
#![allow(clippy::module_name_repetitions)] // Allow text::TextBuffer style names
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::float_cmp)] // Exact compares on values we assigned ourselves
#![allow(clippy::suboptimal_flops)] // Standard math notation is clearer than mul_add
#![allow(clippy::items_after_statements)] // Common pattern in tests

pub mod config;
pub mod error;
pub mod event;
pub mod metrics;
pub mod persist;
pub mod session;
pub mod text;
pub mod unicode;

// Re-export core types at crate root
pub use config::{EditorConfig, FontSpec};
pub use error::{Error, Result};
pub use event::{LogLevel, clear_log_callback, emit_log, set_log_callback};
pub use metrics::{Metrics, MonospaceMetrics};
pub use persist::{FileStore, LoadOutcome, MemoryStore, Persistence, SaveOutcome};
pub use session::{
    Changes, Command, CommandOutcome, Direction, EditorSession, NullSink, PresentationSink,
};
pub use text::{
    CellContent, CellId, CharacterStore, CursorGeometry, History, LineIndex, ReplayMode,
};
