//! Reflow: greedy word wrap with a single-level backtrack.
//!
//! Every pass walks the whole store, rewrites each cell's geometry and builds
//! a fresh [`LineIndex`]. That is O(document length) per edit; no partial
//! reflow is attempted, in exchange for an index that is always consistent
//! with the layout it came from.
//!
//! Wrapping rules:
//!
//! - A hard newline ends its line unconditionally and is never wrapped itself,
//!   even when the line is already past `max_width`.
//! - When a cell would push the line past `max_width`, the walk restarts on a
//!   new line from the cell after the last space seen on the current line.
//!   That space stays at the end of the old line and is flagged as a soft
//!   break.
//! - A space that overflows is parked at the current x without advancing it,
//!   so trailing spaces never cause a break on their own.
//! - With no space to fall back to, the overflowing cell starts the new line
//!   (hard break inside a word).
//! - A line's first cell is always placed, however wide. Spaces at the start
//!   of a line (only possible after a hard newline) are kept and are not wrap
//!   points.

use crate::config::FontSpec;
use crate::metrics::Metrics;
use crate::text::line_index::LineIndex;
use crate::text::store::{CellId, CharacterStore};

/// Horizontal layout constraints for one reflow pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    /// X coordinate where every line starts.
    pub origin_x: f64,
    /// Maximum width of a line, measured from `origin_x`.
    pub max_width: f64,
}

impl LayoutParams {
    #[must_use]
    pub fn new(origin_x: f64, max_width: f64) -> Self {
        Self {
            origin_x,
            max_width,
        }
    }
}

/// Recompute every cell's position and rebuild the line index.
pub fn reflow<M: Metrics + ?Sized>(
    store: &mut CharacterStore,
    params: LayoutParams,
    metrics: &M,
    font: &FontSpec,
) -> LineIndex {
    let mut index = LineIndex::new(store.revision());
    let mut x = params.origin_x;
    let mut line = 0usize;
    let mut line_has_cells = false;
    let mut wrap_point: Option<CellId> = None;
    let mut runner = store.next(CellId::BOUNDARY);

    while !runner.is_boundary() {
        let Some(cell) = store.get(runner) else {
            break;
        };
        let is_newline = cell.content().is_hard_newline();
        let is_space = cell.content().is_space();
        let width = if is_newline {
            0.0
        } else {
            metrics.measure_width(cell.content().as_str(), font)
        };

        if is_space && line_has_cells {
            wrap_point = Some(runner);
        }

        if !is_newline && line_has_cells && (x - params.origin_x) + width > params.max_width {
            if is_space {
                if let Some(cell) = store.get_mut(runner) {
                    cell.place(x, line, width);
                }
                runner = store.next(runner);
                continue;
            }
            if let Some(space) = wrap_point.take() {
                if let Some(cell) = store.get_mut(space) {
                    cell.mark_soft_break();
                }
                runner = store.next(space);
            }
            x = params.origin_x;
            line += 1;
            line_has_cells = false;
            continue;
        }

        if !line_has_cells {
            debug_assert_eq!(index.line_count(), line);
            index.push_line(runner);
            line_has_cells = true;
        }
        if let Some(cell) = store.get_mut(runner) {
            cell.place(x, line, width);
        }
        x += width;

        if is_newline {
            x = params.origin_x;
            line += 1;
            line_has_cells = false;
            wrap_point = None;
        }
        runner = store.next(runner);
    }

    index
}
