//! Cursor navigation over a laid-out store.
//!
//! Maps pixel coordinates to cells through the [`LineIndex`], and cells back
//! to the point where the cursor is drawn. All lookups go through the index's
//! freshness check, so navigating between an edit and the reflow that should
//! follow it fails loudly instead of landing on an old layout.

use crate::error::Result;
use crate::text::line_index::LineIndex;
use crate::text::store::{CellId, CharacterStore};

/// Layout constants for coordinate conversion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    pub origin_x: f64,
    pub origin_y: f64,
    pub line_height: f64,
    /// Right edge lines wrap at; the cursor is never drawn past it after a
    /// space. Unbounded by default.
    pub wrap_limit: f64,
}

impl Geometry {
    #[must_use]
    pub fn new(origin_x: f64, origin_y: f64, line_height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            line_height,
            wrap_limit: f64::INFINITY,
        }
    }

    /// Set the right edge used to clamp the cursor after overflowing spaces.
    #[must_use]
    pub fn with_wrap_limit(mut self, wrap_limit: f64) -> Self {
        self.wrap_limit = wrap_limit;
        self
    }

    /// Line containing `y`, or `None` above line 0 or with a degenerate
    /// line height.
    #[must_use]
    pub fn line_at(&self, y: f64) -> Option<usize> {
        if self.line_height.is_nan() || self.line_height <= 0.0 || !y.is_finite() {
            return None;
        }
        let rel = (y - self.origin_y) / self.line_height;
        if rel < 0.0 {
            return None;
        }
        Some(rel.floor() as usize)
    }

    /// Top edge of `line`.
    #[must_use]
    pub fn line_top(&self, line: usize) -> f64 {
        self.origin_y + line as f64 * self.line_height
    }
}

/// Where the cursor is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorGeometry {
    pub x: f64,
    pub y: f64,
    pub height: f64,
    pub line: usize,
}

/// Vertical direction for line moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vertical {
    Up,
    Down,
}

/// Cursor operations over a store and the index built from it.
pub struct Navigator<'a> {
    store: &'a mut CharacterStore,
    index: &'a LineIndex,
    geometry: Geometry,
}

impl<'a> Navigator<'a> {
    pub fn new(store: &'a mut CharacterStore, index: &'a LineIndex, geometry: Geometry) -> Self {
        Self {
            store,
            index,
            geometry,
        }
    }

    /// Place the cursor on the cell nearest to `(x, y)`.
    ///
    /// Returns `Ok(false)` and leaves the cursor alone when no laid-out line
    /// contains `y`.
    pub fn coordinate_to_position(&mut self, x: f64, y: f64) -> Result<bool> {
        match self.geometry.line_at(y) {
            Some(line) => self.position_on_line(x, line),
            None => Ok(false),
        }
    }

    /// Place the cursor on the cell of `line` nearest to `x`.
    ///
    /// Scans forward from the line's first cell while the cell's right edge
    /// is left of `x`, stopping at a hard newline, at the last cell before a
    /// hard newline, or at the end of the line.
    pub fn position_on_line(&mut self, x: f64, line: usize) -> Result<bool> {
        let Some(start) = self.index.line_start(self.store, line)? else {
            return Ok(false);
        };

        let mut node = start;
        while let Some(cell) = self.store.get(node) {
            if cell.right() >= x || cell.content().is_hard_newline() {
                break;
            }
            let next = self.store.next(node);
            match self.store.get(next) {
                Some(next_cell)
                    if !next_cell.content().is_hard_newline()
                        && next_cell.line() == cell.line() =>
                {
                    node = next;
                }
                _ => break,
            }
        }
        self.store.set_cursor(node)?;
        Ok(true)
    }

    /// Whether `x` falls in the left half of the cell under the cursor.
    #[must_use]
    pub fn is_left_of_midpoint(&self, x: f64) -> bool {
        self.store
            .get(self.store.cursor())
            .is_some_and(|cell| cell.x() + 0.5 * cell.width() > x)
    }

    /// Resolve a click: cursor goes before or after the cell under `(x, y)`.
    ///
    /// Hard newlines and soft breaks always take the cursor before them, so a
    /// click past the end of a line lands at that line's end. A click below
    /// the last line puts the cursor at the end of the document.
    pub fn click(&mut self, x: f64, y: f64) -> Result<()> {
        if self.coordinate_to_position(x, y)? {
            self.settle(x);
        } else {
            self.store.move_to_end();
        }
        Ok(())
    }

    fn settle(&mut self, x: f64) {
        let cursor = self.store.cursor();
        let before = self.store.get(cursor).is_some_and(|cell| {
            cell.content().is_hard_newline() || cell.is_soft_break()
        }) || self.is_left_of_midpoint(x);
        if before {
            let prev = self.store.prev(cursor);
            self.store.move_to(prev);
        }
    }

    /// Move one element left. No-op at the start of the document.
    pub fn move_left(&mut self) -> bool {
        self.store.retreat()
    }

    /// Move one element right. No-op at the end of the document.
    pub fn move_right(&mut self) -> bool {
        self.store.advance()
    }

    /// Move to the closest column on the adjacent line.
    ///
    /// No-op when there is no line in that direction.
    pub fn move_vertical(&mut self, direction: Vertical) -> Result<bool> {
        let current = self.cursor_geometry();
        let target = match direction {
            Vertical::Up => match current.line.checked_sub(1) {
                Some(line) => line,
                None => return Ok(false),
            },
            Vertical::Down => current.line + 1,
        };
        if !self.position_on_line(current.x, target)? {
            return Ok(false);
        }
        self.settle(current.x);
        Ok(true)
    }

    /// Where the cursor is drawn for the current layout.
    #[must_use]
    pub fn cursor_geometry(&self) -> CursorGeometry {
        cursor_geometry(self.store, self.store.cursor(), self.geometry)
    }
}

/// Where a cursor sitting after `at` is drawn.
///
/// After the boundary: start of line 0. After a hard newline: start of the
/// next line. After a cell whose successor opens a new line (a soft break or
/// a hard-broken word): start of that line. Otherwise at the cell's right
/// edge, except that a space parked past the wrap limit draws the cursor at
/// the limit.
#[must_use]
pub fn cursor_geometry(store: &CharacterStore, at: CellId, geometry: Geometry) -> CursorGeometry {
    let place = |x: f64, line: usize| CursorGeometry {
        x,
        y: geometry.line_top(line),
        height: geometry.line_height,
        line,
    };

    let Some(cell) = store.get(at) else {
        return place(geometry.origin_x, 0);
    };
    if cell.content().is_hard_newline() {
        return place(geometry.origin_x, cell.line() + 1);
    }
    match store.get(store.next(at)) {
        Some(next) if next.line() > cell.line() => place(geometry.origin_x, next.line()),
        _ if cell.content().is_space() => {
            place(cell.right().min(geometry.wrap_limit.max(cell.x())), cell.line())
        }
        _ => place(cell.right(), cell.line()),
    }
}
