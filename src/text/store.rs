//! Character store: an ordered arena of cells with a cursor.
//!
//! Cells live in slots addressed by [`CellId`]. Each slot carries `prev` and
//! `next` links, so inserting after the cursor and deleting at the cursor are
//! O(1). Slot 0 is the boundary element: it sits both before the first cell
//! and after the last one, and is where the cursor rests in an empty store.
//!
//! # Invariants
//!
//! - Slot 0 is never freed and never holds a cell.
//! - The cursor always refers to the boundary or to a live cell.
//! - A freed slot bumps its generation, so handles taken before the free no
//!   longer resolve even after the slot is reused.
//! - Cell geometry (`x`, `line`, `width`, soft-break flag) is written only by
//!   reflow and is stale after any insert or delete until the next reflow.

use crate::error::{Error, Result};
use crate::unicode::is_hard_newline;

const BOUNDARY_INDEX: u32 = 0;

/// Stable handle to an element of a [`CharacterStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellId {
    index: u32,
    generation: u32,
}

impl CellId {
    /// The boundary element ("before the first cell").
    pub const BOUNDARY: Self = Self {
        index: BOUNDARY_INDEX,
        generation: 0,
    };

    /// Whether this handle names the boundary element.
    #[must_use]
    pub fn is_boundary(self) -> bool {
        self.index == BOUNDARY_INDEX
    }

    /// Slot index of this handle.
    #[must_use]
    pub fn index(self) -> u32 {
        self.index
    }
}

/// What a cell displays.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CellContent {
    /// One grapheme cluster.
    Grapheme(String),
    /// A user-entered line break.
    HardNewline,
}

impl CellContent {
    /// Build content from a grapheme; line terminators become [`Self::HardNewline`].
    #[must_use]
    pub fn from_grapheme(grapheme: &str) -> Self {
        if is_hard_newline(grapheme) {
            Self::HardNewline
        } else {
            Self::Grapheme(grapheme.to_string())
        }
    }

    /// Build content from a typed character.
    #[must_use]
    pub fn from_char(ch: char) -> Self {
        if ch == '\n' || ch == '\r' {
            Self::HardNewline
        } else {
            Self::Grapheme(ch.to_string())
        }
    }

    /// Text as it is written to disk.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Grapheme(g) => g,
            Self::HardNewline => "\n",
        }
    }

    #[must_use]
    pub fn is_hard_newline(&self) -> bool {
        matches!(self, Self::HardNewline)
    }

    /// A plain space, the only wrap point reflow recognises.
    #[must_use]
    pub fn is_space(&self) -> bool {
        matches!(self, Self::Grapheme(g) if g == " ")
    }
}

/// One document unit with its last computed geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    content: CellContent,
    x: f64,
    line: usize,
    width: f64,
    soft_break: bool,
}

impl Cell {
    fn new(content: CellContent) -> Self {
        Self {
            content,
            x: 0.0,
            line: 0,
            width: 0.0,
            soft_break: false,
        }
    }

    #[must_use]
    pub fn content(&self) -> &CellContent {
        &self.content
    }

    /// Left edge from the last reflow.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Line number from the last reflow.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Width measured by the last reflow.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Right edge from the last reflow.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Whether the last reflow consumed this cell as a wrap point.
    #[must_use]
    pub fn is_soft_break(&self) -> bool {
        self.soft_break
    }

    pub(crate) fn place(&mut self, x: f64, line: usize, width: f64) {
        self.x = x;
        self.line = line;
        self.width = width;
        self.soft_break = false;
    }

    pub(crate) fn mark_soft_break(&mut self) {
        self.soft_break = true;
    }
}

#[derive(Clone, Debug)]
struct Slot {
    cell: Option<Cell>,
    prev: u32,
    next: u32,
    generation: u32,
}

impl Slot {
    fn boundary() -> Self {
        Self {
            cell: None,
            prev: BOUNDARY_INDEX,
            next: BOUNDARY_INDEX,
            generation: 0,
        }
    }
}

/// Ordered, mutable sequence of cells plus a cursor.
#[derive(Clone, Debug)]
pub struct CharacterStore {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    cursor: CellId,
    len: usize,
    revision: u64,
}

impl Default for CharacterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterStore {
    /// Create an empty store with the cursor on the boundary.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: vec![Slot::boundary()],
            free_list: Vec::new(),
            cursor: CellId::BOUNDARY,
            len: 0,
            revision: 0,
        }
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Mutation counter, bumped by every insert and delete.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Element the cursor sits after.
    #[must_use]
    pub fn cursor(&self) -> CellId {
        self.cursor
    }

    /// Move the cursor to `id`.
    pub fn set_cursor(&mut self, id: CellId) -> Result<()> {
        if !self.contains(id) {
            return Err(Error::StaleCell { index: id.index });
        }
        self.cursor = id;
        Ok(())
    }

    /// Whether `id` names the boundary or a live cell.
    #[must_use]
    pub fn contains(&self, id: CellId) -> bool {
        if id.is_boundary() {
            return true;
        }
        self.slots
            .get(id.index as usize)
            .is_some_and(|slot| slot.generation == id.generation && slot.cell.is_some())
    }

    /// Look up a live cell.
    #[must_use]
    pub fn get(&self, id: CellId) -> Option<&Cell> {
        if id.is_boundary() {
            return None;
        }
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.cell.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        if id.is_boundary() {
            return None;
        }
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.cell.as_mut())
    }

    fn handle(&self, index: u32) -> CellId {
        CellId {
            index,
            generation: self.slots[index as usize].generation,
        }
    }

    /// Element after `id` (the boundary follows the last cell).
    ///
    /// A stale `id` yields the boundary.
    #[must_use]
    pub fn next(&self, id: CellId) -> CellId {
        if !self.contains(id) {
            return CellId::BOUNDARY;
        }
        self.handle(self.slots[id.index as usize].next)
    }

    /// Element before `id` (the boundary precedes the first cell).
    ///
    /// A stale `id` yields the boundary.
    #[must_use]
    pub fn prev(&self, id: CellId) -> CellId {
        if !self.contains(id) {
            return CellId::BOUNDARY;
        }
        self.handle(self.slots[id.index as usize].prev)
    }

    /// First cell, if any.
    #[must_use]
    pub fn first(&self) -> Option<CellId> {
        let first = self.next(CellId::BOUNDARY);
        (!first.is_boundary()).then_some(first)
    }

    /// Last cell, if any.
    #[must_use]
    pub fn last(&self) -> Option<CellId> {
        let last = self.prev(CellId::BOUNDARY);
        (!last.is_boundary()).then_some(last)
    }

    /// Whether the cursor is before the first cell.
    #[must_use]
    pub fn is_at_start(&self) -> bool {
        self.cursor.is_boundary()
    }

    /// Whether the cursor is after the last cell.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.next(self.cursor).is_boundary()
    }

    /// Insert a cell right after the cursor and move the cursor onto it.
    ///
    /// Geometry of the new cell is unset until the next reflow.
    pub fn insert_after_cursor(&mut self, content: CellContent) -> CellId {
        let prev = self.cursor.index;
        let next = self.slots[prev as usize].next;

        let index = if let Some(free) = self.free_list.pop() {
            let slot = &mut self.slots[free as usize];
            slot.cell = Some(Cell::new(content));
            slot.prev = prev;
            slot.next = next;
            free
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                cell: Some(Cell::new(content)),
                prev,
                next,
                generation: 0,
            });
            index
        };

        self.slots[prev as usize].next = index;
        self.slots[next as usize].prev = index;
        self.len += 1;
        self.revision += 1;

        let id = self.handle(index);
        self.cursor = id;
        id
    }

    /// Remove the cell under the cursor and move the cursor to its predecessor.
    ///
    /// Returns `None` without touching anything when the cursor is on the
    /// boundary.
    pub fn delete_at_cursor(&mut self) -> Option<CellContent> {
        if self.cursor.is_boundary() {
            return None;
        }
        let index = self.cursor.index;
        let (prev, next) = {
            let slot = &self.slots[index as usize];
            (slot.prev, slot.next)
        };

        self.slots[prev as usize].next = next;
        self.slots[next as usize].prev = prev;

        let slot = &mut self.slots[index as usize];
        let cell = slot.cell.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(index);

        self.len -= 1;
        self.revision += 1;
        self.cursor = self.handle(prev);
        Some(cell.content)
    }

    /// Move the cursor forward one element, stepping over soft breaks.
    ///
    /// Returns `false` at the end of the document.
    pub fn advance(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        let mut target = self.next(self.cursor);
        if self.is_soft_break(target) {
            let after = self.next(target);
            if !after.is_boundary() {
                target = after;
            }
        }
        self.cursor = target;
        true
    }

    /// Move the cursor back one element, stepping over soft breaks.
    ///
    /// Returns `false` at the start of the document.
    pub fn retreat(&mut self) -> bool {
        if self.is_at_start() {
            return false;
        }
        let mut target = self.prev(self.cursor);
        if self.is_soft_break(target) {
            target = self.prev(target);
        }
        self.cursor = target;
        true
    }

    /// Move the cursor to an element obtained from this store's own links.
    pub(crate) fn move_to(&mut self, id: CellId) {
        debug_assert!(self.contains(id));
        self.cursor = id;
    }

    /// Put the cursor after the last cell.
    pub fn move_to_end(&mut self) {
        self.cursor = self.prev(CellId::BOUNDARY);
    }

    /// Put the cursor on the boundary.
    pub fn move_to_start(&mut self) {
        self.cursor = CellId::BOUNDARY;
    }

    fn is_soft_break(&self, id: CellId) -> bool {
        self.get(id).is_some_and(Cell::is_soft_break)
    }

    /// Iterate over cells in document order.
    pub fn iter(&self) -> Cells<'_> {
        Cells {
            store: self,
            at: self.next(CellId::BOUNDARY),
        }
    }

    /// Document text with hard newlines as `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        self.iter().map(|(_, cell)| cell.content.as_str()).collect()
    }
}

/// Iterator over `(CellId, &Cell)` in document order.
pub struct Cells<'a> {
    store: &'a CharacterStore,
    at: CellId,
}

impl<'a> Iterator for Cells<'a> {
    type Item = (CellId, &'a Cell);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.at;
        let cell = self.store.get(id)?;
        self.at = self.store.next(id);
        Some((id, cell))
    }
}
