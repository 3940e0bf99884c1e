//! Undo/redo log of single-cell edits.
//!
//! Every normal insert or delete records one [`EditEvent`]. Undo pops the
//! newest event, reverses it against the store and parks it on the redo
//! stack; redo does the opposite. Replays go straight to the store and are
//! never recorded themselves.
//!
//! Re-inserting a cell allocates a fresh [`CellId`], so after a replay every
//! event in both stacks that still names the old handle is rewritten to the
//! new one. Both stacks hold at most `capacity` events, which keeps that
//! rewrite cheap.

use std::collections::VecDeque;

use crate::error::Result;
use crate::event::{LogLevel, emit_log};
use crate::text::store::{CellContent, CellId, CharacterStore};

/// Default maximum number of events kept for undo.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Whether an edit comes from the user or from an undo/redo replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReplayMode {
    #[default]
    Normal,
    Replaying,
}

/// Kind of a recorded edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditKind {
    Add,
    Delete,
}

/// One reversible edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditEvent {
    pub kind: EditKind,
    /// Content of the added or removed cell.
    pub content: CellContent,
    /// The added cell, or the cell that was removed.
    pub cell: CellId,
    /// Element the cell sits after; the cursor position that reproduces the edit.
    pub anchor: CellId,
}

impl EditEvent {
    /// Event for a cell inserted after `anchor`.
    #[must_use]
    pub fn add(cell: CellId, anchor: CellId, content: CellContent) -> Self {
        Self {
            kind: EditKind::Add,
            content,
            cell,
            anchor,
        }
    }

    /// Event for `cell` removed from after `anchor`.
    #[must_use]
    pub fn delete(cell: CellId, anchor: CellId, content: CellContent) -> Self {
        Self {
            kind: EditKind::Delete,
            content,
            cell,
            anchor,
        }
    }

    fn remap(&mut self, old: CellId, new: CellId) {
        if self.cell == old {
            self.cell = new;
        }
        if self.anchor == old {
            self.anchor = new;
        }
    }
}

/// Store mutation performed by a replay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreChange {
    Inserted(CellId),
    Removed(CellId),
}

/// Bounded undo and redo stacks.
#[derive(Clone, Debug)]
pub struct History {
    undo_stack: VecDeque<EditEvent>,
    redo_stack: VecDeque<EditEvent>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history keeping at most `capacity` events per stack.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            redo_stack: VecDeque::new(),
            capacity,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record an edit. Ignored while replaying.
    ///
    /// The oldest event is dropped when the undo stack is full. The redo
    /// stack is left alone; see [`clear_redo`](Self::clear_redo).
    pub fn record(&mut self, mode: ReplayMode, event: EditEvent) {
        if mode == ReplayMode::Replaying || self.capacity == 0 {
            return;
        }
        if self.undo_stack.len() >= self.capacity {
            self.undo_stack.pop_front();
            emit_log(LogLevel::Debug, "undo history full, dropped oldest event");
        }
        self.undo_stack.push_back(event);
    }

    /// Forget everything that could be redone.
    pub fn clear_redo(&mut self) {
        self.redo_stack.clear();
    }

    /// Forget all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Reverse the newest edit.
    ///
    /// Returns `Ok(None)` when there is nothing to undo. On a stale handle
    /// the event is discarded and the store is left untouched.
    pub fn undo(&mut self, store: &mut CharacterStore) -> Result<Option<StoreChange>> {
        let Some(mut event) = self.undo_stack.pop_back() else {
            return Ok(None);
        };
        let change = self.replay(&mut event, store, true).inspect_err(|_| {
            emit_log(LogLevel::Warn, "discarded undo event with a stale cell");
        })?;
        push_bounded(&mut self.redo_stack, event, self.capacity);
        Ok(Some(change))
    }

    /// Re-apply the newest undone edit.
    ///
    /// Returns `Ok(None)` when there is nothing to redo.
    pub fn redo(&mut self, store: &mut CharacterStore) -> Result<Option<StoreChange>> {
        let Some(mut event) = self.redo_stack.pop_back() else {
            return Ok(None);
        };
        let change = self.replay(&mut event, store, false).inspect_err(|_| {
            emit_log(LogLevel::Warn, "discarded redo event with a stale cell");
        })?;
        push_bounded(&mut self.undo_stack, event, self.capacity);
        Ok(Some(change))
    }

    fn replay(
        &mut self,
        event: &mut EditEvent,
        store: &mut CharacterStore,
        reverse: bool,
    ) -> Result<StoreChange> {
        let insert = matches!(
            (event.kind, reverse),
            (EditKind::Add, false) | (EditKind::Delete, true)
        );
        if insert {
            store.set_cursor(event.anchor)?;
            let id = store.insert_after_cursor(event.content.clone());
            self.remap(event.cell, id);
            event.cell = id;
            Ok(StoreChange::Inserted(id))
        } else {
            store.set_cursor(event.cell)?;
            store.delete_at_cursor();
            Ok(StoreChange::Removed(event.cell))
        }
    }

    fn remap(&mut self, old: CellId, new: CellId) {
        for event in self.undo_stack.iter_mut().chain(self.redo_stack.iter_mut()) {
            event.remap(old, new);
        }
    }
}

fn push_bounded(stack: &mut VecDeque<EditEvent>, event: EditEvent, capacity: usize) {
    if capacity == 0 {
        return;
    }
    if stack.len() >= capacity {
        stack.pop_front();
    }
    stack.push_back(event);
}
