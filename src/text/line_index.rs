//! Line index: first cell of every laid-out line.
//!
//! Rebuilt from scratch by every reflow and tagged with the store revision it
//! was built against, so a lookup after an edit is rejected instead of
//! returning a cell from an old layout.

use crate::error::{Error, Result};
use crate::text::store::{CellId, CharacterStore};

/// Mapping from line number (0-based, contiguous) to the line's first cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineIndex {
    starts: Vec<CellId>,
    revision: u64,
}

impl LineIndex {
    pub(crate) fn new(revision: u64) -> Self {
        Self {
            starts: Vec::new(),
            revision,
        }
    }

    /// Record `cell` as the first cell of the next line.
    pub(crate) fn push_line(&mut self, cell: CellId) {
        self.starts.push(cell);
    }

    /// Number of lines that hold at least one cell.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Store revision this index was built against.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the index still describes `store`.
    #[must_use]
    pub fn is_current(&self, store: &CharacterStore) -> bool {
        self.revision == store.revision()
    }

    /// First cell of `line`, or `None` if there is no such line.
    ///
    /// Fails with [`Error::StaleLineIndex`] when `store` has been edited since
    /// the index was built.
    pub fn line_start(&self, store: &CharacterStore, line: usize) -> Result<Option<CellId>> {
        if !self.is_current(store) {
            return Err(Error::StaleLineIndex {
                built: self.revision,
                current: store.revision(),
            });
        }
        Ok(self.starts.get(line).copied())
    }

    /// Iterate over line starts without a freshness check.
    pub fn starts(&self) -> impl Iterator<Item = CellId> + '_ {
        self.starts.iter().copied()
    }
}
