//! Document persistence.
//!
//! The session reads the document once when it opens and writes it back on
//! [`Command::Save`](crate::session::Command::Save). Text crosses this
//! boundary verbatim: hard newlines as `\n`, no soft-wrap markers.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Result of reading a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The document exists; its full text.
    Loaded(String),
    /// No document yet. The session starts empty.
    Missing,
}

/// Result of a save request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The document was written.
    Written { bytes: usize },
    /// The document is empty and nothing was written.
    NothingToWrite,
}

/// Backing storage for one document.
pub trait Persistence {
    /// Read the whole document.
    fn load(&mut self) -> Result<LoadOutcome>;

    /// Replace the stored document with `text`.
    fn save(&mut self, text: &str) -> Result<()>;
}

impl<P: Persistence + ?Sized> Persistence for Box<P> {
    fn load(&mut self) -> Result<LoadOutcome> {
        (**self).load()
    }

    fn save(&mut self, text: &str) -> Result<()> {
        (**self).save(text)
    }
}

/// A document stored in a file.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persistence for FileStore {
    fn load(&mut self) -> Result<LoadOutcome> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(LoadOutcome::Loaded(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(LoadOutcome::Missing),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, text: &str) -> Result<()> {
        fs::write(&self.path, text)?;
        Ok(())
    }
}

/// In-memory document, for hosts without a filesystem and for tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    contents: Option<String>,
}

impl MemoryStore {
    /// Store with no document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding `text`.
    #[must_use]
    pub fn with_contents(text: impl Into<String>) -> Self {
        Self {
            contents: Some(text.into()),
        }
    }

    /// Last saved (or initial) text.
    #[must_use]
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Persistence for MemoryStore {
    fn load(&mut self) -> Result<LoadOutcome> {
        Ok(self
            .contents
            .clone()
            .map_or(LoadOutcome::Missing, LoadOutcome::Loaded))
    }

    fn save(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
