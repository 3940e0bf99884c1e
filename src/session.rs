//! Editor session: the single owner of all document state.
//!
//! A session holds the store, the line index built from it, the undo
//! history, the font, the window size and the scroll position. Hosts drive
//! it with [`Command`]s; each command runs to completion (edit, reflow,
//! cursor update, history bookkeeping) before [`EditorSession::execute`]
//! returns.
//!
//! # Example
//!
//! ```
//! use flowtext::config::EditorConfig;
//! use flowtext::metrics::MonospaceMetrics;
//! use flowtext::session::{Command, EditorSession};
//!
//! let mut session = EditorSession::new(EditorConfig::default(), MonospaceMetrics::default());
//! for ch in "hi".chars() {
//!     session.execute(Command::InsertChar(ch)).unwrap();
//! }
//! session.execute(Command::Undo).unwrap();
//! assert_eq!(session.text(), "h");
//! ```

use bitflags::bitflags;

use crate::config::{EditorConfig, FontSpec};
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log};
use crate::metrics::Metrics;
use crate::persist::{LoadOutcome, MemoryStore, Persistence, SaveOutcome};
use crate::text::{
    CellContent, CellId, CharacterStore, CursorGeometry, EditEvent, Geometry, History,
    LayoutParams, LineIndex, Navigator, ReplayMode, StoreChange, Vertical, cursor_geometry,
    reflow,
};
use crate::unicode::graphemes;

bitflags! {
    /// What a command changed.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Changes: u8 {
        /// Cells were inserted or removed.
        const CONTENT = 0x01;
        /// Cell positions were recomputed.
        const LAYOUT  = 0x02;
        /// The cursor moved.
        const CURSOR  = 0x04;
        /// The scroll offset changed.
        const SCROLL  = 0x08;
        /// The font size changed.
        const FONT    = 0x10;
    }
}

/// Cursor movement direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Input a host feeds to a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Type a character after the cursor. `\n` and `\r` insert a hard
    /// newline; backspace and delete characters are ignored.
    InsertChar(char),
    /// Remove the cell before the cursor.
    DeleteBackward,
    MoveCursor(Direction),
    /// Click at window coordinates; the scroll offset is added to `y`.
    ClickAt { x: f64, y: f64 },
    /// Grow (positive) or shrink (negative) the font by this many steps.
    ChangeFontSize(i32),
    Undo,
    Redo,
    Save,
    Resize { width: f64, height: f64 },
    /// Scroll to an absolute offset, clamped to the document height.
    ScrollTo(f64),
}

/// What a command did, and where the cursor is now.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CommandOutcome {
    /// Cursor position in document coordinates.
    pub cursor: CursorGeometry,
    pub changes: Changes,
    /// Set only by [`Command::Save`].
    pub save: Option<SaveOutcome>,
}

/// Receiver for cell lifecycle notifications.
///
/// Called for every insertion and removal, including undo/redo replays and
/// the initial load.
pub trait PresentationSink {
    fn cell_inserted(&mut self, _id: CellId, _content: &CellContent) {}

    fn cell_removed(&mut self, _id: CellId) {}
}

/// Sink that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl PresentationSink for NullSink {}

/// Editing session over one document.
pub struct EditorSession {
    config: EditorConfig,
    store: CharacterStore,
    index: LineIndex,
    history: History,
    metrics: Box<dyn Metrics>,
    persistence: Box<dyn Persistence>,
    sink: Box<dyn PresentationSink>,
    font: FontSpec,
    line_height: f64,
    window_width: f64,
    window_height: f64,
    scroll_offset: f64,
}

impl EditorSession {
    /// Create an empty session backed by an in-memory document.
    ///
    /// Window dimensions from `config` that cannot be laid out are treated
    /// as zero.
    pub fn new(config: EditorConfig, metrics: impl Metrics + 'static) -> Self {
        let width = sanitize_dimension(config.window_width);
        let height = sanitize_dimension(config.window_height);
        let mut session = Self::assemble(
            config,
            Box::new(metrics),
            Box::new(MemoryStore::new()),
            Box::new(NullSink),
        );
        session.window_width = width;
        session.window_height = height;
        session.relayout();
        session
    }

    /// Open a session over the document held by `persistence`.
    pub fn open(
        config: EditorConfig,
        metrics: impl Metrics + 'static,
        persistence: impl Persistence + 'static,
    ) -> Result<Self> {
        Self::open_with_sink(config, metrics, persistence, NullSink)
    }

    /// Open a session that reports cell changes to `sink`.
    ///
    /// A missing document opens as an empty one. Loaded text is not
    /// recorded in the undo history, and the cursor ends up after the last
    /// cell.
    pub fn open_with_sink(
        config: EditorConfig,
        metrics: impl Metrics + 'static,
        persistence: impl Persistence + 'static,
        sink: impl PresentationSink + 'static,
    ) -> Result<Self> {
        validate_dimensions(config.window_width, config.window_height)?;
        let mut session = Self::assemble(
            config,
            Box::new(metrics),
            Box::new(persistence),
            Box::new(sink),
        );

        match session.persistence.load()? {
            LoadOutcome::Loaded(text) => {
                for grapheme in graphemes(&text) {
                    session.insert_cell(CellContent::from_grapheme(grapheme), ReplayMode::Replaying);
                }
                emit_log(
                    LogLevel::Info,
                    &format!("loaded document with {} cells", session.store.len()),
                );
            }
            LoadOutcome::Missing => {
                emit_log(LogLevel::Info, "no document found, starting empty");
            }
        }
        session.store.move_to_end();
        session.relayout();
        Ok(session)
    }

    fn assemble(
        config: EditorConfig,
        metrics: Box<dyn Metrics>,
        persistence: Box<dyn Persistence>,
        sink: Box<dyn PresentationSink>,
    ) -> Self {
        let font = config.font.clone();
        let line_height = metrics.line_height(&font);
        Self {
            store: CharacterStore::new(),
            index: LineIndex::default(),
            history: History::with_capacity(config.history_capacity),
            metrics,
            persistence,
            sink,
            font,
            line_height,
            window_width: config.window_width,
            window_height: config.window_height,
            scroll_offset: 0.0,
            config,
        }
    }

    /// Apply one command.
    pub fn execute(&mut self, command: Command) -> Result<CommandOutcome> {
        match command {
            Command::InsertChar(ch) => Ok(self.insert_char(ch)),
            Command::DeleteBackward => Ok(self.delete_backward()),
            Command::MoveCursor(direction) => self.move_cursor(direction),
            Command::ClickAt { x, y } => self.click(x, y),
            Command::ChangeFontSize(steps) => Ok(self.change_font_size(steps)),
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::Save => self.save(),
            Command::Resize { width, height } => self.resize(width, height),
            Command::ScrollTo(offset) => Ok(self.scroll_to(offset)),
        }
    }

    fn insert_char(&mut self, ch: char) -> CommandOutcome {
        if matches!(ch, '\u{8}' | '\u{7f}') {
            return self.outcome(Changes::empty(), None);
        }
        self.insert_cell(CellContent::from_char(ch), ReplayMode::Normal);
        self.history.clear_redo();
        self.relayout();
        self.outcome(Changes::CONTENT | Changes::LAYOUT | Changes::CURSOR, None)
    }

    fn delete_backward(&mut self) -> CommandOutcome {
        if !self.delete_cell(ReplayMode::Normal) {
            return self.outcome(Changes::empty(), None);
        }
        self.history.clear_redo();
        self.relayout();
        self.outcome(Changes::CONTENT | Changes::LAYOUT | Changes::CURSOR, None)
    }

    fn insert_cell(&mut self, content: CellContent, mode: ReplayMode) -> CellId {
        let anchor = self.store.cursor();
        let id = self.store.insert_after_cursor(content.clone());
        self.sink.cell_inserted(id, &content);
        self.history.record(mode, EditEvent::add(id, anchor, content));
        id
    }

    fn delete_cell(&mut self, mode: ReplayMode) -> bool {
        let cell = self.store.cursor();
        let Some(content) = self.store.delete_at_cursor() else {
            return false;
        };
        self.sink.cell_removed(cell);
        self.history
            .record(mode, EditEvent::delete(cell, self.store.cursor(), content));
        true
    }

    fn move_cursor(&mut self, direction: Direction) -> Result<CommandOutcome> {
        let geometry = self.geometry();
        let mut nav = Navigator::new(&mut self.store, &self.index, geometry);
        let moved = match direction {
            Direction::Left => nav.move_left(),
            Direction::Right => nav.move_right(),
            Direction::Up => nav.move_vertical(Vertical::Up)?,
            Direction::Down => nav.move_vertical(Vertical::Down)?,
        };
        let changes = if moved {
            Changes::CURSOR
        } else {
            Changes::empty()
        };
        Ok(self.outcome(changes, None))
    }

    fn click(&mut self, x: f64, y: f64) -> Result<CommandOutcome> {
        let before = self.store.cursor();
        let geometry = self.geometry();
        Navigator::new(&mut self.store, &self.index, geometry).click(x, y + self.scroll_offset)?;
        let changes = if self.store.cursor() == before {
            Changes::empty()
        } else {
            Changes::CURSOR
        };
        Ok(self.outcome(changes, None))
    }

    fn change_font_size(&mut self, steps: i32) -> CommandOutcome {
        let step = i32::try_from(self.config.font_step).unwrap_or(i32::MAX);
        let font = self.font.resized(steps.saturating_mul(step));
        if font == self.font {
            return self.outcome(Changes::empty(), None);
        }
        emit_log(
            LogLevel::Debug,
            &format!("font size {} -> {}", self.font.size, font.size),
        );
        self.font = font;
        self.line_height = self.metrics.line_height(&self.font);
        self.relayout();
        let mut changes = Changes::FONT | Changes::LAYOUT;
        if self.clamp_scroll() {
            changes |= Changes::SCROLL;
        }
        self.outcome(changes, None)
    }

    fn undo(&mut self) -> Result<CommandOutcome> {
        let change = self.history.undo(&mut self.store)?;
        Ok(self.after_replay(change))
    }

    fn redo(&mut self) -> Result<CommandOutcome> {
        let change = self.history.redo(&mut self.store)?;
        Ok(self.after_replay(change))
    }

    fn after_replay(&mut self, change: Option<StoreChange>) -> CommandOutcome {
        let Some(change) = change else {
            return self.outcome(Changes::empty(), None);
        };
        match change {
            StoreChange::Inserted(id) => {
                if let Some(cell) = self.store.get(id) {
                    self.sink.cell_inserted(id, cell.content());
                }
            }
            StoreChange::Removed(id) => self.sink.cell_removed(id),
        }
        self.relayout();
        self.outcome(Changes::CONTENT | Changes::LAYOUT | Changes::CURSOR, None)
    }

    fn save(&mut self) -> Result<CommandOutcome> {
        if self.store.is_empty() {
            emit_log(LogLevel::Warn, "document is empty, nothing to save");
            return Ok(self.outcome(Changes::empty(), Some(SaveOutcome::NothingToWrite)));
        }
        let text = self.store.text();
        self.persistence.save(&text).inspect_err(|e| {
            emit_log(LogLevel::Error, &format!("save failed: {e}"));
        })?;
        emit_log(LogLevel::Info, &format!("saved {} bytes", text.len()));
        let saved = SaveOutcome::Written { bytes: text.len() };
        Ok(self.outcome(Changes::empty(), Some(saved)))
    }

    fn resize(&mut self, width: f64, height: f64) -> Result<CommandOutcome> {
        validate_dimensions(width, height)?;
        let mut changes = Changes::empty();
        if width != self.window_width {
            self.window_width = width;
            self.relayout();
            changes |= Changes::LAYOUT;
        }
        self.window_height = height;
        if self.clamp_scroll() {
            changes |= Changes::SCROLL;
        }
        Ok(self.outcome(changes, None))
    }

    fn scroll_to(&mut self, offset: f64) -> CommandOutcome {
        if !offset.is_finite() {
            return self.outcome(Changes::empty(), None);
        }
        let target = offset.clamp(0.0, self.max_scroll());
        let changes = if target == self.scroll_offset {
            Changes::empty()
        } else {
            self.scroll_offset = target;
            Changes::SCROLL
        };
        CommandOutcome {
            cursor: self.cursor_geometry(),
            changes,
            save: None,
        }
    }

    fn relayout(&mut self) {
        let params = LayoutParams::new(
            self.config.origin_x,
            self.config.wrap_width_for(self.window_width),
        );
        self.index = reflow(&mut self.store, params, &*self.metrics, &self.font);
    }

    fn geometry(&self) -> Geometry {
        let wrap_limit = self.config.origin_x + self.config.wrap_width_for(self.window_width);
        Geometry::new(self.config.origin_x, self.config.origin_y, self.line_height)
            .with_wrap_limit(wrap_limit)
    }

    /// Finish a command: report the cursor and keep it on screen if it or
    /// the content moved.
    fn outcome(&mut self, mut changes: Changes, save: Option<SaveOutcome>) -> CommandOutcome {
        let cursor = self.cursor_geometry();
        if changes.intersects(Changes::CONTENT | Changes::CURSOR) && self.snap_scroll(&cursor) {
            changes |= Changes::SCROLL;
        }
        CommandOutcome {
            cursor,
            changes,
            save,
        }
    }

    /// Scroll just enough to show the cursor. Returns whether the offset moved.
    fn snap_scroll(&mut self, cursor: &CursorGeometry) -> bool {
        let bottom = cursor.y + cursor.height;
        let target = if cursor.y < self.scroll_offset {
            cursor.y
        } else if bottom > self.scroll_offset + self.window_height {
            bottom - self.window_height
        } else {
            return false;
        };
        let target = target.max(0.0);
        if target == self.scroll_offset {
            return false;
        }
        self.scroll_offset = target;
        true
    }

    fn clamp_scroll(&mut self) -> bool {
        let clamped = self.scroll_offset.clamp(0.0, self.max_scroll());
        if clamped == self.scroll_offset {
            return false;
        }
        self.scroll_offset = clamped;
        true
    }

    /// Where the cursor is drawn, in document coordinates.
    #[must_use]
    pub fn cursor_geometry(&self) -> CursorGeometry {
        cursor_geometry(&self.store, self.store.cursor(), self.geometry())
    }

    /// Document text with hard newlines as `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        self.store.text()
    }

    #[must_use]
    pub fn store(&self) -> &CharacterStore {
        &self.store
    }

    /// Line index from the last reflow.
    #[must_use]
    pub fn line_index(&self) -> &LineIndex {
        &self.index
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.line_height
    }

    #[must_use]
    pub fn window_size(&self) -> (f64, f64) {
        (self.window_width, self.window_height)
    }

    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Height of all laid-out lines.
    #[must_use]
    pub fn total_height(&self) -> f64 {
        (self.line_height * self.index.line_count() as f64).ceil()
    }

    /// Largest offset [`Command::ScrollTo`] accepts.
    #[must_use]
    pub fn max_scroll(&self) -> f64 {
        (self.total_height() - self.window_height).max(0.0)
    }
}

fn validate_dimensions(width: f64, height: f64) -> Result<()> {
    if width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidDimensions { width, height })
    }
}

fn sanitize_dimension(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
