#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)] // Not every test binary uses every helper

use std::sync::Once;

use flowtext::{
    Command, EditorConfig, EditorSession, FontSpec, LogLevel, MonospaceMetrics, set_log_callback,
};

/// Column width and line height produced by [`metrics`] with [`font`].
pub const CELL: f64 = 10.0;
/// X coordinate where every line starts.
pub const ORIGIN_X: f64 = 5.0;

/// Forward library logs to `tracing` and print them with the test output.
pub fn setup_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
        set_log_callback(|level, message| match level {
            LogLevel::Debug => tracing::debug!(target: "flowtext", "{message}"),
            LogLevel::Info => tracing::info!(target: "flowtext", "{message}"),
            LogLevel::Warn => tracing::warn!(target: "flowtext", "{message}"),
            LogLevel::Error => tracing::error!(target: "flowtext", "{message}"),
        });
    });
}

pub fn metrics() -> MonospaceMetrics {
    MonospaceMetrics::new(1.0, 1.0)
}

pub fn font() -> FontSpec {
    FontSpec::new("Mono", CELL as u32)
}

/// Config whose lines hold exactly `columns` cells.
pub fn config(columns: usize) -> EditorConfig {
    let margin = 5.0;
    EditorConfig::default()
        .with_origin(ORIGIN_X, 0.0)
        .with_margin(margin)
        .with_font(font())
        .with_window(ORIGIN_X + columns as f64 * CELL + margin, 400.0)
}

pub fn session(columns: usize) -> EditorSession {
    EditorSession::new(config(columns), metrics())
}

pub fn type_text(session: &mut EditorSession, text: &str) {
    for ch in text.chars() {
        session
            .execute(Command::InsertChar(ch))
            .expect("insert never fails");
    }
}

/// Visible text of every line, without wrap spaces and newlines.
pub fn lines(session: &EditorSession) -> Vec<String> {
    let mut out: Vec<String> = vec![String::new(); session.line_index().line_count()];
    for (_, cell) in session.store().iter() {
        if cell.is_soft_break() || cell.content().is_hard_newline() {
            continue;
        }
        if let Some(line) = out.get_mut(cell.line()) {
            line.push_str(cell.content().as_str());
        }
    }
    out
}

/// Position and soft-break flag of every cell.
pub fn layout_snapshot(session: &EditorSession) -> Vec<(f64, usize, bool)> {
    session
        .store()
        .iter()
        .map(|(_, cell)| (cell.x(), cell.line(), cell.is_soft_break()))
        .collect()
}
