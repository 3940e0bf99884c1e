//! Fuzz target for the session command surface.
//!
//! Runs arbitrary command sequences and checks that the session never panics
//! and that the line index always matches the store afterwards.

#![no_main]

use arbitrary::Arbitrary;
use flowtext::{Command, Direction, EditorConfig, EditorSession, FontSpec, MonospaceMetrics};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum FuzzCommand {
    Insert(char),
    Delete,
    Up,
    Down,
    Left,
    Right,
    Click(u16, u16),
    Font(i8),
    Undo,
    Redo,
    Resize(u16, u16),
    Scroll(u16),
}

impl FuzzCommand {
    fn into_command(self) -> Command {
        match self {
            Self::Insert(ch) => Command::InsertChar(ch),
            Self::Delete => Command::DeleteBackward,
            Self::Up => Command::MoveCursor(Direction::Up),
            Self::Down => Command::MoveCursor(Direction::Down),
            Self::Left => Command::MoveCursor(Direction::Left),
            Self::Right => Command::MoveCursor(Direction::Right),
            Self::Click(x, y) => Command::ClickAt {
                x: f64::from(x),
                y: f64::from(y),
            },
            Self::Font(steps) => Command::ChangeFontSize(i32::from(steps)),
            Self::Undo => Command::Undo,
            Self::Redo => Command::Redo,
            Self::Resize(w, h) => Command::Resize {
                width: f64::from(w),
                height: f64::from(h),
            },
            Self::Scroll(offset) => Command::ScrollTo(f64::from(offset)),
        }
    }
}

fuzz_target!(|commands: Vec<FuzzCommand>| {
    let config = EditorConfig::default()
        .with_font(FontSpec::new("Mono", 10))
        .with_window(120.0, 80.0);
    let mut session = EditorSession::new(config, MonospaceMetrics::default());

    for command in commands.into_iter().take(512) {
        let _ = session.execute(command.into_command());
        assert!(session.line_index().is_current(session.store()));
    }

    // Unwinding the history never fails on a consistent session
    while session.history().can_undo() {
        session.execute(Command::Undo).unwrap();
    }
});
