//! Error types for flowtext.

use std::fmt;
use std::io;

/// Result type alias for flowtext operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for flowtext operations.
///
/// Boundary navigation, undo/redo on an empty stack, deleting at the start of
/// the document and saving an empty document are not errors; they are reported
/// through return values instead.
#[derive(Debug)]
pub enum Error {
    /// I/O error from loading or saving a document.
    Io(io::Error),
    /// A line index lookup was made after the store was mutated.
    StaleLineIndex { built: u64, current: u64 },
    /// A cell handle refers to a slot that has since been freed or reused.
    StaleCell { index: u32 },
    /// Window dimensions that cannot be laid out (negative or non-finite).
    InvalidDimensions { width: f64, height: f64 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::StaleLineIndex { built, current } => write!(
                f,
                "line index built at revision {built} used at revision {current}"
            ),
            Self::StaleCell { index } => write!(f, "stale cell handle for slot {index}"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid dimensions: {width}x{height}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::StaleLineIndex {
            built: 3,
            current: 5,
        };
        assert!(err.to_string().contains("revision 3"));
        assert!(err.to_string().contains("revision 5"));

        let err = Error::StaleCell { index: 42 };
        assert!(err.to_string().contains("slot 42"));

        let err = Error::InvalidDimensions {
            width: -1.0,
            height: 100.0,
        };
        assert!(err.to_string().contains("-1x100"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
