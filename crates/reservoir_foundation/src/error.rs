//! Error types for the reservoir registry.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for reservoir operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an index out of bounds error.
    #[must_use]
    pub fn index_out_of_bounds(index: usize, length: usize) -> Self {
        Self::new(ErrorKind::IndexOutOfBounds { index, length })
    }

    /// Creates an I/O error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IoError(message.into()))
    }

    /// Creates a truncated record error.
    #[must_use]
    pub fn truncated(offset: usize, needed: usize, available: usize) -> Self {
        Self::new(ErrorKind::TruncatedRecord {
            offset,
            needed,
            available,
        })
    }

    /// Creates an invalid command error.
    #[must_use]
    pub fn invalid_command(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCommand(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Index out of bounds.
    #[error("index out of bounds: {index} (length {length})")]
    IndexOutOfBounds {
        /// The index that was accessed.
        index: usize,
        /// The actual length of the collection.
        length: usize,
    },

    /// A file could not be opened, written, or read.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Snapshot serialization or deserialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// The binary stream ended inside a record.
    #[error("truncated record at byte {offset}: needed {needed} bytes, {available} available")]
    TruncatedRecord {
        /// Byte offset where the incomplete field starts.
        offset: usize,
        /// Bytes required by the field.
        needed: usize,
        /// Bytes left in the stream.
        available: usize,
    },

    /// A text field in the binary stream is not valid UTF-8.
    #[error("invalid UTF-8 in {field} at byte {offset}")]
    InvalidUtf8 {
        /// Byte offset where the field's bytes start.
        offset: usize,
        /// The field that failed to decode.
        field: &'static str,
    },

    /// A text field is too long for the binary layout's length prefix.
    #[error("{field} is {length} bytes, layout allows at most {max}")]
    LengthOverflow {
        /// The field being encoded.
        field: &'static str,
        /// Its length in bytes.
        length: usize,
        /// The largest length the layout can represent.
        max: u64,
    },

    /// Shell input could not be understood.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// File path or command the error relates to.
    pub source: Option<String>,
    /// Line number in a command file.
    pub line: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line number.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let Some(line) = self.line {
                write!(f, ":{line}")?;
            }
        }
        Ok(())
    }
}
