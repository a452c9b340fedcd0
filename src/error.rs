//! Error types for mutseq
//!
//! This module provides error handling with:
//! - Error codes for categorization
//! - Source span tracking for error location
//! - Helpful diagnostic messages

use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors
///
/// These codes can be used for programmatic error handling
/// and for documentation lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // Parse errors (E1xxx)
    /// Invalid position format
    InvalidPosition = 1003,
    /// Invalid edit format
    InvalidEdit = 1004,
    /// Unexpected end of input
    UnexpectedEnd = 1005,
    /// Unexpected characters
    UnexpectedChar = 1006,
    /// Invalid sequence symbol
    InvalidSymbol = 1007,

    // Validation errors (E3xxx)
    /// Position out of bounds
    PositionOutOfBounds = 3001,
    /// Reference sequence mismatch
    ReferenceMismatch = 3002,
    /// Invalid coordinate range
    InvalidRange = 3003,
    /// Insertion span is not a pair of adjacent positions
    NonAdjacentInsertion = 3004,

    // Classification errors (E4xxx)
    /// Descriptor does not match any known mutation kind
    UnrecognizedDescriptor = 4001,

    // IO errors (E9xxx)
    /// File IO error
    IoError = 9001,
    /// JSON parsing error
    JsonError = 9002,
    /// Tabular record error
    CsvError = 9003,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E1003")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidPosition => "invalid position format",
            ErrorCode::InvalidEdit => "invalid edit format",
            ErrorCode::UnexpectedEnd => "unexpected end of input",
            ErrorCode::UnexpectedChar => "unexpected character",
            ErrorCode::InvalidSymbol => "invalid sequence symbol",
            ErrorCode::PositionOutOfBounds => "position out of bounds",
            ErrorCode::ReferenceMismatch => "reference sequence mismatch",
            ErrorCode::InvalidRange => "invalid coordinate range",
            ErrorCode::NonAdjacentInsertion => "insertion positions not adjacent",
            ErrorCode::UnrecognizedDescriptor => "unrecognized mutation descriptor",
            ErrorCode::IoError => "file I/O error",
            ErrorCode::JsonError => "JSON parsing error",
            ErrorCode::CsvError => "tabular record error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A span in the source input indicating error location
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceSpan {
    /// Starting byte offset (0-indexed)
    pub start: usize,
    /// Ending byte offset (exclusive)
    pub end: usize,
}

impl SourceSpan {
    /// Create a new source span
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a span for a single position
    pub fn point(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }

    /// Format the source with the error highlighted
    ///
    /// Returns a string like:
    /// ```text
    /// c.3_6delinzXYZ
    ///        ^~~~
    /// ```
    pub fn highlight(&self, source: &str) -> String {
        if source.is_empty() {
            return String::new();
        }

        let safe_start = self.start.min(source.len());
        let safe_end = self.end.min(source.len()).max(safe_start);

        // Build the pointer line
        let mut pointer = String::with_capacity(source.len() + 4);
        for _ in 0..safe_start {
            pointer.push(' ');
        }
        if safe_start < safe_end {
            pointer.push('^');
            for _ in (safe_start + 1)..safe_end {
                pointer.push('~');
            }
        } else {
            pointer.push('^');
        }

        format!("{}\n{}", source, pointer)
    }
}

/// Diagnostic information for an error
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Diagnostic {
    /// Error code
    pub code: Option<ErrorCode>,
    /// Source span for highlighting
    pub span: Option<SourceSpan>,
    /// The original input (for error display)
    pub source: Option<String>,
    /// Helpful hint or suggestion
    pub hint: Option<String>,
}

impl Diagnostic {
    /// Create a new empty diagnostic
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error code
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a source span
    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = Some(span);
        self
    }

    /// Add the original source
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Add a hint
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Format the diagnostic as a detailed error message
    pub fn format(&self, primary_message: &str) -> String {
        let mut result = String::new();

        if let Some(code) = &self.code {
            result.push_str(&format!("[{}] ", code));
        }

        result.push_str(primary_message);

        if let (Some(span), Some(source)) = (&self.span, &self.source) {
            result.push_str("\n\n");
            result.push_str(&span.highlight(source));
        }

        if let Some(hint) = &self.hint {
            result.push_str("\n\nHint: ");
            result.push_str(hint);
        }

        result
    }
}

/// Main error type for mutseq operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutSeqError {
    /// Parse error with position and message
    #[error("Parse error at position {pos}: {msg}")]
    Parse {
        pos: usize,
        msg: String,
        /// Optional diagnostic with additional context
        diagnostic: Option<Box<Diagnostic>>,
    },

    /// Descriptor position falls outside the reference sequence
    #[error("Position {pos} out of bounds for sequence of length {len}")]
    PositionOutOfBounds { pos: u64, len: usize },

    /// Range with start after end
    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange { start: u64, end: u64 },

    /// Insertion span must name two adjacent positions
    #[error("Insertion span {start}_{end} is not a pair of adjacent positions")]
    NonAdjacentInsertion { start: u64, end: u64 },

    /// Stated reference symbol disagrees with the sequence
    #[error("Reference mismatch at position {pos}: descriptor states '{expected}', sequence has '{found}'")]
    ReferenceMismatch { pos: u64, expected: char, found: char },

    /// Reference sequence contains a symbol outside the supported alphabet
    #[error("Invalid sequence symbol at position {pos}: {msg}")]
    InvalidSequence { pos: usize, msg: String },

    /// Descriptor rejected under strict unknown handling
    #[error("Unrecognized mutation descriptor: {descriptor}")]
    UnrecognizedDescriptor { descriptor: String },

    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },

    /// JSON parsing error
    #[error("JSON error: {msg}")]
    Json { msg: String },

    /// Tabular record error
    #[error("Record error: {msg}")]
    Csv { msg: String },
}

impl MutSeqError {
    /// Create a parse error with diagnostic information
    pub fn parse_with_diagnostic(
        pos: usize,
        msg: impl Into<String>,
        diagnostic: Diagnostic,
    ) -> Self {
        MutSeqError::Parse {
            pos,
            msg: msg.into(),
            diagnostic: Some(Box::new(diagnostic)),
        }
    }

    /// Create a simple parse error without diagnostic
    pub fn parse(pos: usize, msg: impl Into<String>) -> Self {
        MutSeqError::Parse {
            pos,
            msg: msg.into(),
            diagnostic: None,
        }
    }

    /// Get the error code if available
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            MutSeqError::Parse {
                diagnostic: Some(d),
                ..
            } => d.code,
            MutSeqError::Parse { .. } => Some(ErrorCode::InvalidEdit),
            MutSeqError::PositionOutOfBounds { .. } => Some(ErrorCode::PositionOutOfBounds),
            MutSeqError::InvalidRange { .. } => Some(ErrorCode::InvalidRange),
            MutSeqError::NonAdjacentInsertion { .. } => Some(ErrorCode::NonAdjacentInsertion),
            MutSeqError::ReferenceMismatch { .. } => Some(ErrorCode::ReferenceMismatch),
            MutSeqError::InvalidSequence { .. } => Some(ErrorCode::InvalidSymbol),
            MutSeqError::UnrecognizedDescriptor { .. } => Some(ErrorCode::UnrecognizedDescriptor),
            MutSeqError::Io { .. } => Some(ErrorCode::IoError),
            MutSeqError::Json { .. } => Some(ErrorCode::JsonError),
            MutSeqError::Csv { .. } => Some(ErrorCode::CsvError),
        }
    }

    /// Get a formatted error with full diagnostic output
    pub fn detailed_message(&self) -> String {
        match self {
            MutSeqError::Parse {
                pos,
                msg,
                diagnostic: Some(d),
            } => d.format(&format!("Parse error at position {}: {}", pos, msg)),
            _ => self.to_string(),
        }
    }
}

impl From<std::io::Error> for MutSeqError {
    fn from(err: std::io::Error) -> Self {
        MutSeqError::Io {
            msg: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for MutSeqError {
    fn from(err: serde_json::Error) -> Self {
        MutSeqError::Json {
            msg: err.to_string(),
        }
    }
}

impl From<csv::Error> for MutSeqError {
    fn from(err: csv::Error) -> Self {
        MutSeqError::Csv {
            msg: err.to_string(),
        }
    }
}
