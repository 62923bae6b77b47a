//! Diagnostics for the gridcipher decoder.
//!
//! Provides [`Diagnostic`], [`Severity`] and [`Span`] types used to report
//! rows the decoder dropped, cells it overwrote, and other recoverable
//! conditions. None of these are fatal: the decoder always returns a result,
//! even when an error diagnostic means its grid had to stay empty.
//! Diagnostic codes are defined in the [`codes`] module.

#![warn(missing_docs)]

/// Diagnostic ID constants.
pub mod codes;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    /// Error: part of the output could not be produced.
    Error,
    /// Warning: the output may not be what the document author intended.
    Warn,
    /// Informational note.
    Info,
}

/// Byte span in the source document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the first character (0-based).
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Span {
    /// Create a span covering `[start, end)`.
    ///
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(end >= start, "Span end ({end}) < start ({start})");
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn cover(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A diagnostic message produced while decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Unique diagnostic code (e.g., `"GRD1001"`).
    pub id: Cow<'static, str>,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable diagnostic message.
    pub message: String,
    /// Byte span in the source document, when the input came from one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Machine-readable context for tooling. Keys and values are free-form strings.
    ///
    /// Uses `BTreeMap` for deterministic key ordering in serialized output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
}

impl Diagnostic {
    /// Create a diagnostic with the given fields.
    pub fn new(
        id: impl Into<Cow<'static, str>>,
        severity: Severity,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            message: message.into(),
            span,
            context: None,
        }
    }

    /// Shorthand for an `Error` diagnostic.
    pub fn error(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Error, message, span)
    }

    /// Shorthand for a `Warn` diagnostic.
    pub fn warn(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Warn, message, span)
    }

    /// Shorthand for an `Info` diagnostic.
    pub fn info(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Info, message, span)
    }

    /// Attach machine-readable context metadata (builder pattern).
    ///
    /// Keys are short descriptors like `"row"`, `"cells"`, `"value"`.
    pub fn with_context(mut self, ctx: BTreeMap<String, String>) -> Self {
        self.context = Some(ctx);
        self
    }

    /// Returns the human-readable explanation for this diagnostic's code, if available.
    pub fn explain(&self) -> Option<&'static str> {
        explain(&self.id)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warn => write!(f, "warn"),
            Severity::Info => write!(f, "info"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.id, self.message)
    }
}

/// Returns the human-readable explanation for a diagnostic code, if known.
pub fn explain(id: &str) -> Option<&'static str> {
    match id {
        codes::ROW_ARITY => Some(
            "A table row must hold exactly three cells (x-coordinate, character, \
             y-coordinate) once header labels and empty cells are removed. Rows with \
             any other cell count are dropped.",
        ),
        codes::BAD_COORDINATE => Some(
            "A coordinate cell must contain a non-negative integer. Rows with negative \
             or non-numeric coordinates are dropped.",
        ),
        codes::BAD_GLYPH => Some(
            "The character cell must contain exactly one character. Rows whose \
             character cell holds several characters are dropped.",
        ),
        codes::COORDINATE_TOO_LARGE => Some(
            "A coordinate exceeded max_coordinate, or did not fit in 32 bits when no \
             maximum is configured. The row is dropped. Set max_coordinate to keep a \
             stray value from forcing a huge grid allocation.",
        ),
        codes::CELL_OVERWRITTEN => Some(
            "Two rows placed a character at the same grid position. The row that \
             appears later in the document wins.",
        ),
        codes::EMPTY_GRID => Some(
            "The document contained no valid position rows, so the grid and the \
             decoded message are empty. Check that the input is the published \
             document and that the column order matches its table headers.",
        ),
        codes::INVALID_UTF8 => Some(
            "The document contained bytes that are not valid UTF-8. Each invalid \
             sequence was replaced with U+FFFD and decoding continued. The span points \
             at the first replacement.",
        ),
        codes::GRID_TOO_LARGE => Some(
            "The largest coordinates describe a grid that cannot be allocated, so the \
             grid and the message are left empty. Remove the stray rows or set \
             max_coordinate to drop them.",
        ),
        _ => None,
    }
}
