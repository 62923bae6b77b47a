//! gridcipher core library.
//!
//! Decodes a message hidden in a published coordinate table. An HTML table
//! of `(x, character, y)` rows is lexed into [`CellToken`]s, grouped into
//! [`PositionRecord`]s, placed on a dense [`Grid`], and read back as the
//! uppercase letters in reading order. The main entry points are
//! [`decode_tokens`] for an existing token stream, [`decode_html`] for a
//! document string, and [`decode_document`] for a [`DocumentSource`].

#![warn(missing_docs)]

/// Decoder configuration.
pub mod config;
/// Row grouping, grid building, and message extraction.
pub mod decode;
/// Document sources and their errors.
pub mod source;
/// HTML table lexing into cell tokens.
pub mod table;

// ── Convenience re-exports ──────────────────────────────────────────────────

// Config
pub use config::{ColumnOrder, DecoderConfig};

// Pipeline
pub use decode::grid::{Grid, build_grid, build_grid_with_blank, fits_in_memory, grid_extent};
pub use decode::message::extract_message;
pub use decode::record::{PositionRecord, RecordError};
pub use decode::rows::{GroupedRows, group_rows, group_rows_with_diagnostics};
pub use decode::{Decoded, decode_html, decode_tokens};

// Tokens
pub use table::lexer::tokenize_tables;
pub use table::token::CellToken;

// Sources
pub use source::{
    Document, DocumentSource, FileSource, ReaderSource, SourceError, decode_document,
};

// Diagnostics (re-exported from the diagnostics crate)
pub use gridcipher_diagnostics::{Diagnostic, Severity, Span, codes};
