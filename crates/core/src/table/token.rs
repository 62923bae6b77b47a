use serde::{Deserialize, Serialize};
use gridcipher_diagnostics::Span;

/// One unit of a tabular document: the text of a cell, or the end of a row.
///
/// Row boundaries are a dedicated variant rather than a magic string, so no
/// cell text can ever be mistaken for a boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellToken {
    /// Trimmed text content of a single cell.
    Text {
        /// Cell text with surrounding whitespace removed.
        text: String,
        /// Byte span of the cell in the source document, if known.
        #[serde(skip_serializing_if = "Option::is_none", default)]
        span: Option<Span>,
    },
    /// End of a table row.
    RowEnd,
}

impl CellToken {
    /// A text token with no source position.
    pub fn text(text: impl Into<String>) -> Self {
        CellToken::Text {
            text: text.into(),
            span: None,
        }
    }

    /// A text token located at `span` in the source document.
    pub fn text_at(text: impl Into<String>, span: Span) -> Self {
        CellToken::Text {
            text: text.into(),
            span: Some(span),
        }
    }

    /// Cell text, or `None` for a row boundary.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellToken::Text { text, .. } => Some(text),
            CellToken::RowEnd => None,
        }
    }

    /// Source span of a text token.
    pub fn span(&self) -> Option<Span> {
        match self {
            CellToken::Text { span, .. } => *span,
            CellToken::RowEnd => None,
        }
    }
}
