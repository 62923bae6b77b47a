//! Decoder configuration.

use serde::{Deserialize, Serialize};

/// Header literals of the published coordinate table.
pub const DEFAULT_HEADER_LABELS: [&str; 3] = ["x-coordinate", "Character", "y-coordinate"];

/// Positional meaning of the three cells in a table row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnOrder {
    /// `(x, character, y)`: the order of the upstream table headers.
    #[default]
    #[serde(rename = "x-char-y")]
    XCharY,
    /// `(character, x, y)`.
    #[serde(rename = "char-x-y")]
    CharXY,
}

impl ColumnOrder {
    /// Indices of `(character, x, y)` within a three-cell row.
    pub fn indices(self) -> (usize, usize, usize) {
        match self {
            ColumnOrder::XCharY => (1, 0, 2),
            ColumnOrder::CharXY => (0, 1, 2),
        }
    }
}

/// Settings for grouping rows and building the grid.
///
/// Defaults match the published puzzle document:
/// - `column_order`: x, character, y
/// - `header_labels`: the three column headers, filtered wherever they appear
/// - `blank`: space
/// - `max_coordinate`: none (any coordinate that fits in `u32` is kept)
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// How the three cells of a row map onto a position record.
    pub column_order: ColumnOrder,
    /// Cell texts treated as column headers and removed from every row.
    pub header_labels: Vec<String>,
    /// Fill character for grid cells no record covers.
    pub blank: char,
    /// Largest accepted x or y coordinate, if capped. Rows beyond it are dropped.
    pub max_coordinate: Option<u32>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            column_order: ColumnOrder::default(),
            header_labels: DEFAULT_HEADER_LABELS.iter().map(|s| s.to_string()).collect(),
            blank: ' ',
            max_coordinate: None,
        }
    }
}

impl DecoderConfig {
    /// Set the column order (builder pattern).
    pub fn with_column_order(mut self, order: ColumnOrder) -> Self {
        self.column_order = order;
        self
    }

    /// Set the blank fill character (builder pattern).
    pub fn with_blank(mut self, blank: char) -> Self {
        self.blank = blank;
        self
    }

    /// Cap the accepted coordinates at `max` (builder pattern).
    pub fn with_max_coordinate(mut self, max: u32) -> Self {
        self.max_coordinate = Some(max);
        self
    }

    /// Whether `text` is one of the configured header labels.
    pub fn is_header(&self, text: &str) -> bool {
        self.header_labels.iter().any(|h| h == text)
    }
}
