use serde::{Deserialize, Serialize};

use crate::config::ColumnOrder;

/// A validated glyph placement: one character at `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRecord {
    /// The character to place.
    pub glyph: char,
    /// Column, counted from the left edge.
    pub x: u32,
    /// Row, counted from the top edge.
    pub y: u32,
}

/// Which coordinate a parse failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal coordinate.
    X,
    /// Vertical coordinate.
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Why a three-cell row could not become a [`PositionRecord`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// A coordinate cell was not a non-negative integer.
    #[error("{axis} coordinate {value:?} is not a non-negative integer")]
    BadCoordinate {
        /// The offending axis.
        axis: Axis,
        /// The cell text.
        value: String,
    },
    /// A coordinate exceeded the configured maximum, or `u32::MAX` without one.
    #[error("{axis} coordinate {value} exceeds the maximum of {max}")]
    CoordinateTooLarge {
        /// The offending axis.
        axis: Axis,
        /// The cell text, trimmed.
        value: String,
        /// The effective maximum.
        max: u32,
    },
    /// The character cell held zero or several characters.
    #[error("character cell {value:?} is not a single character")]
    BadGlyph {
        /// The cell text.
        value: String,
    },
}

impl PositionRecord {
    /// Create a record directly.
    pub fn new(glyph: char, x: u32, y: u32) -> Self {
        Self { glyph, x, y }
    }

    /// Parse the three cells of a row, interpreted positionally by `order`.
    pub fn from_fields(
        fields: [&str; 3],
        order: ColumnOrder,
        max_coordinate: Option<u32>,
    ) -> Result<Self, RecordError> {
        let (ci, xi, yi) = order.indices();
        let x = parse_coordinate(fields[xi], Axis::X, max_coordinate)?;
        let y = parse_coordinate(fields[yi], Axis::Y, max_coordinate)?;
        let glyph = single_char(fields[ci]).ok_or_else(|| RecordError::BadGlyph {
            value: fields[ci].to_string(),
        })?;
        Ok(Self { glyph, x, y })
    }
}

fn parse_coordinate(text: &str, axis: Axis, max: Option<u32>) -> Result<u32, RecordError> {
    let trimmed = text.trim();
    // One optional '+' then ASCII digits; no '-', no second sign.
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RecordError::BadCoordinate {
            axis,
            value: text.to_string(),
        });
    }
    let too_large = || RecordError::CoordinateTooLarge {
        axis,
        value: trimmed.to_string(),
        max: max.unwrap_or(u32::MAX),
    };
    let value = digits.parse::<u32>().map_err(|_| too_large())?;
    match max {
        Some(max) if value > max => Err(too_large()),
        _ => Ok(value),
    }
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
