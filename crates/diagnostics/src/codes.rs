//! Diagnostic ID constants.
//!
//! Use these instead of string literals to get compile-time typo detection
//! and IDE autocomplete.

/// A table row held a cell count other than three and was dropped.
pub const ROW_ARITY: &str = "GRD1001";
/// A coordinate cell was not a non-negative integer.
pub const BAD_COORDINATE: &str = "GRD1002";
/// The character cell did not hold exactly one character.
pub const BAD_GLYPH: &str = "GRD1003";
/// A coordinate exceeded the configured maximum, or did not fit in 32 bits.
pub const COORDINATE_TOO_LARGE: &str = "GRD1004";
/// Two records targeted the same grid cell; the later one won.
pub const CELL_OVERWRITTEN: &str = "GRD1101";
/// No valid records were found, so the grid is empty.
pub const EMPTY_GRID: &str = "GRD2001";
/// The document was not valid UTF-8; invalid bytes were replaced.
pub const INVALID_UTF8: &str = "GRD2002";
/// The records span a grid too large to allocate, so no grid was built.
pub const GRID_TOO_LARGE: &str = "GRD2003";

/// Every known code, in numeric order.
pub const ALL: &[&str] = &[
    ROW_ARITY,
    BAD_COORDINATE,
    BAD_GLYPH,
    COORDINATE_TOO_LARGE,
    CELL_OVERWRITTEN,
    EMPTY_GRID,
    INVALID_UTF8,
    GRID_TOO_LARGE,
];
