//! Grid decoding: token rows to position records to grid to message.
//!
//! Each stage is a pure function. [`decode_tokens`] runs them in order and
//! collects the diagnostics of every stage; nothing in this module fails.
//! A grid too large to allocate is reported as an error diagnostic and
//! left empty.

/// Dense character grid and its construction.
pub mod grid;
/// Uppercase message extraction.
pub mod message;
/// Position records parsed from table rows.
pub mod record;
/// Grouping of cell tokens into rows.
pub mod rows;

use gridcipher_diagnostics::{Diagnostic, codes};
use serde::Serialize;

use crate::config::DecoderConfig;
use crate::table::{lexer::tokenize_tables, token::CellToken};
use grid::{Grid, build_grid_tracking, fits_in_memory, grid_extent};
use message::extract_message;
use record::PositionRecord;
use rows::group_rows_with_diagnostics;

/// Everything one decoding pass produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decoded {
    /// Valid records, in document order.
    pub records: Vec<PositionRecord>,
    /// The reconstructed grid.
    pub grid: Grid,
    /// Uppercase letters of the grid in reading order.
    pub message: String,
    /// Notes about dropped rows, overwritten cells, and empty results.
    pub diagnostics: Vec<Diagnostic>,
}

/// Run the full pipeline over an already tokenized table.
pub fn decode_tokens(tokens: &[CellToken], config: &DecoderConfig) -> Decoded {
    let rows = group_rows_with_diagnostics(tokens, config);
    let mut diagnostics = rows.diagnostics;
    let records = rows.records;

    let (grid, overwrites) = match grid_extent(&records) {
        Some((width, height)) if !fits_in_memory(width, height) => {
            log::warn!("refusing to allocate a {width}x{height} grid");
            diagnostics.push(
                Diagnostic::error(
                    codes::GRID_TOO_LARGE,
                    format!("a {width}x{height} grid does not fit in memory; grid left empty"),
                    None,
                )
                .with_context(std::collections::BTreeMap::from([
                    ("width".into(), width.to_string()),
                    ("height".into(), height.to_string()),
                ])),
            );
            (Grid::empty(), Vec::new())
        }
        _ => build_grid_tracking(&records, config.blank),
    };
    for idx in overwrites {
        let rec = records[idx];
        diagnostics.push(
            Diagnostic::warn(
                codes::CELL_OVERWRITTEN,
                format!(
                    "cell ({}, {}) written more than once; keeping {:?}",
                    rec.x, rec.y, rec.glyph
                ),
                None,
            )
            .with_context(std::collections::BTreeMap::from([
                ("record".into(), idx.to_string()),
                ("x".into(), rec.x.to_string()),
                ("y".into(), rec.y.to_string()),
            ])),
        );
    }

    if records.is_empty() {
        diagnostics.push(Diagnostic::info(
            codes::EMPTY_GRID,
            "no valid position rows found; grid is empty",
            None,
        ));
    }

    let message = extract_message(&grid);
    log::debug!("decoded message of {} letters", message.chars().count());

    Decoded {
        records,
        grid,
        message,
        diagnostics,
    }
}

/// Tokenize the tables of an HTML document and decode them.
pub fn decode_html(html: &str, config: &DecoderConfig) -> Decoded {
    decode_tokens(&tokenize_tables(html), config)
}
