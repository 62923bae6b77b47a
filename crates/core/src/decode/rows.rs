use std::collections::BTreeMap;

use gridcipher_diagnostics::{Diagnostic, Span, codes};

use super::record::{PositionRecord, RecordError};
use crate::config::DecoderConfig;
use crate::table::token::CellToken;

/// Shorthand for building a `BTreeMap<String, String>` context from key-value pairs.
macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        BTreeMap::from([$(($k.into(), $v.into())),+])
    };
}

/// Records recovered from a token stream, plus a note for every dropped row.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct GroupedRows {
    /// Valid records, in the order their rows appeared.
    pub records: Vec<PositionRecord>,
    /// One informational diagnostic per dropped row.
    pub diagnostics: Vec<Diagnostic>,
}

/// Group a token stream into rows and parse each three-cell row.
///
/// Malformed rows are dropped without signalling the caller.
pub fn group_rows(tokens: &[CellToken], config: &DecoderConfig) -> Vec<PositionRecord> {
    group_rows_with_diagnostics(tokens, config).records
}

/// Like [`group_rows`], also reporting why each dropped row was dropped.
pub fn group_rows_with_diagnostics(tokens: &[CellToken], config: &DecoderConfig) -> GroupedRows {
    RowGrouper::new(config).run(tokens)
}

struct RowGrouper<'a> {
    config: &'a DecoderConfig,
    buf: Vec<&'a str>,
    span: Option<Span>,
    /// 0-based index of the row being accumulated.
    row: usize,
    out: GroupedRows,
}

impl<'a> RowGrouper<'a> {
    fn new(config: &'a DecoderConfig) -> Self {
        Self {
            config,
            buf: Vec::with_capacity(3),
            span: None,
            row: 0,
            out: GroupedRows::default(),
        }
    }

    fn run(mut self, tokens: &'a [CellToken]) -> GroupedRows {
        for tok in tokens {
            match tok {
                CellToken::RowEnd => self.finish_row(true),
                CellToken::Text { text, span } => {
                    if text.is_empty() || self.config.is_header(text) {
                        continue;
                    }
                    self.buf.push(text);
                    if let Some(s) = span {
                        self.span = Some(self.span.map_or(*s, |cur| cur.cover(*s)));
                    }
                }
            }
        }
        // A final row may lack its boundary marker; only a complete one counts.
        if self.buf.len() == 3 {
            self.finish_row(false);
        }
        log::debug!(
            "grouped {} records from {} tokens ({} rows dropped)",
            self.out.records.len(),
            tokens.len(),
            self.out.diagnostics.len()
        );
        self.out
    }

    fn finish_row(&mut self, terminated: bool) {
        let span = self.span.take();
        let row = self.row;
        self.row += 1;

        let cells = std::mem::take(&mut self.buf);
        match cells.as_slice() {
            [] => {}
            &[a, b, c] => match PositionRecord::from_fields(
                [a, b, c],
                self.config.column_order,
                self.config.max_coordinate,
            ) {
                Ok(rec) => self.out.records.push(rec),
                Err(err) => self.drop_invalid(row, span, err),
            },
            other => {
                log::trace!("row {row}: dropped, {} cells", other.len());
                self.out.diagnostics.push(
                    Diagnostic::info(
                        codes::ROW_ARITY,
                        format!("row has {} cells, expected 3; dropped", other.len()),
                        span,
                    )
                    .with_context(ctx!(
                        "row" => row.to_string(),
                        "cells" => other.len().to_string(),
                        "terminated" => terminated.to_string(),
                    )),
                );
            }
        }
        self.buf = cells;
        self.buf.clear();
    }

    fn drop_invalid(&mut self, row: usize, span: Option<Span>, err: RecordError) {
        log::trace!("row {row}: dropped, {err}");
        let (id, context): (&'static str, BTreeMap<String, String>) = match &err {
            RecordError::BadCoordinate { axis, value } => (
                codes::BAD_COORDINATE,
                ctx!("row" => row.to_string(), "axis" => axis.to_string(), "value" => value.clone()),
            ),
            RecordError::CoordinateTooLarge { axis, value, max } => (
                codes::COORDINATE_TOO_LARGE,
                ctx!(
                    "row" => row.to_string(),
                    "axis" => axis.to_string(),
                    "value" => value.to_string(),
                    "max" => max.to_string(),
                ),
            ),
            RecordError::BadGlyph { value } => (
                codes::BAD_GLYPH,
                ctx!("row" => row.to_string(), "value" => value.clone()),
            ),
        };
        self.out.diagnostics.push(
            Diagnostic::info(id, format!("{err}; row dropped"), span).with_context(context),
        );
    }
}
