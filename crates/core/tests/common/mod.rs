//! Shared test helpers for `gridcipher_core` integration tests.

#![allow(unreachable_pub)]

use std::path::PathBuf;

use gridcipher_core::CellToken;

/// Build a token stream from shorthand cells; `"|"` marks a row end.
#[allow(dead_code)]
pub fn toks(cells: &[&str]) -> Vec<CellToken> {
    cells
        .iter()
        .map(|c| match *c {
            "|" => CellToken::RowEnd,
            text => CellToken::text(text),
        })
        .collect()
}

/// Render `(x, character, y)` rows as a minimal HTML table.
#[allow(dead_code)]
pub fn html_table(rows: &[(&str, &str, &str)]) -> String {
    let mut out = String::from("<table>");
    for (x, c, y) in rows {
        out.push_str(&format!("<tr><td>{x}</td><td>{c}</td><td>{y}</td></tr>"));
    }
    out.push_str("</table>");
    out
}

/// Directory holding HTML fixtures and their expected output.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}
