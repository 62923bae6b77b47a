//! End-to-end properties of the decoder: token grouping, grid building, and
//! message extraction working together.

mod common;

use common::{html_table, toks};
use gridcipher_core::{
    ColumnOrder, DecoderConfig, Grid, PositionRecord, Severity, build_grid, codes, decode_html,
    decode_tokens, extract_message, group_rows, group_rows_with_diagnostics,
};

#[test]
fn tokens_without_sentinels_yield_no_records() {
    let cfg = DecoderConfig::default();
    assert!(group_rows(&toks(&[]), &cfg).is_empty());
    assert!(group_rows(&toks(&["1", "A"]), &cfg).is_empty());
}

#[test]
fn one_well_formed_row_yields_one_record() {
    let recs = group_rows(&toks(&["4", "m", "9", "|"]), &DecoderConfig::default());
    assert_eq!(recs, [PositionRecord::new('m', 4, 9)]);
}

#[test]
fn row_with_non_integer_coordinate_contributes_nothing() {
    let recs = group_rows(&toks(&["4", "m", "nine", "|"]), &DecoderConfig::default());
    assert!(recs.is_empty());
}

#[test]
fn build_grid_two_by_two() {
    let g = build_grid(&[
        PositionRecord::new('A', 0, 0),
        PositionRecord::new('B', 1, 0),
        PositionRecord::new('C', 0, 1),
    ]);
    assert_eq!(g.rows().collect::<Vec<_>>(), ["AB", "C "]);
}

#[test]
fn extract_message_reads_in_row_major_order() {
    let g = Grid::from_rows(&["AbC ", "dEf "], ' ');
    assert_eq!(extract_message(&g), "ACE");
}

#[test]
fn extract_message_without_uppercase_is_empty() {
    let g = Grid::from_rows(&["lower", "12345"], ' ');
    assert_eq!(extract_message(&g), "");
}

#[test]
fn build_then_extract_is_idempotent() {
    let records = [
        PositionRecord::new('Z', 5, 2),
        PositionRecord::new('y', 0, 0),
        PositionRecord::new('X', 1, 1),
    ];
    let first = extract_message(&build_grid(&records));
    let second = extract_message(&build_grid(&records));
    assert_eq!(first, second);
    assert_eq!(first, "XZ");
}

#[test]
fn end_to_end_token_stream() {
    let out = decode_tokens(
        &toks(&["0", "A", "0", "|", "1", "B", "0", "|"]),
        &DecoderConfig::default(),
    );
    assert_eq!(out.grid.rows().collect::<Vec<_>>(), ["AB"]);
    assert_eq!(out.message, "AB");
}

#[test]
fn end_to_end_html_with_headers() {
    let mut html = String::from(
        "<table><tr><th>x-coordinate</th><th>Character</th><th>y-coordinate</th></tr></table>",
    );
    html.push_str(&html_table(&[("1", "I", "0"), ("0", "H", "0"), ("2", "!", "0")]));
    let out = decode_html(&html, &DecoderConfig::default());
    assert_eq!(out.grid.to_string(), "HI!");
    assert_eq!(out.message, "HI");
    assert!(out.diagnostics.is_empty(), "{:?}", out.diagnostics);
}

#[test]
fn char_x_y_order_reads_the_other_layout() {
    let cfg = DecoderConfig::default().with_column_order(ColumnOrder::CharXY);
    let out = decode_tokens(&toks(&["O", "1", "0", "|", "K", "0", "0", "|"]), &cfg);
    assert_eq!(out.message, "KO");
}

#[test]
fn wrong_order_drops_every_row_but_never_fails() {
    // x-char-y data read as char-x-y: "0" is a glyph, "A" is not a coordinate.
    let cfg = DecoderConfig::default().with_column_order(ColumnOrder::CharXY);
    let out = decode_tokens(&toks(&["0", "A", "0", "|", "1", "B", "0", "|"]), &cfg);
    assert!(out.grid.is_empty());
    assert_eq!(out.message, "");
    assert!(out.diagnostics.iter().all(|d| d.severity != Severity::Error));
    assert_eq!(out.diagnostics.last().unwrap().id, codes::EMPTY_GRID);
}

#[test]
fn oversized_coordinates_are_dropped() {
    let cfg = DecoderConfig::default().with_max_coordinate(50);
    let out = group_rows_with_diagnostics(&toks(&["51", "A", "0", "|", "50", "B", "0", "|"]), &cfg);
    assert_eq!(out.records, [PositionRecord::new('B', 50, 0)]);
    assert_eq!(out.diagnostics[0].id, codes::COORDINATE_TOO_LARGE);
}

#[test]
fn default_config_keeps_far_and_plus_signed_coordinates() {
    let cfg = DecoderConfig::default();
    let records = group_rows(&toks(&["5000", "A", "0", "|", "+1", "B", "0", "|"]), &cfg);
    assert_eq!(
        records,
        [PositionRecord::new('A', 5000, 0), PositionRecord::new('B', 1, 0)]
    );
}

#[test]
fn custom_blank_is_used_for_gaps() {
    let cfg = DecoderConfig::default().with_blank('.');
    let out = decode_tokens(&toks(&["2", "Q", "1", "|"]), &cfg);
    assert_eq!(out.grid.to_string(), "...\n..Q");
}

#[test]
fn decoded_serializes_grid_as_rows() {
    let out = decode_tokens(&toks(&["1", "A", "0", "|"]), &DecoderConfig::default());
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["grid"], serde_json::json!([" A"]));
    assert_eq!(json["message"], "A");
    assert_eq!(json["records"][0]["glyph"], "A");
}
