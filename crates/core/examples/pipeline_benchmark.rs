//! Lightweight lex/decode benchmark harness for local baselines.
//!
//! Run from repository root:
//! `cargo run -p gridcipher_core --example pipeline_benchmark --release`

use std::time::Instant;

use gridcipher_core::{DecoderConfig, decode_html, decode_tokens, tokenize_tables};

/// Build a Google-Docs-shaped table covering a `side × side` square.
fn synthetic_document(side: u32) -> String {
    let mut html = String::from(
        "<table><tr><td><p><span>x-coordinate</span></p></td>\
         <td><p><span>Character</span></p></td>\
         <td><p><span>y-coordinate</span></p></td></tr>",
    );
    for y in 0..side {
        for x in 0..side {
            let glyph = if (x + y) % 7 == 0 { '█' } else { '░' };
            html.push_str(&format!(
                "<tr><td><p><span>{x}</span></p></td><td><p><span>{glyph}</span></p></td>\
                 <td><p><span>{y}</span></p></td></tr>"
            ));
        }
    }
    html.push_str("</table>");
    html
}

fn run_benchmark(label: &str, input: &str, iterations: usize) {
    let config = DecoderConfig::default();

    let start = Instant::now();
    let mut token_count = 0usize;
    for _ in 0..iterations {
        token_count = tokenize_tables(input).len();
    }
    let lex = start.elapsed();

    let tokens = tokenize_tables(input);
    let start = Instant::now();
    for _ in 0..iterations {
        let _ = decode_tokens(&tokens, &config);
    }
    let decode = start.elapsed();

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = decode_html(input, &config);
    }
    let total = start.elapsed();

    println!(
        "{label}: bytes={} tokens={token_count} lex={:?}/iter decode={:?}/iter end_to_end={:?}/iter",
        input.len(),
        lex / iterations as u32,
        decode / iterations as u32,
        total / iterations as u32,
    );
}

fn main() {
    for (label, side, iterations) in [("small", 16, 200), ("medium", 96, 20), ("large", 256, 3)] {
        let doc = synthetic_document(side);
        run_benchmark(label, &doc, iterations);
    }
}
