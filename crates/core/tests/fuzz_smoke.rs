//! Fuzz smoke tests for the table lexer and decoder.
//!
//! These tests feed random, adversarial, and edge-case inputs to the lexer
//! and the decoding pipeline to verify they never panic and that basic
//! structural invariants hold on every `Decoded`.
//!
//! No external crate dependencies are used; a simple deterministic PRNG
//! provides reproducible randomness.

use gridcipher_core::{
    CellToken, Decoded, DecoderConfig, Severity, decode_html, decode_tokens, tokenize_tables,
};

// ─── Simple deterministic PRNG (LCG) ────────────────────────────────────────

struct SimpleRng(u64);

impl SimpleRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range(&mut self, max: usize) -> usize {
        ((self.next() >> 33) as usize) % max
    }

    fn gen_bytes(&mut self, len: usize) -> Vec<u8> {
        (0..len).map(|_| (self.next() >> 56) as u8).collect()
    }
}

// ─── Invariant checking ─────────────────────────────────────────────────────

/// Assert structural invariants on any `Decoded`, regardless of input.
fn assert_invariants(out: &Decoded, input_len: usize) {
    let g = &out.grid;
    if out.records.is_empty() {
        assert!(g.is_empty());
    } else {
        let max_x = out.records.iter().map(|r| r.x).max().unwrap() as usize;
        let max_y = out.records.iter().map(|r| r.y).max().unwrap() as usize;
        assert_eq!((g.width(), g.height()), (max_x + 1, max_y + 1));
    }
    assert!(out.message.chars().all(char::is_uppercase));
    assert!(out.message.chars().count() <= g.width() * g.height());

    for diag in &out.diagnostics {
        assert_ne!(diag.severity, Severity::Error, "{diag:?}");
        if let Some(span) = diag.span {
            assert!(span.start <= span.end, "{diag:?}");
            assert!(span.end <= input_len, "span past input end: {diag:?}");
        }
    }
}

/// Keep grids small: concatenated digit runs would otherwise allocate large grids.
fn fuzz_config() -> DecoderConfig {
    DecoderConfig::default().with_max_coordinate(256)
}

fn fuzz_html(input: &str) {
    let toks = tokenize_tables(input);
    for t in &toks {
        if let Some(span) = t.span() {
            assert!(span.end <= input.len());
            assert!(input.is_char_boundary(span.start) && input.is_char_boundary(span.end));
        }
    }
    let out = decode_html(input, &fuzz_config());
    assert_invariants(&out, input.len());
}

// ═══════════════════════════════════════════════════════════════════════════════
// Random inputs
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn lexer_no_panic_random_bytes() {
    let mut rng = SimpleRng::new(0xDEAD_BEEF);
    for len in [0, 1, 2, 5, 10, 50, 100, 500, 1000, 5000] {
        for _ in 0..20 {
            let bytes = rng.gen_bytes(len);
            let input = String::from_utf8_lossy(&bytes);
            fuzz_html(&input);
        }
    }
}

#[test]
fn decoder_no_panic_random_table_markup() {
    let mut rng = SimpleRng::new(0xBAAD_F00D);
    let pieces: &[&str] = &[
        "<tr>", "</tr>", "<td>", "</td>", "<th>", "</th>", "<p>", "</p>", "<!--", "-->", "<script>",
        "</script>", "&amp;", "&#65;", "&#x;", "&", "<", ">", "\"", "0", "1", "12", "A", "b", " ",
        "\n", "x-coordinate", "█",
    ];
    for len in [1, 5, 20, 100, 500] {
        for _ in 0..30 {
            let s: String = (0..len)
                .map(|_| pieces[rng.gen_range(pieces.len())])
                .collect();
            fuzz_html(&s);
        }
    }
}

#[test]
fn decoder_no_panic_random_token_streams() {
    let mut rng = SimpleRng::new(0x1234_5678);
    let cells: &[&str] = &["0", "3", "17", "-1", "A", "z", "AB", "", "Character", "257"];
    for len in [0, 1, 3, 4, 10, 100, 400] {
        for _ in 0..30 {
            let tokens: Vec<CellToken> = (0..len)
                .map(|_| match rng.gen_range(5) {
                    0 => CellToken::RowEnd,
                    _ => CellToken::text(cells[rng.gen_range(cells.len())]),
                })
                .collect();
            let out = decode_tokens(&tokens, &fuzz_config());
            assert_invariants(&out, 0);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Adversarial markup
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn lexer_no_panic_adversarial_markup() {
    let cases = [
        "<",
        "</",
        "<td",
        "<td>",
        "</td>",
        "</tr>",
        "<!--",
        "<!---->",
        "<td title='>'>1</td>",
        "<td title=\"unterminated>",
        "<script>",
        "<script></scrip",
        "<style/>x",
        "&",
        "&#",
        "&#x110000;",
        "&#99999999999;",
        "<td>&#xD800;</td></tr>",
        "<tr><td>€</td><td>€€</td><td>€</td></tr>",
        "<td><td><td></td></td></td></tr>",
    ];
    for case in cases {
        fuzz_html(case);
    }
}
