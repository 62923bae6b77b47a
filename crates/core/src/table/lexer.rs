//! HTML table lexer.
//!
//! Produces the flat [`CellToken`] stream the decoder consumes. Only the
//! table structure matters here: `<td>`/`<th>` open and close cells and
//! `</tr>` ends a row. Every other tag is skipped, but the text inside it is
//! kept when it sits within an open cell. This is deliberately not a general
//! HTML parser.

use std::borrow::Cow;

use gridcipher_diagnostics::Span;

use super::token::CellToken;

/// A cell whose closing tag has not been seen yet.
struct OpenCell {
    /// Byte offset of the `<` of the opening tag.
    start: usize,
    text: String,
}

/// Tokenize every table in `html` into cell text and row boundaries.
///
/// Cell text is entity-decoded and trimmed. A [`CellToken::RowEnd`] is
/// emitted at each `</tr>` once at least one token has been produced, so
/// leading empty rows never yield a boundary. Cells carry the byte span
/// of the whole `<td>...</td>` element.
pub fn tokenize_tables(html: &str) -> Vec<CellToken> {
    let b = html.as_bytes();
    let mut toks = Vec::new();
    let mut cell: Option<OpenCell> = None;
    let mut i = 0usize;

    while i < b.len() {
        if b[i] != b'<' {
            // Text run up to the next tag.
            let start = i;
            while i < b.len() && b[i] != b'<' {
                i += 1;
            }
            if let Some(open) = cell.as_mut() {
                open.text.push_str(&decode_entities(&html[start..i]));
            }
            continue;
        }

        if html[i..].starts_with("<!--") {
            i = match html[i + 4..].find("-->") {
                Some(off) => i + 4 + off + 3,
                None => b.len(),
            };
            continue;
        }

        if !looks_like_tag(b, i) {
            // A bare '<' in text, e.g. "x < 5".
            if let Some(open) = cell.as_mut() {
                open.text.push('<');
            }
            i += 1;
            continue;
        }

        let Some(close) = find_tag_end(b, i + 1) else {
            // Unterminated tag: nothing after it can be structure.
            break;
        };
        let (is_end, name) = tag_name(&html[i + 1..close]);
        let self_closing = html[..close].ends_with('/');

        match (is_end, name.as_str()) {
            (false, "td" | "th") => {
                cell = Some(OpenCell {
                    start: i,
                    text: String::new(),
                });
            }
            (true, "td" | "th") => {
                if let Some(open) = cell.take() {
                    toks.push(CellToken::text_at(
                        open.text.trim(),
                        Span::new(open.start, close + 1),
                    ));
                }
            }
            (true, "tr") => {
                if !toks.is_empty() {
                    toks.push(CellToken::RowEnd);
                }
            }
            (false, "script" | "style") if !self_closing => {
                i = skip_raw_text(html, close + 1, &name);
                continue;
            }
            _ => {}
        }
        i = close + 1;
    }

    log::debug!("lexed {} table tokens from {} bytes", toks.len(), html.len());
    toks
}

/// `<` at `i` starts markup only when followed by a letter, `/`, `!` or `?`.
fn looks_like_tag(b: &[u8], i: usize) -> bool {
    match b.get(i + 1) {
        Some(c) if c.is_ascii_alphabetic() => true,
        Some(b'!' | b'?') => true,
        Some(b'/') => b.get(i + 2).is_some_and(|c| c.is_ascii_alphabetic()),
        _ => false,
    }
}

/// Find the `>` that closes a tag, skipping quoted attribute values.
fn find_tag_end(b: &[u8], from: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (off, &c) in b[from..].iter().enumerate() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == b'"' || c == b'\'' => quote = Some(c),
            None if c == b'>' => return Some(from + off),
            None => {}
        }
    }
    None
}

/// Split tag source (between `<` and `>`) into (is_end_tag, lowercase name).
fn tag_name(src: &str) -> (bool, String) {
    let (is_end, rest) = match src.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, src),
    };
    let name: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    (is_end, name)
}

/// Return the offset of the `</name` that ends a raw-text element, or the
/// end of input when it is never closed.
fn skip_raw_text(html: &str, from: usize, name: &str) -> usize {
    let b = html.as_bytes();
    let needle_len = name.len() + 2;
    let mut i = from;
    while i + needle_len <= b.len() {
        if b[i] == b'<'
            && b[i + 1] == b'/'
            && b[i + 2..i + needle_len].eq_ignore_ascii_case(name.as_bytes())
        {
            return i;
        }
        i += 1;
    }
    b.len()
}

/// Decode HTML character references. Unknown references are kept verbatim.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail.find(';').and_then(|semi| {
            // Reject far-away semicolons: "&" followed by ordinary prose.
            if semi > 10 {
                return None;
            }
            resolve_entity(&tail[1..semi]).map(|ch| (ch, semi))
        }) {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn resolve_entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => None,
    }
}
