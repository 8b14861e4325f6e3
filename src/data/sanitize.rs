//! Post text cleaning.
//!
//! The raw text column of the processed dataset is inconsistent: some cells
//! hold a stringified one-element list (`['…']`), some hold a byte-string
//! repr (`b'…'`) with escape sequences, and most carry HTML entities from the
//! upstream API. [`clean`] runs four named stages in order:
//!
//! ```text
//!  list-literal unwrap → byte-literal unwrap → entity decode → whitespace normalize
//! ```
//!
//! Every stage is total: when its precondition does not hold it returns the
//! input unchanged, and when decoding fails it falls back instead of erroring.

use std::borrow::Cow;

/// Clean one raw text cell. `None` (an empty / null cell) yields `""`.
pub fn clean(raw: Option<&str>) -> String {
    let Some(text) = raw else {
        return String::new();
    };

    let text = unwrap_list_literal(text);
    let text = unwrap_byte_literal(&text);
    let text = decode_entities(&text);
    normalize_whitespace(&text)
}

// ---------------------------------------------------------------------------
// Stage 1: list literal
// ---------------------------------------------------------------------------

/// `['a']` / `["a"]` → `a`. A multi-element literal keeps only its first
/// element.
fn unwrap_list_literal(text: &str) -> Cow<'_, str> {
    let wrapped = (text.starts_with("['") && text.ends_with("']"))
        || (text.starts_with("[\"") && text.ends_with("\"]"));
    if !wrapped {
        return Cow::Borrowed(text);
    }
    if text.len() < 4 {
        // `[']` and friends: prefix and suffix overlap.
        return Cow::Borrowed("");
    }

    let inner = &text[2..text.len() - 2];
    // Only single quotes separate elements; a `["…"]` wrapper adds none.
    let quotes = text.matches('\'').count();
    if !inner.contains(',') || quotes <= 2 {
        return Cow::Borrowed(inner);
    }

    let first = inner.split("',").next().unwrap_or(inner).trim();
    let first = first.strip_prefix(['\'', '"']).unwrap_or(first);
    let first = first.strip_suffix(['\'', '"']).unwrap_or(first);
    Cow::Owned(first.to_string())
}

// ---------------------------------------------------------------------------
// Stage 2: byte literal
// ---------------------------------------------------------------------------

/// `b'caf\xc3\xa9'` → `café`.
fn unwrap_byte_literal(text: &str) -> Cow<'_, str> {
    let (body, quote) = if let Some(rest) = text.strip_prefix("b'") {
        (rest, '\'')
    } else if let Some(rest) = text.strip_prefix("b\"") {
        (rest, '"')
    } else {
        return Cow::Borrowed(text);
    };
    let body = body.strip_suffix(quote).unwrap_or(body);

    if let Some(decoded) = decode_escaped_bytes(body) {
        return Cow::Owned(decoded);
    }

    // Characters outside Latin-1: the body was never a byte string.
    let spaced = body
        .replace("\\n", " ")
        .replace("\\t", " ")
        .replace("\\r", " ");
    match reinterpret_latin1(&spaced) {
        Some(decoded) => Cow::Owned(decoded),
        None => Cow::Owned(spaced),
    }
}

/// Decode a byte-string literal body into bytes, then into UTF-8 text.
///
/// Returns `None` when the body holds a character that cannot be one byte.
fn decode_escaped_bytes(body: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            bytes.push(latin1_byte(c)?);
            continue;
        }
        match chars.peek().copied() {
            Some('n') => {
                chars.next();
                bytes.push(b'\n');
            }
            Some('t') => {
                chars.next();
                bytes.push(b'\t');
            }
            Some('r') => {
                chars.next();
                bytes.push(b'\r');
            }
            Some(q @ ('\\' | '\'' | '"')) => {
                chars.next();
                bytes.push(q as u8);
            }
            Some('x') => {
                let mut lookahead = chars.clone();
                lookahead.next();
                let hex: String = lookahead.by_ref().take(2).collect();
                let well_formed = hex.len() == 2 && hex.chars().all(|c| c.is_ascii_hexdigit());
                match u8::from_str_radix(&hex, 16) {
                    Ok(b) if well_formed => {
                        bytes.push(b);
                        chars = lookahead;
                    }
                    // Malformed `\x`: keep the backslash as text.
                    _ => bytes.push(b'\\'),
                }
            }
            _ => bytes.push(b'\\'),
        }
    }

    Some(utf8_discarding_invalid(&bytes))
}

/// Treat each char as one Latin-1 byte and decode the bytes as UTF-8.
fn reinterpret_latin1(text: &str) -> Option<String> {
    let bytes = text.chars().map(latin1_byte).collect::<Option<Vec<u8>>>()?;
    Some(utf8_discarding_invalid(&bytes))
}

fn latin1_byte(c: char) -> Option<u8> {
    u8::try_from(u32::from(c)).ok()
}

fn utf8_discarding_invalid(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

// ---------------------------------------------------------------------------
// Stage 3: HTML entities
// ---------------------------------------------------------------------------

const ENTITIES: [(&str, char); 3] = [("&amp;", '&'), ("&lt;", '<'), ("&gt;", '>')];

/// Single left-to-right pass; output of one replacement is never rescanned,
/// so `&amp;lt;` becomes `&lt;`.
fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
            Some((entity, decoded)) => {
                out.push(*decoded);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

// ---------------------------------------------------------------------------
// Stage 4: whitespace
// ---------------------------------------------------------------------------

fn normalize_whitespace(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c.is_control())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
