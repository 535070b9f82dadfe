//! Line-oriented `key=value` properties text.
//!
//! Implements the classic properties syntax: `#`/`!` comments, `=`, `:`
//! or whitespace separators, backslash line continuation, and the usual
//! escape sequences including `\uXXXX`. Parsing is lenient and never
//! fails; malformed escapes are kept literally and logged.

use tracing::warn;

/// Parse properties text into key/value pairs in file order.
///
/// Duplicate keys are preserved here; folding them (last wins) is the
/// layer's job.
pub fn parse_str(text: &str) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    let mut lines = text.lines();

    while let Some(line) = lines.next() {
        let line = line.trim_start();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        // Join continuation lines: a trailing odd run of backslashes
        // means the entry continues on the next natural line.
        let mut logical = line.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some(next) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        entries.push(split_entry(&logical));
    }

    entries
}

/// True when the logical line ends with an odd number of backslashes.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Split one logical line into a decoded key and value.
///
/// The key ends at the first unescaped `=`, `:` or whitespace run; the
/// separator and its surrounding whitespace are consumed. A line with
/// no separator yields the whole line as a key with an empty value.
fn split_entry(line: &str) -> (String, String) {
    let mut iter = line.char_indices();
    let mut split = None;

    while let Some((idx, c)) = iter.next() {
        match c {
            '\\' => {
                iter.next();
            }
            '=' | ':' => {
                split = Some(idx);
                break;
            }
            c if c.is_whitespace() => {
                split = Some(idx);
                break;
            }
            _ => {}
        }
    }

    match split {
        None => (decode(line), String::new()),
        Some(idx) => {
            let key = decode(&line[..idx]);
            let mut rest = line[idx..].trim_start();
            if let Some(stripped) = rest.strip_prefix(['=', ':']) {
                rest = stripped.trim_start();
            }
            (key, decode(rest))
        }
    }
}

/// Decode backslash escapes in a key or value.
fn decode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            None => break,
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match parse_unicode(&hex) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        warn!(escape = %format!("\\u{hex}"), "malformed unicode escape kept literally");
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
        }
    }

    out
}

fn parse_unicode(hex: &str) -> Option<char> {
    if hex.len() != 4 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}
