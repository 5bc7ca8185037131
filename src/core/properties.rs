//! Properties-style `key=value` text parsing
//!
//! Supports the subset of the classic properties format that configuration
//! files actually use:
//!
//! - `key=value`, `key: value` and `key value` separators
//! - `#` and `!` comment lines, blank lines
//! - trailing-backslash line continuation
//! - `\t`, `\n`, `\r`, `\f`, `\\` and `\uXXXX` escapes; any other escaped
//!   character stands for itself (so `\=` and `\:` allow separators in keys)

/// Parse properties text into ordered key/value pairs.
///
/// Later duplicates are kept; the configuration store resolves them by
/// letting the last one win.
pub fn parse(text: &str) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    let mut pending = String::new();

    for raw in text.lines() {
        let line = raw.trim_start();
        if pending.is_empty() && (line.is_empty() || line.starts_with('#') || line.starts_with('!')) {
            continue;
        }

        if ends_with_continuation(line) {
            pending.push_str(&line[..line.len() - 1]);
            continue;
        }

        pending.push_str(line);
        if let Some(entry) = parse_logical_line(&pending) {
            entries.push(entry);
        }
        pending.clear();
    }

    if !pending.is_empty() {
        if let Some(entry) = parse_logical_line(&pending) {
            entries.push(entry);
        }
    }

    entries
}

/// An odd number of trailing backslashes continues onto the next line.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn parse_logical_line(line: &str) -> Option<(String, String)> {
    let mut chars = line.char_indices().peekable();
    let mut key_end = line.len();
    let mut value_start = line.len();

    while let Some((idx, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '=' | ':' => {
                key_end = idx;
                value_start = idx + 1;
                break;
            }
            c if c.is_whitespace() => {
                key_end = idx;
                // Whitespace may be followed by an explicit separator.
                let rest = &line[idx..];
                let trimmed = rest.trim_start();
                let skipped = rest.len() - trimmed.len();
                value_start = idx + skipped;
                if trimmed.starts_with('=') || trimmed.starts_with(':') {
                    value_start += 1;
                }
                break;
            }
            _ => {}
        }
    }

    let key = unescape(&line[..key_end]);
    if key.is_empty() {
        return None;
    }
    let value = unescape(line[value_start.min(line.len())..].trim_start());
    Some((key, value))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if hex.len() == 4 => out.push(decoded),
                    _ => {
                        out.push('u');
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    out
}
