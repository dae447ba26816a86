//! Parser for the line-oriented config format.
//!
//! ```text
//! b:"flagName":true
//! s:"greeting":"hello world"
//! i:"retries":5
//! d:"ratio":0.75
//! ```
//!
//! The leading tag (case-insensitive) selects the destination table.
//! Lines are split on the first two `:` only, so a quoted string value
//! may contain `:` freely. Malformed lines are skipped; the format has
//! no error channel.

use crate::config::table::{ConfigTable, ConfigValue};

/// Parse the full text of a config file into a fresh table set.
///
/// Total and side-effect-free: every line either contributes one entry
/// or is skipped. A bad numeric literal drops only its own line, never
/// the rest of the file.
pub fn parse(text: &str) -> ConfigTable {
    let mut table = ConfigTable::default();
    for line in text.lines() {
        if let Some((key, value)) = parse_line(line) {
            table.insert(key, value);
        }
    }
    table
}

fn parse_line(line: &str) -> Option<(String, ConfigValue)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    // Exactly three segments required; the third keeps any further `:`.
    let mut segments = line.splitn(3, ':');
    let tag = segments.next()?;
    let key = segments.next()?;
    let value = segments.next()?;

    let key = strip_enclosing(key)?.to_string();

    match tag.chars().next()?.to_ascii_lowercase() {
        // Anything that is not "true" reads as false, never an error.
        'b' => Some((key, ConfigValue::Boolean(value.eq_ignore_ascii_case("true")))),
        's' => Some((key, ConfigValue::String(strip_enclosing(value)?.to_string()))),
        'i' => value.parse().ok().map(|v| (key, ConfigValue::Integer(v))),
        'd' => value.parse().ok().map(|v| (key, ConfigValue::Double(v))),
        _ => None,
    }
}

/// Strip exactly one leading and one trailing character (the quotes).
///
/// No escaping is supported. A segment shorter than two characters has
/// no inside to return. Offsets are char-derived so a multibyte first
/// or last character cannot split a UTF-8 boundary.
fn strip_enclosing(segment: &str) -> Option<&str> {
    let mut chars = segment.chars();
    let first = chars.next()?;
    let last = chars.next_back()?;
    Some(&segment[first.len_utf8()..segment.len() - last.len_utf8()])
}
