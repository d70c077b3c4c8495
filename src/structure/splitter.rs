//! Markdown-header splitting of promoted text.

use super::types::{HeaderChain, HeaderLevel, Segment};
use crate::constants::SEGMENT_MERGE_SEPARATOR;

/// Recognizes a header line, longest marker first.
///
/// A header is 1-4 `#` followed by a space or the end of the line; `#####x` and `#x` are
/// plain text.
fn parse_header(line: &str) -> Option<(HeaderLevel, &str)> {
    HeaderLevel::ALL.iter().rev().find_map(|level| {
        let rest = line.strip_prefix(level.marker())?;
        if rest.is_empty() || rest.starts_with(' ') {
            Some((*level, rest.trim()))
        } else {
            None
        }
    })
}

/// Trims `line` and drops characters that do not print. Only the ASCII space survives among
/// separators, so `U+3000` and `U+00A0` go along with format characters like `U+FEFF`.
fn clean_line(line: &str) -> String {
    line.trim().chars().filter(|&c| is_printable(c)).collect()
}

fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !(c.is_control() || c.is_whitespace() || is_format_char(c))
}

fn is_format_char(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}'
            | '\u{0600}'..='\u{0605}'
            | '\u{061C}'
            | '\u{06DD}'
            | '\u{070F}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
    )
}

/// Splits `text` into segments, one per run of content under a distinct header chain.
///
/// Lines are trimmed. A header line closes the pending content, drops every active header
/// of equal or deeper level, then becomes the innermost active header. Blank lines also close
/// the pending content. Adjacent segments under the same chain are merged. Header lines
/// themselves never appear in segment text, and headers without content yield no segment.
pub fn split_by_headers(text: &str) -> Vec<Segment> {
    let mut raw: Vec<Segment> = Vec::new();
    let mut active: HeaderChain = Vec::new();
    let mut pending: Vec<String> = Vec::new();

    let flush = |pending: &mut Vec<String>, active: &HeaderChain, raw: &mut Vec<Segment>| {
        if !pending.is_empty() {
            raw.push(Segment {
                headers: active.clone(),
                text: pending.join("\n"),
            });
            pending.clear();
        }
    };

    for line in text.split('\n') {
        let line = clean_line(line);

        if let Some((level, title)) = parse_header(&line) {
            flush(&mut pending, &active, &mut raw);
            while active.last().is_some_and(|(top, _)| *top >= level) {
                active.pop();
            }
            active.push((level, title.to_string()));
        } else if !line.is_empty() {
            pending.push(line);
        } else {
            flush(&mut pending, &active, &mut raw);
        }
    }
    flush(&mut pending, &active, &mut raw);

    merge_adjacent(raw)
}

fn merge_adjacent(raw: Vec<Segment>) -> Vec<Segment> {
    let mut merged: Vec<Segment> = Vec::with_capacity(raw.len());
    for segment in raw {
        match merged.last_mut() {
            Some(previous) if previous.headers == segment.headers => {
                previous.text.push_str(SEGMENT_MERGE_SEPARATOR);
                previous.text.push_str(&segment.text);
            }
            _ => merged.push(segment),
        }
    }
    merged
}
