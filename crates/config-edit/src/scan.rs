//! Quote- and depth-aware scanning over JavaScript-like source text
//!
//! String literals (`"…"`, `'…'`, `` `…` ``) and comments are opaque: their
//! contents never count towards delimiter depth or item boundaries. All
//! offsets are byte offsets into the source and always fall on ASCII
//! delimiters, so slicing at them is UTF-8 safe.
//!
//! Outside of whitespace runs, a `//` or `/*` only opens a comment when it
//! follows whitespace or punctuation, so a regex literal such as `/\/\//`
//! scans as plain text. Regex literals containing a quote character are not
//! recognised and will be read as the start of a string.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Half-open byte range `[start, end)` covering one complete literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiteralSpan {
    pub start: usize,
    pub end: usize,
}

impl LiteralSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range()]
    }

    /// The content between the opening and closing delimiters.
    pub fn inner(&self) -> LiteralSpan {
        let start = (self.start + 1).min(self.end);
        let end = self.end.saturating_sub(1).max(start);
        LiteralSpan::new(start, end)
    }

    /// First byte of the span, which is the delimiter for object and array spans.
    pub fn opener(&self, source: &str) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        source.as_bytes().get(self.start).copied()
    }

    pub fn contains(&self, other: &LiteralSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// The closing delimiter that pairs with `open`.
pub fn closing_delimiter(open: u8) -> Option<u8> {
    match open {
        b'{' => Some(b'}'),
        b'[' => Some(b']'),
        b'(' => Some(b')'),
        _ => None,
    }
}

/// If a string literal or comment starts at `i`, return the offset just past it.
///
/// Unterminated strings and comments run to the end of the input.
pub fn skip_opaque(bytes: &[u8], i: usize) -> Option<usize> {
    match *bytes.get(i)? {
        b @ (b'"' | b'\'' | b'`') => Some(skip_string(bytes, i, b)),
        b'/' if may_open_comment(bytes, i) => comment_end(bytes, i),
        _ => None,
    }
}

/// Whether a `/` at `i` is placed where a comment can begin.
fn may_open_comment(bytes: &[u8], i: usize) -> bool {
    i.checked_sub(1)
        .map(|p| bytes[p])
        .is_none_or(|b| b.is_ascii_whitespace() || b"{}[]();,:=".contains(&b))
}

/// End of the comment starting at `i`, if `i` opens one.
fn comment_end(bytes: &[u8], i: usize) -> Option<usize> {
    match bytes.get(i + 1)? {
        b'/' => Some(
            bytes[i..]
                .iter()
                .position(|&c| c == b'\n')
                .map_or(bytes.len(), |p| i + p),
        ),
        b'*' => Some(find(bytes, i + 2, b"*/").map_or(bytes.len(), |p| p + 2)),
        _ => None,
    }
}

fn skip_string(bytes: &[u8], start: usize, quote: u8) -> usize {
    let mut j = start + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            c if c == quote => return j + 1,
            _ => j += 1,
        }
    }
    bytes.len()
}

fn find(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| from + p)
}

fn is_comment_start(bytes: &[u8], i: usize) -> bool {
    bytes.get(i) == Some(&b'/') && matches!(bytes.get(i + 1), Some(b'/' | b'*'))
}

/// Skip whitespace and comments from `from`, stopping at `limit`.
pub fn skip_trivia(bytes: &[u8], from: usize, limit: usize) -> usize {
    let mut i = from;
    while i < limit {
        if bytes[i].is_ascii_whitespace() {
            i += 1;
        } else if is_comment_start(bytes, i) {
            i = comment_end(bytes, i).unwrap_or(limit);
        } else {
            break;
        }
    }
    i.min(limit)
}

/// Find the span of the literal whose opening delimiter sits at `open`.
///
/// Only the delimiter pair that opened the literal is counted.
///
/// ```
/// use config_edit::scan::matching_span;
///
/// let source = r#"x = { a: "}", b: { c: 1 } } // tail"#;
/// let span = matching_span(source, 4).unwrap();
/// assert_eq!(span.text(source), r#"{ a: "}", b: { c: 1 } }"#);
/// ```
///
/// # Errors
///
/// Returns `NoConfigLiteral` if `open` is not `{`, `[` or `(`, and
/// `UnbalancedLiteral` if the input ends before the literal closes.
pub fn matching_span(source: &str, open: usize) -> Result<LiteralSpan> {
    let bytes = source.as_bytes();
    let Some((opener, closer)) = bytes
        .get(open)
        .and_then(|&b| closing_delimiter(b).map(|c| (b, c)))
    else {
        return Err(Error::no_literal(format!(
            "expected '{{', '[' or '(' at byte {open}"
        )));
    };

    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        if let Some(next) = skip_opaque(bytes, i) {
            i = next;
            continue;
        }
        let b = bytes[i];
        if b == opener {
            depth += 1;
        } else if b == closer {
            depth -= 1;
            if depth == 0 {
                return Ok(LiteralSpan::new(open, i + 1));
            }
        }
        i += 1;
    }

    Err(Error::UnbalancedLiteral { open })
}

/// Split `region` into its top-level comma-separated items.
///
/// Commas nested in any bracket pair, string or comment do not split. Each
/// item is trimmed of surrounding whitespace and comments. An empty item
/// between two commas (an array hole) is kept as a zero-length span at the
/// comma that closes it; only the empty item after a trailing comma is
/// dropped.
pub fn split_top_level(source: &str, region: LiteralSpan) -> Vec<LiteralSpan> {
    let bytes = source.as_bytes();
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut first: Option<usize> = None;
    let mut last_end = region.start;

    let mut i = region.start;
    while i < region.end {
        if let Some(next) = skip_opaque(bytes, i) {
            if !is_comment_start(bytes, i) {
                first.get_or_insert(i);
                last_end = next.min(region.end);
            }
            i = next;
            continue;
        }
        let b = bytes[i];
        match b {
            b'{' | b'[' | b'(' => depth += 1,
            b'}' | b']' | b')' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                items.push(match first.take() {
                    Some(start) => LiteralSpan::new(start, last_end),
                    None => LiteralSpan::new(i, i),
                });
                i += 1;
                continue;
            }
            _ => {}
        }
        if !b.is_ascii_whitespace() {
            first.get_or_insert(i);
            last_end = i + 1;
        }
        i += 1;
    }
    if let Some(start) = first {
        items.push(LiteralSpan::new(start, last_end));
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(source: &'a str, spans: &[LiteralSpan]) -> Vec<&'a str> {
        spans.iter().map(|s| s.text(source)).collect()
    }

    #[test]
    fn test_matching_span_skips_strings() {
        let source = r#"{ a: '}', b: "\"}", c: `}` }"#;
        let span = matching_span(source, 0).unwrap();
        assert_eq!(span.end, source.len());
    }

    #[test]
    fn test_matching_span_skips_comments() {
        let source = "{ // }\n a: 1 /* } */ }";
        let span = matching_span(source, 0).unwrap();
        assert_eq!(span.end, source.len());
    }

    #[test]
    fn test_matching_span_paren() {
        let source = "defineConfig({ a: (1) }) ;";
        let span = matching_span(source, 12).unwrap();
        assert_eq!(span.text(source), "({ a: (1) })");
    }

    #[test]
    fn test_matching_span_unbalanced() {
        let err = matching_span("{ a: { b: 1 }", 0).unwrap_err();
        assert!(matches!(err, Error::UnbalancedLiteral { open: 0 }));
    }

    #[test]
    fn test_matching_span_not_a_delimiter() {
        assert!(matches!(
            matching_span("abc", 0),
            Err(Error::NoConfigLiteral { .. })
        ));
    }

    #[test]
    fn test_split_top_level() {
        let source = r#"[ { a: 1, b: 2 }, "x, y", fn(a, b), 3, ]"#;
        let span = matching_span(source, 0).unwrap();
        let items = split_top_level(source, span.inner());
        assert_eq!(
            texts(source, &items),
            vec!["{ a: 1, b: 2 }", r#""x, y""#, "fn(a, b)", "3"]
        );
    }

    #[test]
    fn test_split_trims_comments() {
        let source = "[\n  // first\n  'a', /* second */ 'b' // trailing\n]";
        let span = matching_span(source, 0).unwrap();
        let items = split_top_level(source, span.inner());
        assert_eq!(texts(source, &items), vec!["'a'", "'b'"]);
    }

    #[test]
    fn test_split_keeps_holes() {
        let source = "['a', , 'c', ]";
        let span = matching_span(source, 0).unwrap();
        let items = split_top_level(source, span.inner());
        assert_eq!(texts(source, &items), vec!["'a'", "", "'c'"]);
        assert_eq!(items[1], LiteralSpan::new(6, 6));

        let source = "[,,]";
        let items = split_top_level(source, matching_span(source, 0).unwrap().inner());
        assert_eq!(items, vec![LiteralSpan::new(1, 1), LiteralSpan::new(2, 2)]);
    }

    #[test]
    fn test_regex_slashes_are_not_comments() {
        let source = r"{ m: /\/\//, a: 'x' }";
        let span = matching_span(source, 0).unwrap();
        assert_eq!(span.end, source.len());
        let items = split_top_level(source, span.inner());
        assert_eq!(texts(source, &items), vec![r"m: /\/\//", "a: 'x'"]);
    }

    #[test]
    fn test_skip_trivia() {
        let source = "  /* c */ // d\n  x";
        let bytes = source.as_bytes();
        assert_eq!(skip_trivia(bytes, 0, bytes.len()), source.len() - 1);
    }

    #[test]
    fn test_inner_of_empty_literal() {
        let span = LiteralSpan::new(4, 6);
        assert_eq!(span.inner(), LiteralSpan::new(5, 5));
        assert!(span.inner().is_empty());
    }
}
