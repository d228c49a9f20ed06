//! Rendering replacement values as source text, and the formatter seam

use serde_json::Value;

use crate::error::Result;
use crate::options::QuoteStyle;
use crate::tree::ConfigValue;

/// Decide how caller-supplied text is written into the configuration.
///
/// Text that is already literal source passes through unchanged: quoted
/// strings, anything opening with `{` or `[`, and function or arrow
/// expressions. Everything else becomes a quoted string.
///
/// ```
/// use config_edit::format::format_value;
/// use config_edit::options::QuoteStyle;
///
/// assert_eq!(format_value("typescript", QuoteStyle::Double), r#""typescript""#);
/// assert_eq!(format_value("{ type: 'module' }", QuoteStyle::Double), "{ type: 'module' }");
/// assert_eq!(format_value("'quoted'", QuoteStyle::Double), "'quoted'");
/// assert_eq!(format_value("(req) => req", QuoteStyle::Single), "(req) => req");
/// ```
pub fn format_value(text: &str, quote: QuoteStyle) -> String {
    if is_literal_source(text) {
        return text.to_string();
    }
    quote_string(text, quote)
}

fn is_literal_source(text: &str) -> bool {
    let trimmed = text.trim();
    is_quoted(trimmed)
        || trimmed.starts_with('{')
        || trimmed.starts_with('[')
        || trimmed.contains("=>")
        || trimmed.starts_with("function")
}

fn is_quoted(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() >= 2
        && matches!(bytes[0], b'"' | b'\'' | b'`')
        && bytes[bytes.len() - 1] == bytes[0]
}

/// Wrap `text` in quotes, escaping what would end the string early.
pub fn quote_string(text: &str, quote: QuoteStyle) -> String {
    let q = quote.as_char();
    let mut out = String::with_capacity(text.len() + 2);
    out.push(q);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c if c == q => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(q);
    out
}

/// Render a typed value as source text.
///
/// Booleans, numbers and null are written bare, strings go through
/// [`format_value`], and containers are written as JSON.
pub fn format_config_value(value: &ConfigValue, quote: QuoteStyle) -> String {
    match value {
        Value::String(s) => format_value(s, quote),
        other => other.to_string(),
    }
}

/// Reformats source text after an edit
///
/// Implementations wrap whatever code formatter the caller has available.
pub trait Formatter: Send + Sync {
    fn format(&self, source: &str) -> Result<String>;
}

/// Formatter that returns its input unchanged
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughFormatter;

impl Formatter for PassthroughFormatter {
    fn format(&self, source: &str) -> Result<String> {
        Ok(source.to_string())
    }
}

/// Run `formatter`, falling back to the unformatted text if it fails.
pub fn format_or_fallback(formatter: &dyn Formatter, source: &str) -> String {
    match formatter.format(source) {
        Ok(formatted) => formatted,
        Err(e) => {
            tracing::warn!("Formatter failed, keeping unformatted text: {}", e);
            source.to_string()
        }
    }
}
