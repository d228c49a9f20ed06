//! Path-directed edits on raw configuration text
//!
//! The path is walked through nested literal spans of the exported
//! configuration literal. Only the span addressed by the full path is
//! replaced; comments, spacing and quoting everywhere else stay as written.
//! Missing structure is never created: an unresolvable segment is
//! `PathNotFound`.
//!
//! ```
//! use config_edit::mutate::update_in_text;
//!
//! let source = r#"module.exports = { build: { preset: "javascript" } }"#;
//! let updated = update_in_text(source, "build.preset", "typescript").unwrap();
//! assert_eq!(updated, r#"module.exports = { build: { preset: "typescript" } }"#);
//! ```

use crate::edit::Edit;
use crate::error::{Error, Result};
use crate::format::{format_config_value, format_value};
use crate::locate::{locate_config_literal, object_root};
use crate::options::EditOptions;
use crate::path::{Path, PathSegment, parse_path};
use crate::resolve::{Resolver, Step};
use crate::scan::{self, LiteralSpan};
use crate::tree::ConfigValue;

/// A `key: value` entry of an object literal
#[derive(Debug, Clone, Copy)]
struct PropertyEntry<'s> {
    key: &'s str,
    value: LiteralSpan,
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Parse a trimmed object entry. Shorthand properties, spreads, methods and
/// computed keys have no addressable value and yield `None`.
fn parse_entry(source: &str, entry: LiteralSpan) -> Option<PropertyEntry<'_>> {
    let bytes = source.as_bytes();
    let start = entry.start;
    let (key, after_key) = match *bytes.get(start)? {
        b'"' | b'\'' => {
            let end = scan::skip_opaque(bytes, start)?.min(entry.end);
            if end < start + 2 {
                return None;
            }
            (&source[start + 1..end - 1], end)
        }
        _ => {
            let len = source[start..entry.end]
                .char_indices()
                .find(|(_, c)| !is_identifier_char(*c))
                .map_or(entry.len(), |(p, _)| p);
            if len == 0 {
                return None;
            }
            (&source[start..start + len], start + len)
        }
    };

    let colon = scan::skip_trivia(bytes, after_key, entry.end);
    if bytes.get(colon) != Some(&b':') || colon >= entry.end {
        return None;
    }
    let value_start = scan::skip_trivia(bytes, colon + 1, entry.end);
    if value_start >= entry.end {
        return None;
    }

    Some(PropertyEntry {
        key,
        value: LiteralSpan::new(value_start, entry.end),
    })
}

/// Resolves paths to literal spans inside raw configuration text
#[derive(Debug, Clone, Copy)]
pub struct TextResolver<'a> {
    source: &'a str,
    options: &'a EditOptions,
}

impl<'a> TextResolver<'a> {
    pub fn new(source: &'a str, options: &'a EditOptions) -> Self {
        Self { source, options }
    }

    /// The value of property `name` among the top-level entries of `object`.
    ///
    /// When a key appears more than once the last entry wins, matching how
    /// the literal evaluates.
    fn property(&self, object: LiteralSpan, name: &str) -> Result<Option<LiteralSpan>> {
        if object.opener(self.source) != Some(b'{') {
            return Ok(None);
        }
        let found = scan::split_top_level(self.source, object.inner())
            .into_iter()
            .filter_map(|entry| parse_entry(self.source, entry))
            .filter(|entry| entry.key == name)
            .last()
            .map(|entry| entry.value);

        match found {
            Some(value) if matches!(value.opener(self.source), Some(b'{' | b'[')) => {
                scan::matching_span(self.source, value.start).map(Some)
            }
            other => Ok(other),
        }
    }

    /// The item at `index` among the top-level items of `array`.
    fn item(&self, array: LiteralSpan, index: usize) -> Option<LiteralSpan> {
        if array.opener(self.source) != Some(b'[') {
            return None;
        }
        scan::split_top_level(self.source, array.inner())
            .get(index)
            .copied()
    }
}

impl Resolver for TextResolver<'_> {
    type Target = LiteralSpan;

    fn root(&self) -> Result<LiteralSpan> {
        let literal = locate_config_literal(self.source, self.options)?;
        object_root(self.source, literal.span)?
            .ok_or_else(|| Error::no_literal("exported value is not an object literal"))
    }

    fn child(&self, target: LiteralSpan, step: Step<'_>) -> Result<LiteralSpan> {
        let found = match step.segment() {
            PathSegment::Property(name) => self.property(target, name)?,
            PathSegment::Index(index) => self.item(target, *index),
        };
        found.ok_or_else(|| {
            tracing::debug!(path = %step.path(), segment = %step.segment(), "Segment not found in text");
            Error::path_not_found(step.path())
        })
    }
}

/// Find the span of the literal addressed by `path`.
pub fn locate_path(source: &str, path: &Path, options: &EditOptions) -> Result<LiteralSpan> {
    if path.is_empty() {
        return Err(Error::path_not_found(path));
    }
    TextResolver::new(source, options).resolve(path)
}

/// Plan replacing the literal at `path` with `value`.
///
/// `value` goes through [`format_value`], so plain text is quoted and
/// literal source is written as-is.
pub fn plan_update(
    source: &str,
    path: &Path,
    value: &str,
    options: &EditOptions,
) -> Result<Edit> {
    let formatted = format_value(value, options.quote);
    plan_replacement(source, path, formatted, options)
}

fn plan_replacement(
    source: &str,
    path: &Path,
    formatted: String,
    options: &EditOptions,
) -> Result<Edit> {
    let target = locate_path(source, path, options)?;
    tracing::debug!(%path, start = target.start, end = target.end, "Replacing literal");
    Ok(Edit::path_set(
        path.to_string(),
        target.range(),
        target.text(source),
        formatted,
    ))
}

/// Replace the literal at `path` in `source` with `value`, using default options.
pub fn update_in_text(source: &str, path: &str, value: &str) -> Result<String> {
    update_in_text_with(source, path, value, &EditOptions::default())
}

pub fn update_in_text_with(
    source: &str,
    path: &str,
    value: &str,
    options: &EditOptions,
) -> Result<String> {
    let path = parse_path(path)?;
    Ok(plan_update(source, &path, value, options)?.apply(source))
}

/// Replace the literal at `path` with a typed value.
///
/// Booleans, numbers and null are written bare rather than quoted.
pub fn update_value_in_text(
    source: &str,
    path: &str,
    value: &ConfigValue,
    options: &EditOptions,
) -> Result<String> {
    let path = parse_path(path)?;
    let formatted = format_config_value(value, options.quote);
    Ok(plan_replacement(source, &path, formatted, options)?.apply(source))
}
