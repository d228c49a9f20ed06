//! Create, read, update and delete over a parsed configuration value
//!
//! Every operation returns a new value; the input tree is never mutated.
//!
//! `update` is permissive and creates missing intermediate structure, while
//! `read` and `delete` require every segment to exist.
//!
//! # Examples
//!
//! ```
//! use config_edit::tree::{create, read, update};
//! use serde_json::json;
//!
//! let config = create("build.preset", json!("javascript")).unwrap();
//! assert_eq!(config, json!({"build": {"preset": "javascript"}}));
//!
//! let config = update("build.preset", json!("typescript"), &config).unwrap();
//! assert_eq!(read("build.preset", &config).unwrap(), &json!("typescript"));
//! ```

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::path::{Path, PathSegment, parse_path};
use crate::resolve::{Resolver, Step};

/// Parsed, in-memory form of a configuration file's exported value
pub type ConfigValue = Value;

/// Resolves paths against a parsed tree with strict existence checks
#[derive(Debug, Clone, Copy)]
pub struct TreeResolver<'a> {
    root: &'a ConfigValue,
}

impl<'a> TreeResolver<'a> {
    pub fn new(root: &'a ConfigValue) -> Self {
        Self { root }
    }
}

impl<'a> Resolver for TreeResolver<'a> {
    type Target = &'a ConfigValue;

    fn root(&self) -> Result<Self::Target> {
        Ok(self.root)
    }

    fn child(&self, target: Self::Target, step: Step<'_>) -> Result<Self::Target> {
        match step.segment() {
            PathSegment::Property(name) => target
                .as_object()
                .and_then(|map| map.get(name))
                .ok_or_else(|| Error::MissingProperty {
                    property: name.clone(),
                }),
            PathSegment::Index(index) => {
                let items = target.as_array().ok_or_else(|| Error::NotAnArray {
                    segment: step.container_label(),
                })?;
                items.get(*index).ok_or(Error::IndexOutOfRange {
                    index: *index,
                    len: items.len(),
                })
            }
        }
    }
}

/// Decode a string that is itself a JSON object or array literal.
///
/// Any other value, including strings that fail to parse, is returned as-is.
pub fn decode_value(value: ConfigValue) -> ConfigValue {
    if let Value::String(text) = &value {
        let trimmed = text.trim();
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            if let Ok(decoded) = serde_json::from_str(trimmed) {
                return decoded;
            }
        }
    }
    value
}

fn container_for(next: &PathSegment) -> ConfigValue {
    if next.is_index() {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    }
}

/// Build a fresh configuration holding `value` at `path`.
///
/// Intermediate containers are sequences when the following segment is an
/// index and mappings otherwise. Fails when the path is malformed, or with
/// `IndexOutOfRange` when an index would pad a sequence past [`MAX_PADDING`].
pub fn create(path: &str, value: ConfigValue) -> Result<ConfigValue> {
    create_at(&parse_path(path)?, value)
}

pub fn create_at(path: &Path, value: ConfigValue) -> Result<ConfigValue> {
    let segments = path.segments();
    let Some((last, init)) = segments.split_last() else {
        return Err(Error::malformed("", "path is empty"));
    };

    let mut root = container_for(&segments[0]);
    let mut current = &mut root;
    for (i, segment) in init.iter().enumerate() {
        let next = &segments[i + 1];
        let slot = slot_mut(current, segment, path)?;
        if slot.is_array() != next.is_index() || !(slot.is_array() || slot.is_object()) {
            *slot = container_for(next);
        }
        current = slot;
    }

    let slot = slot_mut(current, last, path)?;
    *slot = decode_value(value);

    tracing::debug!(%path, "Created configuration");
    Ok(root)
}

/// Get or create the slot for `segment`, padding sequences with null.
fn slot_mut<'v>(
    container: &'v mut ConfigValue,
    segment: &PathSegment,
    path: &Path,
) -> Result<&'v mut ConfigValue> {
    let cannot_create =
        || Error::malformed(path.to_string(), format!("cannot create '{segment}'"));
    match segment {
        PathSegment::Property(name) => Ok(container
            .as_object_mut()
            .ok_or_else(cannot_create)?
            .entry(name.clone())
            .or_insert(Value::Null)),
        PathSegment::Index(index) => {
            let items = container.as_array_mut().ok_or_else(cannot_create)?;
            pad_sequence(items, *index, || Value::Null)?;
            Ok(&mut items[*index])
        }
    }
}

/// Most elements a single create or update may append to a sequence.
pub const MAX_PADDING: usize = 1 << 16;

/// Grow `items` with `fill` until `index` is addressable.
///
/// Fails with `IndexOutOfRange` instead of allocating when the gap exceeds
/// [`MAX_PADDING`] or the allocation cannot be made.
fn pad_sequence(
    items: &mut Vec<ConfigValue>,
    index: usize,
    fill: impl FnMut() -> ConfigValue,
) -> Result<()> {
    let len = items.len();
    if index < len {
        return Ok(());
    }
    if index - len >= MAX_PADDING || items.try_reserve(index - len + 1).is_err() {
        tracing::debug!(index, len, "Refusing to pad sequence");
        return Err(Error::IndexOutOfRange { index, len });
    }
    items.resize_with(index + 1, fill);
    Ok(())
}

/// Set `value` at `path`, creating missing intermediate properties.
///
/// # Errors
///
/// - `MissingValue` if `config` or `value` is null
/// - `NotAnArray` if an index segment addresses something other than a sequence
/// - `MissingProperty` if a property segment addresses something other than a mapping
/// - `IndexOutOfRange` if an index would pad a sequence past [`MAX_PADDING`]
pub fn update(path: &str, value: ConfigValue, config: &ConfigValue) -> Result<ConfigValue> {
    update_at(&parse_path(path)?, value, config)
}

pub fn update_at(path: &Path, value: ConfigValue, config: &ConfigValue) -> Result<ConfigValue> {
    if config.is_null() || value.is_null() {
        return Err(Error::MissingValue);
    }
    let segments = path.segments();
    let Some((last, init)) = segments.split_last() else {
        return Err(Error::malformed("", "path is empty"));
    };

    let mut updated = config.clone();
    let mut current = &mut updated;
    for (i, segment) in init.iter().enumerate() {
        let next = &segments[i + 1];
        let step = Step::new(path, i);
        current = match segment {
            PathSegment::Property(name) => {
                let map = current.as_object_mut().ok_or_else(|| Error::MissingProperty {
                    property: name.clone(),
                })?;
                let slot = map.entry(name.clone()).or_insert(Value::Null);
                if slot.is_null() {
                    *slot = container_for(next);
                }
                slot
            }
            PathSegment::Index(index) => {
                let items = current.as_array_mut().ok_or_else(|| Error::NotAnArray {
                    segment: step.container_label(),
                })?;
                pad_sequence(items, *index, || Value::Object(Map::new()))?;
                let slot = &mut items[*index];
                if slot.is_null() {
                    *slot = Value::Object(Map::new());
                }
                slot
            }
        };
    }

    let value = decode_value(value);
    match last {
        PathSegment::Property(name) => {
            let map = current.as_object_mut().ok_or_else(|| Error::MissingProperty {
                property: name.clone(),
            })?;
            map.insert(name.clone(), value);
        }
        PathSegment::Index(index) => {
            let items = current.as_array_mut().ok_or_else(|| Error::NotAnArray {
                segment: Step::new(path, init.len()).container_label(),
            })?;
            pad_sequence(items, *index, || Value::Null)?;
            items[*index] = value;
        }
    }

    tracing::debug!(%path, "Updated configuration");
    Ok(updated)
}

/// Get the value at `path`.
///
/// # Errors
///
/// - `MissingProperty` if a property does not exist
/// - `NotAnArray` if an index segment addresses something other than a sequence
/// - `IndexOutOfRange` if an index is past the end of its sequence
pub fn read<'a>(path: &str, config: &'a ConfigValue) -> Result<&'a ConfigValue> {
    read_at(&parse_path(path)?, config)
}

pub fn read_at<'a>(path: &Path, config: &'a ConfigValue) -> Result<&'a ConfigValue> {
    TreeResolver::new(config).resolve(path)
}

/// Remove the value at `path`.
///
/// Removing a sequence element shifts the following elements down.
/// Existence is checked exactly as for [`read`].
pub fn delete(path: &str, config: &ConfigValue) -> Result<ConfigValue> {
    delete_at(&parse_path(path)?, config)
}

pub fn delete_at(path: &Path, config: &ConfigValue) -> Result<ConfigValue> {
    let Some(last) = path.last() else {
        return Err(Error::malformed("", "path is empty"));
    };
    // Existence checks happen on the input; the copy is only navigated once
    // the whole path is known to resolve.
    read_at(path, config)?;

    let mut updated = config.clone();
    let mut current = &mut updated;
    for segment in &path.segments()[..path.len() - 1] {
        current = match segment {
            PathSegment::Property(name) => current.get_mut(name.as_str()),
            PathSegment::Index(index) => current.get_mut(*index),
        }
        .ok_or_else(|| Error::path_not_found(path))?;
    }

    let removed = match last {
        PathSegment::Property(name) => current
            .as_object_mut()
            .and_then(|map| map.shift_remove(name)),
        PathSegment::Index(index) => current
            .as_array_mut()
            .filter(|items| *index < items.len())
            .map(|items| items.remove(*index)),
    };
    if removed.is_none() {
        return Err(Error::path_not_found(path));
    }

    tracing::debug!(%path, "Deleted from configuration");
    Ok(updated)
}

/// The configuration left after deleting everything.
pub fn delete_all() -> ConfigValue {
    Value::Object(Map::new())
}
