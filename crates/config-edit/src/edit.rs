//! Edit records and sequential batch application

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::options::EditOptions;
use crate::path::Path;
use crate::{mutate, replace};

/// The kind of edit operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditKind {
    /// The literal at a path was replaced.
    PathSet { path: String },
    /// Occurrences of a placeholder inside the configuration literal were replaced.
    Replace {
        placeholder: String,
        occurrences: usize,
    },
}

/// A single contiguous change to source text.
///
/// Everything outside `span` is left byte-for-byte as it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    /// The kind of edit.
    pub kind: EditKind,
    /// Byte range of the replaced text in the source the edit was planned on.
    pub span: Range<usize>,
    /// Text previously at `span`.
    pub old_content: String,
    /// Text written in its place.
    pub new_content: String,
}

impl Edit {
    pub fn path_set(
        path: impl Into<String>,
        span: Range<usize>,
        old_content: impl Into<String>,
        new_content: impl Into<String>,
    ) -> Self {
        Self {
            kind: EditKind::PathSet { path: path.into() },
            span,
            old_content: old_content.into(),
            new_content: new_content.into(),
        }
    }

    pub fn replace(
        placeholder: impl Into<String>,
        occurrences: usize,
        span: Range<usize>,
        old_content: impl Into<String>,
        new_content: impl Into<String>,
    ) -> Self {
        Self {
            kind: EditKind::Replace {
                placeholder: placeholder.into(),
                occurrences,
            },
            span,
            old_content: old_content.into(),
            new_content: new_content.into(),
        }
    }

    /// Apply this edit to `source`, which must be the text it was planned on.
    pub fn apply(&self, source: &str) -> String {
        let mut result = String::with_capacity(
            source.len() - self.span.len() + self.new_content.len(),
        );
        result.push_str(&source[..self.span.start]);
        result.push_str(&self.new_content);
        result.push_str(&source[self.span.end..]);
        result
    }

    /// Byte range of the new content once the edit is applied.
    pub fn new_span(&self) -> Range<usize> {
        self.span.start..self.span.start + self.new_content.len()
    }

    /// The edit that undoes this one when applied to its output.
    pub fn inverse(&self) -> Edit {
        Edit {
            kind: self.kind.clone(),
            span: self.new_span(),
            old_content: self.new_content.clone(),
            new_content: self.old_content.clone(),
        }
    }
}

/// One requested change to a configuration file's text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TextEdit {
    /// Replace the literal at `path` with `value` (quoted unless already literal source)
    SetPath { path: String, value: String },
    /// Replace a placeholder token inside the configuration literal
    ReplacePlaceholder {
        placeholder: String,
        replacement: String,
    },
}

impl TextEdit {
    /// Plan this edit against `source`.
    ///
    /// A `SetPath` always plans an edit or fails. A `ReplacePlaceholder`
    /// gives `Ok(None)` when the placeholder does not occur in the
    /// configuration literal.
    pub fn plan(&self, source: &str, options: &EditOptions) -> crate::Result<Option<Edit>> {
        match self {
            TextEdit::SetPath { path, value } => {
                mutate::plan_update(source, &path.parse::<Path>()?, value, options).map(Some)
            }
            TextEdit::ReplacePlaceholder {
                placeholder,
                replacement,
            } => Ok(replace::plan_replace(source, placeholder, replacement, options)),
        }
    }
}

/// Result of applying a batch of edits
#[derive(Debug)]
pub struct BatchOutcome {
    /// Text after every edit that succeeded
    pub text: String,
    /// Edits applied, in order
    pub applied: Vec<Edit>,
    /// Index and error of the edit that stopped the batch
    pub failure: Option<(usize, Error)>,
}

impl BatchOutcome {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// The final text, or the error that stopped the batch.
    pub fn into_result(self) -> crate::Result<String> {
        match self.failure {
            Some((_, e)) => Err(e),
            None => Ok(self.text),
        }
    }
}

/// Apply `edits` left to right, each one to the output of the previous.
///
/// The first failing edit stops the batch. Edits applied before it are kept
/// in the returned text; nothing is rolled back.
pub fn apply_all(source: &str, edits: &[TextEdit], options: &EditOptions) -> BatchOutcome {
    let mut text = source.to_string();
    let mut applied = Vec::new();

    for (index, edit) in edits.iter().enumerate() {
        match edit.plan(&text, options) {
            Ok(Some(planned)) => {
                text = planned.apply(&text);
                applied.push(planned);
            }
            Ok(None) => {
                tracing::debug!(index, "Edit left the text unchanged");
            }
            Err(e) => {
                tracing::debug!(index, error = %e, "Batch stopped");
                return BatchOutcome {
                    text,
                    applied,
                    failure: Some((index, e)),
                };
            }
        }
    }

    BatchOutcome {
        text,
        applied,
        failure: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_and_inverse() {
        let source = "name: 'old'";
        let edit = Edit::path_set("name", 6..11, "'old'", "'newer'");
        let applied = edit.apply(source);
        assert_eq!(applied, "name: 'newer'");
        assert_eq!(edit.inverse().apply(&applied), source);
        assert_eq!(edit.new_span(), 6..13);
    }

    #[test]
    fn test_plan_none_only_for_unmatched_placeholder() {
        let source = "export default { mode: 'a' }";
        let options = EditOptions::default();

        let same_value = TextEdit::SetPath {
            path: "mode".to_string(),
            value: "'a'".to_string(),
        };
        let planned = same_value.plan(source, &options).unwrap().unwrap();
        assert_eq!(planned.apply(source), source);

        let unmatched = TextEdit::ReplacePlaceholder {
            placeholder: "$APP".to_string(),
            replacement: "web".to_string(),
        };
        assert!(unmatched.plan(source, &options).unwrap().is_none());

        let missing = TextEdit::SetPath {
            path: "build".to_string(),
            value: "x".to_string(),
        };
        assert!(missing.plan(source, &options).is_err());
    }

    #[test]
    fn test_text_edit_deserialize() {
        let edits: Vec<TextEdit> = serde_json::from_str(
            r#"[
                {"op": "set_path", "path": "build.preset", "value": "vue"},
                {"op": "replace_placeholder", "placeholder": "$APP", "replacement": "web"}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            edits[0],
            TextEdit::SetPath {
                path: "build.preset".to_string(),
                value: "vue".to_string()
            }
        );
        assert!(matches!(edits[1], TextEdit::ReplacePlaceholder { .. }));
    }
}
