//! A configuration file's text being edited in memory

use std::path::{Path, PathBuf};

use crate::edit::{BatchOutcome, Edit, TextEdit, apply_all};
use crate::error::Result;
use crate::format::{Formatter, format_or_fallback};
use crate::locate::{ConfigLiteral, locate_config_literal};
use crate::mutate;
use crate::options::EditOptions;
use crate::path::parse_path;
use crate::replace;
use crate::source::ConfigSource;

/// Configuration file text with its edit history
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    path: Option<PathBuf>,
    /// Source as loaded (for is_modified tracking)
    original_source: String,
    /// Current source after edits
    source: String,
    options: EditOptions,
    history: Vec<Edit>,
}

impl ConfigDocument {
    pub fn new(source: impl Into<String>) -> Self {
        Self::with_options(source, EditOptions::default())
    }

    pub fn with_options(source: impl Into<String>, options: EditOptions) -> Self {
        let source = source.into();
        Self {
            path: None,
            original_source: source.clone(),
            source,
            options,
            history: Vec::new(),
        }
    }

    /// Load the document through a [`ConfigSource`].
    pub fn load(source: &dyn ConfigSource, options: EditOptions) -> Result<Self> {
        let loaded = source.load()?;
        tracing::debug!(path = %loaded.path.display(), "Loaded configuration");
        let mut document = Self::with_options(loaded.raw_text, options);
        document.path = Some(loaded.path);
        Ok(document)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn options(&self) -> &EditOptions {
        &self.options
    }

    /// Edits applied so far, oldest first.
    pub fn history(&self) -> &[Edit] {
        &self.history
    }

    /// Locate the exported configuration literal in the current source.
    pub fn config_literal(&self) -> Result<ConfigLiteral> {
        locate_config_literal(&self.source, &self.options)
    }

    /// Replace the literal at `path` with `value`.
    pub fn update_path(&mut self, path: &str, value: &str) -> Result<Edit> {
        let edit = mutate::plan_update(&self.source, &parse_path(path)?, value, &self.options)?;
        self.commit(edit.clone());
        Ok(edit)
    }

    /// Replace `placeholder` inside the configuration literal.
    ///
    /// Returns `None`, leaving the document unchanged, when nothing matched.
    pub fn replace_placeholder(&mut self, placeholder: &str, replacement: &str) -> Option<Edit> {
        let edit = replace::plan_replace(&self.source, placeholder, replacement, &self.options)?;
        self.commit(edit.clone());
        Some(edit)
    }

    /// Apply a batch of edits in order.
    ///
    /// Edits before a failing one stay applied to the document.
    pub fn apply(&mut self, edits: &[TextEdit]) -> BatchOutcome {
        let outcome = apply_all(&self.source, edits, &self.options);
        self.source = outcome.text.clone();
        self.history.extend(outcome.applied.iter().cloned());
        outcome
    }

    /// Undo the most recent edit.
    pub fn undo(&mut self) -> Option<Edit> {
        let edit = self.history.pop()?;
        self.source = edit.inverse().apply(&self.source);
        Some(edit)
    }

    /// Check if document has been modified from its original source.
    pub fn is_modified(&self) -> bool {
        self.source != self.original_source
    }

    /// Render the current source through `formatter`, keeping the
    /// unformatted text if formatting fails.
    pub fn render(&self, formatter: &dyn Formatter) -> String {
        format_or_fallback(formatter, &self.source)
    }

    fn commit(&mut self, edit: Edit) {
        self.source = edit.apply(&self.source);
        self.history.push(edit);
    }
}
