//! Shared path walking for the tree and text engines
//!
//! A [`Resolver`] knows how to find its root and how to take one step down a
//! path segment. The tree engine resolves to `&ConfigValue`, the text engine
//! to a [`LiteralSpan`](crate::scan::LiteralSpan); both walk paths through the
//! same [`Resolver::resolve`] fold.

use crate::error::Result;
use crate::path::{Path, PathSegment};

/// Position of one segment within the path being resolved
#[derive(Debug, Clone, Copy)]
pub struct Step<'p> {
    path: &'p Path,
    position: usize,
}

impl<'p> Step<'p> {
    pub fn new(path: &'p Path, position: usize) -> Self {
        Self { path, position }
    }

    pub fn segment(&self) -> &'p PathSegment {
        &self.path.segments()[self.position]
    }

    pub fn previous(&self) -> Option<&'p PathSegment> {
        self.position
            .checked_sub(1)
            .map(|i| &self.path.segments()[i])
    }

    pub fn path(&self) -> &'p Path {
        self.path
    }

    pub fn is_last(&self) -> bool {
        self.position + 1 == self.path.len()
    }

    /// Name of the container this step indexes into, for error messages.
    pub fn container_label(&self) -> String {
        self.previous()
            .map_or_else(|| "<root>".to_string(), ToString::to_string)
    }
}

/// Locates the target addressed by a path
pub trait Resolver {
    type Target;

    /// The target an empty path resolves to.
    fn root(&self) -> Result<Self::Target>;

    /// Descend from `target` through the segment at `step`.
    fn child(&self, target: Self::Target, step: Step<'_>) -> Result<Self::Target>;

    fn resolve(&self, path: &Path) -> Result<Self::Target> {
        let mut target = self.root()?;
        for position in 0..path.len() {
            target = self.child(target, Step::new(path, position))?;
        }
        Ok(target)
    }
}
