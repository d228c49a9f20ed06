//! Path parsing for addressing values inside a configuration
//!
//! Both the tree engine and the text mutator address values with the same
//! dot/bracket grammar:
//!
//! ```text
//! path    = segment ("." segment)*
//! segment = name ("[" digits "]")? | "[" digits "]"
//! ```
//!
//! There is no escaping of `.`, `[` or `]`.
//!
//! # Examples
//!
//! ```
//! use config_edit::path::{parse_path, PathSegment};
//!
//! let path = parse_path("edgeApplications[0].rules.request[1]").unwrap();
//! assert_eq!(path.segments(), &[
//!     PathSegment::Property("edgeApplications".to_string()),
//!     PathSegment::Index(0),
//!     PathSegment::Property("rules".to_string()),
//!     PathSegment::Property("request".to_string()),
//!     PathSegment::Index(1),
//! ]);
//! assert_eq!(path.to_string(), "edgeApplications[0].rules.request[1]");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A segment of a path - either a property name or an array index
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A property of a mapping (e.g., "preset" in "build.preset")
    Property(String),
    /// An index into a sequence (e.g., 0 in `edgeFunctions[0]`)
    Index(usize),
}

impl PathSegment {
    pub fn is_index(&self) -> bool {
        matches!(self, Self::Index(_))
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property(name) => f.write_str(name),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// An ordered, parsed path
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// The path without its final segment, or `None` for an empty path.
    pub fn parent(&self) -> Option<Path> {
        let (_, rest) = self.segments.split_last()?;
        Some(Path::new(rest.to_vec()))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathSegment> {
        self.segments.iter()
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self::new(segments)
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathSegment;
    type IntoIter = std::slice::Iter<'a, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut previous: Option<&PathSegment> = None;
        for segment in &self.segments {
            match (previous, segment) {
                // `name[N]` binds the index to the preceding property
                (Some(PathSegment::Property(_)), PathSegment::Index(_)) | (None, _) => {}
                (Some(_), _) => f.write_str(".")?,
            }
            write!(f, "{segment}")?;
            previous = Some(segment);
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_path(s)
    }
}

/// Parse a path string into segments.
///
/// Each dot-separated token is either a property name, a property name with a
/// trailing `[N]`, or a bare `[N]`.
///
/// # Errors
///
/// Returns [`Error::MalformedPath`] for an empty path or token, an unclosed
/// bracket, a stray `]`, or a non-numeric index.
///
/// # Examples
///
/// ```
/// use config_edit::path::{parse_path, PathSegment};
///
/// let path = parse_path("build.preset").unwrap();
/// assert_eq!(path.segments(), &[
///     PathSegment::Property("build".to_string()),
///     PathSegment::Property("preset".to_string()),
/// ]);
///
/// assert!(parse_path("items[x]").is_err());
/// assert!(parse_path("items[0").is_err());
/// ```
pub fn parse_path(path: &str) -> Result<Path> {
    if path.is_empty() {
        return Err(Error::malformed(path, "path is empty"));
    }

    let mut segments = Vec::new();
    for token in path.split('.') {
        parse_token(path, token, &mut segments)?;
    }

    Ok(Path::new(segments))
}

fn parse_token(path: &str, token: &str, segments: &mut Vec<PathSegment>) -> Result<()> {
    if token.is_empty() {
        return Err(Error::malformed(path, "empty segment"));
    }

    let Some(open) = token.find('[') else {
        if token.contains(']') {
            return Err(Error::malformed(path, format!("unexpected ']' in '{token}'")));
        }
        segments.push(PathSegment::Property(token.to_string()));
        return Ok(());
    };

    let Some(inner) = token[open + 1..].strip_suffix(']') else {
        return Err(Error::malformed(path, format!("unclosed bracket in '{token}'")));
    };

    let name = &token[..open];
    if name.contains(']') || inner.contains('[') || inner.contains(']') {
        return Err(Error::malformed(
            path,
            format!("only one trailing index is allowed in '{token}'"),
        ));
    }
    if inner.is_empty() || !inner.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::malformed(path, format!("index '{inner}' is not numeric")));
    }
    let index = inner
        .parse::<usize>()
        .map_err(|e| Error::malformed(path, format!("index '{inner}': {e}")))?;

    if !name.is_empty() {
        segments.push(PathSegment::Property(name.to_string()));
    }
    segments.push(PathSegment::Index(index));
    Ok(())
}
