//! Locating the exported configuration literal in raw file text
//!
//! Two export conventions are recognised at the start of a line, each
//! optionally wrapped in one factory call (`defineConfig` by default):
//!
//! ```text
//! module.exports = { … }
//! module.exports = defineConfig({ … })
//! export default { … }
//! export default defineConfig({ … })
//! ```
//!
//! When a file matches more than once, a match wrapped in the configured
//! factory call wins, then `export default` over `module.exports`, then the
//! earliest match.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::options::EditOptions;
use crate::scan::{self, LiteralSpan};

/// Line-anchored export statement, capturing an optional `name(` wrapper
static EXPORT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?P<conv>export\s+default|module\.exports\s*=)\s*(?:(?P<factory>[A-Za-z_$][A-Za-z0-9_$]*)\s*\()?",
    )
    .unwrap()
});

/// How a configuration file exposes its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportConvention {
    /// `export default …`
    ExportDefault,
    /// `module.exports = …`
    ModuleExports,
}

/// Everything before the configuration literal, up to and including its
/// opening delimiter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportHeader {
    pub convention: ExportConvention,
    /// The factory call wrapping the literal, if any
    pub factory: Option<String>,
    /// Offset just past the opening delimiter
    pub end: usize,
}

impl ExportHeader {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[..self.end]
    }
}

/// The located top-level configuration literal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigLiteral {
    pub header: ExportHeader,
    pub span: LiteralSpan,
}

impl ConfigLiteral {
    /// Text after the literal, byte-for-byte.
    pub fn trailer<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.end..]
    }
}

struct Candidate<'s> {
    convention: ExportConvention,
    factory: Option<&'s str>,
    header_end: usize,
    position: usize,
}

impl Candidate<'_> {
    fn rank(&self) -> (bool, bool, usize) {
        (
            self.factory.is_none(),
            self.convention != ExportConvention::ExportDefault,
            self.position,
        )
    }
}

/// Find the configuration literal exported by `source`.
///
/// # Errors
///
/// - `NoConfigLiteral` if no export statement is found, or the exported
///   expression does not start with `{` or `(`
/// - `UnbalancedLiteral` if the literal never closes
///
/// # Examples
///
/// ```
/// use config_edit::locate::{locate_config_literal, ExportConvention};
/// use config_edit::options::EditOptions;
///
/// let source = "import { defineConfig } from 'azion'\nexport default defineConfig({ build: {} })\n";
/// let literal = locate_config_literal(source, &EditOptions::default()).unwrap();
/// assert_eq!(literal.header.convention, ExportConvention::ExportDefault);
/// assert_eq!(literal.header.factory.as_deref(), Some("defineConfig"));
/// assert_eq!(literal.span.text(source), "{ build: {} }");
/// ```
pub fn locate_config_literal(source: &str, options: &EditOptions) -> Result<ConfigLiteral> {
    let candidate = EXPORT_PATTERN
        .captures_iter(source)
        .filter_map(|caps| {
            let conv = caps.name("conv")?;
            let convention = if conv.as_str().starts_with("export") {
                ExportConvention::ExportDefault
            } else {
                ExportConvention::ModuleExports
            };
            let wrapped = caps
                .name("factory")
                .filter(|name| name.as_str() == options.factory);
            let header_end = match wrapped {
                Some(_) => caps.get(0)?.end(),
                None => conv.end(),
            };
            Some(Candidate {
                convention,
                factory: wrapped.map(|m| m.as_str()),
                header_end,
                position: conv.start(),
            })
        })
        .min_by_key(Candidate::rank)
        .ok_or_else(|| Error::no_literal("no 'module.exports' or 'export default' found"))?;

    let bytes = source.as_bytes();
    let open = scan::skip_trivia(bytes, candidate.header_end, bytes.len());
    if !matches!(bytes.get(open), Some(b'{' | b'(')) {
        return Err(Error::no_literal(format!(
            "expected '{{' or '(' after export at byte {open}"
        )));
    }

    let span = scan::matching_span(source, open)?;
    tracing::trace!(
        convention = ?candidate.convention,
        factory = ?candidate.factory,
        start = span.start,
        end = span.end,
        "Located configuration literal"
    );

    Ok(ConfigLiteral {
        header: ExportHeader {
            convention: candidate.convention,
            factory: candidate.factory.map(str::to_string),
            end: open + 1,
        },
        span,
    })
}

/// The object literal inside `span`, unwrapping any enclosing parentheses.
pub fn object_root(source: &str, span: LiteralSpan) -> Result<Option<LiteralSpan>> {
    let bytes = source.as_bytes();
    let mut current = span;
    loop {
        match current.opener(source) {
            Some(b'{') => return Ok(Some(current)),
            Some(b'(') => {
                let inner = current.inner();
                let open = scan::skip_trivia(bytes, inner.start, inner.end);
                if open >= inner.end {
                    return Ok(None);
                }
                current = scan::matching_span(source, open)?;
            }
            _ => return Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locate(source: &str) -> Result<ConfigLiteral> {
        locate_config_literal(source, &EditOptions::default())
    }

    #[test]
    fn test_module_exports() {
        let source = "const x = 1\nmodule.exports = { a: 1 }\n";
        let literal = locate(source).unwrap();
        assert_eq!(literal.header.convention, ExportConvention::ModuleExports);
        assert_eq!(literal.header.factory, None);
        assert_eq!(literal.span.text(source), "{ a: 1 }");
        assert_eq!(literal.header.text(source), "const x = 1\nmodule.exports = {");
        assert_eq!(literal.trailer(source), "\n");
    }

    #[test]
    fn test_module_exports_factory() {
        let source = "const { defineConfig } = require('azion')\nmodule.exports = defineConfig({ a: 1 })";
        let literal = locate(source).unwrap();
        assert_eq!(literal.header.factory.as_deref(), Some("defineConfig"));
        assert_eq!(literal.span.text(source), "{ a: 1 }");
        assert_eq!(literal.trailer(source), ")");
    }

    #[test]
    fn test_prefers_factory_form() {
        let source = "export default { plain: true }\nmodule.exports = defineConfig({ wrapped: true })";
        let literal = locate(source).unwrap();
        assert_eq!(literal.span.text(source), "{ wrapped: true }");
    }

    #[test]
    fn test_ignores_commented_export() {
        let source = "// module.exports = { old: 1 }\nexport default { current: 2 }";
        let literal = locate(source).unwrap();
        assert_eq!(literal.span.text(source), "{ current: 2 }");
    }

    #[test]
    fn test_custom_factory() {
        let source = "export default createConfig({ a: 1 })";
        let options = EditOptions::default().with_factory("createConfig");
        let literal = locate_config_literal(source, &options).unwrap();
        assert_eq!(literal.span.text(source), "{ a: 1 }");
        assert!(matches!(locate(source), Err(Error::NoConfigLiteral { .. })));
    }

    #[test]
    fn test_parenthesized_literal() {
        let source = "module.exports = ({ a: 1 })";
        let literal = locate(source).unwrap();
        assert_eq!(literal.span.text(source), "({ a: 1 })");
        let root = object_root(source, literal.span).unwrap().unwrap();
        assert_eq!(root.text(source), "{ a: 1 }");
    }

    #[test]
    fn test_no_export() {
        assert!(matches!(
            locate("const config = {}"),
            Err(Error::NoConfigLiteral { .. })
        ));
        assert!(matches!(
            locate("export default config"),
            Err(Error::NoConfigLiteral { .. })
        ));
    }

    #[test]
    fn test_unbalanced() {
        assert!(matches!(
            locate("export default { a: { b: 1 }"),
            Err(Error::UnbalancedLiteral { .. })
        ));
    }
}
