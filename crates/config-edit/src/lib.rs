//! Path-addressed editing of deployment configuration files
//!
//! Two ways to change a configuration:
//!
//! - on an in-memory tree ([`tree`], [`substitute`]), where values are
//!   created, updated, read and deleted by path, and
//! - on the raw text of an `azion.config.js`-style file ([`mutate`],
//!   [`replace`]), where only the addressed literal changes and comments,
//!   spacing and quoting elsewhere are kept byte for byte.
//!
//! Both share the path grammar in [`path`] and the path walk in [`resolve`].

pub mod document;
pub mod edit;
pub mod error;
pub mod format;
pub mod locate;
pub mod logging;
pub mod mutate;
pub mod options;
pub mod path;
pub mod replace;
pub mod resolve;
pub mod scan;
pub mod source;
pub mod substitute;
pub mod tree;

pub use document::ConfigDocument;
pub use edit::{BatchOutcome, Edit, EditKind, TextEdit, apply_all};
pub use error::{Error, Result};
pub use format::{Formatter, PassthroughFormatter, format_value};
pub use locate::{ConfigLiteral, ExportConvention, ExportHeader, locate_config_literal};
pub use mutate::{update_in_text, update_in_text_with};
pub use options::{EditOptions, QuoteStyle};
pub use path::{Path, PathSegment, parse_path};
pub use replace::{replace_in_text, replace_in_text_with};
pub use resolve::Resolver;
pub use scan::LiteralSpan;
pub use source::{ConfigSource, InMemorySource, LoadedConfig};
pub use substitute::replace_all;
pub use tree::{ConfigValue, create, delete, delete_all, read, update};
