//! Options for text-level editing

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Factory call recognised around the exported configuration literal.
pub const DEFAULT_FACTORY: &str = "defineConfig";

/// Quote character used when a replacement value has to be quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    #[default]
    Double,
    Single,
}

impl QuoteStyle {
    pub fn as_char(&self) -> char {
        match self {
            QuoteStyle::Double => '"',
            QuoteStyle::Single => '\'',
        }
    }
}

impl FromStr for QuoteStyle {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "double" | "\"" => Ok(QuoteStyle::Double),
            "single" | "'" => Ok(QuoteStyle::Single),
            _ => Err(Error::InvalidOption(format!("unknown quote style '{s}'"))),
        }
    }
}

impl fmt::Display for QuoteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteStyle::Double => write!(f, "double"),
            QuoteStyle::Single => write!(f, "single"),
        }
    }
}

/// Settings for locating and rewriting the configuration literal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditOptions {
    /// Quote used for plain scalar replacement values
    pub quote: QuoteStyle,
    /// Name of the factory call that may wrap the exported literal
    pub factory: String,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            quote: QuoteStyle::default(),
            factory: DEFAULT_FACTORY.to_string(),
        }
    }
}

impl EditOptions {
    pub fn with_quote(mut self, quote: QuoteStyle) -> Self {
        self.quote = quote;
        self
    }

    pub fn with_factory(mut self, factory: impl Into<String>) -> Self {
        self.factory = factory.into();
        self
    }
}
