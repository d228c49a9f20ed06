//! Where configuration text comes from
//!
//! Discovering and reading the configuration file is left to the caller.
//! Implementations carry whatever state they need (a working directory, a
//! list of candidate file names) explicitly.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// A configuration file's location and full text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub raw_text: String,
}

/// Finds and reads the configuration file
pub trait ConfigSource {
    fn load(&self) -> Result<LoadedConfig>;
}

/// A configuration that is already in memory
#[derive(Debug, Clone)]
pub struct InMemorySource {
    config: LoadedConfig,
}

impl InMemorySource {
    pub fn new(path: impl AsRef<Path>, raw_text: impl Into<String>) -> Self {
        Self {
            config: LoadedConfig {
                path: path.as_ref().to_path_buf(),
                raw_text: raw_text.into(),
            },
        }
    }
}

impl ConfigSource for InMemorySource {
    fn load(&self) -> Result<LoadedConfig> {
        Ok(self.config.clone())
    }
}
