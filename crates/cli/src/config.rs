//! CLI configuration
//!
//! Settings are read from `migration-builder.toml` in the working directory
//! (or the file named by `--config` / `MIGRATION_BUILDER_CONFIG`). Every key
//! is optional; command-line flags override file values.
//!
//! ```toml
//! migrations_path = "database/migrations"
//! stubs_path = "stubs"
//! indent = 12
//! ```

use mbuilder_codegen::{DEFAULT_INDENT, GeneratorConfig};
use mbuilder_core::{BuilderError, BuilderResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "migration-builder.toml";

/// Default target directory for written migrations
pub const DEFAULT_MIGRATIONS_PATH: &str = "database/migrations";

/// Settings shared by all commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuilderConfig {
    /// Directory migrations are written to
    pub migrations_path: PathBuf,

    /// Directory searched for custom migration stubs
    pub stubs_path: Option<PathBuf>,

    /// Statement indentation
    pub indent: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            migrations_path: PathBuf::from(DEFAULT_MIGRATIONS_PATH),
            stubs_path: None,
            indent: DEFAULT_INDENT,
        }
    }
}

impl BuilderConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> BuilderResult<Self> {
        toml::from_str(text).map_err(|e| BuilderError::InvalidConfig(e.to_string()))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `migration-builder.toml` in
    /// `dir` is used when present, otherwise defaults.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> BuilderResult<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = dir.join(CONFIG_FILE);
                if !candidate.is_file() {
                    tracing::debug!("no configuration file, using defaults");
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let text = std::fs::read_to_string(&path).map_err(|e| BuilderError::FileRead {
            path: path.clone(),
            message: e.to_string(),
        })?;

        let config = Self::from_toml(&text)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Generator settings derived from this configuration
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::new().with_indent(self.indent)
    }
}

// ============================================================================
// Tests
// ============================================================================
