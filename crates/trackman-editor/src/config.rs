//! Editor configuration
//!
//! [`EditorConfig`] is read from TOML. A missing file means defaults.
//!
//! ```toml
//! row_order = "by-id"
//! kinds = ["send-port", "receive-port"]
//! persist_on_partial_failure = true
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use trackman_schema::ArtifactKind;

/// Display order of rows within a panel
///
/// The first row in this order is the reference row for column toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowOrder {
    /// Ascending artifact id
    #[default]
    ById,
    /// Order the catalog returned
    LoadOrder,
}

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Row order within each panel
    pub row_order: RowOrder,
    /// Artifact kinds opened by a session, in panel order
    pub kinds: Vec<ArtifactKind>,
    /// Persist accepted writes even when other artifacts' writes were rejected
    pub persist_on_partial_failure: bool,
}

impl EditorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With row order
    #[inline]
    #[must_use]
    pub fn with_row_order(mut self, row_order: RowOrder) -> Self {
        self.row_order = row_order;
        self
    }

    /// With artifact kinds
    #[inline]
    #[must_use]
    pub fn with_kinds(mut self, kinds: impl IntoIterator<Item = ArtifactKind>) -> Self {
        self.kinds = kinds.into_iter().collect();
        self
    }

    /// With partial-failure persistence
    #[inline]
    #[must_use]
    pub fn with_persist_on_partial_failure(mut self, persist: bool) -> Self {
        self.persist_on_partial_failure = persist;
        self
    }

    /// Parse TOML
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` for malformed TOML and `ConfigError::NoKinds` if the
    /// kind list is empty
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file, falling back to defaults if it does not exist
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(toml) => Self::from_toml_str(&toml),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Check invariants
    ///
    /// # Errors
    /// Returns `ConfigError::NoKinds` if no kind is enabled
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.kinds.is_empty() {
            return Err(ConfigError::NoKinds);
        }
        Ok(())
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            row_order: RowOrder::ById,
            kinds: ArtifactKind::ALL.to_vec(),
            persist_on_partial_failure: true,
        }
    }
}
