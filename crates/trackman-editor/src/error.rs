//! Error types for the editor
//!
//! Provides error handling for:
//! - Schema resolution and flag decoding at load time
//! - Addressing rows and columns that do not exist
//! - Catalog reads, staged writes and persistence
//! - Configuration loading

use crate::row::ArtifactId;
use crate::session::FailedWrite;
use std::path::PathBuf;
use trackman_schema::{ArtifactKind, SchemaError};

/// Main editor error type
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// Schema lookup or flag decoding failed
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Two catalog records share one id within a kind
    #[error("duplicate {kind} '{id}'")]
    DuplicateArtifact {
        /// Artifact kind
        kind: ArtifactKind,
        /// Repeated id
        id: ArtifactId,
    },

    /// No row with the requested id
    #[error("no {kind} named '{id}'")]
    UnknownArtifact {
        /// Artifact kind
        kind: ArtifactKind,
        /// Requested id
        id: String,
    },

    /// Kind has not been loaded into the session
    #[error("{0} is not open in this session")]
    KindNotOpen(ArtifactKind),

    /// Catalog read or write failed
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Persisting a save failed; nothing was committed
    #[error("save not persisted ({} writes refused before persisting): {source}", .refused.len())]
    SaveNotPersisted {
        /// Persist error
        #[source]
        source: CatalogError,
        /// Writes the catalog refused while staging
        refused: Vec<FailedWrite>,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl EditorError {
    /// Check if the error came from the external catalog
    ///
    /// Catalog failures leave tracked edits in place, so the caller may retry.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Catalog(_) | Self::SaveNotPersisted { .. })
    }
}

/// Errors raised by a [`Catalog`](crate::Catalog) implementation
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Artifact addressed by a write does not exist in the catalog
    #[error("catalog has no {kind} named '{id}'")]
    UnknownArtifact {
        /// Artifact kind
        kind: ArtifactKind,
        /// Requested id
        id: ArtifactId,
    },

    /// Catalog refused a single artifact's write
    #[error("write to '{id}' rejected: {reason}")]
    WriteRejected {
        /// Artifact id
        id: ArtifactId,
        /// Reason reported by the catalog
        reason: String,
    },

    /// Persisting staged writes failed; nothing was stored
    #[error("persist failed: {0}")]
    PersistFailed(String),

    /// Snapshot could not be read or written
    #[error("snapshot I/O failed for {path}: {source}")]
    Io {
        /// Snapshot path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Snapshot is not valid JSON for the catalog model
    #[error("snapshot format error: {0}")]
    Format(#[from] serde_json::Error),
}

impl CatalogError {
    pub(crate) fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file exists but could not be read
    #[error("cannot read {path}: {source}")]
    Read {
        /// Config path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`EditorConfig`](crate::EditorConfig)
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config names no artifact kinds
    #[error("config enables no artifact kinds")]
    NoKinds,
}
