//! Catalog boundary
//!
//! The editor reads artifacts from, and writes flag bits to, an external catalog through
//! the [`Catalog`] trait. Writes are staged per artifact and only become durable on an
//! explicit [`Catalog::persist`].

use crate::commit::PendingWrite;
use crate::error::CatalogError;
use crate::row::ArtifactId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use trackman_schema::{ArtifactAttributes, ArtifactKind, FlagBits};

/// One artifact as the catalog reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Artifact id
    pub id: ArtifactId,
    /// Stored flag bits; bit *i* is column *i* of the kind's schema
    #[serde(default)]
    pub flag_bits: FlagBits,
    /// Editability attributes
    #[serde(default)]
    pub attributes: ArtifactAttributes,
}

impl CatalogRecord {
    /// Create new record
    #[inline]
    #[must_use]
    pub fn new(
        id: impl Into<ArtifactId>,
        flag_bits: FlagBits,
        attributes: ArtifactAttributes,
    ) -> Self {
        Self {
            id: id.into(),
            flag_bits,
            attributes,
        }
    }
}

/// External store of artifacts and their tracking flags
///
/// # Contract
/// - `stage` may fail for a single artifact without affecting others
/// - `persist` stores every staged write or none of them
/// - `discard` drops staged writes that have not been persisted
pub trait Catalog {
    /// Read all artifacts of `kind`
    ///
    /// # Errors
    /// Returns error if the catalog cannot be read
    fn read(&self, kind: ArtifactKind) -> Result<Vec<CatalogRecord>, CatalogError>;

    /// Queue new flag bits for one artifact
    ///
    /// # Errors
    /// Returns error if the catalog refuses this artifact's write
    fn stage(&mut self, kind: ArtifactKind, write: &PendingWrite) -> Result<(), CatalogError>;

    /// Store every staged write
    ///
    /// # Errors
    /// Returns error if nothing could be stored
    fn persist(&mut self) -> Result<(), CatalogError>;

    /// Drop staged writes
    fn discard(&mut self);
}

impl<C: Catalog + ?Sized> Catalog for &mut C {
    fn read(&self, kind: ArtifactKind) -> Result<Vec<CatalogRecord>, CatalogError> {
        (**self).read(kind)
    }

    fn stage(&mut self, kind: ArtifactKind, write: &PendingWrite) -> Result<(), CatalogError> {
        (**self).stage(kind, write)
    }

    fn persist(&mut self) -> Result<(), CatalogError> {
        (**self).persist()
    }

    fn discard(&mut self) {
        (**self).discard();
    }
}

/// In-memory catalog, serializable as a JSON snapshot
///
/// Staged writes are invisible to [`Catalog::read`] until persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryCatalog {
    #[serde(default)]
    artifacts: BTreeMap<ArtifactKind, Vec<CatalogRecord>>,
    #[serde(skip)]
    staged: Vec<(ArtifactKind, PendingWrite)>,
}

impl MemoryCatalog {
    /// Create new empty catalog
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an artifact
    pub fn insert(&mut self, kind: ArtifactKind, record: CatalogRecord) {
        let records = self.artifacts.entry(kind).or_default();
        match records.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
    }

    /// Add an artifact (builder style)
    #[must_use]
    pub fn with(mut self, kind: ArtifactKind, record: CatalogRecord) -> Self {
        self.insert(kind, record);
        self
    }

    /// Stored record of one artifact
    #[must_use]
    pub fn get(&self, kind: ArtifactKind, id: &str) -> Option<&CatalogRecord> {
        self.artifacts
            .get(&kind)?
            .iter()
            .find(|record| record.id.as_str() == id)
    }

    /// Number of staged, unpersisted writes
    #[inline]
    #[must_use]
    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }

    /// Parse a JSON snapshot
    ///
    /// # Errors
    /// Returns `CatalogError::Format` if the snapshot is malformed
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render persisted state as a JSON snapshot
    ///
    /// # Errors
    /// Returns `CatalogError::Format` if serialization fails
    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a snapshot file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| CatalogError::io_error(path, e))?;
        Self::from_json(&json)
    }

    /// Write persisted state to a snapshot file
    ///
    /// # Errors
    /// Returns error if the file cannot be written
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?).map_err(|e| CatalogError::io_error(path, e))
    }
}

impl Catalog for MemoryCatalog {
    fn read(&self, kind: ArtifactKind) -> Result<Vec<CatalogRecord>, CatalogError> {
        Ok(self.artifacts.get(&kind).cloned().unwrap_or_default())
    }

    fn stage(&mut self, kind: ArtifactKind, write: &PendingWrite) -> Result<(), CatalogError> {
        if self.get(kind, write.id.as_str()).is_none() {
            return Err(CatalogError::UnknownArtifact {
                kind,
                id: write.id.clone(),
            });
        }
        self.staged.push((kind, write.clone()));
        Ok(())
    }

    fn persist(&mut self) -> Result<(), CatalogError> {
        for (kind, write) in std::mem::take(&mut self.staged) {
            if let Some(record) = self
                .artifacts
                .get_mut(&kind)
                .and_then(|records| records.iter_mut().find(|record| record.id == write.id))
            {
                record.flag_bits = write.flag_bits;
            }
        }
        Ok(())
    }

    fn discard(&mut self) {
        self.staged.clear();
    }
}
