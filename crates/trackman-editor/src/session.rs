//! Editing session
//!
//! An [`EditorSession`] holds one [`RowSet`] per configured artifact kind and drives the
//! save cycle against a [`Catalog`]: stage every pending write, persist once, then mark
//! committed exactly the rows the catalog accepted.

use crate::catalog::Catalog;
use crate::commit::PendingWrite;
use crate::config::EditorConfig;
use crate::error::{CatalogError, EditorError};
use crate::row::ArtifactId;
use crate::rowset::RowSet;
use indexmap::IndexMap;
use trackman_schema::{ArtifactKind, SchemaRegistry};

/// A write the catalog refused
#[derive(Debug)]
pub struct FailedWrite {
    /// Artifact kind
    pub kind: ArtifactKind,
    /// Artifact id
    pub id: ArtifactId,
    /// Catalog error
    pub error: CatalogError,
}

/// Outcome of [`EditorSession::save`]
#[derive(Debug, Default)]
pub struct SaveReport {
    /// Rows written and marked clean
    pub committed: Vec<(ArtifactKind, ArtifactId)>,
    /// Rows whose write was refused; they keep their edits
    pub failed: Vec<FailedWrite>,
    /// Whether `persist` was called and succeeded
    pub persisted: bool,
}

impl SaveReport {
    /// Whether every pending write was committed
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Check if nothing was pending
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.committed.is_empty() && self.failed.is_empty()
    }
}

/// Open panels of an editing session
#[derive(Debug, Clone)]
pub struct EditorSession {
    config: EditorConfig,
    registry: SchemaRegistry,
    panels: IndexMap<ArtifactKind, RowSet>,
}

impl EditorSession {
    /// Create a session with no panels loaded
    #[must_use]
    pub fn new(config: EditorConfig, registry: SchemaRegistry) -> Self {
        Self {
            config,
            registry,
            panels: IndexMap::new(),
        }
    }

    /// Create a session and load every configured kind from `catalog`
    ///
    /// # Errors
    /// Returns the first load error
    pub fn open(
        config: EditorConfig,
        registry: SchemaRegistry,
        catalog: &impl Catalog,
    ) -> Result<Self, EditorError> {
        config.validate()?;
        let mut session = Self::new(config, registry);
        for kind in session.config.kinds.clone() {
            session.load_kind(kind.name(), catalog)?;
        }
        Ok(session)
    }

    /// Load, or reload, the panel for the kind named `kind`
    ///
    /// On error, panels already loaded are left untouched.
    ///
    /// # Errors
    /// Returns error if the kind has no schema, the catalog read fails, or the records do
    /// not fit the schema
    pub fn load_kind(
        &mut self,
        kind: &str,
        catalog: &impl Catalog,
    ) -> Result<&RowSet, EditorError> {
        let schema = self.registry.resolve(kind)?;
        let records = catalog.read(schema.kind())?;
        let panel = RowSet::from_records(schema, records, self.config.row_order)?;

        let (index, _) = self.panels.insert_full(schema.kind(), panel);
        Ok(&self.panels[index])
    }

    /// Session configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Panel of `kind`
    #[inline]
    #[must_use]
    pub fn panel(&self, kind: ArtifactKind) -> Option<&RowSet> {
        self.panels.get(&kind)
    }

    /// Mutable panel of `kind`
    ///
    /// # Errors
    /// Returns `EditorError::KindNotOpen` if the kind was not loaded
    pub fn panel_mut(&mut self, kind: ArtifactKind) -> Result<&mut RowSet, EditorError> {
        self.panels
            .get_mut(&kind)
            .ok_or(EditorError::KindNotOpen(kind))
    }

    /// Panels in load order
    pub fn panels(&self) -> impl Iterator<Item = &RowSet> + '_ {
        self.panels.values()
    }

    /// Whether any panel has a dirty row
    #[must_use]
    pub fn has_pending_changes(&self) -> bool {
        self.panels.values().any(RowSet::is_dirty)
    }

    /// Pending writes of every panel
    #[must_use]
    pub fn pending_writes(&self) -> Vec<(ArtifactKind, PendingWrite)> {
        self.panels
            .values()
            .flat_map(|panel| {
                let kind = panel.kind();
                panel.pending_writes().into_iter().map(move |write| (kind, write))
            })
            .collect()
    }

    /// Write every pending change to `catalog`
    ///
    /// Each write is staged separately; a refused write is reported in
    /// [`SaveReport::failed`] and its row keeps its edits. Accepted writes are persisted
    /// together and their rows are marked committed.
    ///
    /// # Errors
    /// Returns `EditorError::SaveNotPersisted` if persisting fails, carrying the writes
    /// refused while staging; no row is marked committed and staged writes are discarded
    pub fn save(&mut self, catalog: &mut impl Catalog) -> Result<SaveReport, EditorError> {
        let pending = self.pending_writes();
        let mut report = SaveReport::default();
        if pending.is_empty() {
            tracing::debug!("nothing to save");
            return Ok(report);
        }

        let mut staged = Vec::with_capacity(pending.len());
        for (kind, write) in pending {
            match catalog.stage(kind, &write) {
                Ok(()) => staged.push((kind, write.id)),
                Err(error) => {
                    tracing::warn!(%kind, id = %write.id, %error, "write rejected");
                    report.failed.push(FailedWrite {
                        kind,
                        id: write.id,
                        error,
                    });
                }
            }
        }

        if staged.is_empty() {
            return Ok(report);
        }
        if !report.failed.is_empty() && !self.config.persist_on_partial_failure {
            tracing::info!(
                staged = staged.len(),
                failed = report.failed.len(),
                "partial failure, discarding staged writes"
            );
            catalog.discard();
            return Ok(report);
        }

        if let Err(error) = catalog.persist() {
            tracing::error!(
                %error,
                staged = staged.len(),
                refused = report.failed.len(),
                "persist failed"
            );
            catalog.discard();
            return Err(EditorError::SaveNotPersisted {
                source: error,
                refused: report.failed,
            });
        }
        report.persisted = true;

        for (kind, panel) in &mut self.panels {
            panel.mark_committed(
                staged
                    .iter()
                    .filter(|(staged_kind, _)| staged_kind == kind)
                    .map(|(_, id)| id),
            );
        }
        report.committed = staged;

        tracing::info!(
            committed = report.committed.len(),
            failed = report.failed.len(),
            "changes saved"
        );
        Ok(report)
    }
}
