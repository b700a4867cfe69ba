//! Row sets
//!
//! A [`RowSet`] holds every row of one artifact kind in display order and exposes the
//! edit, toggle and commit operations addressed by artifact id and column key.

use crate::bulk::{self, BulkOutcome};
use crate::catalog::CatalogRecord;
use crate::cell::CellOutcome;
use crate::commit::{self, PendingWrite};
use crate::config::RowOrder;
use crate::error::EditorError;
use crate::row::{ArtifactId, ArtifactRow};
use crate::tracker;
use std::collections::HashSet;
use trackman_schema::{ArtifactKind, FlagSchema, SchemaRegistry};

/// Build the rows of one kind from catalog records
///
/// # Errors
/// - `SchemaError::SchemaMismatch` if `kind` has no registered schema
/// - `SchemaError::FlagBitsOutOfRange` if a record sets bits outside the schema
/// - `EditorError::DuplicateArtifact` if two records share an id
pub fn load(
    registry: &SchemaRegistry,
    kind: &str,
    records: Vec<CatalogRecord>,
    order: RowOrder,
) -> Result<RowSet, EditorError> {
    let schema = registry.resolve(kind)?;
    RowSet::from_records(schema, records, order)
}

/// All rows of one artifact kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSet {
    schema: &'static FlagSchema,
    rows: Vec<ArtifactRow>,
}

impl RowSet {
    /// Build clean rows from catalog records
    ///
    /// # Errors
    /// Returns error if a record's flag bits do not fit the schema or an id repeats
    pub fn from_records(
        schema: &'static FlagSchema,
        records: Vec<CatalogRecord>,
        order: RowOrder,
    ) -> Result<Self, EditorError> {
        let mut seen = HashSet::with_capacity(records.len());
        let mut rows = Vec::with_capacity(records.len());

        for record in records {
            if !seen.insert(record.id.clone()) {
                return Err(EditorError::DuplicateArtifact {
                    kind: schema.kind(),
                    id: record.id,
                });
            }
            rows.push(ArtifactRow::from_record(schema, record)?);
        }

        if order == RowOrder::ById {
            rows.sort_by(|a, b| a.id().cmp(b.id()));
        }

        tracing::debug!(kind = %schema.kind(), rows = rows.len(), "rows loaded");
        Ok(Self { schema, rows })
    }

    /// Artifact kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ArtifactKind {
        self.schema.kind()
    }

    /// Schema of every row
    #[inline]
    #[must_use]
    pub fn schema(&self) -> &'static FlagSchema {
        self.schema
    }

    /// Rows in display order
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[ArtifactRow] {
        &self.rows
    }

    /// Get number of rows
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if there are no rows
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row with `id`
    #[must_use]
    pub fn row(&self, id: &str) -> Option<&ArtifactRow> {
        self.rows.iter().find(|row| row.id().as_str() == id)
    }

    /// Whether any row has a dirty cell
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.rows.iter().any(ArtifactRow::is_dirty)
    }

    /// Set one cell
    ///
    /// # Errors
    /// Returns error if the row or column does not exist
    pub fn set_cell(
        &mut self,
        id: &str,
        column: &str,
        value: bool,
    ) -> Result<CellOutcome, EditorError> {
        tracker::set_cell(self.row_mut(id)?, column, value)
    }

    /// Toggle a column across all rows
    ///
    /// # Errors
    /// Returns error if the column does not exist
    pub fn toggle_column(&mut self, column: &str) -> Result<BulkOutcome, EditorError> {
        self.schema.position(column)?;
        bulk::toggle_column(&mut self.rows, column)
    }

    /// Toggle every editable cell of one row
    ///
    /// # Errors
    /// Returns error if the row does not exist
    pub fn toggle_row(&mut self, id: &str) -> Result<BulkOutcome, EditorError> {
        Ok(bulk::toggle_row(self.row_mut(id)?))
    }

    /// One write per dirty row, in display order
    #[must_use]
    pub fn pending_writes(&self) -> Vec<PendingWrite> {
        commit::collect_pending_writes(&self.rows)
    }

    /// Close the edit episodes of the rows in `ids`
    ///
    /// Ids not in this set are ignored. Returns the number of rows marked.
    pub fn mark_committed<'a>(&mut self, ids: impl IntoIterator<Item = &'a ArtifactId>) -> usize {
        let ids: HashSet<&ArtifactId> = ids.into_iter().collect();
        commit::mark_committed(self.rows.iter_mut().filter(|row| ids.contains(row.id())))
    }

    fn row_mut(&mut self, id: &str) -> Result<&mut ArtifactRow, EditorError> {
        let kind = self.kind();
        self.rows
            .iter_mut()
            .find(|row| row.id().as_str() == id)
            .ok_or_else(|| EditorError::UnknownArtifact {
                kind,
                id: id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackman_schema::{ArtifactAttributes, SchemaError};

    fn records(ids: &[&str]) -> Vec<CatalogRecord> {
        ids.iter()
            .map(|id| CatalogRecord::new(*id, 0, ArtifactAttributes::two_way()))
            .collect()
    }

    fn ids(set: &RowSet) -> Vec<&str> {
        set.rows().iter().map(|row| row.id().as_str()).collect()
    }

    #[test]
    fn load_sorts_by_id_by_default() {
        let registry = SchemaRegistry::with_defaults();
        let set = load(&registry, "send-port", records(&["b", "c", "a"]), RowOrder::ById).unwrap();
        assert_eq!(ids(&set), vec!["a", "b", "c"]);
        assert_eq!(set.kind(), ArtifactKind::SendPort);
    }

    #[test]
    fn load_order_keeps_catalog_order() {
        let registry = SchemaRegistry::with_defaults();
        let set =
            load(&registry, "pipeline", records(&["b", "c", "a"]), RowOrder::LoadOrder).unwrap();
        assert_eq!(ids(&set), vec!["b", "c", "a"]);
    }

    #[test]
    fn load_rejects_unknown_kind() {
        let registry = SchemaRegistry::with_defaults();
        let err = load(&registry, "host-instance", records(&["a"]), RowOrder::ById).unwrap_err();
        assert!(matches!(err, EditorError::Schema(SchemaError::SchemaMismatch { .. })));
    }

    #[test]
    fn load_rejects_duplicate_ids() {
        let registry = SchemaRegistry::with_defaults();
        let err =
            load(&registry, "pipeline", records(&["a", "b", "a"]), RowOrder::ById).unwrap_err();
        assert!(matches!(err, EditorError::DuplicateArtifact { ref id, .. } if id.as_str() == "a"));
    }

    #[test]
    fn set_cell_on_unknown_row_is_an_error() {
        let registry = SchemaRegistry::with_defaults();
        let mut set = load(&registry, "pipeline", records(&["a"]), RowOrder::ById).unwrap();
        let err = set.set_cell("z", "PipelineEvents", true).unwrap_err();
        assert!(matches!(err, EditorError::UnknownArtifact { .. }));
    }

    #[test]
    fn toggle_column_on_empty_set_still_checks_column() {
        let registry = SchemaRegistry::with_defaults();
        let mut set = load(&registry, "pipeline", Vec::new(), RowOrder::ById).unwrap();
        assert!(set.toggle_column("PipelineEvents").is_ok());
        assert!(set.toggle_column("Nope").is_err());
    }

    #[test]
    fn mark_committed_only_touches_listed_rows() {
        let registry = SchemaRegistry::with_defaults();
        let mut set = load(&registry, "pipeline", records(&["a", "b"]), RowOrder::ById).unwrap();
        set.set_cell("a", "PipelineEvents", true).unwrap();
        set.set_cell("b", "PipelineEvents", true).unwrap();

        let marked = set.mark_committed([&ArtifactId::from("b")]);

        assert_eq!(marked, 1);
        assert_eq!(set.pending_writes(), vec![PendingWrite::new("a", 0b1)]);
    }
}
