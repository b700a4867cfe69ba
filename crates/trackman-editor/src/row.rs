//! Artifact rows
//!
//! Provides [`ArtifactRow`], the in-memory edit model of one artifact: its identity,
//! editability attributes and one [`CellState`] per schema column.

use crate::catalog::CatalogRecord;
use crate::cell::CellState;
use crate::error::EditorError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};
use trackman_schema::{ArtifactAttributes, FlagBits, FlagColumn, FlagSchema, SchemaError};

/// Artifact identifier (full name in the catalog)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(String);

impl ArtifactId {
    /// Create id from a name
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Id as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ArtifactId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ArtifactId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ArtifactId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for ArtifactId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Edit model of one artifact
///
/// Cells are keyed by column key and kept in schema order, so the cell at position *i*
/// owns bit *i* of the artifact's flag bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRow {
    id: ArtifactId,
    attributes: ArtifactAttributes,
    schema: &'static FlagSchema,
    cells: IndexMap<&'static str, CellState>,
}

impl ArtifactRow {
    /// Build a clean row from a catalog record
    ///
    /// Each cell takes its value from the record's flag bits and is locked when its column
    /// does not apply to the record's attributes.
    ///
    /// # Errors
    /// Returns `SchemaError::FlagBitsOutOfRange` if the record sets bits outside the schema
    pub fn from_record(
        schema: &'static FlagSchema,
        record: CatalogRecord,
    ) -> Result<Self, EditorError> {
        let values = schema.decode(record.flag_bits)?;
        let cells = schema
            .columns()
            .iter()
            .zip(values)
            .map(|(column, current)| {
                let locked = !column.applies(&record.attributes);
                (column.key, CellState::new(current, locked))
            })
            .collect();

        Ok(Self {
            id: record.id,
            attributes: record.attributes,
            schema,
            cells,
        })
    }

    /// Artifact id
    #[inline]
    #[must_use]
    pub fn id(&self) -> &ArtifactId {
        &self.id
    }

    /// Editability attributes
    #[inline]
    #[must_use]
    pub fn attributes(&self) -> &ArtifactAttributes {
        &self.attributes
    }

    /// Schema the row was built from
    #[inline]
    #[must_use]
    pub fn schema(&self) -> &'static FlagSchema {
        self.schema
    }

    /// Cells paired with their columns, in bit order
    pub fn cells(&self) -> impl Iterator<Item = (&'static FlagColumn, &CellState)> + '_ {
        self.schema.columns().iter().zip(self.cells.values())
    }

    /// Cell of the column with `key`
    #[inline]
    #[must_use]
    pub fn cell(&self, key: &str) -> Option<&CellState> {
        self.cells.get(key)
    }

    /// Cell at bit position `index`
    #[inline]
    #[must_use]
    pub fn cell_at(&self, index: usize) -> Option<&CellState> {
        self.cells.get_index(index).map(|(_, cell)| cell)
    }

    /// Current values in bit order
    #[must_use]
    pub fn values(&self) -> Vec<bool> {
        self.cells.values().map(CellState::current).collect()
    }

    /// Current values folded into flag bits
    ///
    /// Locked cells contribute their fixed value.
    #[must_use]
    pub fn flag_bits(&self) -> FlagBits {
        self.schema.encode(self.cells.values().map(CellState::current))
    }

    /// Whether any unlocked cell differs from its baseline
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.cells
            .values()
            .any(|cell| !cell.is_locked() && cell.is_dirty())
    }

    /// Keys of the dirty columns
    pub fn dirty_columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.cells
            .iter()
            .filter(|(_, cell)| cell.is_dirty())
            .map(|(key, _)| *key)
    }

    /// Bit position of `key`
    pub(crate) fn position(&self, key: &str) -> Result<usize, SchemaError> {
        self.cells
            .get_index_of(key)
            .ok_or_else(|| SchemaError::UnknownColumn {
                kind: self.schema.kind().name().to_string(),
                column: key.to_string(),
            })
    }

    #[inline]
    pub(crate) fn cell_at_mut(&mut self, index: usize) -> Option<&mut CellState> {
        self.cells.get_index_mut(index).map(|(_, cell)| cell)
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut CellState> + '_ {
        self.cells.values_mut()
    }
}
