//! Bulk toggles
//!
//! Column-wide and row-wide toggles. Both read a reference value, invert it, and route
//! every write through the edit tracker so baseline capture stays per cell.

use crate::cell::CellOutcome;
use crate::error::EditorError;
use crate::row::ArtifactRow;
use crate::tracker;
use serde::Serialize;

/// Result of a bulk toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BulkOutcome {
    /// Value written to every editable cell, `None` when there was nothing to read
    pub value: Option<bool>,
    /// Cells written
    pub applied: usize,
    /// Cells skipped because they are locked
    pub skipped_locked: usize,
    /// Written cells that now differ from their baseline
    pub dirty: usize,
}

impl BulkOutcome {
    fn record(&mut self, outcome: CellOutcome) {
        match outcome {
            CellOutcome::Locked => self.skipped_locked += 1,
            CellOutcome::Clean => self.applied += 1,
            CellOutcome::Dirty => {
                self.applied += 1;
                self.dirty += 1;
            }
        }
    }
}

/// Toggle `column` across `rows`
///
/// The reference value is the first row's cell, whether or not it is locked. Every
/// unlocked cell of the column is set to its negation; locked cells are skipped. An empty
/// row set is left alone. The column is looked up in each row's own schema, so rows of
/// different kinds may be mixed.
///
/// # Errors
/// Returns `SchemaError::UnknownColumn` if any row's schema has no column `column`; no
/// cell is changed in that case
pub fn toggle_column(rows: &mut [ArtifactRow], column: &str) -> Result<BulkOutcome, EditorError> {
    let positions = rows
        .iter()
        .map(|row| row.position(column))
        .collect::<Result<Vec<_>, _>>()?;
    let (Some(first), Some(&first_index)) = (rows.first(), positions.first()) else {
        return Ok(BulkOutcome::default());
    };
    let reference = first.cell_at(first_index).is_some_and(|cell| cell.current());
    let value = !reference;

    let mut outcome = BulkOutcome {
        value: Some(value),
        ..BulkOutcome::default()
    };
    for (row, index) in rows.iter_mut().zip(positions) {
        outcome.record(tracker::set_cell_at(row, index, value));
    }

    tracing::debug!(
        column,
        value,
        applied = outcome.applied,
        skipped_locked = outcome.skipped_locked,
        "column toggled"
    );
    Ok(outcome)
}

/// Toggle every editable cell of `row`
///
/// The reference value is the row's first column, whether or not it is locked.
pub fn toggle_row(row: &mut ArtifactRow) -> BulkOutcome {
    let Some(reference) = row.cell_at(0).map(|cell| cell.current()) else {
        return BulkOutcome::default();
    };
    let value = !reference;

    let mut outcome = BulkOutcome {
        value: Some(value),
        ..BulkOutcome::default()
    };
    for index in 0..row.schema().len() {
        outcome.record(tracker::set_cell_at(row, index, value));
    }

    tracing::debug!(
        artifact = %row.id(),
        value,
        applied = outcome.applied,
        skipped_locked = outcome.skipped_locked,
        "row toggled"
    );
    outcome
}
