//! Edit tracker
//!
//! The single mutation path for cell values. Every edit, direct or bulk, goes through
//! [`apply`], which captures the baseline once per edit episode and never touches a
//! locked cell.

use crate::cell::{CellOutcome, CellState};
use crate::error::EditorError;
use crate::row::ArtifactRow;

/// Set one cell of `row` to `value`
///
/// Locked cells are left unchanged and reported as [`CellOutcome::Locked`]; that is not
/// an error.
///
/// # Errors
/// Returns `SchemaError::UnknownColumn` if the row's schema has no column `column`
pub fn set_cell(
    row: &mut ArtifactRow,
    column: &str,
    value: bool,
) -> Result<CellOutcome, EditorError> {
    let index = row.position(column)?;
    let outcome = set_cell_at(row, index, value);

    tracing::trace!(
        artifact = %row.id(),
        column,
        value,
        ?outcome,
        "cell edited"
    );
    Ok(outcome)
}

/// Set the cell at bit position `index`; out-of-range indices are treated as locked
pub(crate) fn set_cell_at(row: &mut ArtifactRow, index: usize, value: bool) -> CellOutcome {
    match row.cell_at_mut(index) {
        Some(cell) => apply(cell, value),
        None => CellOutcome::Locked,
    }
}

/// Transition a cell to `value`
pub(crate) fn apply(cell: &mut CellState, value: bool) -> CellOutcome {
    if cell.locked {
        return CellOutcome::Locked;
    }

    if cell.baseline.is_none() {
        cell.baseline = Some(cell.current);
    }
    cell.current = value;

    cell.outcome()
}
