//! Text rendering of panels and pending writes
//!
//! Cells print as `x` (checked), `.` (unchecked) or `-` (locked). Rows with edits carry a
//! `*` in the margin.

use std::fmt::Write;
use trackman_editor::{ArtifactRow, PendingWrite, RowSet, SaveReport};
use trackman_schema::ArtifactKind;

const CHECKED: char = 'x';
const UNCHECKED: char = '.';
const LOCKED: char = '-';
const DIRTY: char = '*';

/// Render one panel as a grid followed by a column legend
#[must_use]
pub fn render_panel(panel: &RowSet) -> String {
    let kind = panel.kind();
    let width = panel
        .rows()
        .iter()
        .map(|row| row.id().as_str().chars().count())
        .max()
        .unwrap_or(0)
        .max(2);

    let mut out = String::new();
    let _ = writeln!(out, "{} ({kind}, {} rows)", kind.title(), panel.len());

    let indices: Vec<String> = (0..panel.schema().len()).map(|i| i.to_string()).collect();
    let _ = writeln!(out, "    {:<width$}  {}", "id", indices.join(" "));

    for row in panel.rows() {
        let margin = if row.is_dirty() { DIRTY } else { ' ' };
        let _ = writeln!(out, "  {margin} {:<width$}  {}", row.id(), cells(row));
    }

    for (index, column) in panel.schema().columns().iter().enumerate() {
        let _ = writeln!(
            out,
            "    {index:>2} {}: {} / {}",
            column.key, column.group, column.label
        );
    }
    out
}

/// One row's cells, space separated
#[must_use]
pub fn cells(row: &ArtifactRow) -> String {
    row.cells()
        .map(|(_, cell)| {
            if cell.is_locked() {
                LOCKED
            } else if cell.current() {
                CHECKED
            } else {
                UNCHECKED
            }
        })
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render pending writes, one per line
#[must_use]
pub fn render_writes(writes: &[(ArtifactKind, PendingWrite)]) -> String {
    if writes.is_empty() {
        return "no pending changes\n".to_string();
    }

    let mut out = String::new();
    for (kind, write) in writes {
        let _ = writeln!(out, "{kind} {} -> {:#b}", write.id, write.flag_bits);
    }
    out
}

/// Render the outcome of a save
#[must_use]
pub fn render_report(report: &SaveReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "committed {}, failed {}",
        report.committed.len(),
        report.failed.len()
    );
    for failed in &report.failed {
        let _ = writeln!(out, "  {} {}: {}", failed.kind, failed.id, failed.error);
    }
    out
}
