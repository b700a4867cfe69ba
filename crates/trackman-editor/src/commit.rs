//! Commit reducer
//!
//! Turns dirty rows into one flag-bits write each, and closes edit episodes once the
//! catalog has accepted them.

use crate::row::{ArtifactId, ArtifactRow};
use serde::{Deserialize, Serialize};
use trackman_schema::FlagBits;

/// New flag bits for one artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingWrite {
    /// Artifact to write
    pub id: ArtifactId,
    /// Every column's current value, locked columns included
    pub flag_bits: FlagBits,
}

impl PendingWrite {
    /// Create new write
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<ArtifactId>, flag_bits: FlagBits) -> Self {
        Self {
            id: id.into(),
            flag_bits,
        }
    }
}

/// One write per dirty row, in row order
///
/// Does not change tracker state.
#[must_use]
pub fn collect_pending_writes(rows: &[ArtifactRow]) -> Vec<PendingWrite> {
    rows.iter()
        .filter(|row| row.is_dirty())
        .map(|row| PendingWrite {
            id: row.id().clone(),
            flag_bits: row.flag_bits(),
        })
        .collect()
}

/// Close the edit episode of every cell in `rows`
///
/// Call only for rows whose write the catalog accepted. Returns the number of rows
/// marked.
pub fn mark_committed<'a>(rows: impl IntoIterator<Item = &'a mut ArtifactRow>) -> usize {
    let mut marked = 0;
    for row in rows {
        row.cells_mut().for_each(|cell| cell.commit());
        marked += 1;
    }
    marked
}
