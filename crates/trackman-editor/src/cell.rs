//! Per-cell edit state
//!
//! Provides [`CellState`], one flag value of one artifact together with the baseline it
//! diverged from.

use serde::Serialize;

/// Edit state of a single flag cell
///
/// # Invariants
/// - A locked cell's `current` never changes after load
/// - `baseline` is `None` until the first mutation since load or commit, then holds the value
///   `current` had immediately before that mutation
/// - The cell is dirty iff `baseline` is set and differs from `current`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellState {
    pub(crate) current: bool,
    pub(crate) baseline: Option<bool>,
    pub(crate) locked: bool,
}

impl CellState {
    #[inline]
    pub(crate) fn new(current: bool, locked: bool) -> Self {
        Self {
            current,
            baseline: None,
            locked,
        }
    }

    /// Current value
    #[inline]
    #[must_use]
    pub fn current(&self) -> bool {
        self.current
    }

    /// Value before the current edit episode, if one has started
    #[inline]
    #[must_use]
    pub fn baseline(&self) -> Option<bool> {
        self.baseline
    }

    /// Whether the column does not apply to this artifact
    #[inline]
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Whether the value differs from its baseline
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.baseline.is_some_and(|baseline| baseline != self.current)
    }

    /// Presentation state of the cell
    #[inline]
    #[must_use]
    pub fn outcome(&self) -> CellOutcome {
        if self.locked {
            CellOutcome::Locked
        } else if self.is_dirty() {
            CellOutcome::Dirty
        } else {
            CellOutcome::Clean
        }
    }

    /// End the edit episode
    #[inline]
    pub(crate) fn commit(&mut self) {
        self.baseline = None;
    }
}

/// State of a cell after an edit, as a grid would colour it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellOutcome {
    /// Cell is read-only; the edit was ignored
    Locked,
    /// Cell matches its baseline
    Clean,
    /// Cell differs from its baseline
    Dirty,
}
