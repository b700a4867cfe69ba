//! Edit operations given on the command line

use std::fmt::{self, Display, Formatter};
use trackman_editor::{BulkOutcome, CellOutcome, EditorError, EditorSession};
use trackman_schema::ArtifactKind;

/// One edit, applied to an open session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    /// `KIND:ID:COLUMN=BOOL`
    Set {
        /// Artifact kind
        kind: ArtifactKind,
        /// Artifact id
        id: String,
        /// Column key
        column: String,
        /// New value
        value: bool,
    },
    /// `KIND:COLUMN`
    ToggleColumn {
        /// Artifact kind
        kind: ArtifactKind,
        /// Column key
        column: String,
    },
    /// `KIND:ID`
    ToggleRow {
        /// Artifact kind
        kind: ArtifactKind,
        /// Artifact id
        id: String,
    },
}

/// What an [`EditOp`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpOutcome {
    /// Single cell edit
    Cell(CellOutcome),
    /// Column or row toggle
    Bulk(BulkOutcome),
}

impl EditOp {
    /// Parse `KIND:ID:COLUMN=BOOL`
    ///
    /// The id may itself contain `:`.
    ///
    /// # Errors
    /// Returns a message naming the malformed part
    pub fn parse_set(s: &str) -> Result<Self, String> {
        let (target, value) = s
            .rsplit_once('=')
            .ok_or_else(|| format!("expected KIND:ID:COLUMN=BOOL, got '{s}'"))?;
        let value = value
            .trim()
            .parse::<bool>()
            .map_err(|_| format!("expected true or false, got '{value}'"))?;
        let (kind, rest) = split_kind(target)?;
        let (id, column) = rest
            .rsplit_once(':')
            .ok_or_else(|| format!("expected KIND:ID:COLUMN, got '{target}'"))?;

        Ok(Self::Set {
            kind,
            id: non_empty(id, "id")?,
            column: non_empty(column, "column")?,
            value,
        })
    }

    /// Parse `KIND:COLUMN`
    ///
    /// # Errors
    /// Returns a message naming the malformed part
    pub fn parse_toggle_column(s: &str) -> Result<Self, String> {
        let (kind, column) = split_kind(s)?;
        Ok(Self::ToggleColumn {
            kind,
            column: non_empty(column, "column")?,
        })
    }

    /// Parse `KIND:ID`
    ///
    /// # Errors
    /// Returns a message naming the malformed part
    pub fn parse_toggle_row(s: &str) -> Result<Self, String> {
        let (kind, id) = split_kind(s)?;
        Ok(Self::ToggleRow {
            kind,
            id: non_empty(id, "id")?,
        })
    }

    /// Kind this operation edits
    #[must_use]
    pub fn kind(&self) -> ArtifactKind {
        match self {
            Self::Set { kind, .. }
            | Self::ToggleColumn { kind, .. }
            | Self::ToggleRow { kind, .. } => *kind,
        }
    }

    /// Apply to the matching panel of `session`
    ///
    /// # Errors
    /// Returns error if the kind is not open or the row or column does not exist
    pub fn apply(&self, session: &mut EditorSession) -> Result<OpOutcome, EditorError> {
        let panel = session.panel_mut(self.kind())?;
        let outcome = match self {
            Self::Set { id, column, value, .. } => {
                OpOutcome::Cell(panel.set_cell(id, column, *value)?)
            }
            Self::ToggleColumn { column, .. } => OpOutcome::Bulk(panel.toggle_column(column)?),
            Self::ToggleRow { id, .. } => OpOutcome::Bulk(panel.toggle_row(id)?),
        };
        tracing::debug!(op = %self, ?outcome, "applied");
        Ok(outcome)
    }
}

impl Display for EditOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set { kind, id, column, value } => write!(f, "set {kind}:{id}:{column}={value}"),
            Self::ToggleColumn { kind, column } => write!(f, "toggle column {kind}:{column}"),
            Self::ToggleRow { kind, id } => write!(f, "toggle row {kind}:{id}"),
        }
    }
}

fn split_kind(s: &str) -> Result<(ArtifactKind, &str), String> {
    let (kind, rest) = s
        .split_once(':')
        .ok_or_else(|| format!("expected KIND:..., got '{s}'"))?;
    let kind = kind.parse::<ArtifactKind>().map_err(|e| e.to_string())?;
    Ok((kind, rest))
}

fn non_empty(part: &str, what: &str) -> Result<String, String> {
    if part.is_empty() {
        Err(format!("empty {what}"))
    } else {
        Ok(part.to_string())
    }
}
