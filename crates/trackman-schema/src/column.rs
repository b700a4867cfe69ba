//! Flag columns and their lock conditions

use serde::{Deserialize, Serialize};

/// Attributes of an artifact that decide which columns are editable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ArtifactAttributes {
    /// Port is request-response rather than one-way
    #[serde(default)]
    pub is_two_way: bool,
}

impl ArtifactAttributes {
    /// Attributes of a two-way (request-response) artifact
    #[inline]
    #[must_use]
    pub const fn two_way() -> Self {
        Self { is_two_way: true }
    }

    /// Attributes of a one-way artifact
    #[inline]
    #[must_use]
    pub const fn one_way() -> Self {
        Self { is_two_way: false }
    }
}

/// When a column is editable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Applicability {
    /// Editable on every artifact of the kind
    #[default]
    Always,
    /// Editable only on two-way artifacts
    TwoWayOnly,
}

impl Applicability {
    /// Evaluate against an artifact's attributes
    #[inline]
    #[must_use]
    pub const fn holds(self, attributes: &ArtifactAttributes) -> bool {
        match self {
            Self::Always => true,
            Self::TwoWayOnly => attributes.is_two_way,
        }
    }
}

/// One boolean tracking flag of a schema
///
/// # Invariants
/// - `key` is unique within its schema and stable across releases
/// - The column's position in the schema is its bit position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlagColumn {
    /// Stable identifier
    pub key: &'static str,
    /// Header category ("Track Events", "Track Message Bodies", ...)
    pub group: &'static str,
    /// Human-readable label within the group
    pub label: &'static str,
    /// Lock condition
    pub applies_when: Applicability,
}

impl FlagColumn {
    pub(crate) const fn new(key: &'static str, group: &'static str, label: &'static str) -> Self {
        Self {
            key,
            group,
            label,
            applies_when: Applicability::Always,
        }
    }

    pub(crate) const fn two_way_only(self) -> Self {
        Self {
            applies_when: Applicability::TwoWayOnly,
            ..self
        }
    }

    /// Whether this column is editable on an artifact with `attributes`
    ///
    /// A column that does not apply is locked.
    #[inline]
    #[must_use]
    pub const fn applies(&self, attributes: &ArtifactAttributes) -> bool {
        self.applies_when.holds(attributes)
    }

    /// Two-line header text: group above label
    #[must_use]
    pub fn header(&self) -> String {
        format!("{}\n{}", self.group, self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_applies_regardless_of_direction() {
        let column = FlagColumn::new("PipelineEvents", "Track Events", "Pipeline events");
        assert!(column.applies(&ArtifactAttributes::one_way()));
        assert!(column.applies(&ArtifactAttributes::two_way()));
    }

    #[test]
    fn two_way_only_locks_on_one_way() {
        let column = FlagColumn::new("AfterReceivePipeline", "Track Message Bodies", "x")
            .two_way_only();
        assert!(!column.applies(&ArtifactAttributes::one_way()));
        assert!(column.applies(&ArtifactAttributes::two_way()));
    }

    #[test]
    fn header_stacks_group_over_label() {
        let column =
            FlagColumn::new("ServiceStartEnd", "Track Events", "Port start and end events");
        assert_eq!(column.header(), "Track Events\nPort start and end events");
    }

    #[test]
    fn attributes_default_to_one_way() {
        let attrs: ArtifactAttributes = serde_json::from_str("{}").unwrap();
        assert_eq!(attrs, ArtifactAttributes::one_way());
    }
}
