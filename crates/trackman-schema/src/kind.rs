//! Artifact kinds
//!
//! Provides [`ArtifactKind`], the closed set of artifact kinds that carry tracking flags.

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Kind of tracked artifact
///
/// Each kind has its own fixed [`FlagSchema`](crate::FlagSchema).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    /// Orchestration (business process)
    Orchestration,
    /// Send port
    SendPort,
    /// Receive port
    ReceivePort,
    /// Pipeline
    Pipeline,
}

impl ArtifactKind {
    /// All kinds, in display (tab) order
    pub const ALL: [Self; 4] = [
        Self::Orchestration,
        Self::SendPort,
        Self::ReceivePort,
        Self::Pipeline,
    ];

    /// Stable kind name used for lookup and serialization
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Orchestration => "orchestration",
            Self::SendPort => "send-port",
            Self::ReceivePort => "receive-port",
            Self::Pipeline => "pipeline",
        }
    }

    /// Plural title for panel headers
    #[inline]
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Orchestration => "Orchestrations",
            Self::SendPort => "Send Ports",
            Self::ReceivePort => "Receive Ports",
            Self::Pipeline => "Pipelines",
        }
    }

    /// Whether some of this kind's columns depend on port direction
    #[inline]
    #[must_use]
    pub const fn is_port(self) -> bool {
        matches!(self, Self::SendPort | Self::ReceivePort)
    }
}

impl Display for ArtifactKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ArtifactKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| SchemaError::SchemaMismatch {
                kind: s.to_string(),
            })
    }
}
