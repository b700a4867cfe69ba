//! Per-kind flag schemas
//!
//! Provides [`FlagSchema`], the ordered column set for one artifact kind, and the
//! bitmask codec derived from that order.

use crate::column::FlagColumn;
use crate::error::SchemaError;
use crate::kind::ArtifactKind;

/// Flag bitmask as exchanged with the catalog
///
/// Bit *i* is column *i* of the kind's schema.
pub type FlagBits = u32;

const EVENTS: &str = "Track Events";
const BODIES: &str = "Track Message Bodies";
const PROPERTIES: &str = "Track Message Properties";

static ORCHESTRATION_COLUMNS: [FlagColumn; 7] = [
    FlagColumn::new("ServiceStartEnd", EVENTS, "Orchestration start and end"),
    FlagColumn::new("MessageSendReceive", EVENTS, "Message send and receive"),
    FlagColumn::new("OrchestrationEvents", EVENTS, "Shape start and end"),
    FlagColumn::new("InboundMessageBody", BODIES, "Before orchestration processing"),
    FlagColumn::new("OutboundMessageBody", BODIES, "After orchestration processing"),
    FlagColumn::new("TrackPropertiesForIncomingMessages", PROPERTIES, "Incoming messages"),
    FlagColumn::new("TrackPropertiesForOutgoingMessages", PROPERTIES, "Outgoing messages"),
];

// Send ports: the receive pipeline carries the response, which a one-way port never sees.
static SEND_PORT_COLUMNS: [FlagColumn; 8] = [
    FlagColumn::new("BeforeSendPipeline", BODIES, "Request message before port processing"),
    FlagColumn::new("AfterSendPipeline", BODIES, "Request message after port processing"),
    FlagColumn::new("BeforeReceivePipeline", BODIES, "Response message before port processing")
        .two_way_only(),
    FlagColumn::new("AfterReceivePipeline", BODIES, "Response message after port processing")
        .two_way_only(),
    FlagColumn::new(
        "TrackPropertiesBeforeSendPipeline",
        PROPERTIES,
        "Request message before port processing",
    ),
    FlagColumn::new(
        "TrackPropertiesAfterSendPipeline",
        PROPERTIES,
        "Request message after port processing",
    ),
    FlagColumn::new(
        "TrackPropertiesBeforeReceivePipeline",
        PROPERTIES,
        "Response message before port processing",
    )
    .two_way_only(),
    FlagColumn::new(
        "TrackPropertiesAfterReceivePipeline",
        PROPERTIES,
        "Response message after port processing",
    )
    .two_way_only(),
];

// Receive ports: same keys and bit order, but the send pipeline carries the response.
static RECEIVE_PORT_COLUMNS: [FlagColumn; 8] = [
    FlagColumn::new("BeforeSendPipeline", BODIES, "Response message before port processing")
        .two_way_only(),
    FlagColumn::new("AfterSendPipeline", BODIES, "Response message after port processing")
        .two_way_only(),
    FlagColumn::new("BeforeReceivePipeline", BODIES, "Request message before port processing"),
    FlagColumn::new("AfterReceivePipeline", BODIES, "Request message after port processing"),
    FlagColumn::new(
        "TrackPropertiesBeforeSendPipeline",
        PROPERTIES,
        "Response message before port processing",
    )
    .two_way_only(),
    FlagColumn::new(
        "TrackPropertiesAfterSendPipeline",
        PROPERTIES,
        "Response message after port processing",
    )
    .two_way_only(),
    FlagColumn::new(
        "TrackPropertiesBeforeReceivePipeline",
        PROPERTIES,
        "Request message before port processing",
    ),
    FlagColumn::new(
        "TrackPropertiesAfterReceivePipeline",
        PROPERTIES,
        "Request message after port processing",
    ),
];

static PIPELINE_COLUMNS: [FlagColumn; 5] = [
    FlagColumn::new("PipelineEvents", EVENTS, "Pipeline events"),
    FlagColumn::new("ServiceStartEnd", EVENTS, "Port start and end events"),
    FlagColumn::new("MessageSendReceive", EVENTS, "Message send and receive events"),
    FlagColumn::new("InboundMessageBody", BODIES, "Message before pipeline processing"),
    FlagColumn::new("OutboundMessageBody", BODIES, "Message after pipeline processing"),
];

static ORCHESTRATION: FlagSchema =
    FlagSchema::new(ArtifactKind::Orchestration, &ORCHESTRATION_COLUMNS);
static SEND_PORT: FlagSchema = FlagSchema::new(ArtifactKind::SendPort, &SEND_PORT_COLUMNS);
static RECEIVE_PORT: FlagSchema = FlagSchema::new(ArtifactKind::ReceivePort, &RECEIVE_PORT_COLUMNS);
static PIPELINE: FlagSchema = FlagSchema::new(ArtifactKind::Pipeline, &PIPELINE_COLUMNS);

/// Ordered columns for `kind`
#[inline]
#[must_use]
pub fn columns_for(kind: ArtifactKind) -> &'static [FlagColumn] {
    FlagSchema::for_kind(kind).columns()
}

/// Ordered flag columns of one artifact kind
///
/// # Invariants
/// - At most [`FlagSchema::MAX_COLUMNS`] columns
/// - Column keys are unique
/// - Column order is the bit order of [`FlagBits`]
#[derive(Debug, PartialEq, Eq)]
pub struct FlagSchema {
    kind: ArtifactKind,
    columns: &'static [FlagColumn],
}

impl FlagSchema {
    /// Widest schema a [`FlagBits`] value can encode
    pub const MAX_COLUMNS: usize = FlagBits::BITS as usize;

    const fn new(kind: ArtifactKind, columns: &'static [FlagColumn]) -> Self {
        assert!(columns.len() <= Self::MAX_COLUMNS);
        Self { kind, columns }
    }

    /// Built-in schema for `kind`
    #[must_use]
    pub fn for_kind(kind: ArtifactKind) -> &'static Self {
        match kind {
            ArtifactKind::Orchestration => &ORCHESTRATION,
            ArtifactKind::SendPort => &SEND_PORT,
            ArtifactKind::ReceivePort => &RECEIVE_PORT,
            ArtifactKind::Pipeline => &PIPELINE,
        }
    }

    /// Artifact kind described by this schema
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// Columns in bit order
    #[inline]
    #[must_use]
    pub fn columns(&self) -> &'static [FlagColumn] {
        self.columns
    }

    /// Number of columns
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the schema has no columns
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column at bit position `index`
    #[inline]
    #[must_use]
    pub fn column(&self, index: usize) -> Option<&'static FlagColumn> {
        self.columns.get(index)
    }

    /// Bit position of the column with `key`
    ///
    /// # Errors
    /// Returns `SchemaError::UnknownColumn` if no column has that key
    pub fn position(&self, key: &str) -> Result<usize, SchemaError> {
        self.columns
            .iter()
            .position(|column| column.key == key)
            .ok_or_else(|| SchemaError::UnknownColumn {
                kind: self.kind.name().to_string(),
                column: key.to_string(),
            })
    }

    /// Single-bit mask of column `index`
    #[inline]
    #[must_use]
    pub fn bit(&self, index: usize) -> FlagBits {
        debug_assert!(index < self.len());
        1 << index
    }

    /// Mask with every column's bit set
    #[inline]
    #[must_use]
    pub fn full_mask(&self) -> FlagBits {
        match self.len() {
            Self::MAX_COLUMNS => FlagBits::MAX,
            n => (1 << n) - 1,
        }
    }

    /// Fold column values into a bitmask
    ///
    /// Values beyond the schema's width are ignored.
    #[must_use]
    pub fn encode(&self, values: impl IntoIterator<Item = bool>) -> FlagBits {
        values
            .into_iter()
            .take(self.len())
            .enumerate()
            .filter(|(_, set)| *set)
            .fold(0, |mask, (index, _)| mask | self.bit(index))
    }

    /// Split a bitmask into one value per column
    ///
    /// # Errors
    /// Returns `SchemaError::FlagBitsOutOfRange` if `bits` sets a bit with no column
    pub fn decode(&self, bits: FlagBits) -> Result<Vec<bool>, SchemaError> {
        let stray = bits & !self.full_mask();
        if stray != 0 {
            return Err(SchemaError::FlagBitsOutOfRange {
                kind: self.kind.name().to_string(),
                bits,
                stray,
                columns: self.len(),
            });
        }

        Ok((0..self.len()).map(|index| bits & self.bit(index) != 0).collect())
    }
}
