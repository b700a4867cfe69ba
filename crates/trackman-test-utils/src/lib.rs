//! Testing utilities for trackman workspace
//!
//! Shared test helpers, fixtures, and a fault-injecting catalog.

#![allow(missing_docs)]

use std::collections::HashSet;
use trackman_editor::{
    ArtifactRow, Catalog, CatalogError, CatalogRecord, MemoryCatalog, PendingWrite, RowOrder,
    RowSet,
};
use trackman_schema::{ArtifactAttributes, ArtifactKind, FlagBits, FlagSchema};

pub fn record(id: &str, flag_bits: FlagBits, is_two_way: bool) -> CatalogRecord {
    CatalogRecord::new(id, flag_bits, ArtifactAttributes { is_two_way })
}

pub fn row(kind: ArtifactKind, id: &str, flag_bits: FlagBits, is_two_way: bool) -> ArtifactRow {
    ArtifactRow::from_record(FlagSchema::for_kind(kind), record(id, flag_bits, is_two_way)).unwrap()
}

pub fn row_set(kind: ArtifactKind, records: Vec<CatalogRecord>) -> RowSet {
    RowSet::from_records(FlagSchema::for_kind(kind), records, RowOrder::ById).unwrap()
}

/// Catalog with a few artifacts of every kind
pub fn sample_catalog() -> MemoryCatalog {
    MemoryCatalog::new()
        .with(ArtifactKind::Orchestration, record("Orders.Process", 0b000_0011, false))
        .with(ArtifactKind::Orchestration, record("Billing.Invoice", 0, false))
        .with(ArtifactKind::SendPort, record("SP.Orders.Out", 0b0000_0011, false))
        .with(ArtifactKind::SendPort, record("SP.Billing.Solicit", 0b0000_1111, true))
        .with(ArtifactKind::ReceivePort, record("RP.Orders.In", 0b0000_1100, false))
        .with(ArtifactKind::ReceivePort, record("RP.Quotes.Request", 0, true))
        .with(ArtifactKind::Pipeline, record("XmlReceive", 0b0_0111, false))
        .with(ArtifactKind::Pipeline, record("PassThruTransmit", 0, false))
}

/// Catalog wrapper that fails on demand
///
/// Delegates to an inner [`MemoryCatalog`]. Writes to ids in `reject` fail at stage time;
/// `fail_persist` makes every persist fail.
#[derive(Debug, Default)]
pub struct FlakyCatalog {
    pub inner: MemoryCatalog,
    pub reject: HashSet<String>,
    pub fail_persist: bool,
    pub persist_calls: usize,
}

impl FlakyCatalog {
    pub fn new(inner: MemoryCatalog) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub fn rejecting(mut self, id: &str) -> Self {
        self.reject.insert(id.to_string());
        self
    }

    pub fn failing_persist(mut self) -> Self {
        self.fail_persist = true;
        self
    }
}

impl Catalog for FlakyCatalog {
    fn read(&self, kind: ArtifactKind) -> Result<Vec<CatalogRecord>, CatalogError> {
        self.inner.read(kind)
    }

    fn stage(&mut self, kind: ArtifactKind, write: &PendingWrite) -> Result<(), CatalogError> {
        if self.reject.contains(write.id.as_str()) {
            return Err(CatalogError::WriteRejected {
                id: write.id.clone(),
                reason: "injected failure".to_string(),
            });
        }
        self.inner.stage(kind, write)
    }

    fn persist(&mut self) -> Result<(), CatalogError> {
        self.persist_calls += 1;
        if self.fail_persist {
            return Err(CatalogError::PersistFailed("injected failure".to_string()));
        }
        self.inner.persist()
    }

    fn discard(&mut self) {
        self.inner.discard();
    }
}
