//! Trackman Editor
//!
//! Edit tracking and batch commit for artifact tracking flags.
//!
//! # Core Concepts
//!
//! - [`ArtifactRow`]: One artifact's flag cells, built from a [`CatalogRecord`]
//! - [`CellState`]: Current value, baseline and lock of one cell
//! - [`set_cell`]: The single mutation path; captures the baseline once per edit episode
//! - [`toggle_column`] / [`toggle_row`]: Bulk toggles routed through [`set_cell`]
//! - [`collect_pending_writes`] / [`mark_committed`]: Fold dirty rows into flag bits, then
//!   close their edit episodes once the catalog accepts them
//! - [`EditorSession`]: One [`RowSet`] per artifact kind and the save cycle against a
//!   [`Catalog`]
//!
//! # Example
//!
//! ```rust
//! use trackman_editor::{EditorConfig, EditorSession, MemoryCatalog, CatalogRecord};
//! use trackman_schema::{ArtifactAttributes, ArtifactKind, SchemaRegistry};
//!
//! let mut catalog = MemoryCatalog::new().with(
//!     ArtifactKind::Pipeline,
//!     CatalogRecord::new("P.Xml", 0, ArtifactAttributes::default()),
//! );
//!
//! let mut session =
//!     EditorSession::open(EditorConfig::default(), SchemaRegistry::with_defaults(), &catalog)?;
//! session
//!     .panel_mut(ArtifactKind::Pipeline)?
//!     .set_cell("P.Xml", "PipelineEvents", true)?;
//!
//! let report = session.save(&mut catalog)?;
//! assert_eq!(report.committed.len(), 1);
//! assert_eq!(catalog.get(ArtifactKind::Pipeline, "P.Xml").unwrap().flag_bits, 0b1);
//! # Ok::<(), trackman_editor::EditorError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod bulk;
mod catalog;
mod cell;
mod commit;
mod config;
mod error;
mod row;
mod rowset;
mod session;
mod tracker;

pub use bulk::{toggle_column, toggle_row, BulkOutcome};
pub use catalog::{Catalog, CatalogRecord, MemoryCatalog};
pub use cell::{CellOutcome, CellState};
pub use commit::{collect_pending_writes, mark_committed, PendingWrite};
pub use config::{EditorConfig, RowOrder};
pub use error::{CatalogError, ConfigError, EditorError};
pub use row::{ArtifactId, ArtifactRow};
pub use rowset::{load, RowSet};
pub use session::{EditorSession, FailedWrite, SaveReport};
pub use tracker::set_cell;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
