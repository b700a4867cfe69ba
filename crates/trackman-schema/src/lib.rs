//! Trackman Flag Schema
//!
//! Static description of the tracking flags carried by each artifact kind.
//!
//! # Core Concepts
//!
//! - [`ArtifactKind`]: The four tracked artifact kinds
//! - [`FlagColumn`]: One boolean tracking flag, with its lock condition
//! - [`FlagSchema`]: Ordered column set for a kind; column order fixes the bitmask layout
//! - [`SchemaRegistry`]: Name-based lookup of schemas
//!
//! # Bit Layout
//!
//! Bit *i* of a [`FlagBits`] value is the *i*-th column of the kind's schema. This is the
//! only bit-exact contract shared with the external catalog.
//!
//! # Example
//!
//! ```rust
//! use trackman_schema::{ArtifactAttributes, ArtifactKind, FlagSchema};
//!
//! let schema = FlagSchema::for_kind(ArtifactKind::SendPort);
//! let one_way = ArtifactAttributes::one_way();
//!
//! let locked = schema.columns().iter().filter(|c| !c.applies(&one_way)).count();
//! assert_eq!(locked, 4);
//! assert_eq!(schema.encode([true, false, true]), 0b101);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod column;
mod error;
mod kind;
mod registry;
mod schema;

pub use column::{Applicability, ArtifactAttributes, FlagColumn};
pub use error::SchemaError;
pub use kind::ArtifactKind;
pub use registry::SchemaRegistry;
pub use schema::{columns_for, FlagBits, FlagSchema};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn registry_resolves_every_builtin_kind() {
        let registry = SchemaRegistry::with_defaults();

        for kind in ArtifactKind::ALL {
            let schema = registry.resolve(kind.name()).unwrap();
            assert_eq!(schema.kind(), kind);
            assert_eq!(schema.columns(), columns_for(kind));
        }
    }

    #[test]
    fn decode_then_lock_mask_for_one_way_receive_port() {
        let schema = FlagSchema::for_kind(ArtifactKind::ReceivePort);
        let attrs = ArtifactAttributes::one_way();

        let values = schema.decode(0b1100_1100).unwrap();
        let locked: Vec<bool> = schema.columns().iter().map(|c| !c.applies(&attrs)).collect();

        assert_eq!(
            values,
            vec![false, false, true, true, false, false, true, true]
        );
        assert_eq!(
            locked,
            vec![true, true, false, false, true, true, false, false]
        );
    }
}
