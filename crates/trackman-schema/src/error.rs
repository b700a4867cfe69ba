//! Schema errors

use crate::schema::FlagBits;

/// Errors raised while resolving schemas or decoding flag bits
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// No schema is registered for the requested kind
    #[error("no flag schema for artifact kind '{kind}'")]
    SchemaMismatch {
        /// Requested kind name
        kind: String,
    },

    /// Flag bits set outside the schema's columns
    #[error("flag bits {bits:#b} exceed the {columns} columns of '{kind}' (stray bits {stray:#b})")]
    FlagBitsOutOfRange {
        /// Kind name
        kind: String,
        /// Raw value received
        bits: FlagBits,
        /// Bits with no column
        stray: FlagBits,
        /// Column count of the schema
        columns: usize,
    },

    /// Column key not present in the schema
    #[error("artifact kind '{kind}' has no column '{column}'")]
    UnknownColumn {
        /// Kind name
        kind: String,
        /// Requested column key
        column: String,
    },
}
