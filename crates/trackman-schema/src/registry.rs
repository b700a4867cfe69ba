//! Schema registry
//!
//! Provides [`SchemaRegistry`] for resolving flag schemas by kind name.

use crate::error::SchemaError;
use crate::kind::ArtifactKind;
use crate::schema::FlagSchema;
use indexmap::IndexMap;

/// Registry of flag schemas, keyed by kind name
///
/// Iteration follows registration order.
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    schemas: IndexMap<&'static str, &'static FlagSchema>,
}

impl SchemaRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            schemas: IndexMap::new(),
        }
    }

    /// Create registry with the four built-in kinds
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for kind in ArtifactKind::ALL {
            registry.register(FlagSchema::for_kind(kind));
        }
        registry
    }

    /// Register a schema under its kind name
    ///
    /// Replaces any schema already registered for that kind.
    pub fn register(&mut self, schema: &'static FlagSchema) {
        self.schemas.insert(schema.kind().name(), schema);
    }

    /// Remove the schema for `kind`
    #[inline]
    pub fn remove(&mut self, kind: ArtifactKind) -> bool {
        self.schemas.shift_remove(kind.name()).is_some()
    }

    /// Check if a schema is registered for `kind`
    #[inline]
    #[must_use]
    pub fn contains(&self, kind: ArtifactKind) -> bool {
        self.schemas.contains_key(kind.name())
    }

    /// Resolve a schema by kind name
    ///
    /// # Errors
    /// Returns `SchemaError::SchemaMismatch` if no schema is registered under `name`
    pub fn resolve(&self, name: &str) -> Result<&'static FlagSchema, SchemaError> {
        self.schemas
            .get(name)
            .copied()
            .ok_or_else(|| SchemaError::SchemaMismatch {
                kind: name.to_string(),
            })
    }

    /// Resolve a schema by kind
    ///
    /// # Errors
    /// Returns `SchemaError::SchemaMismatch` if `kind` was removed from the registry
    #[inline]
    pub fn get(&self, kind: ArtifactKind) -> Result<&'static FlagSchema, SchemaError> {
        self.resolve(kind.name())
    }

    /// Registered kinds in registration order
    pub fn kinds(&self) -> impl Iterator<Item = ArtifactKind> + '_ {
        self.schemas.values().map(|schema| schema.kind())
    }

    /// Get number of registered schemas
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
