//! Mapper registry and responsibility dispatch.
//!
//! The registry is populated once (usually from configuration) and then only
//! read. Routing is first-match in registration order: when two mappers claim
//! the same scope, the one registered earlier wins regardless of what either
//! one actually holds.

use crate::core::ark::ArkIdentifier;
use crate::core::error::ResolverError;
use crate::core::mapper::{Mapper, Scope};

/// Deferred mapper construction, evaluated by [`Registry::load`].
pub type MapperFactory = Box<dyn FnOnce() -> Result<Box<dyn Mapper>, ResolverError>>;

struct MapperEntry {
    scope: Scope,
    mapper: Box<dyn Mapper>,
}

#[derive(Default)]
pub struct Registry {
    entries: Vec<MapperEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a mapper at the lowest routing priority.
    pub fn register(&mut self, mapper: Box<dyn Mapper>) {
        let scope = mapper.scope().clone();
        tracing::debug!(scope = %scope, position = self.entries.len(), "registered mapper");
        self.entries.push(MapperEntry { scope, mapper });
    }

    /// Evaluate each factory in order and register what it builds.
    ///
    /// A factory failing with `MapperUnavailable` is logged and skipped; any
    /// other failure aborts loading and is returned. Returns the number of
    /// mappers registered by this call.
    pub fn load<I, F>(&mut self, factories: I) -> Result<usize, ResolverError>
    where
        I: IntoIterator<Item = F>,
        F: FnOnce() -> Result<Box<dyn Mapper>, ResolverError>,
    {
        let mut loaded = 0;
        for factory in factories {
            match factory() {
                Ok(mapper) => {
                    self.register(mapper);
                    loaded += 1;
                }
                Err(ResolverError::MapperUnavailable(reason)) => {
                    tracing::warn!(%reason, "skipping unavailable mapper");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(loaded)
    }

    /// First registered mapper responsible for `id`.
    pub fn select_mapper_for(&self, id: &ArkIdentifier) -> Result<&dyn Mapper, ResolverError> {
        let entry = self
            .entries
            .iter()
            .find(|entry| entry.mapper.is_responsible_for(id))
            .ok_or_else(|| ResolverError::NoResponsibleMapper {
                ark: id.to_string(),
                shoulder: id.shoulder().to_string(),
            })?;
        tracing::debug!(ark = %id, scope = %entry.scope, "selected mapper");
        Ok(entry.mapper.as_ref())
    }

    /// Declared scopes in routing priority order.
    pub fn scopes(&self) -> impl Iterator<Item = &Scope> {
        self.entries.iter().map(|entry| &entry.scope)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn schema() -> serde_json::Value {
    serde_json::json!({
        "name": "registry",
        "version": "0.1.0",
        "description": "Ordered mapper list with first-match responsibility dispatch",
        "commands": [
            {
                "name": "mappers",
                "description": "List loaded mappers in routing priority order",
                "parameters": ["config", "format"]
            }
        ],
        "storage": []
    })
}
