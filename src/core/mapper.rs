//! Mapper capability interface.
//!
//! A mapper answers lookups for one `(authority, shoulder)` scope. Backends
//! live under `crate::plugins`; routing between them is done by
//! [`crate::core::registry::Registry`].

use crate::core::ark::ArkIdentifier;
use crate::core::error::ResolverError;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The `(authority, shoulder)` a mapper claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scope {
    pub authority: String,
    pub shoulder: String,
}

impl Scope {
    pub fn new(authority: impl Into<String>, shoulder: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
            shoulder: shoulder.into(),
        }
    }

    /// Exact match on both normalized components.
    pub fn covers(&self, id: &ArkIdentifier) -> bool {
        id.authority() == self.authority && id.shoulder() == self.shoulder
    }

    /// Re-validate that `id` belongs to this authority before a lookup.
    pub fn check_authority(&self, id: &ArkIdentifier) -> Result<(), ResolverError> {
        if id.authority() != self.authority {
            return Err(ResolverError::AuthorityMismatch {
                ark: id.to_string(),
                expected: self.authority.clone(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ark:/{}/{}", self.authority, self.shoulder)
    }
}

/// Metadata serializations a mapper may be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetadataFormat {
    /// JSON object with an `@id` member.
    #[default]
    RdfJson,
    /// ERC record in ANVL syntax. Named so callers can ask for it; no
    /// bundled backend produces it.
    ErcAnvl,
}

impl MetadataFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataFormat::RdfJson => "rdf-json",
            MetadataFormat::ErcAnvl => "erc-anvl",
        }
    }
}

impl fmt::Display for MetadataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetadataFormat {
    type Err = ResolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rdf-json" | "json" => Ok(MetadataFormat::RdfJson),
            "erc-anvl" | "erc" => Ok(MetadataFormat::ErcAnvl),
            other => Err(ResolverError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Backend capable of resolving identifiers within its [`Scope`].
///
/// All operations are deterministic for a given backing state. Mappers are
/// shared read-only across request threads once registered.
pub trait Mapper: Send + Sync {
    /// Declared scope, recorded by the registry at registration time.
    fn scope(&self) -> &Scope;

    /// Routing predicate. Must not fail or have side effects.
    fn is_responsible_for(&self, id: &ArkIdentifier) -> bool {
        self.scope().covers(id)
    }

    /// Redirect target stored for `id`, returned unmodified.
    fn resolve_url(&self, id: &ArkIdentifier) -> Result<String, ResolverError>;

    /// Stored metadata document for `id`, with `@id` set to its canonical form.
    fn resolve_metadata(
        &self,
        id: &ArkIdentifier,
        format: MetadataFormat,
    ) -> Result<Value, ResolverError>;
}
