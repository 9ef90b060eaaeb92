//! ark-resolver: ARK persistent identifier resolution
//!
//! Turns identifier strings of the form `ark:/<authority>/<shoulder><local-id>`
//! into either a redirect target or a metadata record.
//!
//! # Pipeline
//!
//! raw string → [`core::ark::ArkIdentifier::parse`]
//! → [`core::registry::Registry::select_mapper_for`]
//! → [`core::mapper::Mapper`] → URL | metadata | error
//!
//! - **Parsing** is strict and normalizing: hyphens are dropped, trailing
//!   slashes stripped, repeated `/` or `.` collapsed, and `%xx` escapes
//!   upper-cased. Two inputs are the same ARK iff they parse equal.
//! - **Dispatch** is first-match over mappers in registration order, so
//!   registration order is routing priority.
//! - **Backends** (`plugins`) each own one `(authority, shoulder)` scope.
//!
//! # Errors
//!
//! Every failure is a [`core::error::ResolverError`] whose
//! [`class`](core::error::ResolverError::class) tells a front end whether to
//! answer with a client error, not-found, or an internal error.
//!
//! # Examples
//!
//! ```bash
//! # Redirect target
//! ark-resolver resolve ark:/77298/example0abc
//!
//! # Metadata record (trailing `?` inflection)
//! ark-resolver resolve 'ark:/77298/example0abc?'
//!
//! # Canonical form only
//! ark-resolver parse ark:/77298/ex-ample0abc/
//! ```

pub mod core;
pub mod plugins;

mod cli;

use cli::{Cli, Command, ListFormat};
use crate::core::{
    ark::ArkIdentifier,
    config, error,
    mapper::MetadataFormat,
    registry,
    resolve::{self, Resolution},
};
use crate::plugins::json_file;

use clap::Parser;

pub fn run() -> Result<(), error::ResolverError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Resolve {
            path,
            metadata,
            format,
            config: cfg,
        } => {
            let (raw, inflected) = split_inflection(&path);
            let ark = ArkIdentifier::parse(raw)?;
            let format = if metadata || inflected {
                Some(format.parse::<MetadataFormat>()?)
            } else {
                None
            };
            let registry = config::load_config(&cfg.config)?.build_registry()?;

            match resolve::resolve_ark(&registry, &ark, format)? {
                Resolution::Redirect(url) => println!("{}", url),
                Resolution::Metadata(doc) => println!("{}", to_pretty_json(&doc)?),
            }
        }
        Command::Parse { path } => {
            let ark = ArkIdentifier::parse(&path)?;
            let doc = serde_json::json!({
                "authority": ark.authority(),
                "shoulder": ark.shoulder(),
                "local_id": ark.local_id(),
                "canonical": ark.to_string(),
            });
            println!("{}", to_pretty_json(&doc)?);
        }
        Command::Mappers { config: cfg, format } => {
            let registry = config::load_config(&cfg.config)?.build_registry()?;
            if format == ListFormat::Json {
                let scopes: Vec<_> = registry.scopes().collect();
                println!("{}", to_pretty_json(&serde_json::json!(scopes))?);
            } else if registry.is_empty() {
                println!("No mappers loaded");
            } else {
                for (i, scope) in registry.scopes().enumerate() {
                    println!("{}. {}", i + 1, scope);
                }
            }
        }
        Command::Schema => {
            let doc = serde_json::json!({
                "schemas": [registry::schema(), json_file::schema()]
            });
            println!("{}", to_pretty_json(&doc)?);
        }
    }

    Ok(())
}

/// Strip the ARK inflection suffix (`?` or `??`) a client appends to ask for
/// metadata. Returns the bare path and whether a suffix was present.
pub fn split_inflection(path: &str) -> (&str, bool) {
    if let Some(bare) = path.strip_suffix("??") {
        return (bare, true);
    }
    match path.strip_suffix('?') {
        Some(bare) => (bare, true),
        None => (path, false),
    }
}

fn to_pretty_json(value: &serde_json::Value) -> Result<String, error::ResolverError> {
    Ok(serde_json::to_string_pretty(value)?)
}
