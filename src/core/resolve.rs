//! Lookup boundary consumed by front ends.
//!
//! A front end hands over the raw identifier text (already separated from
//! transport framing) plus whether it wants metadata, and maps the result or
//! the error class onto its own responses.

use crate::core::ark::ArkIdentifier;
use crate::core::error::ResolverError;
use crate::core::mapper::MetadataFormat;
use crate::core::registry::Registry;
use serde_json::Value;

#[derive(Debug, Clone, Copy)]
pub struct LookupRequest<'a> {
    pub raw: &'a str,
    pub want_metadata: bool,
    pub format: MetadataFormat,
}

impl<'a> LookupRequest<'a> {
    pub fn redirect(raw: &'a str) -> Self {
        Self {
            raw,
            want_metadata: false,
            format: MetadataFormat::default(),
        }
    }

    pub fn metadata(raw: &'a str, format: MetadataFormat) -> Self {
        Self {
            raw,
            want_metadata: true,
            format,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Redirect(String),
    Metadata(Value),
}

/// Parse, route and answer one lookup.
pub fn resolve(
    registry: &Registry,
    request: &LookupRequest<'_>,
) -> Result<Resolution, ResolverError> {
    let ark = ArkIdentifier::parse(request.raw)?;
    let format = request.want_metadata.then_some(request.format);
    resolve_ark(registry, &ark, format)
}

/// Route and answer a lookup for an already parsed identifier.
///
/// `format` is `None` for a redirect and the requested metadata format
/// otherwise.
pub fn resolve_ark(
    registry: &Registry,
    ark: &ArkIdentifier,
    format: Option<MetadataFormat>,
) -> Result<Resolution, ResolverError> {
    let mapper = registry.select_mapper_for(ark)?;
    match format {
        Some(format) => mapper.resolve_metadata(ark, format).map(Resolution::Metadata),
        None => mapper.resolve_url(ark).map(Resolution::Redirect),
    }
}
