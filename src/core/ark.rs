//! ARK identifier model and canonical parsing.
//!
//! An ARK has the textual form `ark:/<authority>/<shoulder><local-id>`.
//! Two inputs denote the same identifier exactly when they parse to equal
//! [`ArkIdentifier`] values; the canonical form is rebuilt from the three
//! normalized parts and nothing else.

use crate::core::error::ResolverError;
use regex::{Captures, Regex};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// `ark:` scheme (any case), optional slash, numeric authority, one or more
/// slashes, optional shoulder, then the local id. The whole input must match.
static ARK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?i:ark):/?(?P<naan>[0-9]+)/+(?P<shoulder>[a-z-]+[0-9]+)?(?P<locid>[=%*+~@$A-Za-z0-9/._-]*)$",
    )
    .unwrap()
});

/// Shoulder grammar applied to already-normalized (hyphen-free) text.
static SHOULDER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]+[0-9]+").unwrap());

static PERCENT_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%([0-9a-fA-F]{2})").unwrap());

/// A parsed, normalized ARK. Immutable; equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArkIdentifier {
    authority: String,
    shoulder: String,
    local_id: String,
}

impl ArkIdentifier {
    /// Parse a raw identifier string into its normalized form.
    ///
    /// Fails with [`ResolverError::MalformedIdentifier`] carrying `raw` when
    /// the input does not match the ARK grammar.
    pub fn parse(raw: &str) -> Result<Self, ResolverError> {
        let caps = ARK_PATTERN
            .captures(raw)
            .ok_or_else(|| ResolverError::MalformedIdentifier(raw.to_string()))?;

        let authority = normalize_id(&caps["naan"]);
        let shoulder = caps
            .name("shoulder")
            .map(|m| normalize_id(m.as_str()))
            .unwrap_or_default();
        let local_id = normalize_id(&caps["locid"]);
        let (shoulder, local_id) = settle_shoulder(&shoulder, &local_id);

        Ok(Self {
            authority,
            shoulder,
            local_id,
        })
    }

    /// Numeric authority (NAAN).
    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn shoulder(&self) -> &str {
        &self.shoulder
    }

    pub fn local_id(&self) -> &str {
        &self.local_id
    }
}

impl fmt::Display for ArkIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ark:/{}/{}{}",
            self.authority, self.shoulder, self.local_id
        )
    }
}

impl FromStr for ArkIdentifier {
    type Err = ResolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Normalize one identifier component.
///
/// Steps, in order: drop hyphens, strip trailing `/`, collapse runs of the
/// same separator (`//` or `..`), upper-case the hex digits of `%xx` escapes.
pub fn normalize_id(ident: &str) -> String {
    let without_hyphens: String = ident.chars().filter(|c| *c != '-').collect();
    let collapsed = collapse_separators(without_hyphens.trim_end_matches('/'));
    PERCENT_ESCAPE
        .replace_all(&collapsed, |caps: &Captures| {
            format!("%{}", caps[1].to_ascii_uppercase())
        })
        .into_owned()
}

/// `a//b..c` -> `a/b.c`; mixed runs such as `./` are left alone.
fn collapse_separators(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    let mut prev = None;
    for c in ident.chars() {
        if matches!(c, '/' | '.') && prev == Some(c) {
            continue;
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Fix the shoulder boundary on the normalized text.
///
/// Hyphen removal can glue digits from the local id onto the shoulder
/// (`ex1-2ab` reads back as `ex12ab`), so the split is re-taken after
/// normalization and the canonical form always parses back to itself.
fn settle_shoulder(shoulder: &str, local_id: &str) -> (String, String) {
    let joined = format!("{}{}", shoulder, local_id);
    let end = SHOULDER_PREFIX.find(&joined).map_or(0, |m| m.end());
    (joined[..end].to_string(), joined[end..].to_string())
}
