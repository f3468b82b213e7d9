//! Numeric ordering of dotted version tags.
//!
//! `"1.0.10"` sorts above `"1.0.9"`: versions compare component-wise as
//! tuples of integers, never as strings. Both backends resolve "latest"
//! and order version listings through this type.

use std::cmp::Ordering;

/// A parsed `resource_version` tag.
#[derive(Debug, Clone)]
pub struct ResourceVersion {
    raw: String,
    components: Option<Vec<u64>>,
}

impl ResourceVersion {
    /// Parse a dotted version tag.
    ///
    /// Tags with a non-numeric component are kept as malformed; they sort
    /// below every well-formed tag and among themselves by raw text.
    /// Components must fit a `u64`, so negative or oversized parts count as
    /// malformed too.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let components = raw
            .split('.')
            .map(|part| part.trim().parse::<u64>().ok())
            .collect::<Option<Vec<_>>>();
        if components.is_none() {
            tracing::warn!(version = %raw, "Malformed resource_version, ordering it last");
        }
        Self { raw, components }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_well_formed(&self) -> bool {
        self.components.is_some()
    }
}

impl Ord for ResourceVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_components = match (&self.components, &other.components) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        };
        by_components.then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for ResourceVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ResourceVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ResourceVersion {}

impl std::fmt::Display for ResourceVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Sort version tags from highest to lowest.
pub fn sort_versions_descending(versions: &mut [String]) {
    versions.sort_by_cached_key(|v| std::cmp::Reverse(ResourceVersion::parse(v.as_str())));
}

/// The highest of the given version tags.
pub fn latest_version<'a, I>(versions: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    versions
        .into_iter()
        .map(|v| (ResourceVersion::parse(v), v))
        .max_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, v)| v)
}
