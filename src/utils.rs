//! CURIE and sentinel helpers shared by the resolver and the graph writer.

/// Sentinel values recognised in trait cells and identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentinels {
    /// Cell value meaning "not applicable" (`NA`).
    pub not_applicable: String,
    /// Identifier suffix marking an unknown term (`:na`).
    pub unknown_suffix: String,
}

impl Default for Sentinels {
    fn default() -> Self {
        Self {
            not_applicable: "NA".to_string(),
            unknown_suffix: ":na".to_string(),
        }
    }
}

impl Sentinels {
    pub fn new(not_applicable: impl Into<String>, unknown_suffix: impl Into<String>) -> Self {
        Self {
            not_applicable: not_applicable.into(),
            unknown_suffix: unknown_suffix.into(),
        }
    }

    /// True for empty cells and the not-applicable marker.
    #[inline]
    pub fn is_not_applicable(&self, term: &str) -> bool {
        let term = term.trim();
        term.is_empty() || term == self.not_applicable
    }

    /// True when `id` ends with the unknown suffix (ASCII case-insensitive).
    #[inline]
    pub fn is_unknown(&self, id: &str) -> bool {
        let suffix = self.unknown_suffix.as_bytes();
        let id = id.as_bytes();
        id.len() >= suffix.len() && id[id.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
    }
}

/// Lowercase a free-text term and replace spaces with underscores.
#[inline]
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase().replace(' ', "_")
}

/// Build the fallback identifier `prefix + normalized(term)`.
#[inline]
pub fn fallback_id(prefix: &str, term: &str) -> String {
    format!("{}{}", prefix, normalize_term(term))
}

/// Keep the last segment of an underscore-joined term (`marine_sediment_surface` → `surface`).
#[inline]
pub fn collapse_term(term: &str) -> &str {
    term.rsplit('_').next().unwrap_or(term)
}

/// Last entry of a comma-joined multi-value cell, trimmed.
#[inline]
pub fn last_entry(value: &str) -> &str {
    value.rsplit(',').next().unwrap_or(value).trim()
}
