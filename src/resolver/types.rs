//! Types exchanged between the NER tables, the resolver and the pipeline.

/// NER string-match tag for an exact hit.
pub const EXACT_STRING_MATCH: &str = "Exact";

/// SSSOM match-field tags, in decreasing order of confidence.
pub const EXACT_SYNONYM: &str = "oio:hasExactSynonym";
pub const RELATED_SYNONYM: &str = "oio:hasRelatedSynonym";
pub const BROAD_SYNONYM: &str = "oio:hasBroadSynonym";

/// How a term was matched to its identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchQuality {
    /// NER reported an exact string match.
    Exact,
    /// Joined through an exact synonym in the mapping table.
    ExactSynonym,
    /// Joined through a related synonym.
    RelatedSynonym,
    /// Joined through a broad synonym.
    BroadSynonym,
    /// No usable match; the identifier is a fallback.
    NoMatch,
}

impl MatchQuality {
    /// Synonym tier carried by an SSSOM `object_match_field` value.
    pub fn from_match_field(field: &str) -> Self {
        match field {
            EXACT_SYNONYM => Self::ExactSynonym,
            RELATED_SYNONYM => Self::RelatedSynonym,
            BROAD_SYNONYM => Self::BroadSynonym,
            _ => Self::NoMatch,
        }
    }

    /// Value written to the `match_description` node column.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Exact => "ExactStringMatch",
            Self::ExactSynonym => EXACT_SYNONYM,
            Self::RelatedSynonym => RELATED_SYNONYM,
            Self::BroadSynonym => BROAD_SYNONYM,
            Self::NoMatch => "",
        }
    }
}

/// One row of NER output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchCandidate {
    /// Source row identifier (taxonomy id).
    pub row_key: String,
    /// The raw term as tokenized by the NER engine.
    pub term: String,
    /// Candidate ontology identifier.
    pub id: String,
    /// Semantic type reported for the candidate.
    pub category: String,
    /// NER string-match tag (`Exact`, `Partial`, ...).
    pub string_match: String,
}

impl MatchCandidate {
    pub fn is_exact(&self) -> bool {
        self.string_match == EXACT_STRING_MATCH
    }
}

/// One row of an SSSOM synonym mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SynonymMapping {
    pub subject_label: String,
    pub object_id: String,
    pub object_label: String,
    pub object_match_field: String,
    pub match_category: String,
}

impl SynonymMapping {
    pub fn quality(&self) -> MatchQuality {
        MatchQuality::from_match_field(&self.object_match_field)
    }
}

/// A candidate joined with one of its synonym mappings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoinedMatch {
    pub candidate: MatchCandidate,
    pub mapping: SynonymMapping,
}

/// A resolved identifier for a term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub id: String,
    pub category: String,
    pub quality: MatchQuality,
}

impl Resolution {
    pub fn new(id: impl Into<String>, category: impl Into<String>, quality: MatchQuality) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            quality,
        }
    }

    pub fn match_description(&self) -> &'static str {
        self.quality.description()
    }
}
