//! Term → identifier resolution over NER candidates and synonym mappings.

use tracing::{debug, trace};

use super::index::{MatchIndex, SynonymIndex};
use super::remnants::Remnants;
use super::types::{JoinedMatch, MatchCandidate, MatchQuality, Resolution};
use crate::utils::{fallback_id, Sentinels};

/// Per-slot resolution settings.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Prefix for fallback identifiers (`microtraits.carbon_substrates:`).
    pub prefix: String,
    /// Category used for fallback identifiers.
    pub default_category: String,
    /// Whether broad synonyms are an acceptable last tier.
    pub allow_broad: bool,
}

/// Resolves free-text terms of one semantic slot against an ontology.
///
/// Priority, highest first:
/// 1. not-applicable terms resolve to nothing;
/// 2. terms without NER candidates resolve to a fallback identifier;
/// 3. an `Exact` NER candidate wins outright;
/// 4. otherwise candidates are joined with synonym mappings and the first
///    exact synonym wins, else every related synonym, else (if allowed)
///    every broad synonym; with none of those the joined rows become
///    remnants and the fallback identifier is used.
///
/// Identifiers ending in the unknown suffix are dropped from the result.
#[derive(Debug, Clone)]
pub struct EntityResolver {
    matches: MatchIndex,
    synonyms: SynonymIndex,
    options: ResolveOptions,
    sentinels: Sentinels,
}

impl EntityResolver {
    pub fn new(
        matches: MatchIndex,
        synonyms: SynonymIndex,
        options: ResolveOptions,
        sentinels: Sentinels,
    ) -> Self {
        Self {
            matches,
            synonyms,
            options,
            sentinels,
        }
    }

    /// Resolve `term` found in the row identified by `row_key`.
    pub fn resolve(&self, term: &str, row_key: &str, remnants: &mut Remnants) -> Vec<Resolution> {
        if self.sentinels.is_not_applicable(term) {
            return Vec::new();
        }

        let resolved = self.resolve_candidates(term, row_key, remnants);
        resolved
            .into_iter()
            .filter(|r| {
                let unknown = self.sentinels.is_unknown(&r.id);
                if unknown {
                    trace!(id = %r.id, term, "Dropping unknown identifier");
                }
                !unknown
            })
            .collect()
    }

    fn resolve_candidates(&self, term: &str, row_key: &str, remnants: &mut Remnants) -> Vec<Resolution> {
        let candidates = self.matches.candidates(row_key, term);
        if candidates.is_empty() {
            return vec![self.fallback(term)];
        }

        if let Some(exact) = candidates.iter().find(|c| c.is_exact()) {
            return vec![Resolution::new(
                exact.id.clone(),
                exact.category.clone(),
                MatchQuality::Exact,
            )];
        }

        let joined = self.join(candidates);

        if let Some(row) = joined
            .iter()
            .find(|row| row.mapping.quality() == MatchQuality::ExactSynonym)
        {
            return vec![Self::from_joined(row)];
        }

        let mut tiers = vec![MatchQuality::RelatedSynonym];
        if self.options.allow_broad {
            tiers.push(MatchQuality::BroadSynonym);
        }
        for tier in tiers {
            let hits: Vec<Resolution> = joined
                .iter()
                .filter(|row| row.mapping.quality() == tier)
                .map(Self::from_joined)
                .collect();
            if !hits.is_empty() {
                if hits.len() > 1 {
                    debug!(term, row_key, count = hits.len(), ?tier, "Fanning out synonym matches");
                }
                return hits;
            }
        }

        debug!(term, row_key, rows = joined.len(), "No usable synonym; keeping remnants");
        remnants.extend(joined);
        vec![self.fallback(term)]
    }

    /// Inner join of candidates with synonym mappings on (term, id), de-duplicated in first-seen order.
    fn join(&self, candidates: &[MatchCandidate]) -> Vec<JoinedMatch> {
        let mut joined: Vec<JoinedMatch> = Vec::new();
        for candidate in candidates {
            for mapping in self.synonyms.mappings(&candidate.term, &candidate.id) {
                let row = JoinedMatch {
                    candidate: candidate.clone(),
                    mapping: mapping.clone(),
                };
                if !joined.contains(&row) {
                    joined.push(row);
                }
            }
        }
        joined
    }

    fn from_joined(row: &JoinedMatch) -> Resolution {
        Resolution::new(
            row.candidate.id.clone(),
            row.candidate.category.clone(),
            row.mapping.quality(),
        )
    }

    fn fallback(&self, term: &str) -> Resolution {
        Resolution::new(
            fallback_id(&self.options.prefix, term),
            self.options.default_category.clone(),
            MatchQuality::NoMatch,
        )
    }
}
