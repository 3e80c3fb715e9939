//! Lookup structures built once per run from the NER and SSSOM tables.

use std::collections::HashMap;
use std::path::Path;

use regex::Regex;
use tracing::info;

use super::types::{MatchCandidate, SynonymMapping};
use crate::error::Result;
use crate::tabular::Table;

/// NER output columns.
pub const NER_ROW_KEY: &str = "TaxId";
pub const NER_TERM: &str = "TokenizedTerm";
pub const NER_ID: &str = "CURIE";
pub const NER_CATEGORY: &str = "Biolink";
pub const NER_STRING_MATCH: &str = "StringMatch";

/// SSSOM columns.
pub const SSSOM_COLUMNS: [&str; 5] = [
    "subject_label",
    "object_id",
    "object_label",
    "object_match_field",
    "match_category",
];

/// Canonical form of a row key so `561`, ` 561` and `0561` compare equal.
pub fn normalize_row_key(key: &str) -> String {
    let key = key.trim();
    match key.parse::<u64>() {
        Ok(n) => n.to_string(),
        Err(_) => key.to_string(),
    }
}

/// NER candidates indexed by (row key, term).
#[derive(Debug, Default, Clone)]
pub struct MatchIndex {
    by_row_term: HashMap<(String, String), Vec<MatchCandidate>>,
    len: usize,
}

impl MatchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load NER output from a TSV file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let table = Table::from_path(
            path,
            '\t',
            &[NER_ROW_KEY, NER_TERM, NER_ID, NER_CATEGORY, NER_STRING_MATCH],
        )?;
        let index = Self::from_table(&table);
        info!(table = table.name(), candidates = index.len(), "Indexed NER matches");
        Ok(index)
    }

    pub fn from_table(table: &Table) -> Self {
        let mut index = Self::new();
        for record in table.records() {
            index.insert(MatchCandidate {
                row_key: record.value(NER_ROW_KEY).to_string(),
                term: record.value(NER_TERM).to_string(),
                id: record.value(NER_ID).to_string(),
                category: record.value(NER_CATEGORY).to_string(),
                string_match: record.value(NER_STRING_MATCH).to_string(),
            });
        }
        index
    }

    /// Add a candidate, preserving table order within its (row key, term) bucket.
    pub fn insert(&mut self, candidate: MatchCandidate) {
        let key = (normalize_row_key(&candidate.row_key), candidate.term.clone());
        self.by_row_term.entry(key).or_default().push(candidate);
        self.len += 1;
    }

    /// Candidates for an exact (row key, term) pair, in table order.
    pub fn candidates(&self, row_key: &str, term: &str) -> &[MatchCandidate] {
        self.by_row_term
            .get(&(normalize_row_key(row_key), term.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// How SSSOM subject labels are normalized before joining.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelNormalization {
    /// Strip quotes and commas.
    Plain,
    /// Strip quotes and commas, and turn underscores into spaces.
    Underscores,
}

/// Synonym mappings indexed by (subject label, object id).
#[derive(Debug, Default, Clone)]
pub struct SynonymIndex {
    by_label_id: HashMap<(String, String), Vec<SynonymMapping>>,
    len: usize,
}

impl SynonymIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an SSSOM TSV file.
    pub fn from_path(path: impl AsRef<Path>, normalization: LabelNormalization) -> Result<Self> {
        let table = Table::from_path(path, '\t', &SSSOM_COLUMNS)?;
        let index = Self::from_table(&table, normalization);
        info!(table = table.name(), mappings = index.len(), "Indexed synonym mappings");
        Ok(index)
    }

    pub fn from_table(table: &Table, normalization: LabelNormalization) -> Self {
        let strip = Regex::new(r#"['",]"#).expect("Invalid label regex");
        let mut index = Self::new();

        for record in table.records() {
            let mut subject_label = strip.replace_all(record.value("subject_label"), "").into_owned();
            if normalization == LabelNormalization::Underscores {
                subject_label = subject_label.replace('_', " ");
            }
            index.insert(SynonymMapping {
                subject_label,
                object_id: record.value("object_id").to_string(),
                object_label: record.value("object_label").to_string(),
                object_match_field: record.value("object_match_field").to_string(),
                match_category: record.value("match_category").to_string(),
            });
        }
        index
    }

    pub fn insert(&mut self, mapping: SynonymMapping) {
        let key = (mapping.subject_label.clone(), mapping.object_id.clone());
        self.by_label_id.entry(key).or_default().push(mapping);
        self.len += 1;
    }

    /// Mappings joining `term` to `id`, in table order.
    pub fn mappings(&self, term: &str, id: &str) -> &[SynonymMapping] {
        self.by_label_id
            .get(&(term.to_string(), id.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
