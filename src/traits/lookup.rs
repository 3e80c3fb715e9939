//! Static lookups used instead of NER: environments and metabolism types.

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::config::MetabolismEntry;
use crate::error::Result;
use crate::tabular::Table;
use crate::utils::last_entry;

pub const ENV_TYPE: &str = "Type";
pub const ENV_TERMS: &str = "ENVO_terms";
pub const ENV_IDS: &str = "ENVO_ids";

/// Isolation-source term → ENVO (id, label).
#[derive(Debug, Default, Clone)]
pub struct EnvironmentTable {
    rows: HashMap<String, Vec<(String, String)>>,
}

impl EnvironmentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let table = Table::from_path(path, ',', &[ENV_TYPE, ENV_TERMS, ENV_IDS])?;
        let env = Self::from_table(&table);
        info!(table = table.name(), terms = env.rows.len(), "Loaded environment mapping");
        Ok(env)
    }

    pub fn from_table(table: &Table) -> Self {
        let mut env = Self::new();
        for record in table.records() {
            env.insert(record.value(ENV_TYPE), record.value(ENV_TERMS), record.value(ENV_IDS));
        }
        env
    }

    /// Add a mapping row; exact duplicates are ignored.
    pub fn insert(&mut self, term: &str, envo_terms: &str, envo_ids: &str) {
        let rows = self.rows.entry(term.to_string()).or_default();
        let row = (envo_terms.to_string(), envo_ids.to_string());
        if !rows.contains(&row) {
            rows.push(row);
        }
    }

    /// ENVO (id, label) for a full isolation-source term.
    ///
    /// Only a term with exactly one distinct mapping row is resolved. When a
    /// row lists several ENVO entries the last one is the most specific.
    pub fn lookup(&self, term: &str) -> Option<(String, String)> {
        let rows = self.rows.get(term)?;
        let [(terms, ids)] = rows.as_slice() else {
            return None;
        };

        let label = last_entry(terms);
        let id = last_entry(ids);
        if label.is_empty() || label == "nan" || id.is_empty() || id == "nan" {
            return None;
        }
        Some((id.to_string(), label.to_string()))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Metabolism label → configured ontology entry.
#[derive(Debug, Clone)]
pub struct MetabolismTable {
    entries: Vec<MetabolismEntry>,
}

impl MetabolismTable {
    pub fn new(entries: Vec<MetabolismEntry>) -> Self {
        Self { entries }
    }

    /// First entry whose label equals `label`.
    pub fn lookup(&self, label: &str) -> Option<&MetabolismEntry> {
        self.entries.iter().find(|e| e.label == label)
    }
}
