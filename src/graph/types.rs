//! Node and edge records of the KGX TSV output.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Column header of `nodes.tsv`.
pub const NODE_HEADER: [&str; 4] = ["id", "name", "category", "match_description"];

/// Column header of `edges.tsv`.
pub const EDGE_HEADER: [&str; 4] = ["subject", "predicate", "object", "relation"];

/// A graph node. Unique by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub name: String,
    pub category: String,
    pub match_description: String,
}

impl GraphNode {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        match_description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            match_description: match_description.into(),
        }
    }

    pub(crate) fn fields(&self) -> [&str; 4] {
        [
            self.id.as_str(),
            self.name.as_str(),
            self.category.as_str(),
            self.match_description.as_str(),
        ]
    }
}

/// A directed edge. Unique by (predicate, subject, object).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub subject: String,
    pub predicate: String,
    pub object: String,
    pub relation: String,
}

impl GraphEdge {
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
        relation: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            relation: relation.into(),
        }
    }

    /// Deduplication key.
    pub fn key(&self) -> EdgeKey {
        EdgeKey {
            predicate: self.predicate.clone(),
            subject: self.subject.clone(),
            object: self.object.clone(),
        }
    }

    pub(crate) fn fields(&self) -> [&str; 4] {
        [
            self.subject.as_str(),
            self.predicate.as_str(),
            self.object.as_str(),
            self.relation.as_str(),
        ]
    }
}

/// Composite edge identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pub predicate: String,
    pub subject: String,
    pub object: String,
}

/// Seen node ids and edge keys for a single run.
#[derive(Debug, Default, Clone)]
pub struct EmissionState {
    seen_nodes: HashSet<String>,
    seen_edges: HashSet<EdgeKey>,
}

impl EmissionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.seen_nodes.contains(id)
    }

    /// Record a node id; false if it was already seen.
    pub fn mark_node(&mut self, id: &str) -> bool {
        self.seen_nodes.insert(id.to_string())
    }

    /// Record an edge key; false if it was already seen.
    pub fn mark_edge(&mut self, key: EdgeKey) -> bool {
        self.seen_edges.insert(key)
    }

    pub fn node_count(&self) -> usize {
        self.seen_nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.seen_edges.len()
    }
}
