//! Known ontology sources.

use serde::Serialize;

/// A named ontology JSON file in the input directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OntologySource {
    pub name: &'static str,
    pub file: &'static str,
}

/// Ontologies converted by a full run, in conversion order.
pub static ONTOLOGIES: [OntologySource; 4] = [
    OntologySource {
        name: "NCBITransform",
        file: "ncbitaxon.json",
    },
    OntologySource {
        name: "ChebiTransform",
        file: "chebi.json",
    },
    OntologySource {
        name: "EnvoTransform",
        file: "envo.json",
    },
    OntologySource {
        name: "GoTransform",
        file: "go.json",
    },
];

/// Registry entry by name (`GoTransform`) or file (`go.json`).
pub fn find_source(key: &str) -> Option<&'static OntologySource> {
    ONTOLOGIES.iter().find(|s| s.name == key || s.file == key)
}

/// Output name for a data file: everything before the first `.`.
pub fn file_stem(file: &str) -> &str {
    let base = file.rsplit(['/', '\\']).next().unwrap_or(file);
    base.split('.').next().unwrap_or(base)
}
