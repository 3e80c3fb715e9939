//! kg-microbe: microbial knowledge graph ingestion
//!
//! Converts an organism trait table and ontology sources into KGX
//! node/edge TSV files. Free-text trait terms are resolved to ontology
//! identifiers using precomputed NER matches ranked by SSSOM synonym
//! mappings.

pub mod config;
pub mod error;
pub mod graph;
pub mod ontology;
pub mod resolver;
pub mod tabular;
pub mod termlist;
pub mod traits;
pub mod utils;

pub use config::Config;
pub use error::{ConfigError, KgError, OntologyError, ParseError, Result};
pub use graph::{EmissionState, GraphCounts, GraphEdge, GraphNode, GraphWriter};
pub use ontology::{
    CommandConverter, OntologyConverter, OntologyPipeline, SubsetExtractor, ONTOLOGIES,
};
pub use resolver::{EntityResolver, MatchIndex, MatchQuality, Remnants, Resolution, SynonymIndex};
pub use tabular::{LineParser, Record, Table};
pub use termlist::TermlistSummary;
pub use traits::{TraitRow, TraitsPipeline, TransformSummary};
pub use utils::Sentinels;
