//! Ontology sources, conversion and subset extraction.
//!
//! Conversion and extraction are delegated to external tools through the
//! [`OntologyConverter`] and [`SubsetExtractor`] traits.

mod command;
mod converter;
mod pipeline;
mod registry;
mod subset;

pub use command::CommandTemplate;
pub use converter::{CommandConverter, OntologyConverter};
pub use pipeline::{OntologyOutcome, OntologyPipeline, ONTOLOGY_OUTPUT};
pub use registry::{file_stem, find_source, OntologySource, ONTOLOGIES};
pub use subset::{extractor_from_config, CommandExtractor, NoopExtractor, SubsetExtractor};
