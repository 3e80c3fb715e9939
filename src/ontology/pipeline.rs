//! Ontology conversion runs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use super::converter::OntologyConverter;
use super::registry::{file_stem, find_source, ONTOLOGIES};
use crate::error::{KgError, OntologyError, Result};

/// Output subdirectory for converted ontologies.
pub const ONTOLOGY_OUTPUT: &str = "ontologies";

/// One converted ontology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OntologyOutcome {
    pub name: String,
    pub input: PathBuf,
    pub output_prefix: PathBuf,
}

/// Converts registry ontologies from `input_dir` into `<output_dir>/ontologies/`.
pub struct OntologyPipeline<C: OntologyConverter> {
    input_dir: PathBuf,
    output_dir: PathBuf,
    converter: C,
}

impl<C: OntologyConverter> OntologyPipeline<C> {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>, converter: C) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into().join(ONTOLOGY_OUTPUT),
            converter,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Convert one file, or every registry entry in order when `data_file` is `None`.
    ///
    /// A registry name (`GoTransform`) converts that entry under its registry
    /// name; any other value is a file in the input directory named by its stem.
    pub fn run(&self, data_file: Option<&str>) -> Result<Vec<OntologyOutcome>> {
        let jobs: Vec<(String, String)> = match data_file {
            Some(key) if key.trim().is_empty() => {
                return Err(OntologyError::UnknownSource(key.to_string()).into())
            }
            Some(key) => match find_source(key).filter(|s| s.name == key) {
                Some(source) => vec![(source.name.to_string(), source.file.to_string())],
                None => vec![(file_stem(key).to_string(), key.to_string())],
            },
            None => ONTOLOGIES
                .iter()
                .map(|s| (s.name.to_string(), s.file.to_string()))
                .collect(),
        };

        fs::create_dir_all(&self.output_dir)?;
        let mut outcomes = Vec::with_capacity(jobs.len());
        for (name, file) in jobs {
            outcomes.push(self.convert_one(&name, &file)?);
        }
        info!(count = outcomes.len(), "Ontology conversion complete");
        Ok(outcomes)
    }

    fn convert_one(&self, name: &str, file: &str) -> Result<OntologyOutcome> {
        let input = self.input_dir.join(file);
        if !input.is_file() {
            return Err(KgError::MissingInput(input));
        }
        let output_prefix = self.output_dir.join(name);
        self.converter.convert(name, &input, &output_prefix)?;
        Ok(OntologyOutcome {
            name: name.to_string(),
            input,
            output_prefix,
        })
    }
}
