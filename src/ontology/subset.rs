//! Ontology subset extraction around a list of seed terms.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::command::CommandTemplate;
use crate::config::SubsetConfig;
use crate::error::{KgError, OntologyError, Result};

/// Extracts the part of an ontology reachable from the terms in `terms_file`.
pub trait SubsetExtractor {
    fn extract(&self, terms_file: &Path, output_dir: &Path) -> Result<Option<PathBuf>>;
}

/// Extractor used when no command is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopExtractor;

impl SubsetExtractor for NoopExtractor {
    fn extract(&self, terms_file: &Path, _output_dir: &Path) -> Result<Option<PathBuf>> {
        debug!(terms = %terms_file.display(), "Subset extraction not configured");
        Ok(None)
    }
}

/// Extractor running an external tool (e.g. `robot extract`).
#[derive(Debug, Clone)]
pub struct CommandExtractor {
    template: CommandTemplate,
    ontology: PathBuf,
    method: String,
}

impl CommandExtractor {
    pub fn new(template: CommandTemplate, ontology: impl Into<PathBuf>, method: impl Into<String>) -> Self {
        Self {
            template,
            ontology: ontology.into(),
            method: method.into(),
        }
    }

    /// Output file for an ontology: `<dir>/<stem>_subset.owl`.
    fn output_path(&self, output_dir: &Path) -> PathBuf {
        let stem = self
            .ontology
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "ontology".to_string());
        output_dir.join(format!("{}_subset.owl", stem))
    }
}

impl SubsetExtractor for CommandExtractor {
    fn extract(&self, terms_file: &Path, output_dir: &Path) -> Result<Option<PathBuf>> {
        if !self.ontology.is_file() {
            return Err(KgError::MissingInput(self.ontology.clone()));
        }
        let output = self.output_path(output_dir);
        let (input_str, terms_str, output_str) = (
            self.ontology.display().to_string(),
            terms_file.display().to_string(),
            output.display().to_string(),
        );
        info!(ontology = %input_str, method = %self.method, "Extracting ontology subset");

        self.template
            .run(&[
                ("input", &input_str),
                ("terms", &terms_str),
                ("output", &output_str),
                ("method", &self.method),
            ])
            .map_err(OntologyError::Extractor)?;
        Ok(Some(output))
    }
}

/// Build the extractor described by `config`, resolving the ontology against `input_dir`.
pub fn extractor_from_config(config: &SubsetConfig, input_dir: &Path) -> Box<dyn SubsetExtractor> {
    if config.command.is_empty() {
        return Box::new(NoopExtractor);
    }
    Box::new(CommandExtractor::new(
        CommandTemplate::new(config.command.clone()),
        input_dir.join(&config.ontology_file),
        config.method.clone(),
    ))
}
