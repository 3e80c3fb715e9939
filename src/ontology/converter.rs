//! Ontology format conversion.

use std::path::Path;

use tracing::info;

use super::command::CommandTemplate;
use crate::config::OntologyConfig;
use crate::error::{OntologyError, Result};

/// Converts one ontology file into node/edge tables.
pub trait OntologyConverter {
    /// Convert `input`, writing outputs named from `output_prefix`.
    fn convert(&self, name: &str, input: &Path, output_prefix: &Path) -> Result<()>;
}

/// Converter delegating to an external command (by default `kgx transform`).
#[derive(Debug, Clone)]
pub struct CommandConverter {
    template: CommandTemplate,
    format: String,
}

impl CommandConverter {
    pub fn new(template: CommandTemplate, format: impl Into<String>) -> Self {
        Self {
            template,
            format: format.into(),
        }
    }

    pub fn from_config(config: &OntologyConfig) -> Self {
        Self::new(
            CommandTemplate::new(config.converter.clone()),
            config.output_format.clone(),
        )
    }
}

impl OntologyConverter for CommandConverter {
    fn convert(&self, name: &str, input: &Path, output_prefix: &Path) -> Result<()> {
        let input_str = input.display().to_string();
        let output_str = output_prefix.display().to_string();
        info!(name, input = %input_str, output = %output_str, "Converting ontology");

        self.template
            .run(&[
                ("input", &input_str),
                ("output", &output_str),
                ("name", name),
                ("format", &self.format),
            ])
            .map_err(|message| {
                OntologyError::Converter {
                    name: name.to_string(),
                    message,
                }
                .into()
            })
    }
}
