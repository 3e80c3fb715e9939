//! CLI command handlers.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use kg_microbe::ontology::{CommandConverter, OntologyPipeline};
use kg_microbe::traits::TraitsPipeline;
use kg_microbe::{termlist, Config};

use super::output;

/// Overrides applied to the configuration by `transform`.
#[derive(Debug, Default, Clone)]
pub struct TransformOverrides {
    pub input_dir: Option<String>,
    pub output_dir: Option<String>,
    pub data_file: Option<String>,
    pub no_nlp: bool,
}

impl TransformOverrides {
    fn apply(self, config: &mut Config) {
        if let Some(dir) = self.input_dir {
            config.paths.input_dir = dir;
        }
        if let Some(dir) = self.output_dir {
            config.paths.output_dir = dir;
        }
        if let Some(file) = self.data_file {
            config.traits.data_file = file;
        }
        if self.no_nlp {
            config.traits.nlp = false;
        }
    }
}

/// Run the trait transform.
pub fn run_transform(mut config: Config, overrides: TransformOverrides, json_output: bool) -> Result<()> {
    overrides.apply(&mut config);
    config.validate()?;

    let pipeline = TraitsPipeline::new(config);
    let summary = pipeline
        .run()
        .with_context(|| format!("trait transform into {}", pipeline.output_dir().display()))?;
    output::print_transform_summary(&summary, json_output)
}

/// Run ontology conversion for one file or the whole registry.
pub fn run_ontologies(
    mut config: Config,
    file: Option<String>,
    input_dir: Option<String>,
    output_dir: Option<String>,
    json_output: bool,
) -> Result<()> {
    if let Some(dir) = input_dir {
        config.paths.input_dir = dir;
    }
    if let Some(dir) = output_dir {
        config.paths.output_dir = dir;
    }

    let converter = CommandConverter::from_config(&config.ontology);
    let pipeline = OntologyPipeline::new(
        config.paths.input_dir(),
        config.paths.output_dir(),
        converter,
    );
    info!(output = %pipeline.output_dir().display(), "Converting ontologies");
    let outcomes = pipeline.run(file.as_deref())?;
    output::print_ontology_outcomes(&outcomes, json_output)
}

/// Convert a KGX nodes file into an NER term list.
///
/// Without an explicit output the list goes to the NLP terms directory as
/// `<nodes stem>_termlist.tsv`.
pub fn run_termlist(config: Config, nodes: PathBuf, output: Option<PathBuf>, json_output: bool) -> Result<()> {
    let output = output.unwrap_or_else(|| {
        let stem = nodes
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "nodes".to_string());
        config.paths.nlp_terms_dir().join(format!("{}_termlist.tsv", stem))
    });

    let summary = termlist::convert(&nodes, &output)
        .with_context(|| format!("term list from {}", nodes.display()))?;
    output::print_termlist_summary(&summary, json_output)
}

/// Show the effective configuration.
pub fn run_show_config(config: Config, json_output: bool) -> Result<()> {
    output::print_config(&config, json_output)
}
