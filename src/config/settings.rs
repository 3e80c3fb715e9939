//! Configuration settings for kg-microbe transforms.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub traits: TraitsConfig,
    pub ontology: OntologyConfig,
    pub subset: SubsetConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations or use defaults.
    pub fn load() -> Result<Self> {
        let config_paths = [
            PathBuf::from("kg-microbe.toml"),
            PathBuf::from("config.toml"),
            dirs::config_dir()
                .map(|p| p.join("kg-microbe/config.toml"))
                .unwrap_or_default(),
            dirs::home_dir()
                .map(|p| p.join(".kg-microbe/config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.is_file() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let traits = &self.traits;

        if traits.not_applicable.is_empty() {
            return Err(ConfigError::MissingField("traits.not_applicable".to_string()).into());
        }
        if traits.unknown_suffix.is_empty() {
            return Err(ConfigError::MissingField("traits.unknown_suffix".to_string()).into());
        }
        if traits.delimiter == traits.placeholder {
            return Err(ConfigError::Invalid(
                "traits.delimiter and traits.placeholder must differ".to_string(),
            )
            .into());
        }
        if let Some(entry) = traits.metabolism.iter().find(|m| m.id.is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "metabolism entry '{}' has an empty id",
                entry.label
            ))
            .into());
        }
        if self.ontology.converter.first().is_some_and(|c| c.is_empty()) {
            return Err(ConfigError::Invalid("ontology.converter program is empty".to_string()).into());
        }
        if self.subset.command.first().is_some_and(|c| c.is_empty()) {
            return Err(ConfigError::Invalid("subset.command program is empty".to_string()).into());
        }

        Ok(())
    }
}

/// Expand a leading `~` in a configured path.
fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::tilde(path);
    PathBuf::from(expanded.as_ref())
}

/// Directory layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Raw inputs (trait CSV, environment table, SSSOM files, ontology JSON)
    pub input_dir: String,
    /// Base directory for transformed outputs
    pub output_dir: String,
    /// NLP working directory (NER outputs, remnants, term lists)
    pub nlp_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_dir: "data/raw".to_string(),
            output_dir: "data/transformed".to_string(),
            nlp_dir: "data/nlp".to_string(),
        }
    }
}

impl PathsConfig {
    pub fn input_dir(&self) -> PathBuf {
        expand(&self.input_dir)
    }

    pub fn output_dir(&self) -> PathBuf {
        expand(&self.output_dir)
    }

    pub fn nlp_dir(&self) -> PathBuf {
        expand(&self.nlp_dir)
    }

    /// Where NER outputs are read from and remnants are written to.
    pub fn nlp_output_dir(&self) -> PathBuf {
        self.nlp_dir().join("output")
    }

    /// Where term lists for the NER engine are written.
    pub fn nlp_terms_dir(&self) -> PathBuf {
        self.nlp_dir().join("terms")
    }
}

/// Trait table transform settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraitsConfig {
    /// Name of the transform; also the output subdirectory
    pub source_name: String,
    /// Trait CSV, relative to the input directory
    pub data_file: String,
    /// Environment mapping CSV, relative to the input directory
    pub environment_file: String,
    /// CHEBI NER output, relative to the NLP output directory
    pub chebi_matches: String,
    /// GO NER output, relative to the NLP output directory
    pub go_matches: String,
    /// CHEBI SSSOM mapping, relative to the input directory
    pub chebi_sssom: String,
    /// GO SSSOM mapping, relative to the input directory
    pub go_sssom: String,
    /// Use NER tables; when false every term resolves to its fallback id
    pub nlp: bool,
    /// Field delimiter of the trait CSV
    pub delimiter: char,
    /// Replacement for delimiters inside quoted fields; also the multi-value separator
    pub placeholder: char,
    /// Cell value meaning "not applicable"
    pub not_applicable: String,
    /// Identifier suffix marking an unknown term
    pub unknown_suffix: String,
    /// Metabolism label lookup
    pub metabolism: Vec<MetabolismEntry>,
}

impl Default for TraitsConfig {
    fn default() -> Self {
        Self {
            source_name: "condensed_traits_NCBI".to_string(),
            data_file: "condensed_traits_NCBI.csv".to_string(),
            environment_file: "environments.csv".to_string(),
            chebi_matches: "CHEBI_nlpOutput.tsv".to_string(),
            go_matches: "GO_nlpOutput.tsv".to_string(),
            chebi_sssom: "chebi_sssom.tsv".to_string(),
            go_sssom: "go_sssom.tsv".to_string(),
            nlp: true,
            delimiter: ',',
            placeholder: '|',
            not_applicable: "NA".to_string(),
            unknown_suffix: ":na".to_string(),
            metabolism: default_metabolism(),
        }
    }
}

/// One row of the metabolism lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetabolismEntry {
    /// Ontology identifier
    pub id: String,
    /// Label as it appears in the trait table
    pub label: String,
    /// Preferred label written to the node
    pub preferred_label: String,
}

impl MetabolismEntry {
    fn new(id: &str, label: &str, preferred_label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            preferred_label: preferred_label.to_string(),
        }
    }
}

fn default_metabolism() -> Vec<MetabolismEntry> {
    vec![
        MetabolismEntry::new("ECOCORE:00000172", "anaerobic", "anaerobe"),
        MetabolismEntry::new("ECOCORE:00000172", "strictly anaerobic", "anaerobe"),
        MetabolismEntry::new("ECOCORE:00000178", "obligate anaerobic", "obligate anaerobe"),
        MetabolismEntry::new("ECOCORE:00000177", "facultative", "facultative anaerobe"),
        MetabolismEntry::new("ECOCORE:00000179", "obligate aerobic", "obligate aerobe"),
        MetabolismEntry::new("ECOCORE:00000173", "aerobic", "aerobe"),
        MetabolismEntry::new("ECOCORE:00000180", "microaerophilic", "microaerophilic"),
    ]
}

/// Ontology conversion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OntologyConfig {
    /// External converter command; supports `{input}`, `{output}`, `{name}`, `{format}`
    pub converter: Vec<String>,
    /// Output format handed to the converter
    pub output_format: String,
}

impl Default for OntologyConfig {
    fn default() -> Self {
        Self {
            converter: vec![
                "kgx".to_string(),
                "transform".to_string(),
                "--input-format".to_string(),
                "obojson".to_string(),
                "--output-format".to_string(),
                "{format}".to_string(),
                "--output".to_string(),
                "{output}".to_string(),
                "{input}".to_string(),
            ],
            output_format: "tsv".to_string(),
        }
    }
}

/// Ontology subset extraction settings, run after the trait transform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubsetConfig {
    /// External extraction command; empty disables extraction.
    /// Supports `{input}`, `{terms}`, `{output}`, `{method}`
    pub command: Vec<String>,
    /// Ontology file the subset is extracted from, relative to the input directory
    pub ontology_file: String,
    /// Extraction method (e.g. BOT, TOP, STAR)
    pub method: String,
}

impl Default for SubsetConfig {
    fn default() -> Self {
        Self {
            command: Vec::new(),
            ontology_file: "ncbitaxon.owl".to_string(),
            method: "BOT".to_string(),
        }
    }
}
