//! Error types for kg-microbe transforms.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for kg-microbe operations.
#[derive(Error, Debug)]
pub enum KgError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Ontology error: {0}")]
    Ontology(#[from] OntologyError),

    #[error("Required input not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Delimited-text parsing errors.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Malformed row at line {line}: expected {expected} fields, found {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Missing column '{column}' in {source_name}")]
    MissingColumn { column: String, source_name: String },

    #[error("Empty input: {0}")]
    EmptyInput(String),
}

/// Ontology conversion and subset extraction errors.
#[derive(Error, Debug)]
pub enum OntologyError {
    #[error("Unknown ontology source: {0}")]
    UnknownSource(String),

    #[error("Converter failed for {name}: {message}")]
    Converter { name: String, message: String },

    #[error("Subset extraction failed: {0}")]
    Extractor(String),
}

/// Result type alias for kg-microbe operations.
pub type Result<T> = std::result::Result<T, KgError>;
