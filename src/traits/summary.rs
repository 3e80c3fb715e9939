//! Result of a trait transform run.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::Result;

#[derive(Debug, Clone, Serialize)]
pub struct TransformSummary {
    pub source_name: String,
    pub output_dir: PathBuf,
    pub rows_processed: usize,
    /// Rows without a usable taxonomy id
    pub rows_skipped: usize,
    pub nodes_written: usize,
    pub edges_written: usize,
    pub organisms: usize,
    pub chebi_remnants: usize,
    pub go_remnants: usize,
    pub nlp: bool,
    pub nodes_sha256: String,
    pub edges_sha256: String,
    pub subset_output: Option<PathBuf>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl TransformSummary {
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

/// Hex SHA-256 of a file's contents.
pub fn file_digest(path: &Path) -> Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}
