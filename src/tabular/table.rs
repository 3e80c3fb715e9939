//! In-memory side tables (NER output, SSSOM mappings, environment mapping).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use super::line::{parse_header, split_fields, Header, Record};
use crate::error::{KgError, ParseError, Result};

/// A fully loaded delimited table.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    records: Vec<Record>,
}

impl Table {
    /// Load a table from disk, requiring the given columns.
    ///
    /// Blank lines and lines starting with `#` are skipped. Rows shorter
    /// than the header are padded with empty values; longer rows are an error.
    pub fn from_path(path: impl AsRef<Path>, delimiter: char, required: &[&str]) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(KgError::MissingInput(path.to_path_buf()));
        }
        let file = File::open(path)?;
        Self::from_reader(
            BufReader::new(file),
            &path.display().to_string(),
            delimiter,
            required,
        )
    }

    /// Load a table from any buffered reader.
    pub fn from_reader<R: BufRead>(
        reader: R,
        name: &str,
        delimiter: char,
        required: &[&str],
    ) -> Result<Self> {
        let mut header: Option<Arc<Header>> = None;
        let mut records = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let header = match header.clone() {
                Some(header) => header,
                None => {
                    let parsed = parse_header(&line, delimiter);
                    parsed.require(required, name)?;
                    header = Some(Arc::new(parsed));
                    continue;
                }
            };

            let mut values = split_fields(&line, delimiter);
            if values.len() > header.len() {
                return Err(ParseError::MalformedRow {
                    line: index + 1,
                    expected: header.len(),
                    found: values.len(),
                }
                .into());
            }
            if values.len() < header.len() {
                debug!(table = name, line = index + 1, "Padding short row");
                values.resize(header.len(), String::new());
            }
            records.push(Record::new(header, values));
        }

        if header.is_none() {
            return Err(ParseError::EmptyInput(name.to_string()).into());
        }
        debug!(table = name, rows = records.len(), "Loaded table");

        Ok(Self {
            name: name.to_string(),
            records,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
