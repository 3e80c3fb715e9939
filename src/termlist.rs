//! KGX nodes TSV → Bio Term Hub term list for the NER engine.
//!
//! Output columns: UMLS CUI (always `CUI-less`), resource, native id,
//! term, preferred form, type. Each synonym gets its own row ahead of the
//! node's main row, differing only in the term column.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{KgError, ParseError, Result};
use crate::tabular::{parse_header, Header};

/// Categories never written to a term list.
pub const EXCLUDED_CATEGORIES: [&str; 1] = ["biolink:Publication"];

const CUI_LESS: &str = "CUI-less";
const NO_RESOURCE: &str = "N/A";

/// Counts from one conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TermlistSummary {
    /// Rows written, synonym rows included
    pub rows_written: usize,
    /// Nodes converted
    pub nodes: usize,
    pub skipped_excluded: usize,
    pub skipped_unnamed: usize,
}

/// Convert the nodes file at `input` into a term list at `output`.
pub fn convert(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<TermlistSummary> {
    let input = input.as_ref();
    if !input.is_file() {
        return Err(KgError::MissingInput(input.to_path_buf()));
    }
    if let Some(parent) = output.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }

    let reader = BufReader::new(File::open(input)?);
    let mut writer = BufWriter::new(File::create(output.as_ref())?);
    let summary = convert_stream(reader, &mut writer, &input.display().to_string())?;
    writer.flush()?;

    info!(
        input = %input.display(),
        rows = summary.rows_written,
        nodes = summary.nodes,
        "Wrote term list"
    );
    Ok(summary)
}

/// Convert a nodes TSV stream. `name` labels errors.
pub fn convert_stream<R: BufRead, W: Write>(reader: R, out: &mut W, name: &str) -> Result<TermlistSummary> {
    let mut lines = reader.lines();
    let header: Header = match lines.next() {
        Some(line) => parse_header(&line?, '\t'),
        None => return Err(ParseError::EmptyInput(name.to_string()).into()),
    };
    header.require(&["id", "name", "category"], name)?;

    let column = |elements: &[&str], col: &str| -> String {
        header
            .position(col)
            .and_then(|i| elements.get(i))
            .map(|v| v.trim_end().to_string())
            .unwrap_or_default()
    };

    let mut summary = TermlistSummary::default();
    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let elements: Vec<&str> = line.split('\t').collect();

        let category = column(&elements, "category");
        if EXCLUDED_CATEGORIES.iter().any(|c| category.contains(c)) {
            debug!(line = %line.trim_end(), "Skipping excluded category");
            summary.skipped_excluded += 1;
            continue;
        }

        let term = column(&elements, "name");
        if term.is_empty() {
            warn!(line = %line.trim_end(), "Skipping node without a name");
            summary.skipped_unnamed += 1;
            continue;
        }

        let resource = match header.position("provided_by") {
            Some(_) => column(&elements, "provided_by"),
            None => NO_RESOURCE.to_string(),
        };
        let mut record = [
            CUI_LESS.to_string(),
            resource,
            column(&elements, "id"),
            term.clone(),
            term,
            category,
        ];

        let synonyms = column(&elements, "synonym");
        if !synonyms.is_empty() {
            let main_term = record[3].clone();
            for synonym in synonyms.split('|') {
                record[3] = synonym.to_string();
                writeln!(out, "{}", record.join("\t"))?;
                summary.rows_written += 1;
            }
            record[3] = main_term;
        }
        writeln!(out, "{}", record.join("\t"))?;
        summary.rows_written += 1;
        summary.nodes += 1;
    }

    Ok(summary)
}
