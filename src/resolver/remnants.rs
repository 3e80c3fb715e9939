//! Unresolved NER × SSSOM rows kept for manual curation.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::index::{NER_CATEGORY, NER_ID, NER_ROW_KEY, NER_STRING_MATCH, NER_TERM, SSSOM_COLUMNS};
use super::types::JoinedMatch;
use crate::error::Result;

/// Accumulator for joined rows that reached no synonym tier.
#[derive(Debug, Default, Clone)]
pub struct Remnants {
    rows: Vec<JoinedMatch>,
}

impl Remnants {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, rows: impl IntoIterator<Item = JoinedMatch>) {
        self.rows.extend(rows);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the remnants as TSV, header included even when empty.
    pub fn write_to<W: Write>(&self, mut out: W) -> Result<()> {
        let header = [NER_ROW_KEY, NER_TERM, NER_ID, NER_CATEGORY, NER_STRING_MATCH]
            .into_iter()
            .chain(SSSOM_COLUMNS)
            .collect::<Vec<_>>()
            .join("\t");
        writeln!(out, "{}", header)?;

        for row in &self.rows {
            let (c, m) = (&row.candidate, &row.mapping);
            writeln!(
                out,
                "{}",
                [
                    c.row_key.as_str(),
                    c.term.as_str(),
                    c.id.as_str(),
                    c.category.as_str(),
                    c.string_match.as_str(),
                    m.subject_label.as_str(),
                    m.object_id.as_str(),
                    m.object_label.as_str(),
                    m.object_match_field.as_str(),
                    m.match_category.as_str(),
                ]
                .join("\t")
            )?;
        }
        out.flush()?;
        Ok(())
    }

    pub fn write_tsv(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        self.write_to(BufWriter::new(file))
    }
}
