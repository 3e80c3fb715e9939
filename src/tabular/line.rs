//! Header and line parsing for delimited text.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;

use crate::error::{ParseError, Result};

/// Parsed header line: ordered column names with a name → position index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Header {
    /// Build a header from column names. Later duplicates shadow earlier ones.
    pub fn new(columns: Vec<String>) -> Self {
        let positions = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        Self { columns, positions }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column, if present.
    pub fn position(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }

    /// Fail with [`ParseError::MissingColumn`] unless every column is present.
    pub fn require(&self, columns: &[&str], source_name: &str) -> Result<()> {
        match columns.iter().find(|c| !self.positions.contains_key(**c)) {
            Some(missing) => Err(ParseError::MissingColumn {
                column: missing.to_string(),
                source_name: source_name.to_string(),
            }
            .into()),
            None => Ok(()),
        }
    }
}

/// One parsed line: field values addressed by column name.
#[derive(Debug, Clone)]
pub struct Record {
    header: Arc<Header>,
    values: Vec<String>,
}

impl Record {
    pub fn new(header: Arc<Header>, values: Vec<String>) -> Self {
        Self { header, values }
    }

    /// Value of a column, if the column exists.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.header
            .position(column)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
    }

    /// Value of a column, or the empty string when absent.
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }
}

/// Split a line on `delimiter`, honouring double-quoted fields.
///
/// Delimiters inside quotes are kept as part of the field and the quote
/// characters themselves are dropped. Surrounding whitespace is trimmed.
pub fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    let line = line.trim_end_matches(['\n', '\r']);
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            c => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Parse a header line into a [`Header`].
pub fn parse_header(line: &str, delimiter: char) -> Header {
    Header::new(split_fields(line, delimiter))
}

/// Line parser for delimited files whose free-text fields may contain the delimiter.
///
/// Delimiters inside quoted spans are replaced with a placeholder before
/// splitting, so `"alanine, glucose"` becomes the single field `alanine| glucose`.
pub struct LineParser {
    delimiter: char,
    placeholder: char,
    quoted: Regex,
}

impl LineParser {
    pub fn new(delimiter: char, placeholder: char) -> Self {
        Self {
            delimiter,
            placeholder,
            quoted: Regex::new(r#""[^"]*""#).expect("Invalid quoted-field regex"),
        }
    }

    pub fn placeholder(&self) -> char {
        self.placeholder
    }

    /// Replace delimiters occurring inside quoted spans with the placeholder.
    pub fn mask_quoted<'a>(&self, line: &'a str) -> Cow<'a, str> {
        let (delimiter, placeholder) = (self.delimiter, self.placeholder);
        self.quoted.replace_all(line, |caps: &regex::Captures| {
            caps[0].replace(delimiter, &placeholder.to_string())
        })
    }

    /// Parse a header line.
    pub fn parse_header(&self, line: &str) -> Arc<Header> {
        Arc::new(parse_header(line, self.delimiter))
    }

    /// Mask, split and map a data line onto `header`.
    ///
    /// `line_number` is 1-based and only used for error reporting.
    pub fn parse_line(&self, line: &str, header: &Arc<Header>, line_number: usize) -> Result<Record> {
        let masked = self.mask_quoted(line);
        let values = split_fields(&masked, self.delimiter);

        if values.len() != header.len() {
            return Err(ParseError::MalformedRow {
                line: line_number,
                expected: header.len(),
                found: values.len(),
            }
            .into());
        }

        Ok(Record::new(Arc::clone(header), values))
    }
}
