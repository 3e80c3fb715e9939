//! Delimited text parsing.
//!
//! - [`LineParser`]: quote-aware line splitting for the trait CSV, masking
//!   delimiters inside quoted free text with a placeholder.
//! - [`Table`]: whole-file loading of the smaller side inputs.

mod line;
mod table;

pub use line::{parse_header, split_fields, Header, LineParser, Record};
pub use table::Table;
