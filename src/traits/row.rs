//! One organism row of the trait table.

use crate::tabular::Record;

/// Trait CSV column names.
pub mod columns {
    pub const TAX_ID: &str = "tax_id";
    pub const ORG_NAME: &str = "org_name";
    pub const METABOLISM: &str = "metabolism";
    pub const PATHWAYS: &str = "pathways";
    pub const SHAPE: &str = "shape";
    pub const CARBON_SUBSTRATES: &str = "carbon_substrates";
    pub const CELL_SHAPE: &str = "cell_shape";
    pub const ISOLATION_SOURCE: &str = "isolation_source";

    /// Columns the trait table must carry.
    pub const REQUIRED: [&str; 8] = [
        TAX_ID,
        ORG_NAME,
        METABOLISM,
        PATHWAYS,
        SHAPE,
        CARBON_SUBSTRATES,
        CELL_SHAPE,
        ISOLATION_SOURCE,
    ];
}

/// Parsed trait row. Multi-valued cells keep first-occurrence order without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitRow {
    pub tax_id: String,
    pub org_name: String,
    pub metabolism: String,
    pub carbon_substrates: Vec<String>,
    pub cell_shape: String,
    pub isolation_sources: Vec<String>,
    pub pathways: Vec<String>,
}

impl TraitRow {
    /// Build a row from a masked record; `separator` splits multi-valued cells.
    pub fn from_record(record: &Record, separator: char) -> Self {
        Self {
            tax_id: record.value(columns::TAX_ID).to_string(),
            org_name: record.value(columns::ORG_NAME).to_string(),
            metabolism: record.value(columns::METABOLISM).to_string(),
            carbon_substrates: split_multi(record.value(columns::CARBON_SUBSTRATES), separator),
            cell_shape: record.value(columns::CELL_SHAPE).to_string(),
            isolation_sources: split_multi(record.value(columns::ISOLATION_SOURCE), separator),
            pathways: split_multi(&record.value(columns::PATHWAYS).replace('_', " "), separator),
        }
    }
}

/// Split on `separator`, trim, drop empties and later duplicates.
pub fn split_multi(value: &str, separator: char) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for item in value.split(separator).map(str::trim) {
        if !item.is_empty() && !items.iter().any(|i| i == item) {
            items.push(item.to_string());
        }
    }
    items
}
