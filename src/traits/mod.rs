//! Organism trait table transform.
//!
//! Each row of the trait CSV becomes an organism node plus one node and one
//! organism edge per resolved chemical substrate, cell shape, isolation
//! source, metabolism type and pathway. See [`Slot`] for the vocabulary.

mod lookup;
mod pipeline;
mod row;
mod slots;
mod summary;

pub use lookup::{EnvironmentTable, MetabolismTable, ENV_IDS, ENV_TERMS, ENV_TYPE};
pub use pipeline::{TraitsPipeline, CHEBI_REMNANTS_FILE, GO_REMNANTS_FILE, SUBSET_TERMS_FILE};
pub use row::{columns, split_multi, TraitRow};
pub use slots::*;
pub use summary::{file_digest, TransformSummary};
