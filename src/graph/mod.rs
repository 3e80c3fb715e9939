//! KGX node/edge emission.

mod types;
mod writer;

pub use types::*;
pub use writer::*;
