//! Entity resolution: free-text trait terms to ontology identifiers.
//!
//! NER output ([`MatchIndex`]) proposes candidate identifiers per
//! (row, term); SSSOM synonym mappings ([`SynonymIndex`]) rank candidates
//! that were not exact string matches. [`EntityResolver`] applies the tie
//! break and falls back to a prefixed identifier derived from the term.
//! Joined rows that reach no synonym tier are kept in [`Remnants`].

mod index;
mod remnants;
mod resolve;
mod types;

pub use index::*;
pub use remnants::Remnants;
pub use resolve::{EntityResolver, ResolveOptions};
pub use types::*;
