//! CLI module for the kg-microbe command-line interface.
//!
//! Command handlers load inputs through the library and print results as
//! JSON or human-readable text.

mod commands;
mod output;

pub use commands::*;
