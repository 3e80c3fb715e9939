//! Configuration loading for kg-microbe.

mod settings;

pub use settings::*;
