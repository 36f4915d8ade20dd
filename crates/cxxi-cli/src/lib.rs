//! cxxi command-line driver
//!
//! Loads a library description, runs the binding generator over it and
//! renders the result.

pub mod commands;
pub mod config;

pub use config::{GeneratorConfig, LibraryConfig, LibraryConfigError, LibraryInfo};
