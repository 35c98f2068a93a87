// src/config/mod.rs

//! Configuration loading and validation for watchmon.
//!
//! Responsibilities:
//! - Define the YAML-backed data model (`model.rs`), including the
//!   string-or-list normalization and the per-source `__defaults__`
//!   merge.
//! - Load monitor files from disk (`loader.rs`).
//! - Validate definitions after the merge (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_source, load_sources, parse_source};
pub use model::{ConfigSource, MonitorDefinition, MonitorKey, SearchDefinition};
pub use validate::{validate_definition, validate_source};
