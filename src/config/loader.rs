// src/config/loader.rs

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::error;

use crate::config::model::{ConfigSource, RawDocument, DEFAULTS_KEY};
use crate::config::validate::validate_source;
use crate::errors::{ErrorMode, Result};

/// Parse one YAML document into a `ConfigSource`.
///
/// `source` is the identity recorded in every resulting `MonitorKey`
/// (normally the file path). The document's `__defaults__` entry is
/// merged into every other entry here; it never leaks to other sources.
///
/// In lenient mode an invalid monitor is logged and dropped; the rest
/// of the document is kept.
pub fn parse_source(source: &str, contents: &str, mode: ErrorMode) -> Result<ConfigSource> {
    let mut document: RawDocument = serde_yaml::from_str(contents)?;
    let defaults = document.remove(DEFAULTS_KEY).unwrap_or_default();

    let mut monitors = Vec::new();
    for (name, raw) in document {
        let merged = raw.merged_with_defaults(&defaults);
        match merged.into_definition(source, &name) {
            Ok(defn) => monitors.push(defn),
            Err(err) if mode.is_strict() => return Err(err),
            Err(err) => {
                error!(monitor = %name, source = %source, "dropping invalid monitor: {err}");
            }
        }
    }

    Ok(ConfigSource {
        source: source.to_string(),
        monitors,
    })
}

/// Load and parse a single monitor file from disk.
pub fn load_source(path: impl AsRef<Path>, mode: ErrorMode) -> Result<ConfigSource> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading monitor file at {:?}", path))?;
    parse_source(&path.to_string_lossy(), &contents, mode)
}

/// Load every monitor file named on the command line.
///
/// Called once per trigger cycle, so edits to the files (including glob
/// expansion changes) take effect on the next cycle. In lenient mode an
/// unreadable or unparseable file is logged and skipped; the remaining
/// files still produce definitions.
pub fn load_sources(paths: &[String], mode: ErrorMode) -> Result<Vec<ConfigSource>> {
    let mut sources = Vec::with_capacity(paths.len());

    for path in paths {
        match load_source(path, mode) {
            Ok(source) => {
                validate_source(&source, mode)?;
                sources.push(source);
            }
            Err(err) if mode.is_strict() => return Err(err),
            Err(err) => error!(source = %path, "skipping monitor file: {err}"),
        }
    }

    Ok(sources)
}
