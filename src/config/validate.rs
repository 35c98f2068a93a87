// src/config/validate.rs

use regex::Regex;
use tracing::warn;

use crate::config::model::{ConfigSource, MonitorDefinition};
use crate::errors::{ErrorMode, Result, WatchmonError};

/// Run semantic validation over every definition in a parsed source.
///
/// This checks:
/// - each search declares at least one path glob
/// - every `patterns` entry compiles as a regular expression
///
/// It does **not** touch the filesystem; whether the globs actually
/// expand to anything is checked at cycle setup, where the strict /
/// lenient rule applies per glob.
pub fn validate_source(source: &ConfigSource, mode: ErrorMode) -> Result<()> {
    for defn in &source.monitors {
        if let Err(err) = validate_definition(defn) {
            if mode.is_strict() {
                return Err(err);
            }
            warn!(monitor = %defn.key, "{err}");
        }
    }
    Ok(())
}

pub fn validate_definition(defn: &MonitorDefinition) -> Result<()> {
    for search in &defn.searches {
        if search.paths.is_empty() {
            return Err(WatchmonError::Config(format!(
                "monitor '{}' has a search with no paths",
                defn.key
            )));
        }

        for pattern in &search.patterns {
            Regex::new(pattern).map_err(|err| {
                WatchmonError::Config(format!(
                    "monitor '{}' has invalid pattern '{}': {}",
                    defn.key, pattern, err
                ))
            })?;
        }
    }
    Ok(())
}
