// src/watch/expand.rs

use std::path::PathBuf;

use tracing::{error, warn};

use crate::config::model::{MonitorDefinition, MonitorKey};
use crate::errors::{ErrorMode, Result, WatchmonError};
use crate::watch::collector::PathFilter;

/// One concrete filesystem path to watch, produced by expanding one
/// glob entry of one search definition.
///
/// A target belongs to exactly one monitor definition (the one whose
/// search list produced it); a definition may own many targets.
#[derive(Debug, Clone)]
pub struct WatchTarget {
    pub path: PathBuf,
    pub key: MonitorKey,
    pub filter: PathFilter,
}

/// Expand every search glob of one definition into concrete targets.
///
/// Recursive glob semantics: `**` matches any directory depth. A glob
/// that expands to nothing is a configuration error: fatal in strict
/// mode, otherwise reported and processing continues with the
/// remaining globs. The same rule applies to a glob or pattern that
/// fails to compile.
pub fn expand_definition(defn: &MonitorDefinition, mode: ErrorMode) -> Result<Vec<WatchTarget>> {
    let mut targets = Vec::new();

    for search in &defn.searches {
        let filter = match PathFilter::compile(&search.patterns) {
            Ok(filter) => filter,
            Err(err) if mode.is_strict() => return Err(err),
            Err(err) => {
                error!(monitor = %defn.key, "skipping search: {err}");
                continue;
            }
        };

        for pattern in &search.paths {
            let matches = match glob::glob(pattern) {
                Ok(matches) => matches,
                Err(err) if mode.is_strict() => {
                    return Err(WatchmonError::Config(format!(
                        "invalid glob '{}': {}",
                        pattern, err
                    )));
                }
                Err(err) => {
                    error!(monitor = %defn.key, "skipping glob '{pattern}': {err}");
                    continue;
                }
            };

            let mut found = false;
            for entry in matches {
                match entry {
                    Ok(path) => {
                        found = true;
                        targets.push(WatchTarget {
                            path,
                            key: defn.key.clone(),
                            filter: filter.clone(),
                        });
                    }
                    Err(err) => warn!(monitor = %defn.key, "unreadable glob match: {err}"),
                }
            }

            if !found {
                error!(monitor = %defn.key, "no glob expansion for: {pattern}");
                if mode.is_strict() {
                    return Err(WatchmonError::EmptyGlob(pattern.clone()));
                }
            }
        }
    }

    Ok(targets)
}

/// Expand all definitions, preserving definition order.
///
/// A definition whose globs all fail ends up with zero targets and can
/// never fire this cycle; that is silent here (warned per glob above).
pub fn expand_all(definitions: &[MonitorDefinition], mode: ErrorMode) -> Result<Vec<WatchTarget>> {
    let mut targets = Vec::new();
    for defn in definitions {
        targets.extend(expand_definition(defn, mode)?);
    }
    Ok(targets)
}
