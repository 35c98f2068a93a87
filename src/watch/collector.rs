// src/watch/collector.rs

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::debug;

use crate::config::model::MonitorKey;
use crate::errors::{Result, WatchmonError};

/// What kind of filesystem change an event reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Deleted,
    Modified,
    Moved,
}

/// A single change notification. Transient: consumed immediately into a
/// collector's path set.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

/// Compiled pattern filter for one search definition.
///
/// Matching is regular-expression *search* against the absolute event
/// path: a pattern may match anywhere in the path, unanchored. This is
/// deliberate; configurations rely on partial matches. An empty filter
/// accepts everything.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    patterns: Vec<Regex>,
}

impl PathFilter {
    pub fn compile(patterns: &[String]) -> Result<Self> {
        let mut compiled = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let regex = Regex::new(pattern).map_err(|err| {
                WatchmonError::Config(format!("invalid pattern '{}': {}", pattern, err))
            })?;
            compiled.push(regex);
        }
        Ok(Self { patterns: compiled })
    }

    pub fn matches(&self, path: &Path) -> bool {
        if self.patterns.is_empty() {
            return true;
        }
        let text = path.to_string_lossy();
        self.patterns.iter().any(|re| re.is_match(&text))
    }
}

/// Per-target accumulator of distinct changed paths.
///
/// Owned by exactly one (watch target, monitor definition) pairing.
/// Mutated only by event dispatch while watches are live, and read by
/// the trigger cycle after they stop, so there are no concurrent reads
/// by construction.
#[derive(Debug)]
pub struct ChangeCollector {
    key: MonitorKey,
    filter: PathFilter,
    changed: HashSet<PathBuf>,
}

impl ChangeCollector {
    pub fn new(key: MonitorKey, filter: PathFilter) -> Self {
        Self {
            key,
            filter,
            changed: HashSet::new(),
        }
    }

    /// Record the event's path if the filter accepts it.
    ///
    /// Recording is idempotent: a path recorded twice contributes once.
    pub fn record(&mut self, event: &ChangeEvent) {
        if !self.filter.matches(&event.path) {
            return;
        }
        if self.changed.insert(event.path.clone()) {
            debug!(
                monitor = %self.key,
                kind = ?event.kind,
                path = ?event.path,
                "recorded change"
            );
        }
    }

    /// True iff any relevant change has been recorded this cycle.
    pub fn has_change(&self) -> bool {
        !self.changed.is_empty()
    }

    pub fn key(&self) -> &MonitorKey {
        &self.key
    }

    pub fn changed_paths(&self) -> &HashSet<PathBuf> {
        &self.changed
    }
}
