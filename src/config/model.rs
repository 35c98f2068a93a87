// src/config/model.rs

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::errors::{Result, WatchmonError};

/// Reserved document entry holding per-source fallback values.
///
/// Defaults from one monitor file never apply to another file.
pub const DEFAULTS_KEY: &str = "__defaults__";

/// A YAML field that may be written as a single value or as a list.
///
/// All such fields are normalized to a `Vec` once at load time, so the
/// engine never branches on the short form again.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(v) => vec![v],
            OneOrMany::Many(vs) => vs,
        }
    }
}

fn to_list(field: Option<OneOrMany<String>>) -> Vec<String> {
    field.map(OneOrMany::into_vec).unwrap_or_default()
}

/// One monitor entry as read from YAML, before the defaults merge.
///
/// This is a direct mapping of the monitor file format:
///
/// ```yaml
/// "__defaults__":
///   completed: "notify-send done"
///
/// "backend build":
///   commands:
///     - "make -C images/api"
///   searches:
///     - name: "api sources"
///       paths: "images/api/src"
///       patterns: ['.*\.py$']
/// ```
///
/// Every hook field accepts a single command string as a short form of
/// a one-element list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMonitor {
    /// Run instead of `commands` when the skip file exists.
    #[serde(default)]
    pub skipped: Option<OneOrMany<String>>,

    /// Run before `commands`, best-effort.
    #[serde(default)]
    pub started: Option<OneOrMany<String>>,

    /// The main command list for this monitor.
    #[serde(default)]
    pub commands: Option<OneOrMany<String>>,

    /// Run after `commands` finished with exit code 0.
    #[serde(default)]
    pub completed: Option<OneOrMany<String>>,

    /// Run after `commands` stopped at a non-zero exit code.
    #[serde(default)]
    pub error: Option<OneOrMany<String>>,

    /// What to watch. Required on every monitor after the defaults
    /// merge; see [`RawSearches`] for the accepted shapes.
    #[serde(default)]
    pub searches: Option<RawSearches>,
}

impl RawMonitor {
    /// Shallow per-key merge: fields set on the monitor win, absent
    /// fields fall back to the source's `__defaults__` entry. An
    /// explicit list fully replaces the default list.
    pub fn merged_with_defaults(self, defaults: &RawMonitor) -> RawMonitor {
        RawMonitor {
            skipped: self.skipped.or_else(|| defaults.skipped.clone()),
            started: self.started.or_else(|| defaults.started.clone()),
            commands: self.commands.or_else(|| defaults.commands.clone()),
            completed: self.completed.or_else(|| defaults.completed.clone()),
            error: self.error.or_else(|| defaults.error.clone()),
            searches: self.searches.or_else(|| defaults.searches.clone()),
        }
    }

    /// Normalize into a [`MonitorDefinition`] keyed by `(source, name)`.
    pub fn into_definition(self, source: &str, name: &str) -> Result<MonitorDefinition> {
        let searches = match self.searches {
            Some(raw) => normalize_searches(raw),
            None => Vec::new(),
        };

        if searches.is_empty() {
            return Err(WatchmonError::Config(format!(
                "monitor '{name}' in {source} declares no `searches`"
            )));
        }

        Ok(MonitorDefinition {
            key: MonitorKey {
                source: source.to_string(),
                name: name.to_string(),
            },
            skipped: to_list(self.skipped),
            started: to_list(self.started),
            commands: to_list(self.commands),
            completed: to_list(self.completed),
            error: to_list(self.error),
            searches,
        })
    }
}

/// Accepted YAML shapes for `searches`:
///
/// ```yaml
/// searches: "bin/monitor.yaml"          # one search, one path
/// searches: [".env", ".secrets.env"]    # one search over both paths
/// searches:                             # full form
///   - name: "front"
///     paths: ["images/ui/src"]
///     patterns: ['.*\.jsx$']
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawSearches {
    Path(String),
    Paths(Vec<String>),
    Def(RawSearch),
    Defs(Vec<RawSearch>),
}

/// One search mapping in full form.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSearch {
    /// Informational only; never interpreted.
    #[serde(default)]
    pub name: Option<String>,

    pub paths: OneOrMany<String>,

    /// Optional regular expressions; when present, only change events
    /// whose path matches at least one of them are recorded.
    #[serde(default)]
    pub patterns: Option<OneOrMany<String>>,
}

impl RawSearch {
    fn into_search(self) -> SearchDefinition {
        SearchDefinition {
            name: self.name,
            paths: self.paths.into_vec(),
            patterns: to_list(self.patterns),
        }
    }
}

fn normalize_searches(raw: RawSearches) -> Vec<SearchDefinition> {
    match raw {
        RawSearches::Path(path) => vec![SearchDefinition {
            name: None,
            paths: vec![path],
            patterns: Vec::new(),
        }],
        RawSearches::Paths(paths) => vec![SearchDefinition {
            name: None,
            paths,
            patterns: Vec::new(),
        }],
        RawSearches::Def(def) => vec![def.into_search()],
        RawSearches::Defs(defs) => defs.into_iter().map(RawSearch::into_search).collect(),
    }
}

/// Raw YAML document: monitor name -> definition record.
pub type RawDocument = BTreeMap<String, RawMonitor>;

/// Unique identity of a monitor definition: the configuration source it
/// came from plus its name within that source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonitorKey {
    pub source: String,
    pub name: String,
}

impl fmt::Display for MonitorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.name)
    }
}

/// A fully normalized monitor definition.
///
/// Built fresh from configuration at the start of every trigger cycle
/// and immutable afterwards; configuration edits are picked up by the
/// next cycle.
#[derive(Debug, Clone)]
pub struct MonitorDefinition {
    pub key: MonitorKey,
    pub skipped: Vec<String>,
    pub started: Vec<String>,
    pub commands: Vec<String>,
    pub completed: Vec<String>,
    pub error: Vec<String>,
    pub searches: Vec<SearchDefinition>,
}

/// The glob/pattern specification that selects concrete paths for one
/// monitor definition.
#[derive(Debug, Clone)]
pub struct SearchDefinition {
    pub name: Option<String>,
    pub paths: Vec<String>,
    pub patterns: Vec<String>,
}

/// All monitors parsed from one configuration file.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    pub source: String,
    pub monitors: Vec<MonitorDefinition>,
}
