// src/engine/cycle.rs

use std::collections::HashSet;
use std::time::Duration;

use anyhow::Result;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::model::{MonitorDefinition, MonitorKey};
use crate::errors::ErrorMode;
use crate::watch::collector::ChangeCollector;
use crate::watch::expand::expand_all;
use crate::watch::registry::WatchRegistry;

/// Coarse poll interval while waiting for the first change.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// How long to keep watching after the first change, so that
/// near-simultaneous changes (a save touching several files) land in
/// the same cycle.
pub const DEFAULT_SETTLE_WINDOW: Duration = Duration::from_secs(1);

/// Timing and error-handling knobs for one trigger cycle.
#[derive(Debug, Clone)]
pub struct CycleOptions {
    pub poll_interval: Duration,
    pub settle_window: Duration,
    pub mode: ErrorMode,
}

impl Default for CycleOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            settle_window: DEFAULT_SETTLE_WINDOW,
            mode: ErrorMode::Lenient,
        }
    }
}

/// One watch -> detect -> settle -> compute round.
///
/// The cycle blocks indefinitely until the first change is observed;
/// that idle waiting is intended behaviour, not a missing timeout.
/// Glob expansion, watches and collectors are rebuilt on every run, so
/// configuration edits take effect on the next cycle, never the
/// current one.
#[derive(Debug, Clone, Default)]
pub struct TriggerCycle {
    options: CycleOptions,
}

impl TriggerCycle {
    pub fn new(options: CycleOptions) -> Self {
        Self { options }
    }

    /// Run one full cycle and return the key of every definition that
    /// changed, each at most once, in collector discovery order.
    pub async fn run(&self, definitions: &[MonitorDefinition]) -> Result<Vec<MonitorKey>> {
        // Idle -> Watching: expand globs and register watches.
        let targets = expand_all(definitions, self.options.mode)?;
        let mut registry = WatchRegistry::build(targets, self.options.mode)?;

        if registry.is_empty() {
            warn!("no watch targets registered; this cycle can never trigger");
        }
        info!(definitions = definitions.len(), "watching");

        // Watching: poll until the first relevant change arrives.
        loop {
            registry.drain_events();
            if registry.has_change() {
                break;
            }
            sleep(self.options.poll_interval).await;
        }

        // Settling: keep watching one fixed window.
        debug!("change detected; settling");
        sleep(self.options.settle_window).await;
        registry.drain_events();

        // Computing: stop all watches, then dedup per definition.
        // `into_collectors` drops the watcher, which unregisters every
        // watch; an early `?` above drops it just the same.
        let collectors = registry.into_collectors();
        let triggered = triggered_keys(&collectors);

        info!(triggered = triggered.len(), "cycle complete");
        Ok(triggered)
    }
}

/// The dedup step: a definition with at least one non-empty collector
/// appears exactly once, regardless of how many of its targets or
/// paths changed.
pub fn triggered_keys(collectors: &[ChangeCollector]) -> Vec<MonitorKey> {
    let mut seen: HashSet<&MonitorKey> = HashSet::new();
    let mut triggered = Vec::new();

    for collector in collectors {
        if collector.has_change() && seen.insert(collector.key()) {
            triggered.push(collector.key().clone());
        }
    }

    triggered
}
