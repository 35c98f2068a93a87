// src/watch/registry.rs

use std::path::PathBuf;

use anyhow::{Context, Result};
use notify::event::ModifyKind;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::errors::ErrorMode;
use crate::watch::collector::{ChangeCollector, ChangeEvent, ChangeKind};
use crate::watch::expand::WatchTarget;

struct WatchEntry {
    root: PathBuf,
    collector: ChangeCollector,
}

/// Binds concrete paths to OS-level watches and routes incoming change
/// events to the owning collector.
///
/// A registry is built fresh for every trigger cycle and consumed at
/// the end of it. Dropping it unregisters every watch, so no stale
/// watches survive into the next cycle, also on error paths.
pub struct WatchRegistry {
    _watcher: RecommendedWatcher,
    events_rx: mpsc::UnboundedReceiver<Event>,
    entries: Vec<WatchEntry>,
}

impl std::fmt::Debug for WatchRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchRegistry")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl WatchRegistry {
    /// Register a recursive watch for every target.
    ///
    /// A path that cannot be watched (typically: it no longer exists)
    /// is isolated to its target: warned about and skipped in lenient
    /// mode, fatal in strict mode. Other targets are unaffected.
    pub fn build(targets: Vec<WatchTarget>, mode: ErrorMode) -> Result<Self> {
        // Channel from the synchronous notify callback into the cycle
        // loop, which drains it. Collectors are only ever touched from
        // that loop.
        let (event_tx, events_rx) = mpsc::unbounded_channel::<Event>();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    let _ = event_tx.send(event);
                }
                Err(err) => {
                    // We can't log via tracing here easily, so fallback to stderr.
                    eprintln!("watchmon: file watch error: {err}");
                }
            },
            Config::default(),
        )?;

        let mut entries = Vec::new();
        for target in targets {
            // Canonicalize so that event paths, which notify reports
            // absolute, prefix-match the stored root. Best-effort.
            let root = target
                .path
                .canonicalize()
                .unwrap_or_else(|_| target.path.clone());

            match watcher.watch(&root, RecursiveMode::Recursive) {
                Ok(()) => {
                    debug!(monitor = %target.key, path = ?root, "watching");
                    entries.push(WatchEntry {
                        root,
                        collector: ChangeCollector::new(target.key, target.filter),
                    });
                }
                Err(err) if mode.is_strict() => {
                    return Err(err)
                        .with_context(|| format!("registering watch on {:?}", target.path));
                }
                Err(err) => {
                    warn!(
                        monitor = %target.key,
                        path = ?target.path,
                        "cannot watch target: {err}"
                    );
                }
            }
        }

        Ok(Self {
            _watcher: watcher,
            events_rx,
            entries,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drain everything notify has delivered so far into the
    /// collectors. Non-blocking.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            let Some(kind) = change_kind(&event.kind) else {
                continue;
            };
            for path in &event.paths {
                self.dispatch(&ChangeEvent {
                    path: path.clone(),
                    kind,
                });
            }
        }
    }

    /// Route one event to every entry whose watched root contains the
    /// event path. Overlapping targets each receive the event, exactly
    /// as if they held separate OS watches.
    fn dispatch(&mut self, event: &ChangeEvent) {
        for entry in &mut self.entries {
            if event.path.starts_with(&entry.root) {
                entry.collector.record(event);
            }
        }
    }

    pub fn has_change(&self) -> bool {
        self.entries.iter().any(|e| e.collector.has_change())
    }

    /// Stop watching and hand the collectors over for computation.
    pub fn into_collectors(self) -> Vec<ChangeCollector> {
        self.entries.into_iter().map(|e| e.collector).collect()
    }
}

/// Map a notify event kind onto the change model. Access and other
/// bookkeeping notifications are not changes.
fn change_kind(kind: &EventKind) -> Option<ChangeKind> {
    match kind {
        EventKind::Create(_) => Some(ChangeKind::Created),
        EventKind::Remove(_) => Some(ChangeKind::Deleted),
        EventKind::Modify(ModifyKind::Name(_)) => Some(ChangeKind::Moved),
        EventKind::Modify(_) => Some(ChangeKind::Modified),
        _ => None,
    }
}
