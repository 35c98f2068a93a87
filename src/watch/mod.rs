// src/watch/mod.rs

//! File watching: glob expansion, watch registration, change collection.
//!
//! This module turns a monitor definition's searches into concrete
//! watch targets (`expand`), binds them to OS-level watches
//! (`registry`), and accumulates matching change events per target
//! (`collector`).
//!
//! It knows nothing about timing or command execution; the trigger
//! cycle drains the registry as a pure event source.

pub mod collector;
pub mod expand;
pub mod registry;

pub use collector::{ChangeCollector, ChangeEvent, ChangeKind, PathFilter};
pub use expand::{expand_all, expand_definition, WatchTarget};
pub use registry::WatchRegistry;
