// src/engine/mod.rs

//! The trigger engine for watchmon.
//!
//! - [`cycle`] owns one watch -> detect -> settle -> compute round and
//!   the once-per-definition dedup step.
//! - [`runtime`] drives cycles in a loop, reloading configuration
//!   between them and handing each triggered definition to the
//!   command pipeline.

pub mod cycle;
pub mod runtime;

pub use cycle::{
    triggered_keys, CycleOptions, TriggerCycle, DEFAULT_POLL_INTERVAL, DEFAULT_SETTLE_WINDOW,
};
pub use runtime::{Runtime, RuntimeOptions};
