// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`runner`] owns the `CommandRunner` seam over the platform shell.
//! - [`pipeline`] runs a triggered definition's hook lists in order,
//!   with the skip-file gate and name substitution.

pub mod pipeline;
pub mod runner;

pub use pipeline::{CommandPipeline, PipelineOutcome, NAME_PLACEHOLDER};
pub use runner::{CommandRunner, ShellRunner};
