// src/engine/runtime.rs

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::loader::load_sources;
use crate::config::model::{ConfigSource, MonitorDefinition};
use crate::engine::cycle::{CycleOptions, TriggerCycle};
use crate::exec::pipeline::CommandPipeline;
use crate::exec::runner::CommandRunner;

/// Options that influence how the runtime behaves.
#[derive(Debug, Clone, Default)]
pub struct RuntimeOptions {
    /// Re-enter a fresh cycle after each one completes (`--repeat`).
    pub repeat: bool,

    /// Sentinel file diverting execution to the `skipped` hooks.
    pub skip_file: Option<PathBuf>,

    /// Timing and strict/lenient handling for each cycle.
    pub cycle: CycleOptions,
}

/// The driver around trigger cycles.
///
/// Each iteration reloads configuration from disk, runs one blocking
/// trigger cycle, samples the skip file once, and then runs each
/// triggered definition's pipeline, strictly one after another, in
/// trigger order.
pub struct Runtime<'a> {
    config_paths: Vec<String>,
    options: RuntimeOptions,
    runner: &'a dyn CommandRunner,
}

impl<'a> Runtime<'a> {
    pub fn new(
        config_paths: Vec<String>,
        options: RuntimeOptions,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        Self {
            config_paths,
            options,
            runner,
        }
    }

    pub async fn run(&self) -> Result<()> {
        let cycle = TriggerCycle::new(self.options.cycle.clone());
        let pipeline = CommandPipeline::new(self.runner);

        loop {
            // Definitions are rebuilt from disk every cycle; edits to
            // the monitor files (including new glob matches) apply
            // from here on.
            let sources = load_sources(&self.config_paths, self.options.cycle.mode)?;
            let definitions = flatten(sources);

            let triggered = cycle.run(&definitions).await?;

            // Sampled once per cycle, not re-checked per command.
            let skip_file_present = self
                .options
                .skip_file
                .as_deref()
                .map(|p| p.exists())
                .unwrap_or(false);

            for key in &triggered {
                match definitions.iter().find(|d| &d.key == key) {
                    Some(defn) => {
                        let outcome = pipeline.execute(defn, skip_file_present).await;
                        debug!(monitor = %key, ?outcome, "pipeline finished");
                    }
                    None => warn!(monitor = %key, "triggered definition not found"),
                }
            }

            if !self.options.repeat {
                return Ok(());
            }

            sleep(Duration::from_secs(1)).await;
            info!("---");
        }
    }
}

fn flatten(sources: Vec<ConfigSource>) -> Vec<MonitorDefinition> {
    sources.into_iter().flat_map(|s| s.monitors).collect()
}
