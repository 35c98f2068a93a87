// src/exec/pipeline.rs

use tracing::{debug, error, info, warn};

use crate::config::model::MonitorDefinition;
use crate::exec::runner::CommandRunner;

/// Literal token replaced with the definition's name in every command.
pub const NAME_PLACEHOLDER: &str = "_MONITOR_NAME_";

/// Result of running one definition's pipeline for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// The skip file existed; only the `skipped` hooks ran.
    Skipped,
    /// `commands` finished with exit code 0; `completed` hooks ran.
    Completed,
    /// `commands` stopped at this non-zero exit code; `error` hooks ran.
    Failed(i32),
}

/// Executes the hook lists for one triggered definition.
///
/// Commands run strictly one at a time with no per-command timeout; a
/// hanging command blocks this pipeline and every definition after it.
pub struct CommandPipeline<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> CommandPipeline<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Run the right hook lists for `defn`.
    ///
    /// `skip_file_present` is sampled once per cycle by the caller, so
    /// a skip file created mid-pipeline does not abort an already
    /// started pipeline.
    pub async fn execute(
        &self,
        defn: &MonitorDefinition,
        skip_file_present: bool,
    ) -> PipelineOutcome {
        if skip_file_present {
            info!(monitor = %defn.key, "skip file exists; running skipped hooks");
            self.run_hook(defn, "skipped", &defn.skipped).await;
            return PipelineOutcome::Skipped;
        }

        self.run_hook(defn, "started", &defn.started).await;

        info!(monitor = %defn.key, "executing");
        let code = self.run_list(defn, &defn.commands).await;

        if code == 0 {
            self.run_hook(defn, "completed", &defn.completed).await;
            PipelineOutcome::Completed
        } else {
            self.run_hook(defn, "error", &defn.error).await;
            PipelineOutcome::Failed(code)
        }
    }

    /// Run a command list in declared order, stopping at the first
    /// non-zero exit code, which becomes the list's result. An empty
    /// list is a success. A command that cannot be spawned counts as
    /// exit code -1.
    async fn run_list(&self, defn: &MonitorDefinition, commands: &[String]) -> i32 {
        for command in commands {
            let command = command.replace(NAME_PLACEHOLDER, &defn.key.name);
            debug!(monitor = %defn.key, cmd = %command, "running command");

            match self.runner.run(&command).await {
                Ok(0) => {}
                Ok(code) => {
                    warn!(monitor = %defn.key, cmd = %command, exit_code = code, "command failed");
                    return code;
                }
                Err(err) => {
                    error!(monitor = %defn.key, cmd = %command, "command error: {err}");
                    return -1;
                }
            }
        }
        0
    }

    /// Hook lists are best-effort: they short-circuit internally like
    /// any command list, but their result is never escalated.
    async fn run_hook(&self, defn: &MonitorDefinition, hook: &str, commands: &[String]) {
        let code = self.run_list(defn, commands).await;
        if code != 0 {
            warn!(monitor = %defn.key, hook, exit_code = code, "hook commands failed");
        }
    }
}
