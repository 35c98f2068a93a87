// src/exec/runner.rs

use std::future::Future;
use std::pin::Pin;

use tokio::process::Command;

use crate::errors::Result;

/// Trait abstracting how a command string is executed.
///
/// Production code uses [`ShellRunner`]; tests can provide their own
/// implementation that records commands instead of spawning processes.
pub trait CommandRunner: Send + Sync {
    /// Run one command and return its exit code.
    fn run(&self, command: &str) -> Pin<Box<dyn Future<Output = Result<i32>> + Send + '_>>;
}

/// Real runner: hands the command string to the platform shell with
/// inherited stdio. Output is not captured; only the exit code is
/// observed.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> Pin<Box<dyn Future<Output = Result<i32>> + Send + '_>> {
        let command = command.to_string();

        Box::pin(async move {
            // Build a shell command appropriate for the platform.
            let mut cmd = if cfg!(windows) {
                let mut c = Command::new("cmd");
                c.arg("/C").arg(&command);
                c
            } else {
                let mut c = Command::new("sh");
                c.arg("-c").arg(&command);
                c
            };

            let status = cmd.status().await?;
            Ok(status.code().unwrap_or(-1))
        })
    }
}
