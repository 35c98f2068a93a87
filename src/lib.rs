// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod watch;

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::loader::load_sources;
use crate::config::model::ConfigSource;
use crate::engine::{CycleOptions, Runtime, RuntimeOptions};
use crate::errors::ErrorMode;
use crate::exec::ShellRunner;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the cycle runtime
/// - the shell command runner
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let mode = if args.exit_on_error {
        ErrorMode::Strict
    } else {
        ErrorMode::Lenient
    };

    if args.dry_run {
        let sources = load_sources(&args.paths, mode)?;
        print_dry_run(&sources);
        return Ok(());
    }

    let options = RuntimeOptions {
        repeat: args.repeat,
        skip_file: args.skip_file.clone().map(PathBuf::from),
        cycle: CycleOptions {
            mode,
            ..CycleOptions::default()
        },
    };

    let runner = ShellRunner;
    let runtime = Runtime::new(args.paths.clone(), options, &runner);

    // Ctrl-C -> clean exit; there is no mid-cycle cancellation beyond
    // full termination.
    tokio::select! {
        res = runtime.run() => res,
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted; shutting down");
            Ok(())
        }
    }
}

/// Simple dry-run output: print monitors, hooks and searches.
fn print_dry_run(sources: &[ConfigSource]) {
    println!("watchmon dry-run");

    for source in sources {
        println!("{} ({} monitors):", source.source, source.monitors.len());
        for defn in &source.monitors {
            println!("  - {}", defn.key.name);
            for (hook, list) in [
                ("skipped", &defn.skipped),
                ("started", &defn.started),
                ("commands", &defn.commands),
                ("completed", &defn.completed),
                ("error", &defn.error),
            ] {
                if !list.is_empty() {
                    println!("      {hook}: {list:?}");
                }
            }
            for search in &defn.searches {
                match &search.name {
                    Some(name) => println!("      search '{}': {:?}", name, search.paths),
                    None => println!("      search: {:?}", search.paths),
                }
                if !search.patterns.is_empty() {
                    println!("        patterns: {:?}", search.patterns);
                }
            }
        }
    }
}
