use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use watchmon::config::{MonitorDefinition, MonitorKey, SearchDefinition};
use watchmon::errors::Result;
use watchmon::exec::{CommandPipeline, CommandRunner, PipelineOutcome, ShellRunner};

/// A fake runner that records every command instead of spawning a
/// process. Commands of the form `exit:N` report exit code N; `ioerr`
/// reports a spawn failure; everything else succeeds.
struct FakeRunner {
    executed: Arc<Mutex<Vec<String>>>,
}

impl FakeRunner {
    fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
        let executed = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                executed: Arc::clone(&executed),
            },
            executed,
        )
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, command: &str) -> Pin<Box<dyn Future<Output = Result<i32>> + Send + '_>> {
        let command = command.to_string();
        let executed = Arc::clone(&self.executed);

        Box::pin(async move {
            executed.lock().unwrap().push(command.clone());

            if command == "ioerr" {
                return Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no such command").into());
            }
            match command.strip_prefix("exit:") {
                Some(code) => Ok(code.parse().unwrap()),
                None => Ok(0),
            }
        })
    }
}

fn defn(name: &str) -> MonitorDefinition {
    MonitorDefinition {
        key: MonitorKey {
            source: "test.yaml".into(),
            name: name.into(),
        },
        skipped: vec![],
        started: vec![],
        commands: vec![],
        completed: vec![],
        error: vec![],
        searches: vec![SearchDefinition {
            name: None,
            paths: vec!["src".into()],
            patterns: vec![],
        }],
    }
}

#[tokio::test]
async fn skip_file_runs_only_the_skipped_hooks() {
    let (runner, executed) = FakeRunner::new();
    let pipeline = CommandPipeline::new(&runner);

    let mut monitor = defn("build");
    monitor.skipped = vec!["say skipping _MONITOR_NAME_".into()];
    monitor.started = vec!["say starting".into()];
    monitor.commands = vec!["make".into()];
    monitor.completed = vec!["say done".into()];
    monitor.error = vec!["say failed".into()];

    let outcome = pipeline.execute(&monitor, true).await;

    assert_eq!(outcome, PipelineOutcome::Skipped);
    assert_eq!(
        *executed.lock().unwrap(),
        vec!["say skipping build".to_string()]
    );
}

#[tokio::test]
async fn commands_stop_at_first_failure_and_route_to_error() {
    let (runner, executed) = FakeRunner::new();
    let pipeline = CommandPipeline::new(&runner);

    let mut monitor = defn("build");
    monitor.commands = vec!["first".into(), "exit:1".into(), "third".into()];
    monitor.completed = vec!["completed-hook".into()];
    monitor.error = vec!["error-hook".into()];

    let outcome = pipeline.execute(&monitor, false).await;

    assert_eq!(outcome, PipelineOutcome::Failed(1));
    assert_eq!(
        *executed.lock().unwrap(),
        vec![
            "first".to_string(),
            "exit:1".to_string(),
            "error-hook".to_string(),
        ]
    );
}

#[tokio::test]
async fn started_runs_before_commands_and_completed_after() {
    let (runner, executed) = FakeRunner::new();
    let pipeline = CommandPipeline::new(&runner);

    let mut monitor = defn("build");
    monitor.started = vec!["started-hook".into()];
    monitor.commands = vec!["make".into()];
    monitor.completed = vec!["completed-hook".into()];

    let outcome = pipeline.execute(&monitor, false).await;

    assert_eq!(outcome, PipelineOutcome::Completed);
    assert_eq!(
        *executed.lock().unwrap(),
        vec![
            "started-hook".to_string(),
            "make".to_string(),
            "completed-hook".to_string(),
        ]
    );
}

#[tokio::test]
async fn placeholder_is_replaced_with_the_definition_name() {
    let (runner, executed) = FakeRunner::new();
    let pipeline = CommandPipeline::new(&runner);

    let mut monitor = defn("build");
    monitor.commands = vec!["echo _MONITOR_NAME_".into()];

    pipeline.execute(&monitor, false).await;

    assert_eq!(*executed.lock().unwrap(), vec!["echo build".to_string()]);
}

#[tokio::test]
async fn hook_failures_are_not_escalated() {
    let (runner, _executed) = FakeRunner::new();
    let pipeline = CommandPipeline::new(&runner);

    // A failing completed hook does not change a successful outcome.
    let mut monitor = defn("build");
    monitor.commands = vec!["make".into()];
    monitor.completed = vec!["exit:7".into()];
    assert_eq!(
        pipeline.execute(&monitor, false).await,
        PipelineOutcome::Completed
    );

    // A failing error hook keeps the original failure code.
    let mut monitor = defn("build");
    monitor.commands = vec!["exit:3".into()];
    monitor.error = vec!["exit:9".into()];
    assert_eq!(
        pipeline.execute(&monitor, false).await,
        PipelineOutcome::Failed(3)
    );
}

#[tokio::test]
async fn spawn_failure_counts_as_exit_code_minus_one() {
    let (runner, executed) = FakeRunner::new();
    let pipeline = CommandPipeline::new(&runner);

    let mut monitor = defn("build");
    monitor.commands = vec!["ioerr".into(), "never".into()];
    monitor.error = vec!["error-hook".into()];

    let outcome = pipeline.execute(&monitor, false).await;

    assert_eq!(outcome, PipelineOutcome::Failed(-1));
    assert_eq!(
        *executed.lock().unwrap(),
        vec!["ioerr".to_string(), "error-hook".to_string()]
    );
}

#[tokio::test]
async fn empty_commands_count_as_success() {
    let (runner, executed) = FakeRunner::new();
    let pipeline = CommandPipeline::new(&runner);

    let mut monitor = defn("build");
    monitor.completed = vec!["completed-hook".into()];

    let outcome = pipeline.execute(&monitor, false).await;

    assert_eq!(outcome, PipelineOutcome::Completed);
    assert_eq!(
        *executed.lock().unwrap(),
        vec!["completed-hook".to_string()]
    );
}

#[tokio::test]
async fn shell_runner_reports_real_exit_codes() {
    let runner = ShellRunner;
    let pipeline = CommandPipeline::new(&runner);

    let mut monitor = defn("build");
    monitor.commands = vec!["true".into(), "false".into(), "true".into()];

    let outcome = pipeline.execute(&monitor, false).await;
    assert_eq!(outcome, PipelineOutcome::Failed(1));
}
