use std::fs;
use std::sync::Mutex;

use jobline::config::Settings;
use jobline::console::CaptureConsole;
use jobline::context::ExecutionMode;
use jobline::error::{QueueError, ReportError};
use jobline::queue::{InMemoryQueue, QueueService, Severity};
use jobline::report::Reporter;
use tempfile::TempDir;

// Serializes tests that touch JOBLINE_* environment variables.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn with_env(vars: &[(&str, Option<&str>)], f: impl FnOnce()) {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let saved: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
        .collect();
    for (key, value) in vars {
        match value {
            Some(v) => std::env::set_var(key, v),
            None => std::env::remove_var(key),
        }
    }
    f();
    for (key, value) in saved {
        match value {
            Some(v) => std::env::set_var(&key, v),
            None => std::env::remove_var(&key),
        }
    }
}

fn managed_settings(context_id: &str) -> Settings {
    Settings {
        context_id: Some(context_id.to_string()),
        ..Settings::default()
    }
}

#[test]
fn interactive_run_prints_progress_and_outcome() {
    let console = CaptureConsole::new();
    let mut reporter = Reporter::initialize(
        &Settings::default(),
        InMemoryQueue::new(),
        console.clone(),
    )
    .unwrap();
    assert_eq!(reporter.context().mode(), ExecutionMode::Interactive);

    reporter.progress_counted(7, 3, "rows", 0).unwrap();
    reporter.progress(None, Some("50.00"), 0).unwrap();
    let outcome = reporter.succeed("done").unwrap();

    assert!(outcome.is_success());
    assert_eq!(console.lines(), vec!["[3/7] rows", "done"]);
}

#[test]
fn managed_run_forwards_everything_to_the_queue() {
    let queue = InMemoryQueue::new();
    queue.register_context("ctx-1");
    let console = CaptureConsole::new();

    let mut reporter = Reporter::initialize(
        &managed_settings("ctx-1"),
        queue.clone(),
        console.clone(),
    )
    .unwrap();
    assert!(reporter.context().is_managed());
    assert_eq!(
        reporter.context().job_handle().unwrap().context_id(),
        "ctx-1"
    );

    reporter.progress_counted(200, 50, "rows", 0).unwrap();
    reporter.progress_counted(200, 51, "rows", 1).unwrap();
    reporter.succeed("done").unwrap();

    assert!(console.lines().is_empty());
    let calls = queue.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].severity, Severity::Info);
    assert_eq!(calls[0].message.as_deref(), Some("[050/200] rows"));
    assert_eq!(calls[0].percentage.as_deref(), Some("25.00"));
    assert_eq!(calls[0].backline, 0);
    assert_eq!(calls[1].message.as_deref(), Some("[051/200] rows"));
    assert_eq!(calls[1].backline, 1);
    assert_eq!(calls[2].severity, Severity::Success);
    assert_eq!(calls[2].message.as_deref(), Some("done"));
}

#[test]
fn managed_failure_records_error_severity() {
    let queue = InMemoryQueue::new();
    queue.register_context("ctx-1");

    let reporter = Reporter::initialize(
        &managed_settings("ctx-1"),
        queue.clone(),
        CaptureConsole::new(),
    )
    .unwrap();
    let outcome = reporter.fail("import aborted").unwrap();

    assert!(!outcome.is_success());
    let calls = queue.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].severity, Severity::Error);
    assert_eq!(calls[0].message.as_deref(), Some("import aborted"));
}

#[test]
fn initialize_rebinds_at_most_once_for_the_same_context() {
    let queue = InMemoryQueue::new();
    queue.register_context("ctx-1");
    let settings = managed_settings("ctx-1");

    let first = Reporter::initialize(&settings, queue.clone(), CaptureConsole::new()).unwrap();
    assert!(first.context().is_managed());
    assert_eq!(queue.bind_calls(), 1);

    // The service is already bound to ctx-1, so no second bind happens.
    let second = Reporter::initialize(&settings, queue.clone(), CaptureConsole::new()).unwrap();
    assert!(second.context().is_managed());
    assert_eq!(queue.bind_calls(), 1);
}

#[test]
fn initialize_rebinds_when_the_current_binding_differs() {
    let queue = InMemoryQueue::new();
    queue.register_context("ctx-a");
    queue.register_context("ctx-b");

    Reporter::initialize(&managed_settings("ctx-a"), queue.clone(), CaptureConsole::new())
        .unwrap();
    Reporter::initialize(&managed_settings("ctx-b"), queue.clone(), CaptureConsole::new())
        .unwrap();

    assert_eq!(queue.bind_calls(), 2);
    assert_eq!(queue.current_context_id().as_deref(), Some("ctx-b"));
}

#[test]
fn unknown_context_surfaces_as_a_configuration_failure() {
    let result = Reporter::initialize(
        &managed_settings("nowhere"),
        InMemoryQueue::new(),
        CaptureConsole::new(),
    );
    match result {
        Err(ReportError::Queue(QueueError::ContextNotFound(id))) => assert_eq!(id, "nowhere"),
        Err(other) => panic!("expected ContextNotFound, got {other:?}"),
        Ok(_) => panic!("expected ContextNotFound, got a reporter"),
    }
}

#[test]
fn settings_load_from_file() {
    with_env(&[("JOBLINE_CONTEXT_ID", None)], || {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jobline.toml");
        fs::write(
            &path,
            "context_id = \"ctx-file\"\n\n[logging]\nlevel = \"debug\"\nformat = \"json\"\n",
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.context_id(), Some("ctx-file"));
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.format, "json");
    });
}

#[test]
fn settings_load_from_environment() {
    with_env(
        &[
            ("JOBLINE_CONTEXT_ID", Some("ctx-env")),
            ("JOBLINE_LOGGING__LEVEL", Some("warn")),
        ],
        || {
            let settings = Settings::load(None).unwrap();
            assert_eq!(settings.context_id(), Some("ctx-env"));
            assert_eq!(settings.logging.level, "warn");
        },
    );
}

#[test]
fn environment_overrides_the_file() {
    with_env(&[("JOBLINE_CONTEXT_ID", Some("ctx-env"))], || {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jobline.toml");
        fs::write(&path, "context_id = \"ctx-file\"\n").unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.context_id(), Some("ctx-env"));
    });
}
