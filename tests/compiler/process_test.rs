//! Tests for compiler process spawning and control.

use std::time::Duration;

use acompilator_runner::compiler::{CompileCommand, CompilerProcess, SpawnError};

#[tokio::test]
async fn spawn_echo_and_wait() {
    let command = CompileCommand::from_parts("echo", ["hello"]);
    let mut process = CompilerProcess::spawn(&command).expect("echo should spawn");

    assert!(process.id().is_some());
    let status = process.wait().await.expect("wait should succeed");
    assert!(status.success());
}

#[test]
fn spawn_nonexistent_binary_is_not_found() {
    let command =
        CompileCommand::from_parts("/nonexistent/acompilator-test-binary", Vec::<String>::new());
    match CompilerProcess::spawn(&command) {
        Err(SpawnError::NotFound) => {}
        other => panic!("Expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn output_handles_can_only_be_taken_once() {
    let command = CompileCommand::from_parts("echo", ["hi"]);
    let mut process = CompilerProcess::spawn(&command).expect("spawn");

    assert!(process.take_stdout().is_some());
    assert!(process.take_stdout().is_none());
    assert!(process.take_stderr().is_some());
    assert!(process.take_stderr().is_none());

    let _ = process.wait().await;
}

#[tokio::test]
async fn graceful_terminate_stops_a_sleeping_process() {
    let command = CompileCommand::from_parts("sleep", ["30"]);
    let mut process = CompilerProcess::spawn(&command).expect("sleep should spawn");

    process
        .graceful_terminate(Duration::from_secs(2))
        .await
        .expect("termination should succeed");

    let status = process.wait().await.expect("wait after terminate");
    assert!(!status.success());
}

#[tokio::test]
async fn try_wait_reports_exit_eventually() {
    let command = CompileCommand::from_parts("true", Vec::<String>::new());
    let mut process = CompilerProcess::spawn(&command).expect("spawn");

    let status = process.wait().await.expect("wait");
    assert!(status.success());
    // Once reaped, try_wait keeps returning the cached status.
    assert!(process.try_wait().expect("try_wait").is_some());
}
