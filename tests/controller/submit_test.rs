//! Tests for submission validation and event relay.

use acompilator_runner::compiler::CompileOptions;
use acompilator_runner::controller::{InvocationController, SubmitError, ValidationError};
use acompilator_runner::supervisor::{CompilerEvent, LifecycleEvent, OutputEvent};

/// Drive the active run to completion, returning every event.
async fn collect_run(controller: &mut InvocationController) -> Vec<CompilerEvent> {
    let mut events = Vec::new();
    while let Some(event) = controller.next_event().await {
        let finished = event.is_finished();
        events.push(event);
        if finished {
            break;
        }
    }
    events
}

/// A long-running fake compiler script in a temp dir.
#[cfg(unix)]
fn sleeping_compiler(dir: &tempfile::TempDir) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.path().join("fake-compiler.sh");
    std::fs::write(&path, "#!/bin/sh\nsleep 30\n").expect("write script");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("chmod script");
    path
}

#[test]
fn validation_order_compiler_path_wins() {
    let controller = InvocationController::new();
    let options = CompileOptions::new("/nonexistent/acomp", "/nonexistent/folder").board("UNO");

    match controller.preview(&options) {
        Err(ValidationError::InvalidCompilerPath(path)) => {
            assert_eq!(path, std::path::PathBuf::from("/nonexistent/acomp"));
        }
        other => panic!("Expected InvalidCompilerPath, got {other:?}"),
    }
}

#[tokio::test]
async fn nonexistent_working_folder_spawns_nothing() {
    let mut controller = InvocationController::new();
    let options = CompileOptions::new("/bin/echo", "/nonexistent/folder").board("UNO");

    match controller.submit(&options).await {
        Err(SubmitError::Validation(ValidationError::InvalidWorkingFolder(_))) => {}
        other => panic!("Expected InvalidWorkingFolder, got {other:?}"),
    }
    // No process started, so a submission is still admitted.
    assert!(controller.can_submit());
    assert!(controller.next_event().await.is_none());
}

#[test]
fn missing_board_is_rejected_outside_test_mode() {
    let controller = InvocationController::new();
    let options = CompileOptions::new("/bin/echo", "/tmp");

    assert!(matches!(
        controller.preview(&options),
        Err(ValidationError::NoBoardSelected)
    ));

    let test_mode = CompileOptions::new("/bin/echo", "/tmp").test_compiler(true);
    assert!(controller.preview(&test_mode).is_ok());
}

#[test]
fn preview_builds_without_starting() {
    let controller = InvocationController::new();
    let options = CompileOptions::new("/bin/echo", "/tmp").y_flag(true).board("UNO");

    let command = controller.preview(&options).expect("preview");
    assert_eq!(command.argv(), ["/bin/echo", "-y", "-p=/tmp", "--board=UNO"]);
    assert!(controller.can_submit());
}

#[tokio::test]
async fn submit_relays_output_and_lifecycle() {
    let mut controller = InvocationController::new();
    // /bin/echo stands in for the compiler and prints its arguments back.
    let options = CompileOptions::new("/bin/echo", "/tmp").board("UNO");

    controller.submit(&options).await.expect("submit");
    let events = collect_run(&mut controller).await;

    assert_eq!(
        events.first(),
        Some(&CompilerEvent::Lifecycle(LifecycleEvent::Started))
    );
    let text: String = events.iter().filter_map(CompilerEvent::text).collect();
    assert_eq!(text, "-p=/tmp --board=UNO\n");
    assert!(matches!(
        events.last(),
        Some(CompilerEvent::Lifecycle(LifecycleEvent::Finished {
            code: Some(0),
            ..
        }))
    ));
}

#[cfg(unix)]
#[tokio::test]
async fn submissions_are_disabled_while_a_run_is_active() {
    let dir = tempfile::tempdir().expect("tempdir");
    let compiler = sleeping_compiler(&dir);
    let options = CompileOptions::new(&compiler, "/tmp").test_compiler(true);

    let mut controller = InvocationController::new();
    assert!(controller.can_submit());

    controller.submit(&options).await.expect("first submit");
    assert!(!controller.can_submit());

    match controller.submit(&options).await {
        Err(SubmitError::Supervisor(_)) => {}
        other => panic!("Expected supervisor rejection, got {other:?}"),
    }

    assert!(controller.cancel());
    let events = collect_run(&mut controller).await;
    assert!(events.last().is_some_and(CompilerEvent::is_finished));
    assert!(controller.can_submit());
}

#[tokio::test]
async fn stderr_from_the_compiler_is_relayed_as_stderr() {
    let mut controller = InvocationController::new();
    // sh prints the project flag to stderr via a wrapper script line.
    let options = CompileOptions::new("/bin/sh", "/tmp").test_compiler(true);

    // /bin/sh -p=/tmp fails and complains on stderr.
    controller.submit(&options).await.expect("submit");
    let events = collect_run(&mut controller).await;

    let has_stderr = events
        .iter()
        .any(|e| matches!(e, CompilerEvent::Output(OutputEvent::Stderr { .. })));
    assert!(has_stderr, "expected a stderr event, got {events:?}");
    assert!(!matches!(
        events.last(),
        Some(CompilerEvent::Lifecycle(LifecycleEvent::Finished {
            code: Some(0),
            ..
        }))
    ));
}
