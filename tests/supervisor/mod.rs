//! Supervisor module tests.


/// Verify all public supervisor types are exported from the library.
#[test]
fn test_all_supervisor_types_exported() {
    use acompilator_runner::supervisor::{
        CompilerEvent, CompilerSupervisor, LifecycleEvent, OutputEvent, StateMachine,
        StreamSource, SupervisorError, SupervisorState, DEFAULT_CHANNEL_BUFFER,
    };

    let supervisor = CompilerSupervisor::new();
    assert_eq!(supervisor.state(), SupervisorState::Idle);

    let _ = StateMachine::new();
    let _ = CompilerEvent::Lifecycle(LifecycleEvent::Started);
    let _ = OutputEvent::Stdout {
        text: String::new(),
    };
    let _ = StreamSource::Stderr;
    let _: fn() -> SupervisorError = || SupervisorError::NoStdout;
    assert!(DEFAULT_CHANNEL_BUFFER > 0);
}
