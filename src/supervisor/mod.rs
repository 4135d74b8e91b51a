//! Process supervision: single-flight compiler runs with streamed,
//! sanitized output.

mod events;
mod pump;
mod runner;
mod state;

pub use events::{CompilerEvent, LifecycleEvent, OutputEvent, StreamSource};
pub use pump::pump_stream;
pub use runner::{
    CompilerSupervisor, SupervisorError, DEFAULT_CHANNEL_BUFFER, DEFAULT_TERMINATE_TIMEOUT,
};
pub use state::{StateMachine, SupervisorState};
