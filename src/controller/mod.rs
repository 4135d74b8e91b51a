//! Invocation controller: the layer callers submit compile requests to.
//!
//! Validates preconditions, builds the argument vector, hands it to the
//! supervisor, and relays every event unmodified. Submissions are
//! disabled between `Started` and the observation of `Finished`.

mod validate;

pub use validate::{validate, ValidationError};

use crate::compiler::{CompileCommand, CompileOptions};
use crate::supervisor::{CompilerEvent, CompilerSupervisor, SupervisorError};

/// Rejection of a `submit` call; no process was started.
#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    /// A precondition failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The supervisor refused or failed to start the process.
    #[error(transparent)]
    Supervisor(#[from] SupervisorError),
}

/// Orchestration layer over the supervisor.
pub struct InvocationController {
    supervisor: CompilerSupervisor,
}

impl InvocationController {
    /// Create a controller with a default supervisor.
    #[must_use]
    pub fn new() -> Self {
        Self::with_supervisor(CompilerSupervisor::new())
    }

    /// Create a controller over a pre-configured supervisor.
    #[must_use]
    pub fn with_supervisor(supervisor: CompilerSupervisor) -> Self {
        Self { supervisor }
    }

    /// Validate and build the command without starting anything.
    ///
    /// # Errors
    ///
    /// Returns the first failing precondition.
    pub fn preview(&self, options: &CompileOptions) -> Result<CompileCommand, ValidationError> {
        validate(options)?;
        Ok(CompileCommand::from_options(options))
    }

    /// Validate, build, and start a compiler run.
    ///
    /// # Errors
    ///
    /// `Validation` when a precondition fails (checked in fixed order,
    /// before any spawn); `Supervisor` when a run is already active or
    /// the executable cannot be launched.
    pub async fn submit(&mut self, options: &CompileOptions) -> Result<(), SubmitError> {
        let command = self.preview(options)?;
        tracing::info!(command = %command, "Submitting compile");
        self.supervisor.start(&command).await?;
        Ok(())
    }

    /// True while a new submission would be admitted.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.supervisor.is_idle()
    }

    /// Relay the next event of the active run.
    pub async fn next_event(&mut self) -> Option<CompilerEvent> {
        self.supervisor.next_event().await
    }

    /// Events of the active run as an async stream.
    pub fn event_stream(&mut self) -> impl futures_core::Stream<Item = CompilerEvent> + '_ {
        self.supervisor.event_stream()
    }

    /// Request best-effort cancellation of the active run.
    pub fn cancel(&mut self) -> bool {
        self.supervisor.cancel()
    }
}

impl Default for InvocationController {
    fn default() -> Self {
        Self::new()
    }
}
