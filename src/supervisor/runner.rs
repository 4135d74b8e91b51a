//! Supervisor for one compiler process at a time.
//!
//! Owns the event channel and the single-flight discipline: spawn the
//! process, pump both output streams on their own tasks, watch for exit
//! (or cancellation), and deliver everything as `CompilerEvent`s.

use std::process::ExitStatus;
use std::time::Duration;

use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::compiler::{CompileCommand, CompilerProcess, SpawnError};
use crate::supervisor::{
    pump_stream, CompilerEvent, LifecycleEvent, StateMachine, StreamSource, SupervisorState,
};

/// Default capacity of the event channel.
pub const DEFAULT_CHANNEL_BUFFER: usize = 64;

/// Default timeout for graceful process termination.
pub const DEFAULT_TERMINATE_TIMEOUT: Duration = Duration::from_secs(5);

/// Error type for supervisor operations.
#[derive(thiserror::Error, Debug)]
pub enum SupervisorError {
    /// A run is already in flight; one process at a time.
    #[error("Cannot start: supervisor is {state}, not idle")]
    InvalidState {
        /// State the supervisor was in when `start` was called.
        state: SupervisorState,
    },
    /// The executable could not be launched.
    #[error("Failed to launch compiler: {0}")]
    Spawn(#[from] SpawnError),
    /// Process stdout was not available.
    #[error("Process stdout not available")]
    NoStdout,
    /// Process stderr was not available.
    #[error("Process stderr not available")]
    NoStderr,
}

/// Supervisor owning at most one compiler process.
///
/// Events are consumed with [`next_event`](Self::next_event) or the
/// [`event_stream`](Self::event_stream) adapter. After the `Finished`
/// event has been observed the supervisor is idle again and a new run
/// may be started.
pub struct CompilerSupervisor {
    state: StateMachine,
    event_tx: Sender<CompilerEvent>,
    event_rx: Receiver<CompilerEvent>,
    cancel: Option<CancellationToken>,
    terminate_timeout: Duration,
}

impl CompilerSupervisor {
    /// Create a supervisor with the default channel capacity and
    /// termination timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(DEFAULT_CHANNEL_BUFFER, DEFAULT_TERMINATE_TIMEOUT)
    }

    /// Create a supervisor with an explicit channel capacity and
    /// graceful-termination timeout.
    #[must_use]
    pub fn with_settings(channel_capacity: usize, terminate_timeout: Duration) -> Self {
        let (event_tx, event_rx) = mpsc::channel(channel_capacity.max(1));
        Self {
            state: StateMachine::new(),
            event_tx,
            event_rx,
            cancel: None,
            terminate_timeout,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SupervisorState {
        self.state.state()
    }

    /// True when a new run may be started.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state().is_idle()
    }

    /// Start the compiler described by `command`.
    ///
    /// The working directory and environment are inherited from the host
    /// process. On success a `Started` event is already queued and the
    /// supervisor is `Running`.
    ///
    /// # Errors
    ///
    /// `InvalidState` when a run is already in flight; `Spawn` when the
    /// executable cannot be launched (the supervisor returns to idle and
    /// the existing state is unchanged).
    pub async fn start(&mut self, command: &CompileCommand) -> Result<(), SupervisorError> {
        if !self.is_idle() {
            return Err(SupervisorError::InvalidState {
                state: self.state(),
            });
        }
        self.state.transition(SupervisorState::Starting);

        let mut process = match CompilerProcess::spawn(command) {
            Ok(process) => process,
            Err(err) => {
                self.state.transition(SupervisorState::Idle);
                return Err(err.into());
            }
        };
        let (stdout, stderr) = match (process.take_stdout(), process.take_stderr()) {
            (Some(stdout), Some(stderr)) => (stdout, stderr),
            (stdout, _) => {
                // Unreachable with piped stdio, but fail clean if it happens.
                let _ = process.kill().await;
                self.state.transition(SupervisorState::Idle);
                return Err(if stdout.is_none() {
                    SupervisorError::NoStdout
                } else {
                    SupervisorError::NoStderr
                });
            }
        };

        tracing::info!(program = command.program(), pid = ?process.id(), "Compiler started");

        // Started is queued before the pumps exist, so it precedes any
        // output event.
        let _ = self
            .event_tx
            .send(LifecycleEvent::Started.into())
            .await;

        let stdout_pump = tokio::spawn(pump_stream(
            stdout,
            StreamSource::Stdout,
            self.event_tx.clone(),
        ));
        let stderr_pump = tokio::spawn(pump_stream(
            stderr,
            StreamSource::Stderr,
            self.event_tx.clone(),
        ));

        let cancel = CancellationToken::new();
        tokio::spawn(watch_exit(
            process,
            cancel.clone(),
            stdout_pump,
            stderr_pump,
            self.event_tx.clone(),
            self.terminate_timeout,
        ));

        self.cancel = Some(cancel);
        self.state.transition(SupervisorState::Running);
        Ok(())
    }

    /// Receive the next event of the current run.
    ///
    /// Observing `Finished` completes the run: the supervisor transitions
    /// through `Finished` back to `Idle` and will admit a new `start`.
    pub async fn next_event(&mut self) -> Option<CompilerEvent> {
        if self.is_idle() {
            return None;
        }
        let event = self.event_rx.recv().await;
        if event.as_ref().is_some_and(CompilerEvent::is_finished) {
            self.state.transition(SupervisorState::Finished);
            self.state.transition(SupervisorState::Idle);
            self.cancel = None;
        }
        event
    }

    /// Events of the current run as an async stream, ending after
    /// `Finished`.
    pub fn event_stream(&mut self) -> impl futures_core::Stream<Item = CompilerEvent> + '_ {
        futures_util::stream::unfold(self, |supervisor| async {
            let event = supervisor.next_event().await?;
            Some((event, supervisor))
        })
    }

    /// Request best-effort termination of the running process.
    ///
    /// The run still ends with a normal `Finished` event carrying the
    /// abnormal exit status. Returns `false` when nothing is running.
    pub fn cancel(&mut self) -> bool {
        match &self.cancel {
            Some(token) if self.state().is_active() => {
                tracing::info!("Cancellation requested");
                token.cancel();
                true
            }
            _ => false,
        }
    }
}

impl Default for CompilerSupervisor {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for process exit (or cancellation), drain both pumps, then emit
/// `Finished` with the raw status.
async fn watch_exit(
    mut process: CompilerProcess,
    cancel: CancellationToken,
    stdout_pump: JoinHandle<()>,
    stderr_pump: JoinHandle<()>,
    tx: Sender<CompilerEvent>,
    terminate_timeout: Duration,
) {
    let status = tokio::select! {
        biased;

        () = cancel.cancelled() => {
            tracing::info!("Terminating compiler after cancellation");
            if let Err(err) = process.graceful_terminate(terminate_timeout).await {
                tracing::warn!(error = %err, "Graceful termination failed");
            }
            process.wait().await
        }
        status = process.wait() => status,
    };

    // Pumps run until EOF on their pipes, so joining them here delivers
    // every remaining byte (final partial lines included) before Finished.
    let _ = stdout_pump.await;
    let _ = stderr_pump.await;

    let (code, signal) = match status {
        Ok(status) => (status.code(), status_signal(&status)),
        Err(err) => {
            tracing::warn!(error = %err, "Waiting for compiler exit failed");
            (None, None)
        }
    };

    tracing::info!(?code, ?signal, "Compiler finished");
    let _ = tx
        .send(LifecycleEvent::Finished { code, signal }.into())
        .await;
}

#[cfg(unix)]
fn status_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn status_signal(_status: &ExitStatus) -> Option<i32> {
    None
}
