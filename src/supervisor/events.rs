//! Events emitted while a compiler run is in flight.
//!
//! Everything a caller observes about a run arrives as a `CompilerEvent`
//! on one channel: sanitized output text, decode problems, and lifecycle
//! edges. The serde shape is flat (`{"type": "stdout", ...}`) so the CLI
//! can emit one JSON object per event.

use serde::{Deserialize, Serialize};

/// Which output stream a piece of data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamSource {
    Stdout,
    Stderr,
}

impl std::fmt::Display for StreamSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdout => write!(f, "stdout"),
            Self::Stderr => write!(f, "stderr"),
        }
    }
}

/// Output from the running compiler, sanitized and UTF-8 valid.
///
/// Events for one stream arrive in the order the bytes did; interleaving
/// between the two streams is not guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputEvent {
    /// Text from the compiler's standard output.
    Stdout {
        /// Sanitized text chunk.
        text: String,
    },
    /// Text from the compiler's standard error.
    Stderr {
        /// Sanitized text chunk.
        text: String,
    },
    /// A run of bytes on a stream was not valid UTF-8 and was skipped.
    /// The process keeps running; surrounding text is still delivered.
    DecodeError {
        /// Stream the malformed bytes arrived on.
        source: StreamSource,
        /// Number of bytes skipped.
        invalid_bytes: usize,
    },
}

/// Lifecycle edges of one compiler run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// The process launched successfully.
    Started,
    /// The process exited; raw status passed through unmodified.
    Finished {
        /// Exit code, when the process exited normally.
        code: Option<i32>,
        /// Terminating signal number (Unix only).
        signal: Option<i32>,
    },
}

/// The single item type on the supervisor's event channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompilerEvent {
    /// Sanitized output from one of the streams.
    Output(OutputEvent),
    /// A lifecycle edge.
    Lifecycle(LifecycleEvent),
}

impl CompilerEvent {
    /// True when this event ends the run.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            Self::Lifecycle(LifecycleEvent::Finished { .. })
        )
    }

    /// The sanitized text carried by an output event, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Output(OutputEvent::Stdout { text } | OutputEvent::Stderr { text }) => {
                Some(text)
            }
            _ => None,
        }
    }
}

impl From<OutputEvent> for CompilerEvent {
    fn from(event: OutputEvent) -> Self {
        Self::Output(event)
    }
}

impl From<LifecycleEvent> for CompilerEvent {
    fn from(event: LifecycleEvent) -> Self {
        Self::Lifecycle(event)
    }
}
