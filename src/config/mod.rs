//! Optional TOML configuration.
//!
//! Configuration is read-only: the tool never writes it back. Absent
//! files fall back to defaults.

mod loader;

pub use loader::{ConfigError, ConfigLoader, RunnerConfig};
