//! Compiler invocation: options, argument construction, and process control.

mod command;
mod options;
mod process;

pub use command::CompileCommand;
pub use options::CompileOptions;
pub use process::{CompilerProcess, SpawnError};
