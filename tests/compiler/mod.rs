//! Compiler module tests.

mod command_test;
mod process_test;

/// Verify all public compiler types are exported from the library.
#[test]
fn test_all_compiler_types_exported() {
    use acompilator_runner::compiler::{
        CompileCommand, CompileOptions, CompilerProcess, SpawnError,
    };

    let options = CompileOptions::new("/bin/true", "/tmp");
    let _ = CompileCommand::from_options(&options);

    // Verify error and process types exist
    let _: fn() -> SpawnError = || SpawnError::NotFound;
    let _: fn(&CompileCommand) -> Result<CompilerProcess, SpawnError> = CompilerProcess::spawn;
}
