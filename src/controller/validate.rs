//! Precondition checks run before anything is spawned.

use std::path::PathBuf;

use crate::compiler::CompileOptions;

/// Rejection of a submission before any process side effect.
#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    /// The compiler path is empty or does not exist.
    #[error("Compiler path does not exist: {0}")]
    InvalidCompilerPath(PathBuf),
    /// The working folder is empty or does not exist.
    #[error("Working folder does not exist: {0}")]
    InvalidWorkingFolder(PathBuf),
    /// No target board selected outside of test-compiler mode.
    #[error("No board selected")]
    NoBoardSelected,
}

/// Check submission preconditions in fixed order, short-circuiting on
/// the first failure: compiler path, then working folder, then board
/// selection (skipped in test-compiler mode).
pub fn validate(options: &CompileOptions) -> Result<(), ValidationError> {
    let compiler = options.compiler_path();
    if compiler.as_os_str().is_empty() || !compiler.exists() {
        return Err(ValidationError::InvalidCompilerPath(compiler.to_path_buf()));
    }

    let folder = options.working_folder();
    if folder.as_os_str().is_empty() || !folder.exists() {
        return Err(ValidationError::InvalidWorkingFolder(folder.to_path_buf()));
    }

    if !options.is_test_compiler() && options.selected_boards().is_empty() {
        return Err(ValidationError::NoBoardSelected);
    }

    Ok(())
}
