//! Options for a single compiler invocation.

use std::path::{Path, PathBuf};

/// Options for one compiler run.
///
/// Built fresh per invocation and immutable once handed to the
/// controller. The setters chain in the usual builder style; validation
/// (paths exist, boards selected) is the controller's job, not this
/// type's.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    compiler_path: PathBuf,
    working_folder: PathBuf,
    y_flag: bool,
    n_flag: bool,
    no_cleanup: bool,
    test_compiler: bool,
    boards: Vec<String>,
}

impl CompileOptions {
    /// Create options for the given compiler executable and project folder.
    #[must_use]
    pub fn new(compiler_path: impl Into<PathBuf>, working_folder: impl Into<PathBuf>) -> Self {
        Self {
            compiler_path: compiler_path.into(),
            working_folder: working_folder.into(),
            ..Default::default()
        }
    }

    /// Pass `-y` (assume yes) to the compiler.
    #[must_use]
    pub fn y_flag(mut self, enabled: bool) -> Self {
        self.y_flag = enabled;
        self
    }

    /// Pass `-n` (assume no) to the compiler.
    #[must_use]
    pub fn n_flag(mut self, enabled: bool) -> Self {
        self.n_flag = enabled;
        self
    }

    /// Pass `-nocleanup` to keep intermediate build files.
    #[must_use]
    pub fn no_cleanup(mut self, enabled: bool) -> Self {
        self.no_cleanup = enabled;
        self
    }

    /// Run the compiler's self-test mode; board arguments are omitted.
    #[must_use]
    pub fn test_compiler(mut self, enabled: bool) -> Self {
        self.test_compiler = enabled;
        self
    }

    /// Append one target board, keeping selection order.
    #[must_use]
    pub fn board(mut self, board: impl Into<String>) -> Self {
        self.boards.push(board.into());
        self
    }

    /// Replace the board selection wholesale.
    #[must_use]
    pub fn boards(mut self, boards: Vec<String>) -> Self {
        self.boards = boards;
        self
    }

    #[must_use]
    pub fn compiler_path(&self) -> &Path {
        &self.compiler_path
    }

    #[must_use]
    pub fn working_folder(&self) -> &Path {
        &self.working_folder
    }

    #[must_use]
    pub fn has_y_flag(&self) -> bool {
        self.y_flag
    }

    #[must_use]
    pub fn has_n_flag(&self) -> bool {
        self.n_flag
    }

    #[must_use]
    pub fn keeps_build_files(&self) -> bool {
        self.no_cleanup
    }

    #[must_use]
    pub fn is_test_compiler(&self) -> bool {
        self.test_compiler
    }

    #[must_use]
    pub fn selected_boards(&self) -> &[String] {
        &self.boards
    }
}
