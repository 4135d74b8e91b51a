//! Argument vector construction for the compiler.

use std::borrow::Cow;
use std::fmt;

use crate::compiler::CompileOptions;

/// An immutable argument vector; the first element is the executable.
///
/// The flag order is a compatibility contract with the compiler tool:
/// `<compiler> [-y] [-n] [-nocleanup] -p=<folder> [--board=<b> ...]`.
/// Downstream tooling matches on positions, so the order never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileCommand {
    argv: Vec<String>,
}

impl CompileCommand {
    /// Build the argument vector from options, in the fixed order.
    #[must_use]
    pub fn from_options(options: &CompileOptions) -> Self {
        let mut argv = vec![options.compiler_path().display().to_string()];

        if options.has_y_flag() {
            argv.push("-y".to_string());
        }
        if options.has_n_flag() {
            argv.push("-n".to_string());
        }
        if options.keeps_build_files() {
            argv.push("-nocleanup".to_string());
        }

        argv.push(format!("-p={}", options.working_folder().display()));

        // Self-test mode exercises the compiler without a target.
        if !options.is_test_compiler() {
            for board in options.selected_boards() {
                argv.push(format!("--board={board}"));
            }
        }

        Self { argv }
    }

    /// Build an arbitrary command from a program and its arguments.
    #[must_use]
    pub fn from_parts(
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let mut argv = vec![program.into()];
        argv.extend(args.into_iter().map(Into::into));
        Self { argv }
    }

    /// The executable path, `argv[0]`.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    /// The arguments after the executable, `argv[1..]`.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    /// The full argument vector.
    #[must_use]
    pub fn argv(&self) -> &[String] {
        &self.argv
    }
}

/// Shell-quoted rendering of the full command line, for previews.
impl fmt::Display for CompileCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.argv.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", shell_escape::escape(Cow::from(arg.as_str())))?;
        }
        Ok(())
    }
}
