//! Acompilator runner - streams compiler output with ANSI colors stripped.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use acompilator_runner::compiler::CompileOptions;
use acompilator_runner::config::{ConfigLoader, RunnerConfig};
use acompilator_runner::controller::InvocationController;
use acompilator_runner::display;
use acompilator_runner::supervisor::{
    CompilerEvent, CompilerSupervisor, LifecycleEvent, OutputEvent, StreamSource,
};

/// Exit code reported when the run was cancelled (shell convention for
/// death by SIGINT).
const EXIT_CANCELLED: u8 = 130;

#[derive(Parser)]
#[command(
    name = "acompilator-runner",
    about = "Runs the Acompilator compiler and streams its output",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a project and stream the compiler's output.
    Compile(CompileArgs),
}

#[derive(Args)]
struct CompileArgs {
    /// Compiler executable (defaults to the configured path).
    #[arg(long)]
    compiler: Option<PathBuf>,
    /// Project folder passed to the compiler as -p=<DIR>.
    #[arg(long)]
    project: PathBuf,
    /// Answer yes to compiler prompts (-y).
    #[arg(short = 'y')]
    yes: bool,
    /// Answer no to compiler prompts (-n).
    #[arg(short = 'n')]
    no: bool,
    /// Keep intermediate build files (-nocleanup).
    #[arg(long)]
    nocleanup: bool,
    /// Run the compiler self-test; boards are ignored.
    #[arg(long)]
    test_compiler: bool,
    /// Target board, repeatable; order is preserved.
    #[arg(long)]
    board: Vec<String>,
    /// Print the command line and exit without running.
    #[arg(long)]
    dry_run: bool,
    /// Emit one JSON object per event instead of formatted output.
    #[arg(long)]
    json: bool,
    /// Use a specific config file instead of the search paths.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn load_config(path: Option<PathBuf>) -> Result<RunnerConfig, ExitCode> {
    let loader = path.map_or_else(ConfigLoader::new, ConfigLoader::with_path);
    loader.load().map_err(|err| {
        display::print_error(&err.to_string());
        ExitCode::FAILURE
    })
}

async fn run_compile(args: CompileArgs) -> ExitCode {
    let config = match load_config(args.config) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let Some(compiler) = args.compiler.or(config.compiler_path.clone()) else {
        display::print_error("No compiler given: pass --compiler or set compiler_path in config");
        return ExitCode::FAILURE;
    };

    let options = CompileOptions::new(compiler, args.project)
        .y_flag(args.yes)
        .n_flag(args.no)
        .no_cleanup(args.nocleanup)
        .test_compiler(args.test_compiler)
        .boards(args.board);

    let supervisor =
        CompilerSupervisor::with_settings(config.channel_capacity, config.terminate_timeout());
    let mut controller = InvocationController::with_supervisor(supervisor);

    let command = match controller.preview(&options) {
        Ok(command) => command,
        Err(err) => {
            display::print_error(&err.to_string());
            return ExitCode::FAILURE;
        }
    };

    if args.dry_run {
        println!("{command}");
        return ExitCode::SUCCESS;
    }
    if !args.json {
        display::print_command(&command.to_string());
    }

    if let Err(err) = controller.submit(&options).await {
        display::print_error(&err.to_string());
        return ExitCode::FAILURE;
    }

    relay_events(&mut controller, args.json).await
}

/// Forward events to the terminal until the run finishes.
///
/// The first Ctrl-C cancels the run; a second one is left to the shell.
async fn relay_events(controller: &mut InvocationController, json: bool) -> ExitCode {
    let mut cancel_requested = false;

    loop {
        let event = if cancel_requested {
            controller.next_event().await
        } else {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    controller.cancel();
                    cancel_requested = true;
                    continue;
                }
                event = controller.next_event() => event,
            }
        };

        let Some(event) = event else {
            display::print_error("Event channel closed before the run finished");
            return ExitCode::FAILURE;
        };

        if json {
            match serde_json::to_string(&event) {
                Ok(line) => display::print_raw_event(&line),
                Err(err) => tracing::warn!(error = %err, "Event serialization failed"),
            }
        } else {
            render_event(&event);
        }

        if let CompilerEvent::Lifecycle(LifecycleEvent::Finished { code, signal }) = event {
            return exit_code_for(code, signal, cancel_requested);
        }
    }
}

fn render_event(event: &CompilerEvent) {
    match event {
        CompilerEvent::Lifecycle(LifecycleEvent::Started) => display::print_started(),
        CompilerEvent::Lifecycle(LifecycleEvent::Finished { code, signal }) => {
            display::print_finished(*code, *signal);
        }
        CompilerEvent::Output(OutputEvent::Stdout { text }) => display::print_stdout_chunk(text),
        CompilerEvent::Output(OutputEvent::Stderr { text }) => display::print_stderr_chunk(text),
        CompilerEvent::Output(OutputEvent::DecodeError {
            source,
            invalid_bytes,
        }) => {
            let source = match source {
                StreamSource::Stdout => "stdout",
                StreamSource::Stderr => "stderr",
            };
            display::print_decode_error(source, *invalid_bytes);
        }
    }
}

fn exit_code_for(code: Option<i32>, signal: Option<i32>, cancelled: bool) -> ExitCode {
    match code {
        Some(code) => u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from),
        None if cancelled || signal.is_some() => ExitCode::from(EXIT_CANCELLED),
        None => ExitCode::FAILURE,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Compile(args) => run_compile(args).await,
    }
}
