//! Colored CLI display for compiler runs.
//!
//! Lifecycle edges and errors get timestamped `[TAG]` lines; the
//! compiler's own output is passed through verbatim (already sanitized),
//! with stderr tinted so the two streams are distinguishable.

use std::io::{self, Write};

use chrono::Utc;
use owo_colors::OwoColorize;

/// Get current timestamp in the same format as tracing.
fn timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Print the command line about to run.
pub fn print_command(command_line: &str) {
    println!(
        "{} {} {}",
        timestamp().dimmed(),
        "[RUN]".blue().bold(),
        command_line.cyan()
    );
    let _ = io::stdout().flush();
}

/// Print the run-started marker.
pub fn print_started() {
    println!(
        "{} {} compiler started",
        timestamp().dimmed(),
        "[START]".green().bold()
    );
    let _ = io::stdout().flush();
}

/// Print a sanitized stdout chunk exactly as received.
pub fn print_stdout_chunk(text: &str) {
    print!("{text}");
    let _ = io::stdout().flush();
}

/// Print a sanitized stderr chunk, tinted.
pub fn print_stderr_chunk(text: &str) {
    eprint!("{}", text.yellow());
    let _ = io::stderr().flush();
}

/// Print a decode problem without interrupting the run.
pub fn print_decode_error(source: &str, invalid_bytes: usize) {
    println!(
        "{} {} skipped {invalid_bytes} malformed byte(s) on {source}",
        timestamp().dimmed(),
        "[DECODE]".yellow().bold()
    );
    let _ = io::stdout().flush();
}

/// Print the run-finished marker with the raw exit status.
pub fn print_finished(code: Option<i32>, signal: Option<i32>) {
    let ts = timestamp();
    match (code, signal) {
        (Some(0), _) => println!(
            "{} {} exit code 0",
            ts.dimmed(),
            "[DONE]".green().bold()
        ),
        (Some(code), _) => println!(
            "{} {} exit code {code}",
            ts.dimmed(),
            "[DONE]".red().bold()
        ),
        (None, Some(signal)) => println!(
            "{} {} killed by signal {signal}",
            ts.dimmed(),
            "[DONE]".red().bold()
        ),
        (None, None) => println!(
            "{} {} exit status unknown",
            ts.dimmed(),
            "[DONE]".red().bold()
        ),
    }
    let _ = io::stdout().flush();
}

/// Print an error message.
pub fn print_error(message: &str) {
    println!("{} {}", "[ERROR]".red().bold(), message);
    let _ = io::stdout().flush();
}

/// Print one event as a raw JSON line (for `--json` mode).
pub fn print_raw_event(event_json: &str) {
    println!("{event_json}");
    let _ = io::stdout().flush();
}
