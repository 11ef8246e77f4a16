//! Command-line interface for the runner generator
//!
//! ## Usage
//!
//! ```text
//! huntgen [OPTIONS] <INPUT> [OUTPUT]
//! ```
//!
//! `INPUT` is the C test file; `OUTPUT` defaults to `<input>_Runner.c`.
//! A YAML file given with `--config` is applied first (its `hunt:` or
//! legacy `cmock:` section), then individual flags override single fields.
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros. Command
//! functions return `CliResult<T>` instead of calling `process::exit`; only
//! the top-level `run()` handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Generate Hunt test runners from C test files
#[derive(Parser, Debug)]
#[command(name = "huntgen")]
#[command(version = VERSION)]
#[command(about = "Generate Hunt test runners from C test files", long_about = None)]
pub struct Cli {
    /// C test file to generate a runner for
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Generated runner path (default: <INPUT>_Runner.c)
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// YAML configuration file with a hunt: (or cmock:) section
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Extra header to #include in the runner (repeatable)
    #[arg(long = "include", value_name = "HEADER")]
    pub includes: Vec<String>,

    /// Extra macro to define under an #ifndef guard (repeatable)
    #[arg(long = "define", value_name = "MACRO")]
    pub defines: Vec<String>,

    /// Enable CException support in the dispatch macro
    #[arg(long)]
    pub cexception: bool,

    /// Wrap extern declarations in extern "C" for C++ linkage
    #[arg(long)]
    pub externc: bool,

    /// Generate a main that parses runner command-line options
    #[arg(long)]
    pub cmdline_args: bool,

    /// Emit one invocation per TEST_CASE annotation
    #[arg(long)]
    pub use_param_tests: bool,

    /// Emit global bookkeeping for strict mock call ordering
    #[arg(long)]
    pub enforce_strict_ordering: bool,

    /// Framework header base name (default: hunt)
    #[arg(long, value_name = "NAME")]
    pub framework: Option<String>,

    /// Test name prefix alternation (default: test|spec|should)
    #[arg(long, value_name = "PREFIX")]
    pub test_prefix: Option<String>,

    /// Mock header filename prefix (default: Mock)
    #[arg(long, value_name = "PREFIX")]
    pub mock_prefix: Option<String>,

    /// Mock header filename suffix (default: any)
    #[arg(long, value_name = "SUFFIX")]
    pub mock_suffix: Option<String>,

    /// Per-test setup function name (default: setUp)
    #[arg(long, value_name = "NAME")]
    pub setup_name: Option<String>,

    /// Per-test teardown function name (default: tearDown)
    #[arg(long, value_name = "NAME")]
    pub teardown_name: Option<String>,

    /// Mid-suite reset function name (default: resetTest)
    #[arg(long, value_name = "NAME")]
    pub test_reset_name: Option<String>,

    /// Entry point name, or "auto" to derive one per input file
    #[arg(long, value_name = "NAME")]
    pub main_name: Option<String>,

    /// Linkage prefix for the entry point symbol
    #[arg(long, value_name = "DECL")]
    pub main_export_decl: Option<String>,

    /// Literal C for the suite setup body (replaces the weak-symbol hook)
    #[arg(long, value_name = "CODE")]
    pub suite_setup: Option<String>,

    /// Literal C for the suite teardown body (replaces the weak-symbol hook)
    #[arg(long, value_name = "CODE")]
    pub suite_teardown: Option<String>,

    /// Also generate a companion header at this path
    #[arg(long, value_name = "FILE")]
    pub header_file: Option<String>,

    /// Override any configuration key directly (repeatable),
    /// e.g. --set main_name=auto
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub sets: Vec<String>,
}

/// Top-level CLI entry: parse arguments, run the command, exit.
pub fn run() {
    let cli = Cli::parse();
    match commands::generate_runner(&cli) {
        Ok(code) => process::exit(code.0),
        Err(err) => {
            eprintln!("{err}");
            process::exit(err.exit_code.0);
        }
    }
}
