//! CLI command implementation
//!
//! Assembles the effective configuration (defaults, then the YAML file, then
//! individual flags), runs the generator, and reports the files involved.
//! Returns `CliResult` instead of exiting; the top-level `run()` owns exits.

use std::path::{Path, PathBuf};

use crate::config::{MainName, Plugin, RunnerConfig};
use crate::generator::RunnerGenerator;

use super::{Cli, CliError, CliResult, ExitCode};

/// Generate the runner (and optional companion header) for the CLI's input.
pub fn generate_runner(cli: &Cli) -> CliResult<ExitCode> {
    let config = build_config(cli)?;
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input));

    let generator = RunnerGenerator::new(config);
    let used_files = generator
        .run_file(&cli.input, &output)
        .map_err(|e| CliError::failure(e.to_string()))?;

    tracing::info!(
        input = %cli.input.display(),
        output = %output.display(),
        "runner generated"
    );
    tracing::debug!(files = ?used_files, "files involved in this run");
    Ok(ExitCode::SUCCESS)
}

/// Defaults, then the YAML config file, then individual flag overrides.
fn build_config(cli: &Cli) -> CliResult<RunnerConfig> {
    let mut config = RunnerConfig::default();
    if let Some(path) = &cli.config {
        config
            .apply_file(path)
            .map_err(|e| CliError::failure(e.to_string()))?;
    }

    if !cli.includes.is_empty() {
        config.includes.extend(cli.includes.iter().cloned());
    }
    if !cli.defines.is_empty() {
        config.defines.extend(cli.defines.iter().cloned());
    }
    if cli.cexception && !config.plugins.contains(&Plugin::Cexception) {
        config.plugins.push(Plugin::Cexception);
    }
    if cli.externc {
        config.externc = true;
    }
    if cli.cmdline_args {
        config.cmdline_args = true;
    }
    if cli.use_param_tests {
        config.use_param_tests = true;
    }
    if cli.enforce_strict_ordering {
        config.enforce_strict_ordering = true;
    }
    if let Some(v) = &cli.framework {
        config.framework = v.clone();
    }
    if let Some(v) = &cli.test_prefix {
        config.test_prefix = v.clone();
    }
    if let Some(v) = &cli.mock_prefix {
        config.mock_prefix = v.clone();
    }
    if let Some(v) = &cli.mock_suffix {
        config.mock_suffix = v.clone();
    }
    if let Some(v) = &cli.setup_name {
        config.setup_name = v.clone();
    }
    if let Some(v) = &cli.teardown_name {
        config.teardown_name = v.clone();
    }
    if let Some(v) = &cli.test_reset_name {
        config.test_reset_name = v.clone();
    }
    if let Some(v) = &cli.main_name {
        config.main_name = if v == "auto" {
            MainName::Auto
        } else {
            MainName::Fixed(v.clone())
        };
    }
    if let Some(v) = &cli.main_export_decl {
        config.main_export_decl = v.clone();
    }
    if let Some(v) = &cli.suite_setup {
        config.suite_setup = Some(v.clone());
    }
    if let Some(v) = &cli.suite_teardown {
        config.suite_teardown = Some(v.clone());
    }
    if let Some(v) = &cli.header_file {
        config.header_file = Some(v.clone());
    }

    for pair in &cli.sets {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            CliError::failure(format!("--set expects KEY=VALUE, got `{pair}`"))
        })?;
        config
            .apply_key_value(key, value)
            .map_err(|e| CliError::failure(e.to_string()))?;
    }
    Ok(config)
}

/// `test_adder.c` -> `test_adder_Runner.c`.
fn default_output_path(input: &Path) -> PathBuf {
    PathBuf::from(input.to_string_lossy().replace(".c", "_Runner.c"))
}
