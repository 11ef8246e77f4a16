//! Runner generation configuration
//!
//! A [`RunnerConfig`] is an explicit record of every knob the generator
//! understands, constructed once per run and never mutated afterwards.
//! Overrides come from two places and are applied field by field:
//!
//! - a YAML file with a top-level `hunt:` (or legacy `cmock:`) mapping,
//! - `--key=value` style CLI overrides applied after the file.
//!
//! Unknown YAML keys are rejected by the typed deserializer rather than
//! silently injected, so a typo in a config file fails loudly.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::errors::GeneratorError;

/// Optional generator plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plugin {
    /// Wrap each test body in a CException `Try`/`Catch` block.
    Cexception,
}

/// How the generated entry point is named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MainName {
    /// A fixed symbol name, `main` by default.
    Fixed(String),
    /// Derive `main_<input-file-stem>` per generated runner, for builds that
    /// link several runners into one image.
    Auto,
}

impl Default for MainName {
    fn default() -> Self {
        MainName::Fixed("main".to_string())
    }
}

/// Complete generator configuration with documented defaults.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Extra headers to `#include` in the runner (and companion header).
    pub includes: Vec<String>,
    /// Extra macros, each emitted under an `#ifndef` guard.
    pub defines: Vec<String>,
    /// Enabled plugins.
    pub plugins: Vec<Plugin>,
    /// Base name of the framework header (`hunt` -> `#include "hunt.h"`).
    pub framework: String,
    /// Alternation fragment a test function name must start with.
    pub test_prefix: String,
    /// Case-insensitive prefix a mock header's base name must start with.
    pub mock_prefix: String,
    /// Case-insensitive suffix a mock header's base name must end with;
    /// empty means any.
    pub mock_suffix: String,
    /// Name of the per-test setup function.
    pub setup_name: String,
    /// Name of the per-test teardown function.
    pub teardown_name: String,
    /// Name of the generated mid-suite reset function.
    pub test_reset_name: String,
    /// Entry point naming mode.
    pub main_name: MainName,
    /// Linkage prefix placed before the entry point symbol (e.g. a DLL
    /// export declaration).
    pub main_export_decl: String,
    /// Generate a `main` that parses runner command-line options and can
    /// list or filter tests.
    pub cmdline_args: bool,
    /// Honor `TEST_CASE(...)` annotations and emit one invocation per
    /// argument set.
    pub use_param_tests: bool,
    /// When set, also emit a companion header at this path.
    pub header_file: Option<String>,
    /// Literal C placed in the suite setup body instead of the default
    /// weak-symbol hook call.
    pub suite_setup: Option<String>,
    /// Literal C placed in the suite teardown body instead of the default
    /// weak-symbol hook call.
    pub suite_teardown: Option<String>,
    /// Emit the global bookkeeping variables mock call-order enforcement
    /// needs. The variables live in the generated C, not in this process.
    pub enforce_strict_ordering: bool,
    /// Wrap the extern declarations in `extern "C"` for mixed-language
    /// linkage.
    pub externc: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            includes: Vec::new(),
            defines: Vec::new(),
            plugins: Vec::new(),
            framework: "hunt".to_string(),
            test_prefix: "test|spec|should".to_string(),
            mock_prefix: "Mock".to_string(),
            mock_suffix: String::new(),
            setup_name: "setUp".to_string(),
            teardown_name: "tearDown".to_string(),
            test_reset_name: "resetTest".to_string(),
            main_name: MainName::default(),
            main_export_decl: String::new(),
            cmdline_args: false,
            use_param_tests: false,
            header_file: None,
            suite_setup: None,
            suite_teardown: None,
            enforce_strict_ordering: false,
            externc: false,
        }
    }
}

impl RunnerConfig {
    /// Whether the CException plugin is enabled.
    pub fn has_cexception(&self) -> bool {
        self.plugins.contains(&Plugin::Cexception)
    }

    /// Load defaults merged with the overrides from a YAML config file.
    pub fn from_file(path: &Path) -> Result<Self, GeneratorError> {
        let mut config = Self::default();
        config.apply_file(path)?;
        Ok(config)
    }

    /// Merge the `hunt:` (or legacy `cmock:`) section of a YAML file over
    /// this configuration, field by field.
    pub fn apply_file(&mut self, path: &Path) -> Result<(), GeneratorError> {
        let text = fs::read_to_string(path).map_err(|e| GeneratorError::ConfigFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        self.apply_yaml(&path.display().to_string(), &text)
    }

    /// Merge a YAML document over this configuration. `origin` only labels
    /// error messages.
    pub fn apply_yaml(&mut self, origin: &str, text: &str) -> Result<(), GeneratorError> {
        let file: ConfigDocument =
            serde_yaml::from_str(text).map_err(|e| GeneratorError::ConfigFile {
                path: origin.to_string(),
                reason: e.to_string(),
            })?;
        let section = file
            .hunt
            .or(file.cmock)
            .ok_or_else(|| GeneratorError::MissingConfigSection {
                path: origin.to_string(),
            })?;
        self.apply_overrides(section);
        Ok(())
    }

    /// Apply a parsed override set, replacing each present field.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        let ConfigOverrides {
            includes,
            defines,
            plugins,
            framework,
            test_prefix,
            mock_prefix,
            mock_suffix,
            setup_name,
            teardown_name,
            test_reset_name,
            main_name,
            main_export_decl,
            cmdline_args,
            use_param_tests,
            header_file,
            suite_setup,
            suite_teardown,
            enforce_strict_ordering,
            externc,
        } = overrides;

        if let Some(v) = includes {
            self.includes = v;
        }
        if let Some(v) = defines {
            self.defines = v;
        }
        if let Some(v) = plugins {
            self.plugins = v;
        }
        if let Some(v) = framework {
            self.framework = v;
        }
        if let Some(v) = test_prefix {
            self.test_prefix = v;
        }
        if let Some(v) = mock_prefix {
            self.mock_prefix = v;
        }
        if let Some(v) = mock_suffix {
            self.mock_suffix = v;
        }
        if let Some(v) = setup_name {
            self.setup_name = v;
        }
        if let Some(v) = teardown_name {
            self.teardown_name = v;
        }
        if let Some(v) = test_reset_name {
            self.test_reset_name = v;
        }
        if let Some(v) = main_name {
            self.main_name = parse_main_name(&v);
        }
        if let Some(v) = main_export_decl {
            self.main_export_decl = v;
        }
        if let Some(v) = cmdline_args {
            self.cmdline_args = v;
        }
        if let Some(v) = use_param_tests {
            self.use_param_tests = v;
        }
        if let Some(v) = header_file {
            self.header_file = Some(v);
        }
        if let Some(v) = suite_setup {
            self.suite_setup = Some(v);
        }
        if let Some(v) = suite_teardown {
            self.suite_teardown = Some(v);
        }
        if let Some(v) = enforce_strict_ordering {
            self.enforce_strict_ordering = v;
        }
        if let Some(v) = externc {
            self.externc = v;
        }
    }

    /// Apply one `--key=value` style override.
    pub fn apply_key_value(&mut self, key: &str, value: &str) -> Result<(), GeneratorError> {
        match key {
            "framework" => self.framework = value.to_string(),
            "test_prefix" => self.test_prefix = value.to_string(),
            "mock_prefix" => self.mock_prefix = value.to_string(),
            "mock_suffix" => self.mock_suffix = value.to_string(),
            "setup_name" => self.setup_name = value.to_string(),
            "teardown_name" => self.teardown_name = value.to_string(),
            "test_reset_name" => self.test_reset_name = value.to_string(),
            "main_name" => self.main_name = parse_main_name(value),
            "main_export_decl" => self.main_export_decl = value.to_string(),
            "header_file" => self.header_file = Some(value.to_string()),
            "suite_setup" => self.suite_setup = Some(value.to_string()),
            "suite_teardown" => self.suite_teardown = Some(value.to_string()),
            "cmdline_args" => self.cmdline_args = parse_bool(key, value)?,
            "use_param_tests" => self.use_param_tests = parse_bool(key, value)?,
            "enforce_strict_ordering" => {
                self.enforce_strict_ordering = parse_bool(key, value)?;
            }
            "externc" => self.externc = parse_bool(key, value)?,
            _ => return Err(GeneratorError::UnknownConfigKey(key.to_string())),
        }
        Ok(())
    }
}

fn parse_main_name(value: &str) -> MainName {
    // Accept the Ruby-era symbol spelling too
    if value == "auto" || value == ":auto" {
        MainName::Auto
    } else {
        MainName::Fixed(value.to_string())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, GeneratorError> {
    match value {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(GeneratorError::InvalidConfigValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Partial configuration parsed from one YAML section or CLI layer. Every
/// field is optional; present fields replace the corresponding
/// [`RunnerConfig`] field wholesale.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    pub includes: Option<Vec<String>>,
    pub defines: Option<Vec<String>>,
    pub plugins: Option<Vec<Plugin>>,
    pub framework: Option<String>,
    pub test_prefix: Option<String>,
    pub mock_prefix: Option<String>,
    pub mock_suffix: Option<String>,
    pub setup_name: Option<String>,
    pub teardown_name: Option<String>,
    pub test_reset_name: Option<String>,
    pub main_name: Option<String>,
    pub main_export_decl: Option<String>,
    pub cmdline_args: Option<bool>,
    pub use_param_tests: Option<bool>,
    pub header_file: Option<String>,
    pub suite_setup: Option<String>,
    pub suite_teardown: Option<String>,
    pub enforce_strict_ordering: Option<bool>,
    pub externc: Option<bool>,
}

// Other tools may share the document, so unknown top-level sections are
// ignored; only the hunt/cmock sections themselves are strictly typed.
#[derive(Debug, Deserialize)]
struct ConfigDocument {
    hunt: Option<ConfigOverrides>,
    cmock: Option<ConfigOverrides>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = RunnerConfig::default();
        assert_eq!(config.framework, "hunt");
        assert_eq!(config.test_prefix, "test|spec|should");
        assert_eq!(config.mock_prefix, "Mock");
        assert_eq!(config.mock_suffix, "");
        assert_eq!(config.setup_name, "setUp");
        assert_eq!(config.teardown_name, "tearDown");
        assert_eq!(config.test_reset_name, "resetTest");
        assert_eq!(config.main_name, MainName::Fixed("main".to_string()));
        assert!(!config.cmdline_args);
        assert!(!config.use_param_tests);
        assert!(config.header_file.is_none());
    }

    #[test]
    fn yaml_hunt_section_overrides_fields() {
        let mut config = RunnerConfig::default();
        config
            .apply_yaml(
                "test.yml",
                "hunt:\n  setup_name: custom_setup\n  use_param_tests: true\n  plugins:\n    - cexception\n",
            )
            .unwrap();
        assert_eq!(config.setup_name, "custom_setup");
        assert!(config.use_param_tests);
        assert!(config.has_cexception());
        // untouched fields keep their defaults
        assert_eq!(config.teardown_name, "tearDown");
    }

    #[test]
    fn yaml_cmock_section_is_accepted() {
        let mut config = RunnerConfig::default();
        config
            .apply_yaml("test.yml", "cmock:\n  mock_prefix: Fake\n")
            .unwrap();
        assert_eq!(config.mock_prefix, "Fake");
    }

    #[test]
    fn yaml_without_known_section_is_fatal() {
        let mut config = RunnerConfig::default();
        let err = config
            .apply_yaml("test.yml", "other:\n  setup_name: nope\n")
            .unwrap_err();
        assert!(matches!(err, GeneratorError::MissingConfigSection { .. }));

        let err = config
            .apply_yaml("test.yml", "hunt:\n  not_a_key: 1\n")
            .unwrap_err();
        assert!(matches!(err, GeneratorError::ConfigFile { .. }));
    }

    #[test]
    fn key_value_overrides() {
        let mut config = RunnerConfig::default();
        config.apply_key_value("main_name", "run_suite").unwrap();
        config.apply_key_value("use_param_tests", "1").unwrap();
        assert_eq!(config.main_name, MainName::Fixed("run_suite".to_string()));
        assert!(config.use_param_tests);

        config.apply_key_value("main_name", "auto").unwrap();
        assert_eq!(config.main_name, MainName::Auto);

        assert!(matches!(
            config.apply_key_value("not_a_key", "x"),
            Err(GeneratorError::UnknownConfigKey(_))
        ));
        assert!(matches!(
            config.apply_key_value("externc", "maybe"),
            Err(GeneratorError::InvalidConfigValue { .. })
        ));
    }
}
