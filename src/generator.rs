//! Runner generation facade
//!
//! [`RunnerGenerator`] owns one immutable configuration and drives the whole
//! pipeline: extraction, emission, and (for [`RunnerGenerator::run_file`])
//! the surrounding file I/O plus the used-files report build systems want.
//! Separate invocations are independent; generating runners for different
//! files concurrently only requires each to own its configuration.

use std::fs;
use std::path::Path;

use crate::backend;
use crate::config::RunnerConfig;
use crate::errors::GeneratorError;
use crate::frontend::{self, SourceFacts};

/// The products of one generation run.
#[derive(Debug, Clone)]
pub struct GeneratedRunner {
    /// The runner translation unit.
    pub runner: String,
    /// The companion header, when one was configured.
    pub header: Option<String>,
    /// The facts the output was generated from, for callers that want to
    /// inspect what was discovered.
    pub facts: SourceFacts,
}

/// Generates test runners for C test files under one configuration.
pub struct RunnerGenerator {
    config: RunnerConfig,
}

impl RunnerGenerator {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Pure generation: extract facts from `source` and emit the runner
    /// (and companion header when configured). `input_file` is only woven
    /// into the output text - the suite banner, auto main naming.
    pub fn generate(
        &self,
        input_file: &str,
        source: &str,
    ) -> Result<GeneratedRunner, GeneratorError> {
        let facts = frontend::analyze(source, &self.config)?;
        tracing::debug!(
            tests = facts.tests.len(),
            mocks = facts.mocks.len(),
            "extracted source facts"
        );
        let runner = backend::render_runner(input_file, &facts, &self.config);
        let header = self
            .config
            .header_file
            .as_deref()
            .filter(|h| !h.is_empty())
            .map(|h| backend::render_header(h, &facts, &self.config));
        Ok(GeneratedRunner {
            runner,
            header,
            facts,
        })
    }

    /// Read `input`, write the runner to `output` (and the companion header
    /// to its configured path), and return every file logically involved in
    /// the run for build-system bookkeeping.
    pub fn run_file(&self, input: &Path, output: &Path) -> Result<Vec<String>, GeneratorError> {
        // The original tool accepted ISO-8859-1 test files; lossy decoding
        // keeps byte salad in string literals from aborting the run.
        let bytes = fs::read(input).map_err(|e| GeneratorError::ReadInput {
            path: input.display().to_string(),
            source: e,
        })?;
        let source = String::from_utf8_lossy(&bytes);

        let input_name = input.display().to_string();
        let generated = self.generate(&input_name, &source)?;

        fs::write(output, &generated.runner).map_err(|e| GeneratorError::WriteOutput {
            path: output.display().to_string(),
            source: e,
        })?;
        if let (Some(header), Some(header_path)) =
            (&generated.header, self.config.header_file.as_deref())
        {
            fs::write(header_path, header).map_err(|e| GeneratorError::WriteOutput {
                path: header_path.to_string(),
                source: e,
            })?;
        }

        Ok(self.used_files(&input_name, &output.display().to_string(), &generated.facts))
    }

    /// Input, output, include companions, configured extras and link-only
    /// sources, deduplicated in first-occurrence order.
    fn used_files(&self, input: &str, output: &str, facts: &SourceFacts) -> Vec<String> {
        let mut files = vec![input.to_string(), output.to_string()];
        // only quoted includes can name a buildable .c companion; system
        // headers stay header-only
        files.extend(
            facts
                .includes
                .iter()
                .filter(|inc| !inc.contains('<'))
                .map(|inc| format!("{inc}.c")),
        );
        files.extend(self.config.includes.iter().cloned());
        files.extend(facts.link_only.iter().map(|src| format!("{src}.c")));

        let mut seen = std::collections::HashSet::new();
        files.retain(|f| seen.insert(f.clone()));
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn used_files_lists_companions_once() {
        let config = RunnerConfig {
            includes: vec!["extra.h".to_string()],
            ..RunnerConfig::default()
        };
        let generator = RunnerGenerator::new(config);
        let facts = SourceFacts {
            tests: Vec::new(),
            mocks: Vec::new(),
            includes: vec!["adder".to_string(), "<stdio.h>".to_string()],
            link_only: vec!["support".to_string()],
        };
        let files = generator.used_files("test_adder.c", "test_adder_Runner.c", &facts);
        assert_eq!(
            files,
            [
                "test_adder.c",
                "test_adder_Runner.c",
                "adder.c",
                "extra.h",
                "support.c"
            ]
        );
    }

    #[test]
    fn generate_produces_header_only_when_configured() {
        let source = "void testOne(void)\n{\n}\n";
        let plain = RunnerGenerator::new(RunnerConfig::default())
            .generate("t.c", source)
            .unwrap();
        assert!(plain.header.is_none());

        let with_header = RunnerGenerator::new(RunnerConfig {
            header_file: Some("t_Runner.h".to_string()),
            ..RunnerConfig::default()
        })
        .generate("t.c", source)
        .unwrap();
        assert!(with_header.header.is_some());
    }
}
