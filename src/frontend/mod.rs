//! Source-fact extraction for C test files
//!
//! The frontend never parses C properly - by design there is no compiler
//! dependency. Instead it scrubs the text until regular expressions are safe
//! (comments removed, literals shielded, one statement per logical line) and
//! then recovers the facts the generator needs: test declarations, their
//! line numbers, include directives, and mock dependencies.
//!
//! ## Modules
//!
//! - `scrubber` - literal shielding, comment stripping, logical line splitting
//! - `discovery` - test declaration matching and line number resolution
//! - `includes` - include directive extraction and mock classification

pub mod discovery;
pub mod includes;
pub mod scrubber;

use crate::config::RunnerConfig;
use crate::errors::GeneratorError;

pub use discovery::TestCase;
pub use includes::IncludeSet;

/// Everything the generator needs to know about one test source file.
#[derive(Debug, Clone)]
pub struct SourceFacts {
    /// Discovered tests, first-occurrence order.
    pub tests: Vec<TestCase>,
    /// Includes classified as mocks, managed through lifecycle calls.
    pub mocks: Vec<String>,
    /// Remaining includes, emitted verbatim into the runner.
    pub includes: Vec<String>,
    /// Link-only companion sources, reported for build bookkeeping.
    pub link_only: Vec<String>,
}

/// Run the whole extraction pipeline over one source file.
pub fn analyze(source: &str, config: &RunnerConfig) -> Result<SourceFacts, GeneratorError> {
    let tests = discovery::discover_tests(source, config)?;
    let include_set = includes::extract_includes(source);
    let (mocks, plain) = includes::classify_mocks(&include_set.headers(), config)?;
    Ok(SourceFacts {
        tests,
        mocks,
        includes: plain,
        link_only: include_set.link_only,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_combines_tests_includes_and_mocks() {
        let source = "#include \"hunt.h\"\n#include \"MockAdder.h\"\n#include \"helpers.h\"\n\nvoid testUsesAdder(void)\n{\n}\n";
        let facts = analyze(source, &RunnerConfig::default()).unwrap();
        assert_eq!(facts.tests.len(), 1);
        assert_eq!(facts.tests[0].name, "testUsesAdder");
        assert_eq!(facts.mocks, ["MockAdder"]);
        assert_eq!(facts.includes, ["helpers"]);
        assert!(facts.link_only.is_empty());
    }
}
