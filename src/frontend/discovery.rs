//! Test discovery: matching declarations and resolving line numbers
//!
//! Works on the logical lines the scrubber produces. A test declaration is
//! `void` followed by a name starting with one of the configured prefixes and
//! a parenthesized parameter list, optionally preceded by a run of
//! `TEST_CASE(...)` parameterization annotations. Anything that does not
//! fully match is silently ignored - near misses are not errors.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::RunnerConfig;
use crate::errors::GeneratorError;
use crate::frontend::scrubber;

lazy_static! {
    /// One parameterization annotation inside a captured annotation run.
    static ref TEST_CASE_ARGS: Regex = Regex::new(r"(?m)\s*TEST_CASE\s*\((.*)\)\s*$").unwrap();
}

/// One discovered test function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Function name, the identity key for deduplication.
    pub name: String,
    /// Argument text for the call site; `None` when the declared list is
    /// empty, in which case `void` is emitted.
    pub call_signature: Option<String>,
    /// Raw declared parameter list, used for companion header prototypes.
    pub param_list: Option<String>,
    /// One entry per `TEST_CASE(...)` annotation, present only when
    /// parameterized emission is enabled and annotations preceded the
    /// declaration.
    pub argument_sets: Option<Vec<String>>,
    /// 1-based line in the original text; 0 when the declaration could not
    /// be located again.
    pub line_number: u32,
}

/// Discover every test in `source`, in first-occurrence order, with resolved
/// line numbers.
pub fn discover_tests(
    source: &str,
    config: &RunnerConfig,
) -> Result<Vec<TestCase>, GeneratorError> {
    let declaration = declaration_pattern(&config.test_prefix)?;

    let mut tests = Vec::new();
    let mut seen = HashSet::new();
    for line in scrubber::logical_lines(&scrubber::scrub(source)) {
        let Some(caps) = declaration.captures(&line) else {
            continue;
        };
        let annotations = caps.get(1).map_or("", |m| m.as_str());
        let name = caps[2].to_string();
        let call = caps[3].to_string();

        // First occurrence wins; a forward declaration shadows the later
        // definition.
        if !seen.insert(name.clone()) {
            continue;
        }

        let argument_sets = if config.use_param_tests && !annotations.is_empty() {
            Some(
                TEST_CASE_ARGS
                    .captures_iter(annotations)
                    .map(|c| c[1].to_string())
                    .collect(),
            )
        } else {
            None
        };

        let signature = if call.is_empty() { None } else { Some(call) };
        tests.push(TestCase {
            name,
            call_signature: signature.clone(),
            param_list: signature,
            argument_sets,
            line_number: 0,
        });
    }

    resolve_line_numbers(source, &mut tests);
    Ok(tests)
}

/// Build the declaration matcher for a configured prefix alternation.
///
/// Dot-matches-newline because a logical line may span several physical
/// lines; `^` anchors at any embedded line start.
fn declaration_pattern(test_prefix: &str) -> Result<Regex, GeneratorError> {
    let pattern = format!(
        r"(?ms)^((?:\s*TEST_CASE\s*\(.*?\)\s*)*)\s*void\s+((?:{test_prefix}).*)\s*\(\s*(.*)\s*\)"
    );
    Regex::new(&pattern).map_err(|e| GeneratorError::InvalidPattern {
        what: "test prefix",
        pattern: test_prefix.to_string(),
        reason: e.to_string(),
    })
}

/// Attribute each test to its 1-based line in the original text.
///
/// The search walks forward monotonically, resuming at the line where the
/// previous test was found; this assumes tests were matched in the order
/// they physically appear. A test that cannot be found keeps line 0 and
/// still runs, just unattributed.
fn resolve_line_numbers(source: &str, tests: &mut [TestCase]) {
    let source_lines: Vec<&str> = source.split('\n').collect();
    let mut cursor = 0usize;
    for test in tests.iter_mut() {
        let Ok(finder) = Regex::new(&format!(r"\s+{}(?:\s|\()", regex::escape(&test.name)))
        else {
            continue;
        };
        for (offset, line) in source_lines[cursor..].iter().enumerate() {
            if finder.is_match(line) {
                cursor += offset;
                test.line_number = (cursor + 1) as u32;
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discover(source: &str) -> Vec<TestCase> {
        discover_tests(source, &RunnerConfig::default()).unwrap()
    }

    #[test]
    fn finds_tests_in_declaration_order() {
        let source = "void testAlpha(void)\n{\n}\n\nvoid spec_beta(void)\n{\n}\n\nvoid shouldGamma(void)\n{\n}\n";
        let tests = discover(source);
        let names: Vec<&str> = tests.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["testAlpha", "spec_beta", "shouldGamma"]);
    }

    #[test]
    fn non_test_functions_are_ignored() {
        let tests =
            discover("void helper(void) { }\nint testReturnsInt(void);\nvoid testReal(void) { }\n");
        let names: Vec<&str> = tests.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["testReal"]);
    }

    #[test]
    fn resolves_one_based_line_numbers() {
        let source = "#include \"hunt.h\"\n\nvoid testFirst(void)\n{\n}\n\nvoid testSecond(void)\n{\n}\n";
        let tests = discover(source);
        assert_eq!(tests[0].line_number, 3);
        assert_eq!(tests[1].line_number, 7);
    }

    #[test]
    fn duplicate_names_collapse_to_first_occurrence() {
        // a forward declaration resembling a definition plus the real one
        let source = "void testOnce(void);\n\nvoid testOnce(void)\n{\n}\n";
        let tests = discover(source);
        assert_eq!(tests.len(), 1);
        assert_eq!(tests[0].line_number, 1);
    }

    #[test]
    fn commented_out_tests_are_not_collected() {
        let source = "// void testDisabled(void) { }\n/*\nvoid testBlockDisabled(void)\n{\n}\n*/\nvoid testLive(void)\n{\n}\n";
        let tests = discover(source);
        let names: Vec<&str> = tests.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["testLive"]);
    }

    #[test]
    fn test_names_inside_strings_are_not_collected() {
        let source = "void testReal(void)\n{\n    printf(\"void testFake(void) {\");\n}\n";
        let tests = discover(source);
        assert_eq!(tests.len(), 1);
        assert_eq!(tests[0].name, "testReal");
    }

    #[test]
    fn captures_call_signature_and_defaults_empty_to_none() {
        let source = "void testWithArgs(int a, int b)\n{\n}\n\nvoid testPlain(void)\n{\n}\n\nvoid testEmpty()\n{\n}\n";
        let tests = discover(source);
        assert_eq!(tests[0].call_signature.as_deref(), Some("int a, int b"));
        assert_eq!(tests[1].call_signature.as_deref(), Some("void"));
        assert_eq!(tests[2].call_signature, None);
    }

    #[test]
    fn annotations_collected_only_in_param_mode() {
        let source = "TEST_CASE(1, 2)\nTEST_CASE(3, 4)\nvoid testParam(int a, int b)\n{\n}\n";

        let plain = discover(source);
        assert_eq!(plain[0].argument_sets, None);

        let config = RunnerConfig {
            use_param_tests: true,
            ..RunnerConfig::default()
        };
        let parameterized = discover_tests(source, &config).unwrap();
        assert_eq!(
            parameterized[0].argument_sets,
            Some(vec!["1, 2".to_string(), "3, 4".to_string()])
        );
    }

    #[test]
    fn unresolvable_test_keeps_line_zero() {
        let mut tests = vec![TestCase {
            name: "testMissing".to_string(),
            call_signature: None,
            param_list: None,
            argument_sets: None,
            line_number: 0,
        }];
        resolve_line_numbers("int unrelated;\n", &mut tests);
        assert_eq!(tests[0].line_number, 0);
    }

    #[test]
    fn custom_prefix_is_honored() {
        let config = RunnerConfig {
            test_prefix: "check".to_string(),
            ..RunnerConfig::default()
        };
        let tests = discover_tests(
            "void checkThing(void)\n{\n}\nvoid testIgnored(void)\n{\n}\n",
            &config,
        )
        .unwrap();
        let names: Vec<&str> = tests.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["checkThing"]);
    }
}
