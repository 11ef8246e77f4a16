//! Property-based tests for the extraction pipeline
//!
//! These use proptest to verify the algebraic guarantees the pipeline makes:
//! scrubbing is idempotent, literal shielding round-trips exactly, and
//! discovery finds exactly the uniquely named tests in order.

use proptest::prelude::*;

use huntgen::RunnerConfig;
use huntgen::frontend::{discovery, scrubber};

// =============================================================================
// Generators
// =============================================================================

/// Benign C-ish fragments. Bare `/` and `*` outside literals and comments
/// are excluded: splicing them against removed comments is ambiguous even
/// for a real preprocessor, and the scrubber makes no promises there.
fn c_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}",
        Just("{".to_string()),
        Just("}".to_string()),
        Just(";".to_string()),
        Just("(".to_string()),
        Just(")".to_string()),
        Just(" ".to_string()),
        Just("\n".to_string()),
        // string literals, structural characters welcome
        "[a-z{}; /(),=]{0,8}".prop_map(|s| format!("\"{s}\"")),
        // char literals
        "[a-z{}; /]{0,3}".prop_map(|s| format!("'{s}'")),
        // complete comments
        "[a-z (),;]{0,8}".prop_map(|s| format!("/* {s} */")),
        "[a-z (),;]{0,8}".prop_map(|s| format!("// {s}\n")),
    ]
}

fn c_source() -> impl Strategy<Value = String> {
    proptest::collection::vec(c_fragment(), 0..40).prop_map(|v| v.concat())
}

/// Content for one string literal: plain characters and escape sequences.
fn literal_content() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            "[a-z{}; /]{1,4}",
            Just("\\\"".to_string()),
            Just("\\'".to_string()),
        ],
        0..8,
    )
    .prop_map(|v| v.concat())
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// scrub(scrub(x)) == scrub(x)
    #[test]
    fn scrub_is_idempotent(source in c_source()) {
        let once = scrubber::scrub(&source);
        prop_assert_eq!(scrubber::scrub(&once), once);
    }

    /// Shielding a literal and unshielding it reproduces it exactly.
    #[test]
    fn shield_round_trips_literals(content in literal_content()) {
        let literal = format!("\"{content}\"");
        prop_assert_eq!(scrubber::unshield(&scrubber::shield(&literal)), literal);
    }

    /// A shielded literal survives the whole scrub/split pipeline intact.
    #[test]
    fn literals_survive_logical_line_splitting(content in literal_content()) {
        let literal = format!("\"{content}\"");
        let statement = format!("char* s = {literal};");
        let lines = scrubber::logical_lines(&scrubber::scrub(&statement));
        prop_assert!(lines.iter().any(|l| l.contains(&literal)));
    }

    /// N uniquely named tests yield exactly N cases, in order, each
    /// attributed to its defining line.
    #[test]
    fn discovery_finds_each_unique_test_once(count in 1usize..8) {
        let mut source = String::new();
        for i in 0..count {
            source.push_str(&format!("void testNumber{i}(void)\n{{\n}}\n\n"));
        }
        let tests = discovery::discover_tests(&source, &RunnerConfig::default()).unwrap();
        prop_assert_eq!(tests.len(), count);
        for (i, test) in tests.iter().enumerate() {
            prop_assert_eq!(test.name.clone(), format!("testNumber{i}"));
            prop_assert_eq!(test.line_number as usize, 4 * i + 1);
        }
    }

    /// A name declared twice still yields one case, bound to the first
    /// occurrence.
    #[test]
    fn duplicate_declarations_collapse(gap in 0usize..5) {
        let mut source = String::from("void testRepeated(void);\n");
        for _ in 0..gap {
            source.push_str("int filler;\n");
        }
        source.push_str("void testRepeated(void)\n{\n}\n");
        let tests = discovery::discover_tests(&source, &RunnerConfig::default()).unwrap();
        prop_assert_eq!(tests.len(), 1);
        prop_assert_eq!(tests[0].line_number, 1);
    }
}
