//! Runner translation unit builders
//!
//! One builder per generated section, mirroring the fixed section order of
//! the output file: banner, dispatch macro, include block, externs, mock
//! management, suite setup/teardown, reset function, main. Builders only
//! append lines to a [`Section`]; nothing here touches the filesystem.

use crate::config::{MainName, RunnerConfig};
use crate::frontend::SourceFacts;

use super::sections::{Section, render};
use super::{dedup_preserving_order, format_include, sanitize_c_identifier};

/// Render the complete runner source for one test file.
pub fn render_runner(input_file: &str, facts: &SourceFacts, config: &RunnerConfig) -> String {
    render(&runner_document(input_file, facts, config))
}

/// Build the ordered section list for the runner.
pub fn runner_document(
    input_file: &str,
    facts: &SourceFacts,
    config: &RunnerConfig,
) -> Vec<Section> {
    vec![
        banner(),
        dispatch_macro(facts, config),
        include_block(facts, config),
        externs(facts, config),
        mock_management(facts, config),
        suite_setup(config),
        suite_teardown(config),
        reset_function(facts, config),
        main_function(input_file, facts, config),
    ]
}

fn banner() -> Section {
    let mut section = Section::new("banner");
    section.line("/* AUTOGENERATED FILE. DO NOT EDIT. */");
    section
}

/// The `RUN_TEST` macro wrapping every test invocation with bookkeeping,
/// mock lifecycle, optional exception capture and the optional command-line
/// filter gate.
fn dispatch_macro(facts: &SourceFacts, config: &RunnerConfig) -> Section {
    let has_mocks = !facts.mocks.is_empty();
    let cexception = config.has_cexception();

    let mut section = Section::new("dispatch_macro");
    section.blank();
    section.line("/*=======Test Runner Used To Run Each Test Below=====*/");
    if config.use_param_tests {
        section.line("#define RUN_TEST_NO_ARGS");
    }
    let (va_params, va_args) = if config.use_param_tests {
        (", ...", "__VA_ARGS__")
    } else {
        ("", "")
    };
    section.line(format!("#define RUN_TEST(TestFunc, TestLineNum{va_params}) \\"));
    section.line("{ \\");
    if config.use_param_tests {
        section.line("  Hunt.CurrentTestName = #TestFunc \"(\" #__VA_ARGS__ \")\"; \\");
    } else {
        section.line("  Hunt.CurrentTestName = #TestFunc; \\");
    }
    section.line("  Hunt.CurrentTestLineNumber = TestLineNum; \\");
    if config.cmdline_args {
        section.line("  if (HuntTestMatches()) { \\");
    }
    section.line("  Hunt.NumberOfTests++; \\");
    section.line("  HUNT_EXEC_TIME_START(); \\");
    if has_mocks {
        section.line("  CMock_Init(); \\");
        section.line("  HUNT_CLR_DETAILS(); \\");
    }
    section.line("  if (TEST_PROTECT()) \\");
    section.line("  { \\");
    if cexception {
        section.line("    CEXCEPTION_T e; \\");
        section.line("    Try { \\");
    }
    section.line(format!("      {}(); \\", config.setup_name));
    section.line(format!("      TestFunc({va_args}); \\"));
    if cexception {
        section.line(
            "    } Catch(e) { TEST_ASSERT_EQUAL_HEX32_MESSAGE(CEXCEPTION_NONE, e, \"Unhandled Exception!\"); } \\",
        );
    }
    section.line("  } \\");
    section.line("  if (TEST_PROTECT()) \\");
    section.line("  { \\");
    section.line(format!("    {}(); \\", config.teardown_name));
    if has_mocks {
        section.line("    CMock_Verify(); \\");
    }
    section.line("  } \\");
    if has_mocks {
        section.line("  CMock_Destroy(); \\");
    }
    section.line("  HUNT_EXEC_TIME_STOP(); \\");
    section.line("  HuntConcludeTest(); \\");
    if config.cmdline_args {
        section.line("  } \\");
    }
    section.line("}");
    section
}

/// Framework, mock and user includes plus guarded defines.
fn include_block(facts: &SourceFacts, config: &RunnerConfig) -> Section {
    let has_mocks = !facts.mocks.is_empty();

    let mut section = Section::new("includes");
    section.blank();
    section.line("/*=======Automagically Detected Files To Include=====*/");
    if config.suite_setup.is_none() {
        section.line("#define HUNT_INCLUDE_SETUP_STUBS");
    }
    section.line(format!("#include \"{}.h\"", config.framework));
    if has_mocks {
        section.line("#include \"cmock.h\"");
    }
    section.line("#ifndef HUNT_EXCLUDE_SETJMP_H");
    section.line("#include <setjmp.h>");
    section.line("#endif");
    section.line("#include <stdio.h>");
    for define in &config.defines {
        section.line(format!("#ifndef {define}"));
        section.line(format!("#define {define}"));
        section.line(format!("#endif /* {define} */"));
    }
    if let Some(header_file) = config.header_file.as_deref().filter(|h| !h.is_empty()) {
        section.line(format!(
            "#include \"{}\"",
            crate::frontend::includes::base_name(header_file)
        ));
    } else {
        for include in dedup_preserving_order(&config.includes) {
            section.line(format_include(&include));
        }
        for include in &facts.includes {
            section.line(format_include(include));
        }
    }
    for mock in &facts.mocks {
        section.line(format!("#include \"{}.h\"", mock.replace(".h", "")));
    }
    if config.has_cexception() {
        section.line("#include \"CException.h\"");
    }

    if config.enforce_strict_ordering {
        // bookkeeping for mock call-order verification; lives in the
        // generated program, not in this process
        section.blank();
        section.line("int GlobalExpectCount;");
        section.line("int GlobalVerifyOrder;");
        section.line("char* GlobalOrderError;");
    }
    section
}

fn externs(facts: &SourceFacts, config: &RunnerConfig) -> Section {
    let mut section = Section::new("externs");
    section.blank();
    section.line("/*=======External Functions This Runner Calls=====*/");
    section.line(format!("extern void {}(void);", config.setup_name));
    section.line(format!("extern void {}(void);", config.teardown_name));
    if config.externc {
        section.blank();
        section.line("#ifdef __cplusplus");
        section.line("extern \"C\"");
        section.line("{");
        section.line("#endif");
    }
    for test in &facts.tests {
        section.line(format!(
            "extern void {}({});",
            test.name,
            test.call_signature.as_deref().unwrap_or("void")
        ));
    }
    if config.externc {
        section.line("#ifdef __cplusplus");
        section.line("}");
        section.line("#endif");
    }
    section.blank();
    section
}

/// `CMock_Init`/`CMock_Verify`/`CMock_Destroy`, one lifecycle call per mock.
/// Empty when the test file uses no mocks.
fn mock_management(facts: &SourceFacts, config: &RunnerConfig) -> Section {
    let mut section = Section::new("mock_management");
    if facts.mocks.is_empty() {
        return section;
    }

    let mock_names: Vec<String> = facts
        .mocks
        .iter()
        .map(|m| sanitize_c_identifier(crate::frontend::includes::base_name(m)))
        .collect();

    section.blank();
    section.line("/*=======Mock Management=====*/");
    section.line("static void CMock_Init(void)");
    section.line("{");
    if config.enforce_strict_ordering {
        section.line("  GlobalExpectCount = 0;");
        section.line("  GlobalVerifyOrder = 0;");
        section.line("  GlobalOrderError = NULL;");
    }
    for mock in &mock_names {
        section.line(format!("  {mock}_Init();"));
    }
    section.line("}");

    section.line("static void CMock_Verify(void)");
    section.line("{");
    for mock in &mock_names {
        section.line(format!("  {mock}_Verify();"));
    }
    section.line("}");

    section.line("static void CMock_Destroy(void)");
    section.line("{");
    for mock in &mock_names {
        section.line(format!("  {mock}_Destroy();"));
    }
    section.line("}");
    section
}

/// Suite setup: user-supplied literal code, or the default body calling the
/// `suiteSetUp` weak-symbol hook when the toolchain supports weak symbols.
fn suite_setup(config: &RunnerConfig) -> Section {
    let mut section = Section::new("suite_setup");
    section.blank();
    section.line("/*=======Suite Setup=====*/");
    section.line("static void suite_setup(void)");
    section.line("{");
    match &config.suite_setup {
        None => {
            section.line("#if defined(HUNT_WEAK_ATTRIBUTE) || defined(HUNT_WEAK_PRAGMA)");
            section.line("  suiteSetUp();");
            section.line("#endif");
        }
        Some(code) => section.verbatim(code),
    }
    section.line("}");
    section
}

fn suite_teardown(config: &RunnerConfig) -> Section {
    let mut section = Section::new("suite_teardown");
    section.blank();
    section.line("/*=======Suite Teardown=====*/");
    section.line("static int suite_teardown(int num_failures)");
    section.line("{");
    match &config.suite_teardown {
        None => {
            section.line("#if defined(HUNT_WEAK_ATTRIBUTE) || defined(HUNT_WEAK_PRAGMA)");
            section.line("  return suiteTearDown(num_failures);");
            section.line("#else");
            section.line("  return num_failures;");
            section.line("#endif");
        }
        Some(code) => section.verbatim(code),
    }
    section.line("}");
    section
}

/// The mid-suite reset entry point: tear everything down and set it back up
/// without concluding the suite.
fn reset_function(facts: &SourceFacts, config: &RunnerConfig) -> Section {
    let has_mocks = !facts.mocks.is_empty();

    let mut section = Section::new("reset");
    section.blank();
    section.line("/*=======Test Reset Option=====*/");
    section.line(format!("void {}(void);", config.test_reset_name));
    section.line(format!("void {}(void)", config.test_reset_name));
    section.line("{");
    if has_mocks {
        section.line("  CMock_Verify();");
        section.line("  CMock_Destroy();");
    }
    section.line(format!("  {}();", config.teardown_name));
    if has_mocks {
        section.line("  CMock_Init();");
    }
    section.line(format!("  {}();", config.setup_name));
    section.line("}");
    section
}

fn main_function(input_file: &str, facts: &SourceFacts, config: &RunnerConfig) -> Section {
    let has_mocks = !facts.mocks.is_empty();
    let main_name = resolve_main_name(input_file, config);
    let file_stem = input_file.replace(".c", "");

    let mut section = Section::new("main");
    section.blank();
    section.blank();
    section.line("/*=======MAIN=====*/");

    if config.cmdline_args {
        if main_name != "main" {
            section.line(format!(
                "{}int {main_name}(int argc, char** argv);",
                export_prefix(config)
            ));
        }
        section.line(format!(
            "{}int {main_name}(int argc, char** argv)",
            export_prefix(config)
        ));
        section.line("{");
        section.line("  int parse_status = HuntParseOptions(argc, argv);");
        section.line("  if (parse_status != 0)");
        section.line("  {");
        section.line("    if (parse_status < 0)");
        section.line("    {");
        section.line(format!("      HuntPrint(\"{file_stem}.\");"));
        section.line("      HUNT_PRINT_EOL();");
        if config.use_param_tests {
            for test in &facts.tests {
                match &test.argument_sets {
                    Some(sets) if !sets.is_empty() => {
                        for args in sets {
                            section.line(format!("      HuntPrint(\"  {}({})\");", test.name, args));
                            section.line("      HUNT_PRINT_EOL();");
                        }
                    }
                    _ => {
                        section.line(format!(
                            "      HuntPrint(\"  {}(RUN_TEST_NO_ARGS)\");",
                            test.name
                        ));
                        section.line("      HUNT_PRINT_EOL();");
                    }
                }
            }
        } else {
            for test in &facts.tests {
                section.line(format!("      HuntPrint(\"  {}\");", test.name));
                section.line("      HUNT_PRINT_EOL();");
            }
        }
        section.line("    return 0;");
        section.line("    }");
        section.line("  return parse_status;");
        section.line("  }");
    } else {
        if main_name != "main" {
            section.line(format!("{}int {main_name}(void);", export_prefix(config)));
        }
        section.line(format!("int {main_name}(void)"));
        section.line("{");
    }

    section.line("  suite_setup();");
    section.line(format!(
        "  HuntBegin(\"{}\");",
        input_file.replace('\\', "\\\\")
    ));
    if config.use_param_tests {
        for test in &facts.tests {
            match &test.argument_sets {
                Some(sets) if !sets.is_empty() => {
                    for args in sets {
                        section.line(format!(
                            "  RUN_TEST({}, {}, {});",
                            test.name, test.line_number, args
                        ));
                    }
                }
                _ => {
                    section.line(format!(
                        "  RUN_TEST({}, {}, RUN_TEST_NO_ARGS);",
                        test.name, test.line_number
                    ));
                }
            }
        }
    } else {
        for test in &facts.tests {
            section.line(format!("  RUN_TEST({}, {});", test.name, test.line_number));
        }
    }
    section.blank();
    if has_mocks {
        section.line("  CMock_Guts_MemFreeFinal();");
    }
    section.line("  return suite_teardown(HuntEnd());");
    section.line("}");
    section
}

fn resolve_main_name(input_file: &str, config: &RunnerConfig) -> String {
    match &config.main_name {
        MainName::Fixed(name) => name.clone(),
        MainName::Auto => format!("main_{}", input_file.replace(".c", "")),
    }
}

fn export_prefix(config: &RunnerConfig) -> String {
    if config.main_export_decl.is_empty() {
        String::new()
    } else {
        format!("{} ", config.main_export_decl)
    }
}
