//! File round-trip tests for the generator facade

use std::fs;

use huntgen::{RunnerConfig, RunnerGenerator};

#[test]
fn run_file_writes_runner_and_reports_used_files() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("test_adder.c");
    let output = tmp.path().join("test_adder_Runner.c");
    fs::write(
        &input,
        "#include \"adder.h\"\nTEST_FILE(\"adder_helpers.c\")\n\nvoid testAdds(void)\n{\n}\n",
    )
    .unwrap();

    let generator = RunnerGenerator::new(RunnerConfig::default());
    let used = generator.run_file(&input, &output).unwrap();

    let runner = fs::read_to_string(&output).unwrap();
    assert!(runner.starts_with("/* AUTOGENERATED FILE. DO NOT EDIT. */\n"));
    assert!(runner.contains("  RUN_TEST(testAdds, 4);"));

    assert_eq!(
        used,
        [
            input.display().to_string(),
            output.display().to_string(),
            "adder.c".to_string(),
            "adder_helpers.c".to_string(),
        ]
    );
}

#[test]
fn run_file_writes_companion_header_when_configured() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("test_io.c");
    let output = tmp.path().join("test_io_Runner.c");
    let header = tmp.path().join("test_io_Runner.h");
    fs::write(&input, "void testReads(void)\n{\n}\n").unwrap();

    let config = RunnerConfig {
        header_file: Some(header.display().to_string()),
        ..RunnerConfig::default()
    };
    RunnerGenerator::new(config).run_file(&input, &output).unwrap();

    let header_text = fs::read_to_string(&header).unwrap();
    assert!(header_text.contains("void testReads(void);"));
}

#[test]
fn missing_input_file_is_a_fatal_error() {
    let tmp = tempfile::tempdir().unwrap();
    let generator = RunnerGenerator::new(RunnerConfig::default());
    let err = generator
        .run_file(&tmp.path().join("nope.c"), &tmp.path().join("out.c"))
        .unwrap_err();
    assert!(err.to_string().contains("failed to read"));
}

#[test]
fn invalid_utf8_input_does_not_abort_the_run() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("test_latin1.c");
    let output = tmp.path().join("test_latin1_Runner.c");
    // ISO-8859-1 comment bytes that are not valid UTF-8
    let mut bytes = b"// caf\xe9\nvoid testAccented(void)\n{\n}\n".to_vec();
    bytes.push(b'\n');
    fs::write(&input, bytes).unwrap();

    let generator = RunnerGenerator::new(RunnerConfig::default());
    generator.run_file(&input, &output).unwrap();
    let runner = fs::read_to_string(&output).unwrap();
    assert!(runner.contains("  RUN_TEST(testAccented, 2);"));
}
