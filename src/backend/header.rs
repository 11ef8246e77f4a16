//! Companion header emission
//!
//! A second, optional pure emission: an include-guarded header declaring one
//! prototype per discovered test, plus the framework/mock headers and the
//! merged include list, so other translation units can call into the suite.

use crate::config::RunnerConfig;
use crate::frontend::SourceFacts;

use super::sections::{Section, render};
use super::{dedup_preserving_order, format_include, sanitize_c_identifier};

/// Render the companion header for one test file.
pub fn render_header(header_path: &str, facts: &SourceFacts, config: &RunnerConfig) -> String {
    render(&header_document(header_path, facts, config))
}

/// Build the ordered section list for the companion header.
pub fn header_document(
    header_path: &str,
    facts: &SourceFacts,
    config: &RunnerConfig,
) -> Vec<Section> {
    let guard = guard_name(header_path);

    let mut preamble = Section::new("guard");
    preamble.line("/* AUTOGENERATED FILE. DO NOT EDIT. */");
    preamble.line(format!("#ifndef _{guard}"));
    preamble.line(format!("#define _{guard}"));
    preamble.blank();

    let mut includes = Section::new("includes");
    includes.line(format!("#include \"{}.h\"", config.framework));
    if !facts.mocks.is_empty() {
        includes.line("#include \"cmock.h\"");
    }
    for include in dedup_preserving_order(&config.includes) {
        includes.line(format_include(&include));
    }
    for include in &facts.includes {
        includes.line(format_include(include));
    }
    includes.blank();

    let mut prototypes = Section::new("prototypes");
    for test in &facts.tests {
        match test.param_list.as_deref() {
            Some(params) if !params.is_empty() => {
                prototypes.line(format!("void {}({});", test.name, params));
            }
            _ => prototypes.line(format!("void {}(void);", test.name)),
        }
    }
    prototypes.line("#endif");
    prototypes.blank();

    vec![preamble, includes, prototypes]
}

/// Upper-cased include guard derived from the header's base filename.
fn guard_name(header_path: &str) -> String {
    let base = crate::frontend::includes::base_name(header_path);
    sanitize_c_identifier(base).to_uppercase()
}
