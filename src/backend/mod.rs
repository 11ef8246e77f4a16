//! Deterministic C emission for generated runners
//!
//! The backend is a pure transformation: given the extracted
//! [`SourceFacts`](crate::frontend::SourceFacts) and a
//! [`RunnerConfig`](crate::config::RunnerConfig), it produces the runner
//! translation unit and, on request, a companion header. Identical inputs
//! produce identical output.
//!
//! ## Modules
//!
//! - `sections` - the section IR and its renderer
//! - `runner` - runner translation unit builders
//! - `header` - companion header builders

pub mod header;
pub mod runner;
pub mod sections;

pub use header::render_header;
pub use runner::render_runner;
pub use sections::{Section, render};

/// Make a filename usable as part of a C identifier: every character
/// outside `[A-Za-z0-9_]` becomes an underscore.
pub(crate) fn sanitize_c_identifier(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Emit one include directive. Angle-bracket includes pass through; plain
/// names are quoted with a single `.h` suffix.
pub(crate) fn format_include(include: &str) -> String {
    if include.contains('<') {
        format!("#include {include}")
    } else {
        format!("#include \"{}.h\"", include.replace(".h", ""))
    }
}

/// First occurrence wins; used for the configured extra-include list, which
/// is deduplicated unlike the includes found in the test file.
pub(crate) fn dedup_preserving_order(items: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert(item.as_str()))
        .cloned()
        .collect()
}
