//! Include directive and mock dependency extraction
//!
//! Works on comment-stripped original text (literal shielding is not needed
//! here - include directives cannot span lines and their quoting is simple).
//! Three kinds of dependency are collected, each in first-occurrence order
//! with no deduplication:
//!
//! - local includes (`#include "Thing.h"`, extension stripped),
//! - system includes (`#include <stdio.h>`, re-wrapped in angle brackets),
//! - link-only companions (`TEST_FILE("support.c")`, extension stripped).
//!
//! Mocks are local or system includes whose base filename matches the
//! configured mock naming convention; they get lifecycle management in the
//! generated runner instead of a plain `#include`.

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::RunnerConfig;
use crate::errors::GeneratorError;
use crate::frontend::scrubber;

lazy_static! {
    static ref LOCAL_INCLUDE: Regex =
        Regex::new(r#"(?m)^\s*#include\s+"\s*(.+)\.[hH]\s*""#).unwrap();
    static ref SYSTEM_INCLUDE: Regex = Regex::new(r"(?m)^\s*#include\s+<\s*(.+)\s*>").unwrap();
    static ref LINK_ONLY: Regex =
        Regex::new(r#"(?m)^TEST_FILE\(\s*"\s*(.+)\.[cC]\w*\s*""#).unwrap();
}

/// Include directives recovered from a test source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeSet {
    /// Quoted includes, `.h`/`.H` suffix stripped.
    pub local: Vec<String>,
    /// Angle-bracket includes, kept wrapped (`<stdio.h>`).
    pub system: Vec<String>,
    /// `TEST_FILE(...)` companion sources, extension stripped.
    pub link_only: Vec<String>,
}

impl IncludeSet {
    /// Local then system includes, the candidate pool for mock
    /// classification.
    pub fn headers(&self) -> Vec<String> {
        self.local.iter().chain(self.system.iter()).cloned().collect()
    }
}

/// Extract every include directive from `source`.
pub fn extract_includes(source: &str) -> IncludeSet {
    let stripped = scrubber::strip_comments(source);
    IncludeSet {
        local: LOCAL_INCLUDE
            .captures_iter(&stripped)
            .map(|c| c[1].to_string())
            .collect(),
        system: SYSTEM_INCLUDE
            .captures_iter(&stripped)
            .map(|c| format!("<{}>", &c[1]))
            .collect(),
        link_only: LINK_ONLY
            .captures_iter(&stripped)
            .map(|c| c[1].to_string())
            .collect(),
    }
}

/// Split header includes into mocks and plain includes.
///
/// A header is a mock when its base filename starts with the configured
/// prefix and ends with the configured suffix, case-insensitively; an empty
/// suffix matches anything. Plain includes that name the framework itself
/// (`hunt`, or `cmock` for mock support) are dropped so the runner never
/// re-includes its own framework through the test file.
pub fn classify_mocks(
    headers: &[String],
    config: &RunnerConfig,
) -> Result<(Vec<String>, Vec<String>), GeneratorError> {
    let pattern = format!("(?i)^{}.*{}$", config.mock_prefix, config.mock_suffix);
    let mock_name = Regex::new(&pattern).map_err(|e| GeneratorError::InvalidPattern {
        what: "mock naming",
        pattern: pattern.clone(),
        reason: e.to_string(),
    })?;

    let mut mocks = Vec::new();
    let mut plain = Vec::new();
    for header in headers {
        if mock_name.is_match(base_name(header)) {
            mocks.push(header.clone());
        } else {
            plain.push(header.clone());
        }
    }
    plain.retain(|inc| !inc.contains("hunt") && !inc.contains("cmock"));
    Ok((mocks, plain))
}

/// Final path component; include paths use forward slashes.
pub(crate) fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
