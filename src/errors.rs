//! Fatal error conditions for runner generation
//!
//! Everything recoverable (a line that almost looks like a test, a test whose
//! defining line cannot be found again, a duplicate test name) is handled
//! inline by the extraction pipeline and never surfaces here. This enum only
//! covers conditions that abort a run: unreadable inputs, unwritable outputs,
//! and broken configuration.

use std::io;

use thiserror::Error;

/// Fatal errors raised while generating a test runner.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The input test file could not be read.
    #[error("failed to read `{path}`: {source}")]
    ReadInput {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The runner or header output file could not be written.
    #[error("failed to write `{path}`: {source}")]
    WriteOutput {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A configuration file could not be read or parsed as YAML.
    #[error("failed to load configuration `{path}`: {reason}")]
    ConfigFile { path: String, reason: String },

    /// A configuration file parsed, but carries neither a `hunt` nor a
    /// legacy `cmock` section.
    #[error("no `hunt` or `cmock` section found in `{path}`")]
    MissingConfigSection { path: String },

    /// A config-derived regex fragment (test prefix, mock prefix/suffix)
    /// does not compile.
    #[error("invalid {what} pattern `{pattern}`: {reason}")]
    InvalidPattern {
        what: &'static str,
        pattern: String,
        reason: String,
    },

    /// A `--key=value` style override names a key that is not part of the
    /// configuration record.
    #[error("unknown configuration key `{0}`")]
    UnknownConfigKey(String),

    /// A `--key=value` style override carries a value the key cannot accept.
    #[error("invalid value `{value}` for configuration key `{key}`")]
    InvalidConfigValue { key: String, value: String },
}
