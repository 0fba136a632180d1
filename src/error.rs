//! Error types for tagwalk modules using thiserror.

use thiserror::Error;

/// Errors from running the system git binary.
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Failed to spawn git {subcommand}: {source}")]
    Spawn {
        subcommand: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {subcommand} exited with {}: {stderr}",
            code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    NonZeroExit {
        subcommand: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("git {subcommand} produced non-UTF-8 output")]
    InvalidUtf8 { subcommand: String },
}

/// Errors from reading and ordering tags.
#[derive(Error, Debug)]
pub enum TagError {
    #[error("Failed to list git tags: {0}")]
    Command(#[source] RunnerError),

    #[error("Invalid tag filter pattern '{pattern}': {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex_lite::Error,
    },

    #[error("Failed to parse tag date '{value}': {source}")]
    DateParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error(
        "Tag '{name}' is not a valid semantic version: {source}. \
         Pass a filter pattern that excludes non-version tags, or sort by date."
    )]
    InvalidVersion {
        name: String,
        #[source]
        source: semver::Error,
    },
}
