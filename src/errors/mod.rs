// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 logscout contributors

//! Error types
//!
//! Only a handful of failures are fatal to a discovery run: a missing or
//! malformed state file, and a pipeline command that cannot be launched at
//! all. Everything else (a daemon query that exits nonzero, a portal config
//! that cannot be read) degrades into the cached-value or default tiers and
//! never surfaces as an error.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for logscout operations
pub type LogscoutResult<T> = Result<T, LogscoutError>;

/// Main error type for logscout
#[derive(Error, Debug, Diagnostic)]
pub enum LogscoutError {
    #[error("State file not found: {}", path.display())]
    #[diagnostic(
        code(logscout::conf_not_found),
        help(
            "logscout records discovered values in an INI-style state file. \
             Create one containing [main], [logs], and [runs] sections."
        )
    )]
    ConfNotFound { path: PathBuf },

    #[error("Missing required section [{section}] in the state file")]
    #[diagnostic(
        code(logscout::missing_section),
        help("Add a [{section}] section to the state file.")
    )]
    MissingSection { section: String },

    #[error("Failed to launch '{command}': {error}")]
    #[diagnostic(
        code(logscout::spawn_failed),
        help("Check that '{command}' is installed and on PATH.")
    )]
    Spawn { command: String, error: String },

    #[error("Invalid pattern: {message}")]
    #[diagnostic(code(logscout::pattern))]
    Pattern { message: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(logscout::io_error))]
    Io { message: String },
}

impl From<std::io::Error> for LogscoutError {
    fn from(e: std::io::Error) -> Self {
        Self::Io { message: e.to_string() }
    }
}

impl From<regex::Error> for LogscoutError {
    fn from(e: regex::Error) -> Self {
        Self::Pattern { message: e.to_string() }
    }
}

impl LogscoutError {
    /// Create a spawn error for a command that could not be launched
    pub fn spawn(command: &str, error: &std::io::Error) -> Self {
        Self::Spawn {
            command: command.to_string(),
            error: error.to_string(),
        }
    }
}
