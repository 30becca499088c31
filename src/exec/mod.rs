// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 logscout contributors

//! External process pipelines
//!
//! This module provides the pipeline runner used for live queries against
//! the HTTP daemon: an ordered chain of commands connected stdout-to-stdin,
//! of which only the final command's output is captured.

mod pipeline;

pub use pipeline::run_pipeline;

/// A single command in a pipeline: argv, with element 0 the executable
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub argv: Vec<String>,
}

impl CommandSpec {
    /// Create a command spec from anything yielding string-ish arguments
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
        }
    }

    /// The executable name, used in launch-failure messages
    pub fn program(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or("")
    }
}

/// Shorthand for building a [`CommandSpec`] from a slice of literals
pub fn cmd(argv: &[&str]) -> CommandSpec {
    CommandSpec::new(argv.iter().copied())
}

/// Captured result of the final command in a pipeline
///
/// `None` in `stdout`/`stderr` marks a stream that produced no bytes at all.
/// Non-empty streams are decoded as UTF-8 (lossily) with trailing whitespace
/// stripped.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub code: i32,
}

impl PipelineOutput {
    /// Whether the final command exited 0
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Render a pipeline the way a shell would show it, for log lines
pub fn render_pipeline(stages: &[CommandSpec]) -> String {
    stages
        .iter()
        .map(|s| s.argv.join(" "))
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_spec_program() {
        let spec = cmd(&["httpd", "-t", "-D", "DUMP_INCLUDES"]);
        assert_eq!(spec.program(), "httpd");
        assert_eq!(spec.argv.len(), 4);
    }

    #[test]
    fn test_render_pipeline() {
        let stages = vec![cmd(&["echo", "hi"]), cmd(&["tr", "a-z", "A-Z"])];
        assert_eq!(render_pipeline(&stages), "echo hi | tr a-z A-Z");
    }
}
