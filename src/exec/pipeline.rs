// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 logscout contributors

//! Pipeline runner
//!
//! Executes a chain of commands connected by OS pipes, Unix-shell style.
//! Stage *i*'s stdout feeds stage *i+1*'s stdin; the first stage reads
//! nothing. Every stage's stderr is discarded except the last, which is
//! captured along with its stdout and exit status. Intermediate failures are
//! not detected: only the final stage's exit status is inspected.

use std::process::Stdio;

use tokio::process::{ChildStdout, Command};
use tracing::debug;

use super::{render_pipeline, CommandSpec, PipelineOutput};
use crate::errors::{LogscoutError, LogscoutResult};

/// Run a pipeline of commands and capture the final stage's output
///
/// Blocks until the final process exits and its streams are drained. There
/// is no timeout: a hung final command hangs the caller. Launch failure of
/// any stage is fatal; a stage that launches but exits nonzero is only
/// observable when it is the final stage.
pub async fn run_pipeline(stages: &[CommandSpec]) -> LogscoutResult<PipelineOutput> {
    debug!("running `{}`", render_pipeline(stages));

    let last = stages.len().saturating_sub(1);
    let mut upstream: Option<ChildStdout> = None;
    let mut final_child = None;

    for (i, spec) in stages.iter().enumerate() {
        let mut command = Command::new(spec.program());
        command.args(&spec.argv[1..]);
        command.stdout(Stdio::piped());
        command.stderr(if i == last { Stdio::piped() } else { Stdio::null() });
        command.stdin(match upstream.take() {
            Some(out) => out.try_into().map_err(|e: std::io::Error| LogscoutError::Io {
                message: e.to_string(),
            })?,
            None => Stdio::null(),
        });

        let mut child = command
            .spawn()
            .map_err(|e| LogscoutError::spawn(spec.program(), &e))?;

        if i == last {
            final_child = Some(child);
        } else {
            // Earlier stages run concurrently and are reaped in the
            // background once they finish writing into the pipe.
            upstream = child.stdout.take();
        }
    }

    let Some(final_child) = final_child else {
        return Err(LogscoutError::Io {
            message: "empty pipeline".to_string(),
        });
    };

    let output = final_child.wait_with_output().await?;

    Ok(PipelineOutput {
        stdout: decode(&output.stdout),
        stderr: decode(&output.stderr),
        code: output.status.code().unwrap_or(-1),
    })
}

/// Decode a captured stream: `None` for no bytes, otherwise lossy UTF-8 with
/// trailing whitespace stripped
fn decode(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(bytes).trim_end().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::cmd;

    #[tokio::test]
    async fn test_single_command_captures_stdout() {
        let result = run_pipeline(&[cmd(&["echo", "hello"])]).await.unwrap();
        assert_eq!(result.stdout.as_deref(), Some("hello"));
        assert_eq!(result.stderr, None);
        assert_eq!(result.code, 0);
    }

    #[tokio::test]
    async fn test_single_command_exit_code() {
        let result = run_pipeline(&[cmd(&["sh", "-c", "exit 3"])]).await.unwrap();
        assert_eq!(result.code, 3);
        assert!(!result.success());
        assert_eq!(result.stdout, None);
    }

    #[tokio::test]
    async fn test_final_stderr_is_captured() {
        let result = run_pipeline(&[cmd(&["sh", "-c", "echo oops >&2; exit 1"])])
            .await
            .unwrap();
        assert_eq!(result.stderr.as_deref(), Some("oops"));
        assert_eq!(result.code, 1);
    }

    #[tokio::test]
    async fn test_two_stage_chain() {
        let result = run_pipeline(&[
            cmd(&["echo", "hello world"]),
            cmd(&["tr", "a-z", "A-Z"]),
        ])
        .await
        .unwrap();
        assert_eq!(result.stdout.as_deref(), Some("HELLO WORLD"));
        assert_eq!(result.code, 0);
    }

    #[tokio::test]
    async fn test_intermediate_stderr_is_discarded() {
        let result = run_pipeline(&[
            cmd(&["sh", "-c", "echo noise >&2; echo data"]),
            cmd(&["cat"]),
        ])
        .await
        .unwrap();
        assert_eq!(result.stdout.as_deref(), Some("data"));
        assert_eq!(result.stderr, None);
        assert_eq!(result.code, 0);
    }

    #[tokio::test]
    async fn test_result_reflects_only_final_stage() {
        // An upstream failure is invisible when the final stage tolerates
        // empty input.
        let result = run_pipeline(&[cmd(&["sh", "-c", "exit 7"]), cmd(&["cat"])])
            .await
            .unwrap();
        assert_eq!(result.code, 0);
        assert_eq!(result.stdout, None);
    }

    #[tokio::test]
    async fn test_upstream_output_only_changes_final_stdout() {
        let a = run_pipeline(&[cmd(&["echo", "foo"]), cmd(&["cat"])])
            .await
            .unwrap();
        let b = run_pipeline(&[cmd(&["echo", "bar"]), cmd(&["cat"])])
            .await
            .unwrap();
        assert_eq!(a.code, b.code);
        assert_eq!(a.stderr, b.stderr);
        assert_ne!(a.stdout, b.stdout);
    }

    #[tokio::test]
    async fn test_empty_stdout_is_marked_absent() {
        let result = run_pipeline(&[cmd(&["true"])]).await.unwrap();
        assert_eq!(result.stdout, None);
        assert_eq!(result.code, 0);
    }

    #[tokio::test]
    async fn test_trailing_newline_stripped() {
        let result = run_pipeline(&[cmd(&["printf", "value\n"])]).await.unwrap();
        assert_eq!(result.stdout.as_deref(), Some("value"));
    }

    #[tokio::test]
    async fn test_missing_executable_is_fatal() {
        let err = run_pipeline(&[cmd(&["logscout-no-such-binary"])])
            .await
            .unwrap_err();
        assert!(matches!(err, LogscoutError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_three_stage_chain() {
        let result = run_pipeline(&[
            cmd(&["printf", "one\ntwo\nthree\n"]),
            cmd(&["grep", "t"]),
            cmd(&["head", "-n", "1"]),
        ])
        .await
        .unwrap();
        assert_eq!(result.stdout.as_deref(), Some("two"));
    }
}
