// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 logscout contributors

//! Discovery queries
//!
//! A query pairs a text source with a filter chain that narrows the text
//! down to a single value. The source is either a genuine external command
//! pipeline (the daemon diagnostic) or a file read; simple text stages live
//! in the filter chain, not in subprocesses.

use std::path::PathBuf;

use tracing::debug;

use super::filters::{apply_filters, Filter};
use crate::errors::LogscoutResult;
use crate::exec::{run_pipeline, CommandSpec};

/// Where a query's text comes from
#[derive(Debug, Clone)]
pub enum Source {
    /// Run an external pipeline and use the final stage's stdout
    Command(Vec<CommandSpec>),
    /// Read a file's contents
    File(PathBuf),
}

/// A value lookup: a source plus the filters that narrow it to one value
#[derive(Debug, Clone)]
pub struct Query {
    pub source: Source,
    pub filters: Vec<Filter>,
}

impl Query {
    /// Query over an external command pipeline
    pub fn command(stages: Vec<CommandSpec>) -> Self {
        Self {
            source: Source::Command(stages),
            filters: Vec::new(),
        }
    }

    /// Query over a file's contents
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::File(path.into()),
            filters: Vec::new(),
        }
    }

    /// Append a filter stage
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Run the query
    ///
    /// `Ok(None)` means "not found": the pipeline exited nonzero or wrote
    /// nothing, the file could not be read, or no line survived the filter
    /// chain. An empty-but-successful result is also treated as not found,
    /// so it falls through to the cached or default value. Only a command
    /// that cannot be launched at all is an error.
    pub async fn run(&self) -> LogscoutResult<Option<String>> {
        let text = match &self.source {
            Source::Command(stages) => {
                let output = run_pipeline(stages).await?;
                if !output.success() {
                    debug!("query pipeline exited {}", output.code);
                    return Ok(None);
                }
                match output.stdout {
                    Some(text) => text,
                    None => return Ok(None),
                }
            }
            Source::File(path) => match tokio::fs::read_to_string(path).await {
                Ok(text) => text,
                Err(e) => {
                    debug!("cannot read {}: {}", path.display(), e);
                    return Ok(None);
                }
            },
        };

        Ok(apply_filters(&text, &self.filters))
    }
}
