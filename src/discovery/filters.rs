// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 logscout contributors

//! In-process text filters
//!
//! The shell pipelines this tool replaces narrowed command output down to a
//! single value with `grep`, `awk '{print $n}'`, `cut -d X -f n`, and
//! `sed s///g`. Those stages are pure text transformations, so they are
//! modeled here as functions over lines instead of external processes,
//! which removes the quoting and portability hazards of shelling out.

use regex::Regex;

use crate::errors::LogscoutResult;

/// One text-transformation stage
#[derive(Debug, Clone)]
pub enum Filter {
    /// Keep lines matching the pattern (grep)
    Match(Regex),
    /// Extract the nth whitespace-separated field, 1-based (awk `{print $n}`)
    Field(usize),
    /// Extract the nth field after splitting on a delimiter, 1-based
    /// (cut `-d X -f n`); a line without the delimiter passes through whole
    Delimited { delim: char, field: usize },
    /// Replace every match of the pattern (sed `s/pat/with/g`)
    Replace { pattern: Regex, with: String },
}

impl Filter {
    /// Build a [`Filter::Match`] from a pattern string
    pub fn matching(pattern: &str) -> LogscoutResult<Self> {
        Ok(Self::Match(Regex::new(pattern)?))
    }

    /// Build a [`Filter::Replace`] from a pattern string
    pub fn replacing(pattern: &str, with: &str) -> LogscoutResult<Self> {
        Ok(Self::Replace {
            pattern: Regex::new(pattern)?,
            with: with.to_string(),
        })
    }

    /// Apply this filter to one line; `None` drops the line
    fn apply_line(&self, line: &str) -> Option<String> {
        match self {
            Self::Match(re) => re.is_match(line).then(|| line.to_string()),
            Self::Field(n) => Some(
                line.split_whitespace()
                    .nth(n.saturating_sub(1))
                    .unwrap_or("")
                    .to_string(),
            ),
            Self::Delimited { delim, field } => {
                let parts: Vec<&str> = line.split(*delim).collect();
                if parts.len() == 1 {
                    Some(line.to_string())
                } else {
                    Some(parts.get(field.saturating_sub(1)).copied().unwrap_or("").to_string())
                }
            }
            Self::Replace { pattern, with } => {
                Some(pattern.replace_all(line, with.as_str()).into_owned())
            }
        }
    }
}

/// Run a filter chain over the input lines and return the first surviving
/// non-empty line
///
/// The shell pipelines being modeled emit the found value as the sole line
/// of stdout; taking the first surviving line preserves that contract.
pub fn apply_filters(input: &str, filters: &[Filter]) -> Option<String> {
    let mut lines: Vec<String> = input.lines().map(str::to_string).collect();
    for filter in filters {
        lines = lines
            .iter()
            .filter_map(|line| filter.apply_line(line))
            .collect();
    }
    lines.into_iter().find(|line| !line.is_empty())
}
