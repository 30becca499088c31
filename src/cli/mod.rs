// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 logscout contributors

//! CLI definition and the discover command
//!
//! logscout does one thing, so the surface is a handful of flags rather
//! than subcommands.

pub mod discover;

use clap::Parser;
use std::path::PathBuf;

/// Open OnDemand access log discovery
///
/// Finds where the portal's Apache access logs live and what format they
/// use, recording the results in an INI-style state file.
#[derive(Parser, Debug)]
#[clap(
    name = "logscout",
    version,
    about = "Discovers the location and format of Open OnDemand portal access logs",
    long_about = None,
    after_help = "Examples:\n\
        logscout                                Discover using conf.ini\n\
        logscout --conf /etc/logscout/conf.ini  Use a different state file\n\
        logscout --httpd /usr/sbin/apache2      Query a specific daemon binary\n\
        logscout --dry-run                      Resolve without rewriting the state file"
)]
pub struct Cli {
    /// Path to the state file
    #[clap(short, long, default_value = "conf.ini", value_name = "PATH")]
    pub conf: PathBuf,

    /// HTTP daemon binary to query (defaults to httpd or apache2 on PATH)
    #[clap(long, value_name = "BIN")]
    pub httpd: Option<String>,

    /// Resolve values but do not rewrite the state file
    #[clap(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[clap(short, long)]
    pub verbose: bool,
}
