// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 logscout contributors

//! Discover command - resolve the log settings and rewrite the state file

use colored::Colorize;
use miette::Result;
use std::path::Path;

use crate::conf::{ConfStore, REQUIRED_SECTIONS};
use crate::discovery::{self, Discovery};

/// Run a discovery pass
pub async fn run(conf: &Path, httpd: Option<String>, dry_run: bool) -> Result<()> {
    let mut store = ConfStore::load(conf)?;

    // The downstream shipper's sections must pre-exist; abort before any
    // query runs so a misconfigured state file is left untouched.
    for section in REQUIRED_SECTIONS {
        store.require_section(section)?;
    }

    let httpd = httpd.unwrap_or_else(discovery::default_httpd_bin);
    let discovery = discovery::discover(&mut store, &httpd).await?;

    print_summary(&discovery);

    if dry_run {
        println!("{}", "Dry run - state file not rewritten".dimmed());
        return Ok(());
    }

    store.save(conf)?;
    println!("{} {}", "Recorded to".dimmed(), conf.display());

    Ok(())
}

fn print_summary(discovery: &Discovery) {
    println!();
    println!("{}", "Discovered log settings".bold());
    println!("{}", "═".repeat(50));
    println!("  {:<22} {}", "apache conf:".dimmed(), discovery.apache_conf_path);
    println!(
        "  {:<22} {}",
        "portal conf:".dimmed(),
        discovery.ood_portal_conf_path
    );
    println!(
        "  {:<22} {}",
        "access log:".dimmed(),
        discovery.access_log_filename
    );
    println!("  {:<22} {}", "log format:".dimmed(), discovery.access_log_format);
    println!();
}
