// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 logscout contributors

//! # logscout - Open OnDemand access log discovery
//!
//! `logscout` finds where an Open OnDemand portal's Apache access logs live
//! and what format they are written in, so a downstream collector can parse
//! and ship them.
//!
//! ## How it works
//!
//! Each log setting is resolved through a three-tier fallback:
//!
//! 1. **Live query** - ask the running HTTP daemon (`httpd -t -D
//!    DUMP_INCLUDES`) and parse its configuration files.
//! 2. **State file** - the value recorded by a previous run.
//! 3. **Default** - a hard-coded stock-install value.
//!
//! Whatever tier wins, the value is recorded back into the state file, so a
//! successful live query refreshes the cache and a failed one keeps the last
//! known good value.
//!
//! ## Quick Start
//!
//! ```bash
//! # Discover log settings, updating conf.ini in place
//! logscout
//!
//! # Point at a different daemon binary and state file
//! logscout --httpd /usr/sbin/apache2 --conf /etc/logscout/conf.ini
//!
//! # See what would be resolved without touching the state file
//! logscout --dry-run
//! ```

pub mod cli;
pub mod conf;
pub mod discovery;
pub mod errors;
pub mod exec;

// Re-export commonly used types
pub use conf::ConfStore;
pub use discovery::Discovery;
pub use errors::{LogscoutError, LogscoutResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
