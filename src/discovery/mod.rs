// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 logscout contributors

//! Log settings discovery
//!
//! The driver resolves, strictly in order, the path of the main Apache
//! configuration, the path of the Open OnDemand portal configuration, the
//! access log filename, and the access log format. Later lookups parse the
//! files found by earlier ones, so resolution is sequential by design.

mod filters;
mod query;
mod resolver;

pub use filters::{apply_filters, Filter};
pub use query::{Query, Source};
pub use resolver::{commit, resolve};

use crate::conf::ConfStore;
use crate::errors::LogscoutResult;
use crate::exec::CommandSpec;

/// State file keys for the resolved settings
pub const KEY_APACHE_CONF: &str = "apache_conf_path";
pub const KEY_PORTAL_CONF: &str = "ood_portal_conf_path";
pub const KEY_ACCESS_LOG: &str = "access_log_filename";
pub const KEY_LOG_FORMAT: &str = "access_log_format";

/// Stock-install defaults, used when both the live query and the state file
/// come up empty
pub const DEFAULT_APACHE_CONF: &str = "/etc/httpd/conf/httpd.conf";
pub const DEFAULT_PORTAL_CONF: &str = "/etc/httpd/conf.d/ood-portal.conf";
pub const DEFAULT_ACCESS_LOG: &str = "/etc/httpd/conf.d/ood-portal.conf";
/// Apache's stock `combined` format
pub const DEFAULT_LOG_FORMAT: &str =
    "%h %l %u %t \"%r\" %>s %b \"%{Referer}i\" \"%{User-agent}i\"";

/// The resolved log settings for one discovery run
#[derive(Debug, Clone)]
pub struct Discovery {
    pub apache_conf_path: String,
    pub ood_portal_conf_path: String,
    pub access_log_filename: String,
    pub access_log_format: String,
}

/// Locate the HTTP daemon binary, preferring whatever is on PATH
///
/// Falls back to the bare name so that a missing daemon surfaces as the
/// launch error of the live query rather than a separate failure mode.
pub fn default_httpd_bin() -> String {
    for name in ["httpd", "apache2"] {
        if let Ok(path) = which::which(name) {
            return path.to_string_lossy().into_owned();
        }
    }
    "httpd".to_string()
}

/// Ask the daemon for its active configuration includes and pick the path
/// on the first line matching `pattern`
fn dump_includes_query(httpd: &str, pattern: &str) -> LogscoutResult<Query> {
    Ok(
        Query::command(vec![CommandSpec::new([httpd, "-t", "-D", "DUMP_INCLUDES"])])
            .filter(Filter::matching(pattern)?)
            .filter(Filter::Field(2)),
    )
}

/// Pull the access log path out of the portal configuration: the quoted
/// argument of the uncommented `CustomLog` line for the `_access_` log
fn access_log_query(portal_conf: &str) -> LogscoutResult<Query> {
    Ok(Query::file(portal_conf)
        .filter(Filter::matching(r"^\s*[^#]*\bCustomLog\b")?)
        .filter(Filter::matching("_access_")?)
        .filter(Filter::Field(2))
        .filter(Filter::Delimited { delim: '"', field: 2 }))
}

/// Pull the format nickname (third argument) off the same `CustomLog` line
fn log_nickname_query(portal_conf: &str) -> LogscoutResult<Query> {
    Ok(Query::file(portal_conf)
        .filter(Filter::matching(r"^\s*[^#]*\bCustomLog\b")?)
        .filter(Filter::matching("_access_")?)
        .filter(Filter::Field(3)))
}

/// Look the nickname up against the `LogFormat` lines of the main Apache
/// configuration and extract the quoted format string
///
/// The format string itself contains escaped quotes, so those are swapped
/// out before taking the quoted segment and restored afterwards.
fn log_format_query(apache_conf: &str, nickname: &str) -> LogscoutResult<Query> {
    Ok(Query::file(apache_conf)
        .filter(Filter::matching(r"\bLogFormat\b")?)
        .filter(Filter::matching(&format!(r"\b{}\b", regex::escape(nickname)))?)
        .filter(Filter::replacing(r#"\\""#, "'")?)
        .filter(Filter::Delimited { delim: '"', field: 2 })
        .filter(Filter::replacing("'", "\"")?))
}

/// Resolve all log settings, recording every value into the store
///
/// `httpd` is the daemon binary used for the live queries. The store is
/// only mutated in memory; persisting it is the caller's call.
pub async fn discover(store: &mut ConfStore, httpd: &str) -> LogscoutResult<Discovery> {
    let apache_conf_path = resolve(
        store,
        KEY_APACHE_CONF,
        &dump_includes_query(httpd, r"^\s*\(\*\)")?,
        DEFAULT_APACHE_CONF,
    )
    .await?;

    let ood_portal_conf_path = resolve(
        store,
        KEY_PORTAL_CONF,
        &dump_includes_query(httpd, r"ood-portal\.conf")?,
        DEFAULT_PORTAL_CONF,
    )
    .await?;

    let access_log_filename = resolve(
        store,
        KEY_ACCESS_LOG,
        &access_log_query(&ood_portal_conf_path)?,
        DEFAULT_ACCESS_LOG,
    )
    .await?;

    // Two-step lookup: the CustomLog nickname selects which LogFormat line
    // of the Apache configuration carries the format string.
    let found_format = match log_nickname_query(&ood_portal_conf_path)?.run().await? {
        Some(nickname) => log_format_query(&apache_conf_path, &nickname)?.run().await?,
        None => None,
    };
    let access_log_format = commit(store, KEY_LOG_FORMAT, found_format, DEFAULT_LOG_FORMAT);

    Ok(Discovery {
        apache_conf_path,
        ood_portal_conf_path,
        access_log_filename,
        access_log_format,
    })
}
