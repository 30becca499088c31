// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 logscout contributors

//! Three-tier value resolution
//!
//! Each log setting is resolved live query first, then from the value a
//! previous run recorded in the state file, then from a hard-coded default.
//! Whichever tier wins, the value is written back into the `[main]` section
//! of the store so the next run starts from it.

use tracing::debug;

use super::query::Query;
use crate::conf::{ConfStore, MAIN_SECTION};
use crate::errors::LogscoutResult;

/// Resolve one setting through the query / cached / default tiers and record
/// the result in the store
///
/// Query launch failures propagate; a query that merely finds nothing falls
/// through to the lower tiers.
pub async fn resolve(
    store: &mut ConfStore,
    key: &str,
    query: &Query,
    default: &str,
) -> LogscoutResult<String> {
    debug!("resolving {}", key);
    let found = query.run().await?;
    Ok(commit(store, key, found, default))
}

/// The fallback tiers below the live query, split out so callers that run
/// multi-step lookups themselves can still feed the result through the same
/// cache-then-default chain
pub fn commit(
    store: &mut ConfStore,
    key: &str,
    found: Option<String>,
    default: &str,
) -> String {
    let value = match found {
        Some(value) => {
            debug!("got {} from live query: {}", key, value);
            value
        }
        None => match store.get(MAIN_SECTION, key) {
            Some(cached) => {
                let cached = cached.to_string();
                debug!("got {} from state file: {}", key, cached);
                cached
            }
            None => {
                debug!("using default for {}: {}", key, default);
                default.to_string()
            }
        },
    };

    // A fresh query result overwrites any stale cached value; a fallback
    // value is re-recorded unchanged.
    store.set(MAIN_SECTION, key, &value);
    value
}
