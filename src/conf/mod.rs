// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 logscout contributors

//! State file store
//!
//! logscout keeps its discovered values, and the bookkeeping of the
//! downstream log shipper, in a single INI-style state file: `[section]`
//! headers, `key = value` lines, `#`/`;` comments. The store preserves
//! section and key order so a rewrite reproduces the file it loaded, and it
//! discards comments on load; the fixed explanatory header is re-emitted at
//! the top on every save.

use std::path::Path;

use crate::errors::{LogscoutError, LogscoutResult};

/// Comment header written at the top of the state file on every save
pub const CONF_HEADER: &str = "\
# This is the state file used by logscout.
# The values below are written/overwritten in-place when logscout runs and
# are used in future runs if logscout is otherwise unable to determine the
# log metadata values by querying the Apache configuration.
";

/// Section that holds resolved/cached values
pub const MAIN_SECTION: &str = "main";

/// Sections that must pre-exist in the state file; they belong to the
/// downstream log shipper and are read-only here
pub const REQUIRED_SECTIONS: &[&str] = &["logs", "runs"];

/// One `[name]` section and its entries, in file order
#[derive(Debug, Clone)]
struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

/// In-memory view of the state file
#[derive(Debug, Clone, Default)]
pub struct ConfStore {
    sections: Vec<Section>,
}

impl ConfStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the state file, failing fast if it cannot be read
    pub fn load(path: &Path) -> LogscoutResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|_| LogscoutError::ConfNotFound {
                path: path.to_path_buf(),
            })?;
        Ok(Self::parse(&content))
    }

    /// Parse INI-style text into a store
    ///
    /// Comments and blank lines are dropped. Lines before the first section
    /// header are ignored. A line without `=` becomes a key with an empty
    /// value.
    pub fn parse(content: &str) -> Self {
        let mut sections: Vec<Section> = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                sections.push(Section {
                    name: name.trim().to_string(),
                    entries: Vec::new(),
                });
                continue;
            }
            let Some(section) = sections.last_mut() else {
                continue;
            };
            match line.split_once('=') {
                Some((key, value)) => section
                    .entries
                    .push((key.trim().to_string(), value.trim().to_string())),
                None => section.entries.push((line.to_string(), String::new())),
            }
        }

        Self { sections }
    }

    /// Fail unless the named section exists
    pub fn require_section(&self, name: &str) -> LogscoutResult<()> {
        if self.sections.iter().any(|s| s.name == name) {
            Ok(())
        } else {
            Err(LogscoutError::MissingSection {
                section: name.to_string(),
            })
        }
    }

    /// Read a value; an absent section, absent key, or empty value all read
    /// as `None`
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.name == section)?
            .entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    /// Set a value, creating the section and key as needed; an existing key
    /// keeps its position
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        let idx = match self.sections.iter().position(|s| s.name == section) {
            Some(idx) => idx,
            None => {
                self.sections.push(Section {
                    name: section.to_string(),
                    entries: Vec::new(),
                });
                self.sections.len() - 1
            }
        };
        let entries = &mut self.sections[idx].entries;
        match entries.iter().position(|(k, _)| k == key) {
            Some(idx) => entries[idx].1 = value.to_string(),
            None => entries.push((key.to_string(), value.to_string())),
        }
    }

    /// Serialize all sections in stored order, without the header
    pub fn to_ini(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            out.push('[');
            out.push_str(&section.name);
            out.push_str("]\n");
            for (key, value) in &section.entries {
                out.push_str(key);
                out.push_str(" = ");
                out.push_str(value);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }

    /// Write the state file: fixed header comment, then every section
    pub fn save(&self, path: &Path) -> LogscoutResult<()> {
        let mut content = String::from(CONF_HEADER);
        content.push_str(&self.to_ini());
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "\
# a comment
[main]
apache_conf_path = /etc/httpd/conf/httpd.conf
empty_key =

[logs]

[runs]
last_run = 2025-01-01
";

    #[test]
    fn test_parse_and_get() {
        let store = ConfStore::parse(SAMPLE);
        assert_eq!(
            store.get("main", "apache_conf_path"),
            Some("/etc/httpd/conf/httpd.conf")
        );
        assert_eq!(store.get("runs", "last_run"), Some("2025-01-01"));
    }

    #[test]
    fn test_get_absence_semantics() {
        let store = ConfStore::parse(SAMPLE);
        // Absent key, absent section, and empty value all read as None.
        assert_eq!(store.get("main", "nope"), None);
        assert_eq!(store.get("nope", "nope"), None);
        assert_eq!(store.get("main", "empty_key"), None);
    }

    #[test]
    fn test_require_section() {
        let store = ConfStore::parse(SAMPLE);
        assert!(store.require_section("logs").is_ok());
        assert!(store.require_section("runs").is_ok());
        let err = store.require_section("uploads").unwrap_err();
        assert!(matches!(err, LogscoutError::MissingSection { .. }));
    }

    #[test]
    fn test_set_overwrites_in_place() {
        let mut store = ConfStore::parse(SAMPLE);
        store.set("main", "apache_conf_path", "/opt/httpd.conf");
        store.set("main", "new_key", "value");
        assert_eq!(store.get("main", "apache_conf_path"), Some("/opt/httpd.conf"));
        let ini = store.to_ini();
        // The overwritten key keeps its position above the new key.
        let pos_old = ini.find("apache_conf_path").unwrap();
        let pos_new = ini.find("new_key").unwrap();
        assert!(pos_old < pos_new);
    }

    #[test]
    fn test_set_creates_section() {
        let mut store = ConfStore::new();
        store.set("main", "key", "value");
        assert_eq!(store.get("main", "key"), Some("value"));
    }

    #[test]
    fn test_serialize_preserves_order() {
        let store = ConfStore::parse(SAMPLE);
        let ini = store.to_ini();
        let main = ini.find("[main]").unwrap();
        let logs = ini.find("[logs]").unwrap();
        let runs = ini.find("[runs]").unwrap();
        assert!(main < logs && logs < runs);
    }

    #[test]
    fn test_serialize_round_trip() {
        let store = ConfStore::parse(SAMPLE);
        let reparsed = ConfStore::parse(&store.to_ini());
        assert_eq!(store.to_ini(), reparsed.to_ini());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = ConfStore::load(&temp.path().join("conf.ini")).unwrap_err();
        assert!(matches!(err, LogscoutError::ConfNotFound { .. }));
    }

    #[test]
    fn test_save_writes_header() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("conf.ini");
        let store = ConfStore::parse(SAMPLE);
        store.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with(CONF_HEADER));
        assert!(written.contains("[main]"));
        assert!(written.contains("apache_conf_path = /etc/httpd/conf/httpd.conf"));
        // Comments from the loaded file are not carried over.
        assert!(!written.contains("a comment"));
    }
}
