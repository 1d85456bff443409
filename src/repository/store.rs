use std::path::Path;

use crate::error::{NavigatorError, Result};

/// One `key = locator` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryEntry {
    pub key: String,
    pub locator: String,
}

/// Symbolic names for locators, in file order.
///
/// Lookup is by substring: the first entry whose key *contains* the
/// requested name wins, so `ok` also matches `btn_ok_large` if that line
/// comes first. Unknown names are echoed back as the locator itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Repository {
    entries: Vec<RepositoryEntry>,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `key = value` lines, splitting on the first `=`.
    ///
    /// Lines without `=` are skipped.
    pub fn parse(text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let entries = text
            .lines()
            .filter_map(|line| line.split_once('='))
            .map(|(key, locator)| RepositoryEntry {
                key: key.trim().to_string(),
                locator: locator.trim().to_string(),
            })
            .collect();
        Self { entries }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text =
            std::fs::read_to_string(path).map_err(|e| NavigatorError::SourceUnreadable {
                what: "repository",
                path: path.display().to_string(),
                source: e,
            })?;
        Ok(Self::parse(&text))
    }

    pub fn insert(&mut self, key: &str, locator: &str) {
        self.entries.push(RepositoryEntry {
            key: key.to_string(),
            locator: locator.to_string(),
        });
    }

    /// First entry whose key contains `name`.
    pub fn find(&self, name: &str) -> Option<&RepositoryEntry> {
        self.entries.iter().find(|entry| entry.key.contains(name))
    }

    /// Locator for `name`, or `name` itself when nothing matches.
    pub fn lookup<'a>(&'a self, name: &'a str) -> &'a str {
        self.find(name)
            .map(|entry| entry.locator.as_str())
            .unwrap_or(name)
    }

    pub fn entries(&self) -> &[RepositoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
