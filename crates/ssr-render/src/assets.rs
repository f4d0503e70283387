//! Build asset manifest.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ssr_core::ConfigError;

/// Entry used when the manifest lists no entries explicitly.
pub const DEFAULT_ENTRY: &str = "main";

/// Asset manifest describing the build output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assets {
    /// Build entries that contribute script/style tags, in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<String>>,
    /// Javascript bundle URL per entry.
    #[serde(default)]
    pub javascript: BTreeMap<String, String>,
    /// Stylesheet URL per entry.
    #[serde(default)]
    pub styles: BTreeMap<String, String>,
    /// Favicon URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Assets {
    /// Create an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the explicit entry list.
    pub fn with_entries<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries = Some(entries.into_iter().map(Into::into).collect());
        self
    }

    /// Add a javascript bundle for an entry.
    pub fn with_javascript(mut self, entry: impl Into<String>, url: impl Into<String>) -> Self {
        self.javascript.insert(entry.into(), url.into());
        self
    }

    /// Add a stylesheet for an entry.
    pub fn with_style(mut self, entry: impl Into<String>, url: impl Into<String>) -> Self {
        self.styles.insert(entry.into(), url.into());
        self
    }

    /// Set the favicon.
    pub fn with_icon(mut self, url: impl Into<String>) -> Self {
        self.icon = Some(url.into());
        self
    }

    /// The entries to emit tags for.
    ///
    /// Without an explicit list, falls back to [`DEFAULT_ENTRY`] only when a
    /// javascript bundle exists for it.
    pub fn resolve_entries(&self) -> Result<Vec<String>, ConfigError> {
        if let Some(entries) = &self.entries {
            return Ok(entries.clone());
        }
        if self.javascript.contains_key(DEFAULT_ENTRY) {
            return Ok(vec![DEFAULT_ENTRY.to_string()]);
        }
        Err(ConfigError::MissingAssetEntries)
    }

    /// Stylesheet URLs for the given entries, skipping entries without one.
    pub fn stylesheets<'a>(&'a self, entries: &'a [String]) -> impl Iterator<Item = &'a str> + 'a {
        entries
            .iter()
            .filter_map(|entry| self.styles.get(entry).map(String::as_str))
    }

    /// Javascript URLs for the given entries, skipping entries without one.
    pub fn scripts<'a>(&'a self, entries: &'a [String]) -> impl Iterator<Item = &'a str> + 'a {
        entries
            .iter()
            .filter_map(|entry| self.javascript.get(entry).map(String::as_str))
    }
}
