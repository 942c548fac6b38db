#![forbid(unsafe_code)]

//! Reader configuration: known content sources and placeholder labels.
//!
//! ```toml
//! sources = ["https://books.example.com/"]
//! pending_label = "{chapter}…"
//!
//! [nav]
//! home_label = "Search"
//! ```

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use nav_runtime::config::NavConfig;
#[cfg(feature = "config")]
use nav_runtime::config::NavConfigError;

/// Placeholder in [`ReaderConfig::pending_label`] replaced by the chapter name.
pub const CHAPTER_PLACEHOLDER: &str = "{chapter}";

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ReaderConfig {
    /// Main page urls of the content sources the reader accepts.
    pub sources: Vec<String>,
    /// Label given to a sibling chapter until its own name has loaded.
    pub pending_label: String,
    /// Navigation settings.
    pub nav: NavConfig,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            pending_label: format!("{CHAPTER_PLACEHOLDER}…"),
            nav: NavConfig::default(),
        }
    }
}

impl ReaderConfig {
    #[must_use]
    pub fn with_source(mut self, main_page_url: impl Into<String>) -> Self {
        self.sources.push(main_page_url.into());
        self
    }

    /// The configured source whose main page is `main_page_url`.
    #[must_use]
    pub fn active_source(&self, main_page_url: &str) -> Option<&str> {
        self.sources
            .iter()
            .map(String::as_str)
            .find(|url| *url == main_page_url)
    }

    /// Pending label for a sibling of `chapter_name`.
    #[must_use]
    pub fn pending_label_for(&self, chapter_name: &str) -> String {
        self.pending_label.replace(CHAPTER_PLACEHOLDER, chapter_name)
    }

    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.nav.validate();
        if self.sources.iter().any(|s| s.trim().is_empty()) {
            errors.push("sources must not contain empty urls".into());
        }
        errors
    }

    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, NavConfigError> {
        let config: Self = toml::from_str(s).map_err(NavConfigError::Toml)?;
        config.validated()
    }

    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, NavConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(NavConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, NavConfigError> {
        let config: Self = serde_json::from_str(s).map_err(NavConfigError::Json)?;
        config.validated()
    }

    #[cfg(feature = "config")]
    fn validated(self) -> Result<Self, NavConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(NavConfigError::Validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_source_matches_exact_url() {
        let config = ReaderConfig::default().with_source("https://a.example/");
        assert_eq!(config.active_source("https://a.example/"), Some("https://a.example/"));
        assert_eq!(config.active_source("https://b.example/"), None);
    }

    #[test]
    fn pending_label_substitutes_chapter() {
        let config = ReaderConfig {
            pending_label: "{chapter}的章节".into(),
            ..ReaderConfig::default()
        };
        assert_eq!(config.pending_label_for("第三章"), "第三章的章节");
        assert_eq!(ReaderConfig::default().pending_label_for("Ch. 3"), "Ch. 3…");
    }

    #[test]
    fn empty_source_rejected() {
        let config = ReaderConfig::default().with_source(" ");
        assert_eq!(config.validate().len(), 1);
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_with_nested_nav_table() {
        let config = ReaderConfig::from_toml_str(
            "sources = [\"https://a.example/\"]\n[nav]\nhome_label = \"搜索\"\n",
        )
        .unwrap();
        assert_eq!(config.sources, vec!["https://a.example/".to_string()]);
        assert_eq!(config.nav.home_label, "搜索");
        assert_eq!(config.nav.home_path, "/");
    }
}
