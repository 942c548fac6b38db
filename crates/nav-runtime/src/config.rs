#![forbid(unsafe_code)]

//! Navigation configuration.
//!
//! [`NavConfig`] holds the home entry and href rendering used by
//! [`HistoryStore`](crate::history::HistoryStore). With the `config` feature
//! it can be loaded from TOML or JSON at startup:
//!
//! ```toml
//! home_path = "/"
//! home_label = "Search"
//! href_style = "hash"
//! ```
//!
//! ```rust,ignore
//! let config = NavConfig::from_toml_file("reader-nav.toml")?;
//! ```

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// Default label of the home breadcrumb.
pub const DEFAULT_HOME_LABEL: &str = "Search";

/// How a location is rendered as a link target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum HrefStyle {
    /// `#/novel?novelId=7`
    #[default]
    Hash,
    /// `/novel?novelId=7`
    Browser,
}

/// Configuration for the navigation history store.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct NavConfig {
    /// Pathname of the home entry. Must start with `/`.
    pub home_path: String,
    /// Breadcrumb label of the home entry.
    pub home_label: String,
    /// Link rendering for breadcrumbs.
    pub href_style: HrefStyle,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            home_path: "/".to_string(),
            home_label: DEFAULT_HOME_LABEL.to_string(),
            href_style: HrefStyle::Hash,
        }
    }
}

impl NavConfig {
    #[must_use]
    pub fn with_home_label(mut self, label: impl Into<String>) -> Self {
        self.home_label = label.into();
        self
    }

    #[must_use]
    pub fn with_href_style(mut self, style: HrefStyle) -> Self {
        self.href_style = style;
        self
    }

    /// Load from a TOML string and validate.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, NavConfigError> {
        let config: Self = toml::from_str(s).map_err(NavConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, NavConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(NavConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string and validate.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, NavConfigError> {
        let config: Self = serde_json::from_str(s).map_err(NavConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, NavConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(NavConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all fields. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.home_path.starts_with('/') {
            errors.push(format!(
                "home_path must start with '/', got {:?}",
                self.home_path
            ));
        }
        if self.home_path.contains(['?', '#']) {
            errors.push("home_path must not carry a query or fragment".into());
        }
        if self.home_label.trim().is_empty() {
            errors.push("home_label must not be empty".into());
        }
        errors
    }

    /// Return `self` if valid, otherwise a [`NavConfigError::Validation`].
    pub fn validated(self) -> Result<Self, NavConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(NavConfigError::Validation(errors))
        }
    }
}

/// Errors that can occur when loading a navigation configuration.
#[derive(Debug)]
pub enum NavConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for NavConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for NavConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
