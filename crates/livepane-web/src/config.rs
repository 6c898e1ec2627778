#![forbid(unsafe_code)]

//! Playground configuration as data.
//!
//! Tunables that would otherwise be constants (script debounce, default
//! layout, embed marker, preview background) collected into one
//! [`PlaygroundConfig`] that can be loaded from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # livepane.toml
//! script_debounce_ms = 750
//! default_layout = "1,4"
//! origin = "https://play.example.com"
//! ```
//!
//! ```rust,ignore
//! let config = PlaygroundConfig::from_toml_file("livepane.toml")?.validated()?;
//! ```
//!
//! # Defaults
//!
//! `PlaygroundConfig::default()` reproduces the stock playground: a one
//! second script debounce, all four standard panes, the `embed` path marker
//! and a `#333333` preview background.

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use livepane_core::ActiveSet;

/// Default quiet period before a script edit reaches the preview.
pub const DEFAULT_SCRIPT_DEBOUNCE_MS: u64 = 1000;
/// Upper bound accepted by [`PlaygroundConfig::validate`].
pub const MAX_SCRIPT_DEBOUNCE_MS: u64 = 60_000;

/// Runtime configuration for one playground instance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct PlaygroundConfig {
    /// Quiet period after the last script edit before the preview is
    /// recomposed, in milliseconds.
    pub script_debounce_ms: u64,

    /// Active-set used when the URL carries no usable layout field.
    pub default_layout: String,

    /// Leading path segment that marks embedded mode.
    pub embed_marker: String,

    /// CSS color of the preview document body.
    pub preview_background: String,

    /// Page origin (`scheme://host[:port]`) used to build share links.
    /// Hosts that know their origin at runtime may leave this unset and
    /// pass it in when building links.
    pub origin: Option<String>,

    /// Minimum width and height of the iframe in the embed snippet.
    pub embed_frame_min_size_px: u32,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            script_debounce_ms: DEFAULT_SCRIPT_DEBOUNCE_MS,
            default_layout: ActiveSet::DEFAULT.serialize(),
            embed_marker: "embed".to_owned(),
            preview_background: "#333333".to_owned(),
            origin: None,
            embed_frame_min_size_px: 500,
        }
    }
}

impl PlaygroundConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, PlaygroundConfigError> {
        toml::from_str(s).map_err(PlaygroundConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PlaygroundConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PlaygroundConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, PlaygroundConfigError> {
        serde_json::from_str(s).map_err(PlaygroundConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PlaygroundConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PlaygroundConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(1..=MAX_SCRIPT_DEBOUNCE_MS).contains(&self.script_debounce_ms) {
            errors.push(format!(
                "script_debounce_ms must be in 1..={MAX_SCRIPT_DEBOUNCE_MS}, got {}",
                self.script_debounce_ms
            ));
        }
        if ActiveSet::parse(&self.default_layout).is_none() {
            errors.push(format!(
                "default_layout must name at least one known pane, got {:?}",
                self.default_layout
            ));
        }
        if self.embed_marker.is_empty() {
            errors.push("embed_marker must not be empty".to_owned());
        } else if self.embed_marker.contains(['/', '|']) {
            errors.push(format!(
                "embed_marker must not contain '/' or '|', got {:?}",
                self.embed_marker
            ));
        }
        if self.preview_background.trim().is_empty() {
            errors.push("preview_background must not be empty".to_owned());
        }
        if let Some(origin) = &self.origin
            && (origin.is_empty() || origin.ends_with('/'))
        {
            errors.push(format!(
                "origin must be non-empty without a trailing '/', got {origin:?}"
            ));
        }
        if self.embed_frame_min_size_px == 0 {
            errors.push("embed_frame_min_size_px must be > 0".to_owned());
        }

        errors
    }

    /// Consume the config, returning it only if [`validate`](Self::validate)
    /// reports no errors.
    pub fn validated(self) -> Result<Self, PlaygroundConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(PlaygroundConfigError::Validation(errors))
        }
    }

    #[must_use]
    pub const fn script_debounce(&self) -> Duration {
        Duration::from_millis(self.script_debounce_ms)
    }

    /// Active-set to fall back to when the URL has none.
    #[must_use]
    pub fn default_active(&self) -> ActiveSet {
        ActiveSet::parse_or_default(&self.default_layout)
    }
}

/// Errors that can occur when loading a playground configuration.
#[derive(Debug)]
pub enum PlaygroundConfigError {
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

impl core::fmt::Display for PlaygroundConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
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

impl std::error::Error for PlaygroundConfigError {
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
