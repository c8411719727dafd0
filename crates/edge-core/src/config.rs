//! ESI rendering configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::routing::DEFAULT_SEGMENT;

/// Request header a surrogate cache sends to announce itself.
pub const DEFAULT_TRIGGER_HEADER: &str = "X_VARNISH";

/// Response header telling the surrogate the page contains ESI tags.
pub const DEFAULT_ANNOUNCE_HEADER: &str = "esi-enabled: 1";

/// Defaults applied by the fragment renderer.
///
/// An empty `trigger_header` disables ESI entirely; an empty
/// `announce_header` suppresses the response header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EsiConfig {
    /// Controller used when none is given.
    #[serde(default = "default_segment")]
    pub default_controller: String,

    /// Action used when none is given.
    #[serde(default = "default_segment")]
    pub default_action: String,

    /// Request header whose presence selects ESI output.
    #[serde(default = "default_trigger_header")]
    pub trigger_header: String,

    /// Raw `Name: value` header emitted alongside ESI output.
    #[serde(default = "default_announce_header")]
    pub announce_header: String,

    /// Base path the route table is mounted under.
    #[serde(default)]
    pub base_path: String,
}

fn default_segment() -> String {
    DEFAULT_SEGMENT.to_string()
}

fn default_trigger_header() -> String {
    DEFAULT_TRIGGER_HEADER.to_string()
}

fn default_announce_header() -> String {
    DEFAULT_ANNOUNCE_HEADER.to_string()
}

impl Default for EsiConfig {
    fn default() -> Self {
        Self {
            default_controller: default_segment(),
            default_action: default_segment(),
            trigger_header: default_trigger_header(),
            announce_header: default_announce_header(),
            base_path: String::new(),
        }
    }
}

impl EsiConfig {
    /// Load config from a file. `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            Self::from_toml_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Parse config from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Trigger header, or `None` when ESI is disabled.
    pub fn trigger_header(&self) -> Option<&str> {
        non_empty_header(&self.trigger_header)
    }

    /// Announce header, or `None` when it is suppressed.
    pub fn announce_header(&self) -> Option<&str> {
        non_empty_header(&self.announce_header)
    }
}

/// Trim a configured header name or line; blank means "not set".
pub fn non_empty_header(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
