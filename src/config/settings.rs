//! Serializable provider settings.

use serde::{Deserialize, Serialize};

/// Settings for a source provider, as read from a JSON or YAML document.
///
/// ```yaml
/// auto_destroy: false
/// name: source::staging-cms
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Destroy the backing instance on close (default when unset)
    #[serde(default, alias = "auto-destroy", alias = "autoDestroy")]
    pub auto_destroy: Option<bool>,
    /// Provider name override
    #[serde(default)]
    pub name: Option<String>,
}

impl ProviderSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Parse settings from a YAML document.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }
}
