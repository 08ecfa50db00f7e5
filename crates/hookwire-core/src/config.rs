//! Policy-as-data configuration for the hook layer.
//!
//! Every field has a default matching the markup conventions the server
//! renders, so `HookConfig::default()` is a complete configuration. Config
//! documents only need the keys they override:
//!
//! ```
//! use hookwire_core::HookConfig;
//!
//! let cfg = HookConfig::from_json_str(r#"{"sections": {"lookahead": 24.0}}"#).unwrap();
//! assert_eq!(cfg.sections.lookahead, 24.0);
//! assert_eq!(cfg.sections.scroll_correction, 14.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Precedence rule when two query states share a key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
    /// The incoming value replaces the existing one.
    #[default]
    UpdatesWin,
    /// The existing value is retained; only new keys are added.
    CurrentWins,
}

/// Attribute names read from managed elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeNames {
    /// Chart id attribute.
    pub chart_id: String,
    /// Fallback id attribute stamped by the host framework.
    pub socket_id: String,
    /// Options diff payload for charts.
    pub chart_updates: String,
    /// Series rows payload for charts.
    pub chart_data: String,
    /// Placeholder text for enhanced selects.
    pub placeholder: String,
}

impl Default for AttributeNames {
    fn default() -> Self {
        Self {
            chart_id: "chart-id".into(),
            socket_id: "phx-socket-id".into(),
            chart_updates: "chart-updates".into(),
            chart_data: "chart-data".into(),
            placeholder: "placeholder".into(),
        }
    }
}

/// Section highlighter tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    /// Read-ahead added to the scroll position before comparing offsets.
    pub lookahead: f64,
    /// Subtracted from a heading offset when scrolling to it.
    pub scroll_correction: f64,
    /// Smooth-scroll animation length.
    pub scroll_duration_ms: u32,
    /// Tags indexed as section headings.
    pub heading_tags: Vec<String>,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            lookahead: 16.0,
            scroll_correction: 14.0,
            scroll_duration_ms: 200,
            heading_tags: ["h1", "h2", "h3", "h4", "h5"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Bulk selection form conventions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkConfig {
    /// Name of each hidden id field in the form mirror.
    pub mirror_field: String,
    /// Class prefix of action-specific extra-field groups.
    pub extra_field_prefix: String,
    /// Name of the bulk action select.
    pub action_field: String,
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            mirror_field: "ids[]".into(),
            extra_field_prefix: "extra-field-".into(),
            action_field: "bulk_action".into(),
        }
    }
}

/// Query-state editing.
///
/// Query edits accept either a [`MergePolicy`] or this config, so the
/// configured policy flows through without callers reading the field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub merge_policy: MergePolicy,
}

impl From<&QueryConfig> for MergePolicy {
    fn from(config: &QueryConfig) -> Self {
        config.merge_policy
    }
}

/// Complete hook-layer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    pub attributes: AttributeNames,
    pub sections: SectionConfig,
    pub bulk: BulkConfig,
    pub query: QueryConfig,
    /// Locale used for user-visible labels.
    pub locale: String,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            attributes: AttributeNames::default(),
            sections: SectionConfig::default(),
            bulk: BulkConfig::default(),
            query: QueryConfig::default(),
            locale: "en".into(),
        }
    }
}

impl HookConfig {
    /// Load from a JSON document; missing keys keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|err| ConfigError::Json(err.to_string()))
    }

    /// Load from a TOML document; missing keys keep their defaults.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|err| ConfigError::Toml(err.to_string()))
    }
}
