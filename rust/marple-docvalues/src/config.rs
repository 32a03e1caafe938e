//! Inspector configuration.

use std::path::Path;

use marple_common::{Error, Result, verify_arg};
use serde::{Deserialize, Serialize};

/// Encoding used when no preference has been persisted for a field.
pub const DEFAULT_ENCODING: &str = "utf8";

/// Preference category under which doc-values encodings are persisted.
pub const DOC_VALUES_CATEGORY: &str = "docvalues";

/// How responses of overlapping fetches are applied.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseOrdering {
    /// Every response is applied when it resolves; the last one to resolve
    /// determines the displayed state, even if it answers an older request.
    #[default]
    Arrival,
    /// A response is applied only if no newer request has been applied yet.
    /// Stale responses are discarded.
    LatestRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    /// Encoding requested for a field without a persisted preference.
    pub default_encoding: String,

    /// Category under which encoding preferences are read and written.
    pub preference_category: String,

    pub response_ordering: ResponseOrdering,

    /// Maximum number of ids a doc list filter expands to.
    pub max_doclist_len: usize,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        InspectorConfig {
            default_encoding: DEFAULT_ENCODING.to_string(),
            preference_category: DOC_VALUES_CATEGORY.to_string(),
            response_ordering: ResponseOrdering::default(),
            max_doclist_len: marple_ranges::DEFAULT_MAX_DOCLIST_LEN,
        }
    }
}

impl InspectorConfig {
    pub fn from_json_str(json: &str) -> Result<InspectorConfig> {
        let config: InspectorConfig =
            serde_json::from_str(json).map_err(|e| Error::json("inspector config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<InspectorConfig> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::io(path.display().to_string(), e))?;
        InspectorConfig::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        verify_arg!(default_encoding, !self.default_encoding.is_empty());
        verify_arg!(preference_category, !self.preference_category.is_empty());
        verify_arg!(max_doclist_len, self.max_doclist_len > 0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InspectorConfig::default();
        assert_eq!(config.default_encoding, "utf8");
        assert_eq!(config.preference_category, "docvalues");
        assert_eq!(config.response_ordering, ResponseOrdering::Arrival);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            InspectorConfig::from_json_str(r#"{"response_ordering": "latest_request"}"#).unwrap();
        assert_eq!(config.response_ordering, ResponseOrdering::LatestRequest);
        assert_eq!(config.default_encoding, "utf8");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let err = InspectorConfig::from_json_str(r#"{"max_doclist_len": 0}"#).unwrap_err();
        assert!(err.to_string().contains("max_doclist_len"));
        assert!(InspectorConfig::from_json_str(r#"{"response_ordering": "random"}"#).is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inspector.json");
        std::fs::write(&path, r#"{"default_encoding": "hex"}"#).unwrap();
        let config = InspectorConfig::from_json_file(&path).unwrap();
        assert_eq!(config.default_encoding, "hex");
    }
}
