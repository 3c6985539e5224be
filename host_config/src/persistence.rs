//! Host configuration persistence
//!
//! Configs are stored as a versioned JSON document so hosts can ship them
//! alongside their bundle.

use crate::{ConfigError, HostConfig};
use serde::{Deserialize, Serialize};

/// Serializable container for a host config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostConfigDocument {
    /// Version of the document format
    pub version: u32,
    pub config: HostConfig,
}

impl HostConfigDocument {
    /// Current version of the document format
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new(config: HostConfig) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            config,
        }
    }
}

/// Serializes a config to JSON bytes
pub fn serialize_config(config: &HostConfig) -> Result<Vec<u8>, ConfigError> {
    serde_json::to_vec_pretty(&HostConfigDocument::new(config.clone()))
        .map_err(|e| ConfigError::SerializationFailed(e.to_string()))
}

/// Deserializes and validates a config from JSON bytes
pub fn deserialize_config(bytes: &[u8]) -> Result<HostConfig, ConfigError> {
    let document: HostConfigDocument = serde_json::from_slice(bytes)
        .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;

    if document.version != HostConfigDocument::CURRENT_VERSION {
        return Err(ConfigError::UnsupportedVersion(document.version));
    }

    document.config.validate()?;
    Ok(document.config)
}

/// Loads a config, falling back to defaults on any error
pub fn load_config_safe(bytes: &[u8]) -> HostConfig {
    deserialize_config(bytes).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_carries_current_version() {
        let document = HostConfigDocument::new(HostConfig::default());
        assert_eq!(document.version, HostConfigDocument::CURRENT_VERSION);
    }

    #[test]
    fn test_serialized_config_loads_back() {
        let config = HostConfig::default()
            .with_entrypoint("/my/bundle/path", "myEntrypoint")
            .with_initial_route("/my/route");
        let bytes = serialize_config(&config).unwrap();
        assert_eq!(deserialize_config(&bytes).unwrap(), config);
    }

    #[test]
    fn test_unsupported_version() {
        let bytes = br#"{"version": 7, "config": {}}"#;
        assert_eq!(
            deserialize_config(bytes),
            Err(ConfigError::UnsupportedVersion(7))
        );
    }

    #[test]
    fn test_invalid_config_rejected_on_load() {
        let bytes = br#"{"version": 1, "config": {"initial_route": "no-slash"}}"#;
        assert_eq!(
            deserialize_config(bytes),
            Err(ConfigError::InvalidInitialRoute("no-slash".to_string()))
        );
    }

    #[test]
    fn test_malformed_json() {
        let result = deserialize_config(b"not json");
        assert!(matches!(result, Err(ConfigError::DeserializationFailed(_))));
    }

    #[test]
    fn test_load_safe_falls_back_to_defaults() {
        assert_eq!(load_config_safe(b"{"), HostConfig::default());
    }
}
