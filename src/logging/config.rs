use crate::logging::types::LogError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Key-value view handed to backend constructors.
///
/// Recognised keys are `type`, `location` and `reopen_interval`; anything
/// else is preserved in `extra` for backends that want it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<PathBuf>,
    /// Seconds between forced reopens of the destination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reopen_interval: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BackendConfig {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<PathBuf>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_reopen_interval(mut self, secs: u64) -> Self {
        self.reopen_interval = Some(secs);
        self
    }

    /// Parse a configuration from a JSON object.
    pub fn from_json(text: &str) -> Result<Self, LogError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, LogError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_recognised_and_extra_keys() {
        let conf = BackendConfig::from_json(
            r#"{"type":"file","location":"/var/log/app.log","reopen_interval":60,"owner":"ops"}"#,
        )
        .unwrap();
        assert_eq!(conf.kind.as_deref(), Some("file"));
        assert_eq!(conf.location, Some(PathBuf::from("/var/log/app.log")));
        assert_eq!(conf.reopen_interval, Some(60));
        assert_eq!(conf.extra.get("owner"), Some(&json!("ops")));
    }

    #[test]
    fn missing_keys_are_none() {
        let conf = BackendConfig::from_json("{}").unwrap();
        assert_eq!(conf, BackendConfig::default());
    }

    #[test]
    fn negative_interval_is_rejected() {
        let err = BackendConfig::from_json(r#"{"type":"file","reopen_interval":-5}"#).unwrap_err();
        assert!(matches!(err, LogError::Json(_)));
    }

    #[test]
    fn builder_matches_parsed_form() {
        let built = BackendConfig::new("file")
            .with_location("/tmp/x.log")
            .with_reopen_interval(1);
        let parsed =
            BackendConfig::from_json(r#"{"type":"file","location":"/tmp/x.log","reopen_interval":1}"#)
                .unwrap();
        assert_eq!(built, parsed);
    }

    #[test]
    fn loads_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logging.json");
        fs::write(
            &path,
            r#"{"type":"file","location":"/var/log/render.log","reopen_interval":86400}"#,
        )
        .unwrap();

        let conf = BackendConfig::load(&path).unwrap();
        assert_eq!(
            conf,
            BackendConfig::new("file")
                .with_location("/var/log/render.log")
                .with_reopen_interval(86400)
        );
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = BackendConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, LogError::Io(_)));
        assert!(err.is_io());
    }

    #[test]
    fn serialized_config_reads_back() {
        let mut conf = BackendConfig::new("file")
            .with_location("/tmp/app.log")
            .with_reopen_interval(30);
        conf.extra.insert("owner".into(), json!("ops"));

        let text = serde_json::to_string(&conf).unwrap();
        assert!(!text.contains("null"));
        assert_eq!(BackendConfig::from_json(&text).unwrap(), conf);

        let bare = serde_json::to_value(BackendConfig::new("null")).unwrap();
        assert_eq!(bare, json!({"type": "null"}));
    }
}
