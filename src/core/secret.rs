//! Secret domain type and its read-path projections.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::constants;

/// A namespaced, named key/value object with labels and annotations.
///
/// Identity is `(namespace, name)`. Data keys are unique; values are raw
/// bytes, carried base64-encoded on the wire. `version` is the store's
/// opaque concurrency token: assigned on reads, never sent back by the
/// engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    pub namespace: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,

    #[serde(default, with = "b64map", skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, Vec<u8>>,
}

impl Secret {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            version: None,
            labels: BTreeMap::new(),
            annotations: BTreeMap::new(),
            data: BTreeMap::new(),
        }
    }

    fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations.get(key).map(String::as_str)
    }

    /// Project into the description record used by the read path.
    pub fn describe(&self) -> SecretDescription {
        SecretDescription {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            service: self.label(constants::LABEL_APP).unwrap_or_default().to_string(),
            container: self
                .label(constants::LABEL_CONTAINER)
                .unwrap_or(constants::DEFAULT_CONTAINER)
                .to_string(),
            created: self.annotation(constants::ANNOTATION_CREATED).map(str::to_string),
            last_modified: self.annotation(constants::ANNOTATION_MODIFIED).map(str::to_string),
            data: self.data.clone(),
        }
    }
}

/// Human-facing projection of a fetched secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretDescription {
    pub namespace: String,
    pub name: String,
    /// Value of the `app` label.
    pub service: String,
    pub container: String,
    pub created: Option<String>,
    pub last_modified: Option<String>,
    pub data: BTreeMap<String, Vec<u8>>,
}

impl SecretDescription {
    /// Render a command line that would recreate this secret.
    ///
    /// Data values are rendered lossily when not valid UTF-8.
    pub fn to_create_command(&self) -> String {
        let mut cmd = format!(
            "warren create secret {} --namespace {} --container {}",
            self.service, self.namespace, self.container
        );
        for (key, value) in &self.data {
            let value = String::from_utf8_lossy(value);
            cmd.push_str(&format!(" --data '{key}={value}'"));
        }
        cmd
    }
}

/// Serialize byte-valued data maps as base64 strings on the wire.
mod b64map {
    use std::collections::BTreeMap;

    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(data: &BTreeMap<String, Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let encoded: BTreeMap<&str, String> = data
            .iter()
            .map(|(k, v)| (k.as_str(), STANDARD.encode(v)))
            .collect();
        encoded.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = BTreeMap::<String, String>::deserialize(deserializer)?;
        encoded
            .into_iter()
            .map(|(k, v)| {
                STANDARD
                    .decode(v.as_bytes())
                    .map(|bytes| (k, bytes))
                    .map_err(D::Error::custom)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Secret {
        let mut secret = Secret::new("platform", "my-credentials-default");
        secret.labels.insert(constants::LABEL_APP.into(), "my-credentials".into());
        secret
            .labels
            .insert(constants::LABEL_CONTAINER.into(), "default".into());
        secret
            .annotations
            .insert(constants::ANNOTATION_CREATED.into(), "2020-04-01T10:00:00Z".into());
        secret.data.insert("USERNAME".into(), b"foo".to_vec());
        secret.data.insert("PASSWORD".into(), b"bar".to_vec());
        secret
    }

    #[test]
    fn test_data_round_trips_through_base64_json() {
        let secret = sample();
        let json = serde_json::to_string(&secret).unwrap();
        // wire form carries base64, not raw bytes
        assert!(json.contains(&base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            b"foo"
        )));

        let back: Secret = serde_json::from_str(&json).unwrap();
        assert_eq!(back, secret);
    }

    #[test]
    fn test_version_skipped_when_absent() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(!json.contains("version"));
    }

    #[test]
    fn test_describe_projects_labels_and_annotations() {
        let desc = sample().describe();
        assert_eq!(desc.service, "my-credentials");
        assert_eq!(desc.container, "default");
        assert_eq!(desc.created.as_deref(), Some("2020-04-01T10:00:00Z"));
        assert_eq!(desc.last_modified, None);
        assert_eq!(desc.data["USERNAME"], b"foo".to_vec());
    }

    #[test]
    fn test_export_command_is_reconstructable() {
        let cmd = sample().describe().to_create_command();
        assert!(cmd.starts_with("warren create secret my-credentials"));
        assert!(cmd.contains("--namespace platform"));
        assert!(cmd.contains("--container default"));
        assert!(cmd.contains("--data 'USERNAME=foo'"));
        assert!(cmd.contains("--data 'PASSWORD=bar'"));
    }
}
