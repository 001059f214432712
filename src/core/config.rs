//! Context configuration.
//!
//! Warren keeps one small local file: the context configuration naming the
//! control planes it can talk to and the bearer token for each. All secret
//! state lives in the remote store.
//!
//! The file lives under the platform config directory
//! (`~/.config/warren/config.toml` on Linux) and can be overridden with
//! `WARREN_CONFIG`:
//!
//! ```toml
//! current-context = "prod"
//!
//! [groups]
//! match-prefix = "warren-team-"
//! trim-prefix = "warren-"
//!
//! [[contexts]]
//! name = "prod"
//! server = "https://secrets.example.com"
//! token = "eyJ..."
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::core::identity::GroupMapping;
use crate::error::{ConfigError, Result};

/// The context configuration file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Context used when `--context` is not passed.
    #[serde(rename = "current-context", default, skip_serializing_if = "Option::is_none")]
    pub current_context: Option<String>,

    /// Group-to-team mapping prefixes.
    #[serde(default)]
    pub groups: Groups,

    #[serde(default)]
    pub contexts: Vec<Context>,
}

/// Prefixes mapping token groups onto team names.
#[derive(Debug, Serialize, Deserialize)]
pub struct Groups {
    #[serde(rename = "match-prefix")]
    pub match_prefix: String,
    #[serde(rename = "trim-prefix")]
    pub trim_prefix: String,
}

impl Default for Groups {
    fn default() -> Self {
        Self {
            match_prefix: constants::GROUP_MATCH_PREFIX.to_string(),
            trim_prefix: constants::GROUP_TRIM_PREFIX.to_string(),
        }
    }
}

/// One named control plane and the credentials for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Context {
    pub name: String,
    pub server: String,
    /// Opaque bearer token. Absence is not an error: the caller simply has
    /// no team identity and must pass `--namespace`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Config {
    /// Path to the configuration file, honoring `WARREN_CONFIG`.
    pub fn path() -> PathBuf {
        if let Ok(path) = std::env::var(constants::CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(constants::CONFIG_DIR)
            .join(constants::CONFIG_FILE)
    }

    /// Load the configuration from the default location.
    ///
    /// # Errors
    ///
    /// `ConfigError::NotInitialized` when the file does not exist,
    /// `ConfigError::ReadFile`/`Parse` on unreadable or malformed TOML.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    /// Load the configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading configuration");

        if !path.exists() {
            return Err(ConfigError::NotInitialized(path.display().to_string()).into());
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        debug!(contexts = config.contexts.len(), "configuration loaded");
        Ok(config)
    }

    /// Select a context: the `--context` override when given, the
    /// configured current context otherwise.
    ///
    /// # Errors
    ///
    /// `ConfigError::NoCurrentContext` when neither is set,
    /// `ConfigError::UnknownContext` when the name matches nothing.
    pub fn context(&self, name_override: Option<&str>) -> Result<&Context> {
        let name = name_override
            .or(self.current_context.as_deref())
            .ok_or(ConfigError::NoCurrentContext)?;

        self.contexts
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ConfigError::UnknownContext(name.to_string()).into())
    }

    /// The group-to-team mapping configured for this installation.
    pub fn group_mapping(&self) -> GroupMapping {
        GroupMapping::new(&self.groups.match_prefix, &self.groups.trim_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    const SAMPLE: &str = r#"
current-context = "prod"

[groups]
match-prefix = "sec-tbac-team-"
trim-prefix = "sec-tbac-"

[[contexts]]
name = "prod"
server = "https://secrets.example.com"
token = "tok"

[[contexts]]
name = "staging"
server = "https://staging.example.com"
"#;

    #[test]
    fn test_load_and_select_current_context() {
        let (_dir, path) = write_config(SAMPLE);
        let config = Config::load_from(&path).unwrap();

        let ctx = config.context(None).unwrap();
        assert_eq!(ctx.name, "prod");
        assert_eq!(ctx.token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_context_override_and_missing_token() {
        let (_dir, path) = write_config(SAMPLE);
        let config = Config::load_from(&path).unwrap();

        let ctx = config.context(Some("staging")).unwrap();
        assert_eq!(ctx.server, "https://staging.example.com");
        assert!(ctx.token.is_none());
    }

    #[test]
    fn test_unknown_context_is_an_error() {
        let (_dir, path) = write_config(SAMPLE);
        let config = Config::load_from(&path).unwrap();
        assert!(config.context(Some("nope")).is_err());
    }

    #[test]
    fn test_no_current_context() {
        let (_dir, path) = write_config("[[contexts]]\nname = \"a\"\nserver = \"https://a\"\n");
        let config = Config::load_from(&path).unwrap();
        assert!(config.context(None).is_err());
    }

    #[test]
    fn test_missing_file_is_not_initialized() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("no configuration found"));
    }

    #[test]
    fn test_group_mapping_comes_from_file() {
        let (_dir, path) = write_config(SAMPLE);
        let config = Config::load_from(&path).unwrap();
        let mapping = config.group_mapping();
        assert_eq!(mapping.match_prefix, "sec-tbac-team-");
        assert_eq!(mapping.trim_prefix, "sec-tbac-");
    }

    #[test]
    fn test_defaults_when_groups_section_absent() {
        let (_dir, path) = write_config("current-context = \"x\"\n[[contexts]]\nname = \"x\"\nserver = \"https://x\"\n");
        let config = Config::load_from(&path).unwrap();
        let mapping = config.group_mapping();
        assert_eq!(mapping.match_prefix, constants::GROUP_MATCH_PREFIX);
    }
}
