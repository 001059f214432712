//! Shared constants: label and annotation keys, naming sentinels, and
//! default identity-group prefixes.

/// Configuration file name under the platform config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Directory under the platform config dir holding warren state.
pub const CONFIG_DIR: &str = "warren";

/// Environment variable overriding the configuration file path.
pub const CONFIG_ENV: &str = "WARREN_CONFIG";

/// Label carrying the owning application name.
pub const LABEL_APP: &str = "app";

/// Label carrying the container a secret is mounted into.
pub const LABEL_CONTAINER: &str = "warren.dev/container";

/// Label marking a secret as living in a sandbox namespace.
pub const LABEL_SANDBOX: &str = "warren.dev/sandbox";

/// Annotation carrying the creation timestamp (RFC 3339).
pub const ANNOTATION_CREATED: &str = "warren.dev/time-created";

/// Annotation carrying the last-modified timestamp (RFC 3339).
pub const ANNOTATION_MODIFIED: &str = "warren.dev/last-modified";

/// Container name used when none is given on the command line.
pub const DEFAULT_CONTAINER: &str = "default";

/// Suffix appended to the resolved namespace when `--sandbox` is set.
pub const SANDBOX_SUFFIX: &str = "-sandbox";

/// Default prefix selecting team groups out of the token's group claims.
pub const GROUP_MATCH_PREFIX: &str = "warren-team-";

/// Default prefix stripped from matched groups to obtain the team name.
pub const GROUP_TRIM_PREFIX: &str = "warren-";

/// Team substituted for the token's groups when `--lab` is set.
pub const LAB_TEAM: &str = "platform";
