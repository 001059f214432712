//! Error taxonomy.
//!
//! Nested error enums per concern, aggregated into a single top-level
//! [`Error`] so command handlers can use one `Result` alias while callers
//! can still match on the specific failure class.

use std::collections::BTreeMap;

use thiserror::Error;

/// Top-level error aggregating all failure classes.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Patch(#[from] PatchError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Malformed command-line payload input.
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("invalid data entry {0:?}: expected KEY=VALUE")]
    InvalidFormat(String),
}

/// Identity-to-namespace resolution failures.
///
/// These are user-facing conditions: the caller must supply more
/// information (log in, or pass `--namespace`) rather than the tool
/// picking a default silently.
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("no team identity found: log in or pass --namespace")]
    NoIdentity,

    #[error("member of multiple teams ({}): pass --namespace to pick one", .0.join(", "))]
    AmbiguousNamespace(Vec<String>),

    #[error("malformed bearer token: {0}")]
    MalformedToken(String),
}

/// Context configuration failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no configuration found: create {0}")]
    NotInitialized(String),

    #[error("no current context set in configuration")]
    NoCurrentContext,

    #[error("unknown context: {0}")]
    UnknownContext(String),

    #[error("failed to read configuration: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Failures reported by the secret store, passed through largely verbatim.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("secret not found: {0}")]
    NotFound(String),

    #[error("secret already exists: {0}")]
    Conflict(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store rejected the write: {0}")]
    Rejected(String),
}

/// Failures of the remove-capable patch protocol.
#[derive(Error, Debug)]
pub enum PatchError {
    /// Recreate failed after delete, but rollback restored the original.
    /// The secret is in its pre-patch state; the caller can retry.
    #[error("recreation of secret {name} failed, rolled back to original: {source}")]
    RecreationFailed {
        name: String,
        #[source]
        source: StoreError,
    },

    /// Recreate failed after delete AND rollback failed. The object no
    /// longer exists in the store. The original data travels in the error
    /// so every caller can surface it for manual recovery.
    #[error("secret {name} was removed and could not be recreated; manual recovery required")]
    Unrecoverable {
        name: String,
        data: BTreeMap<String, Vec<u8>>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
