//! Identity resolution.
//!
//! Extracts group claims from an opaque bearer token and derives the set of
//! team namespaces the caller may act in. The token's claims segment is
//! decoded structurally only; the signature is **not** verified. This is a
//! deliberate boundary capability: the remote store performs the real
//! authentication; this module exists to pick a namespace, not to prove an
//! identity. Call sites must not mistake the result for an authenticated
//! principal.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::Deserialize;
use tracing::debug;

use crate::core::constants;
use crate::error::IdentityError;

/// The claims this tool cares about: the group list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub groups: Vec<String>,
}

/// Decode the claims segment of a JWT without verifying its signature.
///
/// # Errors
///
/// Returns `IdentityError::MalformedToken` when the token has no payload
/// segment, the segment is not base64url, or the payload is not JSON.
pub fn decode_claims(token: &str) -> Result<Claims, IdentityError> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| IdentityError::MalformedToken("missing payload segment".to_string()))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| IdentityError::MalformedToken(e.to_string()))?;

    let claims: Claims =
        serde_json::from_slice(&bytes).map_err(|e| IdentityError::MalformedToken(e.to_string()))?;

    debug!(groups = claims.groups.len(), "decoded token claims");
    Ok(claims)
}

/// Maps raw group claims onto team names.
#[derive(Debug, Clone)]
pub struct GroupMapping {
    /// Prefix selecting team groups out of the claim's group list.
    pub match_prefix: String,
    /// Prefix stripped from matched groups to obtain the team name.
    pub trim_prefix: String,
}

impl Default for GroupMapping {
    fn default() -> Self {
        Self {
            match_prefix: constants::GROUP_MATCH_PREFIX.to_string(),
            trim_prefix: constants::GROUP_TRIM_PREFIX.to_string(),
        }
    }
}

impl GroupMapping {
    pub fn new(match_prefix: impl Into<String>, trim_prefix: impl Into<String>) -> Self {
        Self {
            match_prefix: match_prefix.into(),
            trim_prefix: trim_prefix.into(),
        }
    }

    /// Derive team names from raw groups.
    ///
    /// Groups carrying the match prefix are kept; the trim prefix and any
    /// remaining tail of the match prefix are stripped, so a group
    /// `sec-tbac-team-platform` under match `sec-tbac-team-` / trim
    /// `sec-tbac-` yields team `platform`. Input order is preserved and
    /// duplicates are dropped, keeping the list stable for display.
    pub fn teams(&self, groups: &[String]) -> Vec<String> {
        let match_tail = self
            .match_prefix
            .strip_prefix(&self.trim_prefix)
            .unwrap_or("");

        let mut teams: Vec<String> = Vec::new();
        for group in groups {
            if !group.starts_with(&self.match_prefix) {
                continue;
            }
            let stripped = group.strip_prefix(&self.trim_prefix).unwrap_or(group);
            let team = stripped.strip_prefix(match_tail).unwrap_or(stripped);
            if !team.is_empty() && !teams.iter().any(|t| t == team) {
                teams.push(team.to_string());
            }
        }
        teams
    }
}

/// Resolve the working namespace for this invocation.
///
/// An explicit `--namespace` override always wins. Otherwise a single team
/// becomes the namespace automatically; zero teams means the caller has no
/// usable identity, and more than one is ambiguous and must be resolved by
/// the caller, never picked silently. The sandbox suffix is appended after
/// resolution, to explicit and implicit namespaces alike.
///
/// # Errors
///
/// Returns `IdentityError::NoIdentity` or `IdentityError::AmbiguousNamespace`.
pub fn resolve_namespace(
    explicit: Option<&str>,
    teams: &[String],
    sandbox: bool,
) -> Result<String, IdentityError> {
    let base = match explicit {
        Some(ns) => ns.to_string(),
        None => match teams {
            [] => return Err(IdentityError::NoIdentity),
            [team] => team.clone(),
            _ => return Err(IdentityError::AmbiguousNamespace(teams.to_vec())),
        },
    };

    let namespace = if sandbox {
        format!("{base}{}", constants::SANDBOX_SUFFIX)
    } else {
        base
    };

    debug!(%namespace, sandbox, "resolved working namespace");
    Ok(namespace)
}
