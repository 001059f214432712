//! Key/value payload assembly.
//!
//! Parses `KEY=VALUE` entries coming from repeatable `--data` flags into
//! the byte-valued mapping stored in a secret, and carries the per-invocation
//! [`PatchPlan`].

use std::collections::{BTreeMap, BTreeSet};

use crate::error::PayloadError;

/// Parse `KEY=VALUE` entries into a byte-valued mapping.
///
/// Each entry is split on the **first** `=` only, so values may themselves
/// contain `=` (`"A=B=C"` maps `A` to `B=C`). A later entry for the same key
/// overwrites an earlier one.
///
/// # Errors
///
/// Returns `PayloadError::InvalidFormat` naming the offending entry when it
/// contains no `=` at all.
pub fn assemble(entries: &[String]) -> Result<BTreeMap<String, Vec<u8>>, PayloadError> {
    let mut data = BTreeMap::new();
    for entry in entries {
        let (key, value) = entry
            .split_once('=')
            .ok_or_else(|| PayloadError::InvalidFormat(entry.clone()))?;
        data.insert(key.to_string(), value.as_bytes().to_vec());
    }
    Ok(data)
}

/// The mutation requested by a single patch invocation.
///
/// `removals` and `additions` may overlap; the engine applies additions
/// after removals, so an added key always wins over a removal of the same
/// key.
#[derive(Debug, Clone, Default)]
pub struct PatchPlan {
    /// Keys to delete from the secret's data mapping.
    pub removals: BTreeSet<String>,
    /// Entries to add or overwrite.
    pub additions: BTreeMap<String, Vec<u8>>,
}

impl PatchPlan {
    /// Build a plan from `--remove-data` keys and `--data` entries.
    ///
    /// # Errors
    ///
    /// Returns `PayloadError::InvalidFormat` for malformed `--data` entries.
    pub fn from_flags(removals: &[String], additions: &[String]) -> Result<Self, PayloadError> {
        Ok(Self {
            removals: removals.iter().cloned().collect(),
            additions: assemble(additions)?,
        })
    }

    /// True when the plan requests key removals.
    pub fn has_removals(&self) -> bool {
        !self.removals.is_empty()
    }
}
