//! Secret mutation engine.
//!
//! Orchestrates create, describe, list, delete, and the remove-capable
//! patch workflow on top of the store trait. Every command execution
//! fetches fresh state, mutates a local copy, and writes back. The remote
//! store is the sole source of truth and no state is held between
//! invocations.
//!
//! There is no optimistic-concurrency discipline: writes are based on the
//! engine's own most recent read, and concurrent invocations on the same
//! object can race, with the later write dominating. That trade-off is
//! accepted here, not masked.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use tracing::{debug, error, warn};

use crate::core::constants;
use crate::core::payload::PatchPlan;
use crate::core::secret::{Secret, SecretDescription};
use crate::core::store::SecretStore;
use crate::error::{PatchError, Result, StoreError};

/// Inputs for the create operation, threaded by value from the CLI.
#[derive(Debug, Clone)]
pub struct CreateSpec {
    /// Base secret name; the stored identity is `{name}-{container}`.
    pub name: String,
    /// Container the secret is mounted into; defaults to `default`.
    pub container: Option<String>,
    /// Overrides the `app` label; defaults to the base name.
    pub app: Option<String>,
    /// Marks the secret as belonging to a sandbox namespace.
    pub sandbox: bool,
    /// Assembled key/value payload.
    pub data: BTreeMap<String, Vec<u8>>,
}

/// The mutation engine, bound to one namespace-scoped store.
pub struct Engine<'a> {
    store: &'a dyn SecretStore,
    namespace: String,
}

impl<'a> Engine<'a> {
    pub fn new(store: &'a dyn SecretStore, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
        }
    }

    /// Build and store a new secret.
    ///
    /// # Errors
    ///
    /// `StoreError::Conflict` when the identity already exists, surfaced
    /// verbatim; `StoreError::Unavailable` on transport failure.
    pub fn create(&self, spec: &CreateSpec) -> Result<Secret> {
        let container = spec.container.as_deref().unwrap_or(constants::DEFAULT_CONTAINER);
        let name = format!("{}-{}", spec.name, container);
        let now = timestamp();

        let mut secret = Secret::new(&self.namespace, &name);
        secret.labels.insert(
            constants::LABEL_APP.to_string(),
            spec.app.clone().unwrap_or_else(|| spec.name.clone()),
        );
        secret
            .labels
            .insert(constants::LABEL_CONTAINER.to_string(), container.to_string());
        secret
            .labels
            .insert(constants::LABEL_SANDBOX.to_string(), spec.sandbox.to_string());
        secret
            .annotations
            .insert(constants::ANNOTATION_CREATED.to_string(), now.clone());
        secret
            .annotations
            .insert(constants::ANNOTATION_MODIFIED.to_string(), now);
        secret.data = spec.data.clone();

        debug!(name = %secret.name, namespace = %self.namespace, "creating secret");
        let created = self.store.create(&secret)?;
        Ok(created)
    }

    /// Fetch one secret by exact name and project it for display.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` when the filtered result set is empty. The
    /// emptiness check is explicit: backends may over- or under-filter, so
    /// the result set is never indexed blindly.
    pub fn describe(&self, name: &str) -> Result<SecretDescription> {
        let matches = self.store.list(Some(name))?;
        let secret = matches
            .first()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        Ok(secret.describe())
    }

    /// Names of all secrets in the namespace, in listing order.
    ///
    /// An empty namespace is a normal outcome, distinct from transport
    /// failure.
    pub fn list(&self) -> Result<Vec<String>> {
        let secrets = self.store.list(None)?;
        Ok(secrets.into_iter().map(|s| s.name).collect())
    }

    /// Delete one secret. No retry; the result is reported as-is.
    pub fn delete(&self, name: &str) -> Result<()> {
        self.store.delete(name)?;
        Ok(())
    }

    /// Apply a patch plan to the named secret.
    ///
    /// The store's patch primitive is additive-only, so requested key
    /// removals are emulated by deleting the object and recreating it
    /// without the unwanted keys. Between that delete and create the object
    /// is absent from the store; if the create fails the engine rolls back
    /// to the original, and if the rollback fails too the original data is
    /// carried out in the error for manual recovery.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` when the secret does not exist;
    /// `PatchError::RecreationFailed` when removal was rolled back (the
    /// secret is unchanged, additions were not applied);
    /// `PatchError::Unrecoverable` when the object was lost;
    /// `StoreError::Rejected`/`Unavailable` when the final additive write
    /// fails after any removal already committed.
    pub fn patch(&self, name: &str, plan: &PatchPlan) -> Result<Secret> {
        let mut original = self.store.get(name)?;
        // Never send a stale concurrency token back to the store. Both
        // copies are scrubbed: the working copy for the writes below, the
        // original for a potential rollback create.
        original.version = None;
        let mut working = original.clone();

        if plan.has_removals() {
            for key in &plan.removals {
                // Removal of an absent key is not an error.
                working.data.remove(key);
            }

            debug!(name, removals = plan.removals.len(), "removing keys via delete and recreate");
            self.store.delete(name)?;

            if let Err(create_err) = self.store.create(&working) {
                warn!(name, error = %create_err, "secret recreation failed, attempting rollback");
                match self.store.create(&original) {
                    Ok(_) => {
                        return Err(PatchError::RecreationFailed {
                            name: name.to_string(),
                            source: create_err,
                        }
                        .into());
                    }
                    Err(rollback_err) => {
                        error!(name, error = %rollback_err, "rollback failed, secret is lost");
                        return Err(PatchError::Unrecoverable {
                            name: name.to_string(),
                            data: original.data,
                        }
                        .into());
                    }
                }
            }
        }

        for (key, value) in &plan.additions {
            working.data.insert(key.clone(), value.clone());
        }
        working
            .annotations
            .insert(constants::ANNOTATION_MODIFIED.to_string(), timestamp());

        let patched = self.store.patch(name, &working)?;
        Ok(patched)
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
