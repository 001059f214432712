//! Test support utilities for warren integration tests.
//!
//! Provides canned secrets, a seeded in-memory store, and a store wrapper
//! that fails a configurable number of create calls to drive the patch
//! protocol's rollback ladders.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::BTreeMap;

use warren::core::constants;
use warren::core::secret::Secret;
use warren::core::store::{MemoryStore, SecretStore};
use warren::error::StoreError;

/// Build a data map from string pairs.
pub fn data(pairs: &[(&str, &str)]) -> BTreeMap<String, Vec<u8>> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.as_bytes().to_vec()))
        .collect()
}

/// A secret shaped the way the engine creates them.
pub fn secret(namespace: &str, name: &str, app: &str, pairs: &[(&str, &str)]) -> Secret {
    let mut secret = Secret::new(namespace, name);
    secret
        .labels
        .insert(constants::LABEL_APP.to_string(), app.to_string());
    secret.labels.insert(
        constants::LABEL_CONTAINER.to_string(),
        constants::DEFAULT_CONTAINER.to_string(),
    );
    secret.annotations.insert(
        constants::ANNOTATION_MODIFIED.to_string(),
        "2020-04-01T10:00:00Z".to_string(),
    );
    secret.data = data(pairs);
    secret
}

/// A store for namespace `default` seeded with two well-known secrets.
pub fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new("default");
    store
        .create(&secret(
            "default",
            "my-credentials",
            "my-credentials",
            &[("USERNAME", "foo"), ("PASSWORD", "bar"), ("KEY", "extra-key")],
        ))
        .expect("seeding my-credentials");
    store
        .create(&secret(
            "default",
            "my-api-key",
            "my-api-key",
            &[("URL", "github.com"), ("KEY", "key")],
        ))
        .expect("seeding my-api-key");
    store
}

/// Delegating store that fails the next N create calls.
///
/// Lets tests break the recreate step of the patch protocol, and the
/// rollback create after it, without touching any other operation.
pub struct UnreliableStore {
    inner: MemoryStore,
    failing_creates: Cell<u32>,
}

impl UnreliableStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            failing_creates: Cell::new(0),
        }
    }

    /// Make the next `n` create calls fail with `StoreError::Unavailable`.
    pub fn fail_next_creates(&self, n: u32) {
        self.failing_creates.set(n);
    }
}

impl SecretStore for UnreliableStore {
    fn create(&self, secret: &Secret) -> Result<Secret, StoreError> {
        let remaining = self.failing_creates.get();
        if remaining > 0 {
            self.failing_creates.set(remaining - 1);
            return Err(StoreError::Unavailable("injected create failure".to_string()));
        }
        self.inner.create(secret)
    }

    fn get(&self, name: &str) -> Result<Secret, StoreError> {
        self.inner.get(name)
    }

    fn list(&self, name_filter: Option<&str>) -> Result<Vec<Secret>, StoreError> {
        self.inner.list(name_filter)
    }

    fn delete(&self, name: &str) -> Result<(), StoreError> {
        self.inner.delete(name)
    }

    fn patch(&self, name: &str, merge: &Secret) -> Result<Secret, StoreError> {
        self.inner.patch(name, merge)
    }
}
