//! In-memory secret store.
//!
//! Faithful to the remote store's contract (create conflicts, version
//! tokens, additive-only patch) without any transport. Handles are cheap
//! clones sharing one object map, so a test can keep a handle for
//! assertions while the engine owns another.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use super::SecretStore;
use crate::core::secret::Secret;
use crate::error::StoreError;

#[derive(Debug, Default)]
struct State {
    /// Objects keyed by `(namespace, name)`.
    objects: BTreeMap<(String, String), Secret>,
    revision: u64,
}

/// Shared in-memory store scoped to one namespace.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    namespace: String,
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    /// A handle onto the same object map, scoped to another namespace.
    pub fn scoped(&self, namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            state: Arc::clone(&self.state),
        }
    }

    fn key(&self, name: &str) -> (String, String) {
        (self.namespace.clone(), name.to_string())
    }
}

impl SecretStore for MemoryStore {
    fn create(&self, secret: &Secret) -> Result<Secret, StoreError> {
        if secret.version.is_some() {
            return Err(StoreError::Rejected(
                "version must not be set on create".to_string(),
            ));
        }

        let mut state = self.state.lock().expect("store lock poisoned");
        let key = self.key(&secret.name);
        if state.objects.contains_key(&key) {
            return Err(StoreError::Conflict(secret.name.clone()));
        }

        state.revision += 1;
        let mut stored = secret.clone();
        stored.namespace = self.namespace.clone();
        stored.version = Some(state.revision.to_string());
        state.objects.insert(key, stored.clone());
        Ok(stored)
    }

    fn get(&self, name: &str) -> Result<Secret, StoreError> {
        let state = self.state.lock().expect("store lock poisoned");
        state
            .objects
            .get(&self.key(name))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    fn list(&self, name_filter: Option<&str>) -> Result<Vec<Secret>, StoreError> {
        let state = self.state.lock().expect("store lock poisoned");
        Ok(state
            .objects
            .iter()
            .filter(|((ns, name), _)| {
                ns == &self.namespace && name_filter.map_or(true, |f| f == name)
            })
            .map(|(_, secret)| secret.clone())
            .collect())
    }

    fn delete(&self, name: &str) -> Result<(), StoreError> {
        let mut state = self.state.lock().expect("store lock poisoned");
        state
            .objects
            .remove(&self.key(name))
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    fn patch(&self, name: &str, merge: &Secret) -> Result<Secret, StoreError> {
        if merge.version.is_some() {
            return Err(StoreError::Rejected(
                "version must not be set in a patch".to_string(),
            ));
        }

        let mut state = self.state.lock().expect("store lock poisoned");
        let revision = state.revision + 1;

        let existing = state
            .objects
            .get_mut(&self.key(name))
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        // Additive merge only: entries are added or overwritten, never removed.
        for (k, v) in &merge.labels {
            existing.labels.insert(k.clone(), v.clone());
        }
        for (k, v) in &merge.annotations {
            existing.annotations.insert(k.clone(), v.clone());
        }
        for (k, v) in &merge.data {
            existing.data.insert(k.clone(), v.clone());
        }
        existing.version = Some(revision.to_string());
        let patched = existing.clone();
        state.revision = revision;

        Ok(patched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(name: &str, data: &[(&str, &str)]) -> Secret {
        let mut s = Secret::new("default", name);
        for (k, v) in data {
            s.data.insert(k.to_string(), v.as_bytes().to_vec());
        }
        s
    }

    #[test]
    fn test_create_then_get() {
        let store = MemoryStore::new("default");
        store.create(&secret("a", &[("K", "v")])).unwrap();

        let fetched = store.get("a").unwrap();
        assert_eq!(fetched.data["K"], b"v".to_vec());
        assert!(fetched.version.is_some());
    }

    #[test]
    fn test_create_conflict_on_existing_name() {
        let store = MemoryStore::new("default");
        store.create(&secret("a", &[])).unwrap();

        let err = store.create(&secret("a", &[])).unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[test]
    fn test_create_rejects_stale_version_token() {
        let store = MemoryStore::new("default");
        let mut s = secret("a", &[]);
        s.version = Some("7".to_string());

        let err = store.create(&s).unwrap_err();
        assert!(matches!(err, StoreError::Rejected(_)));
    }

    #[test]
    fn test_patch_is_additive_only() {
        let store = MemoryStore::new("default");
        store
            .create(&secret("a", &[("KEEP", "x"), ("OLD", "1")]))
            .unwrap();

        // A merge that omits KEEP must not remove it.
        let merged = store.patch("a", &secret("a", &[("OLD", "2"), ("NEW", "3")])).unwrap();
        assert_eq!(merged.data["KEEP"], b"x".to_vec());
        assert_eq!(merged.data["OLD"], b"2".to_vec());
        assert_eq!(merged.data["NEW"], b"3".to_vec());
    }

    #[test]
    fn test_namespaces_are_isolated() {
        let store = MemoryStore::new("default");
        let other = store.scoped("other");
        store.create(&secret("a", &[])).unwrap();

        assert!(matches!(other.get("a"), Err(StoreError::NotFound(_))));
        assert!(other.list(None).unwrap().is_empty());
    }

    #[test]
    fn test_list_filters_by_exact_name() {
        let store = MemoryStore::new("default");
        store.create(&secret("a", &[])).unwrap();
        store.create(&secret("b", &[])).unwrap();

        let all = store.list(None).unwrap();
        assert_eq!(all.len(), 2);

        let filtered = store.list(Some("b")).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "b");

        assert!(store.list(Some("missing")).unwrap().is_empty());
    }
}
