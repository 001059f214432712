//! Secret store backends.
//!
//! [`SecretStore`] is the seam between the mutation engine and the remote
//! control plane. The engine only ever sees this trait; the HTTP adapter
//! talks to a real cluster, and the in-memory store backs the test suite.
//!
//! The `patch` primitive is additive: it can add or overwrite mapping
//! entries but never delete them. Key removal is emulated above this trait
//! by the engine's delete-and-recreate protocol.

pub mod http;
pub mod memory;

pub use http::HttpStore;
pub use memory::MemoryStore;

use crate::core::secret::Secret;
use crate::error::StoreError;

/// Namespaced CRUD operations on secret objects.
///
/// Implementations are scoped to a single namespace at construction time;
/// names passed to these methods are object names within that namespace.
pub trait SecretStore {
    /// Store a new object. Fails with `StoreError::Conflict` when the
    /// identity already exists.
    fn create(&self, secret: &Secret) -> Result<Secret, StoreError>;

    /// Fetch one object by exact name.
    fn get(&self, name: &str) -> Result<Secret, StoreError>;

    /// List objects in the namespace, optionally filtered by exact name.
    ///
    /// Backends may return partial or over-filtered result sets; callers
    /// must check emptiness rather than assume exactly one match.
    fn list(&self, name_filter: Option<&str>) -> Result<Vec<Secret>, StoreError>;

    /// Delete one object by name.
    fn delete(&self, name: &str) -> Result<(), StoreError>;

    /// Additively merge `merge` into the named object. Entries are added or
    /// overwritten, never removed.
    fn patch(&self, name: &str, merge: &Secret) -> Result<Secret, StoreError>;
}
