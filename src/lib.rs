//! Warren - team-scoped secrets for multi-tenant cluster control planes.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── create        # Create a secret
//! │   ├── get           # List or describe secrets
//! │   ├── delete        # Delete a secret
//! │   ├── patch         # Add, update, or remove data keys
//! │   ├── whoami        # Show token-derived teams and namespace
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # Context configuration file
//!     ├── identity      # Token claims and namespace resolution
//!     ├── payload       # KEY=VALUE assembly and patch plans
//!     ├── secret        # Secret domain type and projections
//!     ├── store/        # Secret store backends
//!     │   ├── mod       # SecretStore trait
//!     │   ├── http      # Blocking REST adapter
//!     │   └── memory    # In-memory store for tests
//!     └── engine        # The secret mutation engine
//! ```
//!
//! The engine's patch operation is the only stateful protocol: the store's
//! patch primitive can add or overwrite data keys but never remove them, so
//! removals are emulated by delete-and-recreate with a rollback ladder.

pub mod cli;
pub mod core;
pub mod error;
