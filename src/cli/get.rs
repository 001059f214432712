//! Get command - list secrets in the namespace or describe one.

use crate::cli::{output, Cli, Scope};
use crate::core::engine::Engine;
use crate::error::Result;

/// List all secrets, or describe the named one.
pub fn execute(cli: &Cli, name: Option<&str>, export: bool) -> Result<()> {
    let scope = Scope::resolve(cli)?;
    let store = scope.store()?;
    let engine = Engine::new(&store, scope.namespace.clone());

    let Some(name) = name else {
        let names = engine.list()?;
        if names.is_empty() {
            output::dimmed(&format!("no secrets in namespace {}", scope.namespace));
            return Ok(());
        }
        for name in names {
            output::list_item(&name);
        }
        return Ok(());
    };

    let description = engine.describe(name)?;

    if export {
        output::data(&description.to_create_command());
        return Ok(());
    }

    output::kv("Namespace:", &description.namespace);
    output::kv("Secret name:", &description.name);
    output::kv("Service:", &description.service);
    output::kv("Container:", &description.container);
    if let Some(created) = &description.created {
        output::kv("Created:", created);
    }
    if let Some(modified) = &description.last_modified {
        output::kv("Modified:", modified);
    }
    if !description.data.is_empty() {
        output::rule();
        for (key, value) in &description.data {
            output::data(&format!("{key}:\n{}\n", String::from_utf8_lossy(value)));
        }
    }
    Ok(())
}
