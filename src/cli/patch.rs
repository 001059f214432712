//! Patch command - add, update, or remove data keys on a secret.

use crate::cli::{output, Cli, Scope};
use crate::core::engine::Engine;
use crate::core::payload::PatchPlan;
use crate::error::Result;

/// Patch a secret.
///
/// The plan is validated before identity resolution; removals and
/// additions may overlap, additions win.
pub fn execute(cli: &Cli, name: &str, remove_data: &[String], data: &[String]) -> Result<()> {
    let plan = PatchPlan::from_flags(remove_data, data)?;

    let scope = Scope::resolve(cli)?;
    let store = scope.store()?;
    let engine = Engine::new(&store, scope.namespace.clone());

    engine.patch(name, &plan)?;
    output::success(&format!("secret/{name} modified"));
    Ok(())
}
