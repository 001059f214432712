//! Delete command - remove a secret from the team namespace.

use dialoguer::Confirm;

use crate::cli::{output, Cli, Scope};
use crate::core::engine::Engine;
use crate::error::Result;

/// Delete a secret, prompting for confirmation unless `--yes` is passed.
pub fn execute(cli: &Cli, name: &str, yes: bool) -> Result<()> {
    let scope = Scope::resolve(cli)?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "delete secret/{} in namespace {}?",
                name, scope.namespace
            ))
            .default(false)
            .interact()
            .unwrap_or(false);
        if !confirmed {
            output::dimmed("aborted");
            return Ok(());
        }
    }

    let store = scope.store()?;
    let engine = Engine::new(&store, scope.namespace.clone());
    engine.delete(name)?;

    output::success(&format!(
        "deleted secret/{} in namespace {}",
        name, scope.namespace
    ));
    Ok(())
}
