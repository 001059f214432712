//! Create command - store a new secret in the team namespace.

use crate::cli::{output, Cli, Scope};
use crate::core::engine::{CreateSpec, Engine};
use crate::core::payload;
use crate::error::Result;

/// Create a secret.
///
/// The payload is validated before identity resolution, so malformed
/// `--data` entries fail without touching configuration or network.
pub fn execute(
    cli: &Cli,
    name: &str,
    data: &[String],
    container: Option<&str>,
    app: Option<&str>,
) -> Result<()> {
    let data = payload::assemble(data)?;

    let scope = Scope::resolve(cli)?;
    let store = scope.store()?;
    let engine = Engine::new(&store, scope.namespace.clone());

    let created = engine.create(&CreateSpec {
        name: name.to_string(),
        container: container.map(str::to_string),
        app: app.map(str::to_string),
        sandbox: cli.sandbox,
        data,
    })?;

    output::success(&format!(
        "created secret/{} in namespace {}",
        created.name, scope.namespace
    ));
    Ok(())
}
