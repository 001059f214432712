//! Whoami command - show the teams and namespace derived from your token.

use crate::cli::{output, Cli};
use crate::core::config::Config;
use crate::core::identity;
use crate::error::{Error, IdentityError, Result};

/// Print team membership and the namespace this invocation would act in.
pub fn execute(cli: &Cli) -> Result<()> {
    let config = Config::load()?;
    let context = config.context(cli.context.as_deref())?.clone();
    let teams = super::teams_for(&context, config.group_mapping(), cli.lab)?;

    output::kv("Context:", &context.name);
    if teams.is_empty() {
        output::dimmed("no team membership found in token");
    } else {
        for team in &teams {
            output::list_item(team);
        }
    }

    match identity::resolve_namespace(cli.namespace.as_deref(), &teams, cli.sandbox) {
        Ok(namespace) => output::kv("Namespace:", namespace),
        Err(IdentityError::AmbiguousNamespace(_)) => {
            output::hint("member of multiple teams: pass --namespace to pick one");
        }
        Err(IdentityError::NoIdentity) => {
            output::hint("pass --namespace to work without a team identity");
        }
        Err(err) => return Err(Error::Identity(err)),
    }

    Ok(())
}
