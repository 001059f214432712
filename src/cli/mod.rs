//! Command-line interface.
//!
//! Verb-noun layout (`warren create secret …`), with the namespace, context,
//! and sandbox flags shared across verbs. Everything here is glue: payload
//! assembly and namespace resolution happen before any store call, and the
//! engine does the rest.

pub mod completions;
pub mod create;
pub mod delete;
pub mod get;
pub mod output;
pub mod patch;
pub mod whoami;

use clap::{Parser, Subcommand};

use crate::core::config::{Config, Context};
use crate::core::constants;
use crate::core::identity::{self, GroupMapping};
use crate::core::store::HttpStore;
use crate::error::Result;

/// Warren - team-scoped secrets for multi-tenant control planes.
#[derive(Parser)]
#[command(
    name = "warren",
    about = "Manage secrets in your team's namespace",
    version,
    after_help = "Your team's corner of the cluster. 🐇"
)]
pub struct Cli {
    /// Namespace to work in. Usually only needed when member of more than one team.
    #[arg(short = 'n', long, global = true, env = "WARREN_NAMESPACE")]
    pub namespace: Option<String>,

    /// Context name from the configuration file.
    #[arg(long, global = true, env = "WARREN_CONTEXT")]
    pub context: Option<String>,

    /// Work in the sandbox namespace.
    #[arg(short = 's', long, global = true)]
    pub sandbox: bool,

    /// Verbose output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Simulate team membership.
    #[arg(long, global = true, hide = true)]
    pub lab: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level verbs.
#[derive(Subcommand)]
pub enum Command {
    /// Create a resource in your team's namespace
    Create {
        #[command(subcommand)]
        resource: CreateResource,
    },

    /// Get a list of resources or describe one
    Get {
        #[command(subcommand)]
        resource: GetResource,
    },

    /// Delete a resource in your team's namespace
    Delete {
        #[command(subcommand)]
        resource: DeleteResource,
    },

    /// Patch a resource in your team's namespace
    Patch {
        #[command(subcommand)]
        resource: PatchResource,
    },

    /// Show the teams and namespace derived from your token
    Whoami,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum CreateResource {
    /// Create a secret
    #[command(aliases = ["sec", "secr", "secre", "secrets"])]
    Secret {
        /// Base secret name; stored as NAME-CONTAINER
        name: String,

        /// Data to add to the secret
        #[arg(short = 'd', long = "data", value_name = "KEY=VALUE")]
        data: Vec<String>,

        /// Container the secret is mounted into
        #[arg(short = 'c', long)]
        container: Option<String>,

        /// Override the app label (defaults to the secret name)
        #[arg(long)]
        app: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum GetResource {
    /// List secrets in the namespace, or describe one
    #[command(aliases = ["sec", "secr", "secre", "secrets"])]
    Secret {
        /// Secret name; omit to list all
        name: Option<String>,

        /// Print a command line that would recreate the secret
        #[arg(long, requires = "name")]
        export: bool,
    },
}

#[derive(Subcommand)]
pub enum DeleteResource {
    /// Delete a secret
    #[command(aliases = ["sec", "secr", "secre", "secrets"])]
    Secret {
        /// Secret name
        name: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum PatchResource {
    /// Patch a secret
    #[command(aliases = ["sec", "secr", "secre", "secrets"])]
    Secret {
        /// Secret name
        name: String,

        /// Data to add or update in the secret
        #[arg(short = 'd', long = "data", value_name = "KEY=VALUE")]
        data: Vec<String>,

        /// Remove a data key from the secret
        #[arg(short = 'r', long = "remove-data", value_name = "KEY")]
        remove_data: Vec<String>,
    },
}

/// Everything a command needs once identity is resolved.
pub(crate) struct Scope {
    pub namespace: String,
    pub context: Context,
}

impl Scope {
    /// Load configuration, decode the token, and resolve the working
    /// namespace. No store call is made here, so resolution failures
    /// (ambiguous membership, missing identity) never touch the network.
    pub(crate) fn resolve(cli: &Cli) -> Result<Self> {
        let config = Config::load()?;
        let context = config.context(cli.context.as_deref())?.clone();
        let teams = teams_for(&context, config.group_mapping(), cli.lab)?;
        let namespace =
            identity::resolve_namespace(cli.namespace.as_deref(), &teams, cli.sandbox)?;

        Ok(Self { namespace, context })
    }

    /// Store client for this scope's context and namespace.
    pub(crate) fn store(&self) -> Result<HttpStore> {
        let store = HttpStore::new(
            &self.context.server,
            self.context.token.as_deref(),
            &self.namespace,
        )?;
        Ok(store)
    }
}

/// Teams implied by the context's token, or the fixed lab team.
fn teams_for(context: &Context, mapping: GroupMapping, lab: bool) -> Result<Vec<String>> {
    if lab {
        return Ok(vec![constants::LAB_TEAM.to_string()]);
    }
    match context.token.as_deref() {
        Some(token) => {
            let claims = identity::decode_claims(token)?;
            Ok(mapping.teams(&claims.groups))
        }
        None => Ok(Vec::new()),
    }
}

/// Execute a parsed command line.
pub fn execute(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::Create {
            resource: CreateResource::Secret {
                name,
                data,
                container,
                app,
            },
        } => create::execute(&cli, name, data, container.as_deref(), app.as_deref()),

        Command::Get {
            resource: GetResource::Secret { name, export },
        } => get::execute(&cli, name.as_deref(), *export),

        Command::Delete {
            resource: DeleteResource::Secret { name, yes },
        } => delete::execute(&cli, name, *yes),

        Command::Patch {
            resource: PatchResource::Secret {
                name,
                data,
                remove_data,
            },
        } => patch::execute(&cli, name, remove_data, data),

        Command::Whoami => whoami::execute(&cli),

        Command::Completions { shell } => completions::execute(*shell),
    }
}

