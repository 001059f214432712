//! Warren - team-scoped secrets for multi-tenant cluster control planes.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use warren::cli::{execute, output, Cli};
use warren::error::{Error, IdentityError, PatchError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("WARREN_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("warren=debug")
        } else {
            EnvFilter::new("warren=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli) {
        output::error(&e.to_string());

        // A lost secret is surfaced in full: print every original key/value
        // pair so a human can recreate the object manually.
        if let Error::Patch(PatchError::Unrecoverable { data, .. }) = &e {
            output::warn("it contained data:");
            if data.is_empty() {
                output::dimmed("no data");
            }
            for (key, value) in data {
                output::data(&format!("{key}:\n{}\n", String::from_utf8_lossy(value)));
            }
        }

        let suggestion = match &e {
            Error::Identity(IdentityError::NoIdentity)
            | Error::Identity(IdentityError::AmbiguousNamespace(_)) => {
                Some("pass --namespace [team-name]")
            }
            Error::Config(_) => Some("check your warren configuration (WARREN_CONFIG)"),
            Error::Patch(PatchError::RecreationFailed { .. }) => {
                Some("the secret was rolled back; retry the patch")
            }
            _ => None,
        };
        if let Some(hint) = suggestion {
            output::hint(hint);
        }

        std::process::exit(1);
    }
}
