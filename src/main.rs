//! Command-line interface for azsql
//!
//! Parses an Azure SQL management command, runs its validators and
//! aggregators, and prints the resulting namespace as JSON.
//!
//! # Usage Examples
//!
//! ## Databases
//! ```bash
//! # Create a database in an elastic pool
//! azsql sql db create -g my-rg -s my-server -n my-db --elastic-pool my-pool
//!
//! # Create a database with a size limit
//! azsql sql db create -g my-rg -s my-server -n my-db --max-size 250GB
//! ```
//!
//! ## Managed Instances
//! ```bash
//! azsql sql mi create -g my-rg -n my-mi -l westus -u admin -p secret \
//!   --subnet default --vnet-name my-vnet --storage 64GB
//! ```
//!
//! ## Profile
//! Defaults for `--resource-group` and `--server` are read from the TOML file
//! named by `AZSQL_CONFIG` (or `~/.azsql/config.toml`):
//! ```toml
//! subscription = "00000000-0000-0000-0000-000000000000"
//!
//! [defaults]
//! group = "my-rg"
//! sql-server = "my-server"
//! ```

use anyhow::Context;
use azsql::{Cli, CliError, Profile};

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let profile = Profile::load_default().context("Failed to load profile")?;
    let cli = Cli::new(profile).context("Failed to register commands")?;

    let invocation = match cli.invoke(std::env::args_os()) {
        Ok(invocation) => invocation,
        // Help, version and usage errors are rendered by clap.
        Err(CliError::Parse(e)) => e.exit(),
        Err(e) => return Err(e.into()),
    };

    tracing::debug!("Printing namespace of '{}'", invocation.command);
    let output = serde_json::to_string_pretty(&invocation.namespace.to_json())
        .context("Failed to serialize namespace")?;
    println!("{output}");
    Ok(())
}
