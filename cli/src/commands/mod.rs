mod check;
mod delegate;

use anyhow::Result;

use crate::{
    cli::{Cli, Command},
    config::InspectorConfig,
    report,
};

pub use check::check;
pub use delegate::{delegate, revoke};

/// Dispatch the selected command
pub async fn run(cli: Cli, config: InspectorConfig) -> Result<()> {
    match cli.command {
        Command::Check(args) => check(args, &config).await,
        Command::Delegate(args) => delegate(args, &config).await,
        Command::Revoke(args) => revoke(args, &config).await,
        Command::Networks => {
            let registry = config.network_registry()?;
            println!("{}", report::NetworksReport(registry.networks()));
            Ok(())
        }
    }
}
