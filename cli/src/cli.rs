use std::path::PathBuf;

use alloy::primitives::Address;
use clap::{Args, Parser, Subcommand, ValueHint};
use inspector_core::network::DEFAULT_NETWORK;

/// Sign, submit and inspect EIP-7702 delegations
#[derive(Parser, Debug)]
#[command(name = "eip7702", version, propagate_version = true)]
pub struct Cli {
    /// Configuration file; `EIP7702__*` environment variables override it
    #[arg(long, global = true, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report whether one or more addresses carry an EIP-7702 delegation
    Check(CheckArgs),
    /// Delegate the signer's account to a contract
    Delegate(DelegateArgs),
    /// Clear the signer's delegation by authorizing the zero address
    Revoke(NetworkArgs),
    /// List the configured networks
    Networks,
}

#[derive(Args, Debug, Clone)]
pub struct NetworkArgs {
    /// Network name (mainnet, sepolia, base, baseSepolia, anvil)
    #[arg(short, long, default_value = DEFAULT_NETWORK)]
    pub network: String,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Addresses to check, each `0x` followed by 40 hex characters
    #[arg(required = true, value_name = "ADDRESS")]
    pub addresses: Vec<String>,

    #[command(flatten)]
    pub network: NetworkArgs,

    /// Print records as JSON
    #[arg(long)]
    pub json: bool,

    /// Maximum concurrent code fetches; defaults to `batch.concurrency`
    #[arg(long)]
    pub concurrency: Option<usize>,
}

#[derive(Args, Debug)]
pub struct DelegateArgs {
    /// Contract to delegate to; defaults to `delegation.contract`
    #[arg(long, value_name = "ADDRESS")]
    pub contract: Option<Address>,

    #[command(flatten)]
    pub network: NetworkArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn check_takes_network_only_from_flag() {
        let cli = Cli::try_parse_from([
            "eip7702",
            "check",
            "0xd8da6bf26964af9d7eed9e03e53415d37aa96045",
            "base",
        ])
        .unwrap();

        let Command::Check(args) = cli.command else {
            panic!("Expected check command");
        };
        assert_eq!(args.addresses.len(), 2);
        assert_eq!(args.network.network, DEFAULT_NETWORK);
    }

    #[test]
    fn check_accepts_network_flag() {
        let cli = Cli::try_parse_from([
            "eip7702",
            "check",
            "--network",
            "baseSepolia",
            "0xd8da6bf26964af9d7eed9e03e53415d37aa96045",
            "--json",
        ])
        .unwrap();

        let Command::Check(args) = cli.command else {
            panic!("Expected check command");
        };
        assert_eq!(args.network.network, "baseSepolia");
        assert!(args.json);
    }

    #[test]
    fn check_requires_an_address() {
        assert!(Cli::try_parse_from(["eip7702", "check"]).is_err());
    }

    #[test]
    fn delegate_parses_contract() {
        let cli = Cli::try_parse_from([
            "eip7702",
            "delegate",
            "--contract",
            "0xd8da6bf26964af9d7eed9e03e53415d37aa96045",
            "-n",
            "anvil",
        ])
        .unwrap();

        let Command::Delegate(args) = cli.command else {
            panic!("Expected delegate command");
        };
        assert!(args.contract.is_some());
        assert_eq!(args.network.network, "anvil");
    }
}
