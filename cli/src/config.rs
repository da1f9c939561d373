use std::{collections::HashMap, path::Path};

use alloy::primitives::Address;
use config::{Config, File};
use inspector_core::{error::InspectorError, network::NetworkRegistry};
use inspector_eip7702_core::constants::DEFAULT_BATCH_CONCURRENCY;
use serde::Deserialize;

pub const ENV_PREFIX: &str = "EIP7702";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    /// Per-network overrides, keyed by network name
    pub networks: HashMap<String, NetworkOverride>,
    pub signer: SignerConfig,
    pub delegation: DelegationConfig,
    pub batch: BatchConfig,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkOverride {
    pub rpc_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignerConfig {
    pub private_key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DelegationConfig {
    /// Contract that `delegate` targets when none is given on the command line
    pub contract: Option<Address>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_BATCH_CONCURRENCY,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl InspectorConfig {
    /// Network table with this config's RPC overrides applied
    pub fn network_registry(&self) -> Result<NetworkRegistry, InspectorError> {
        let overrides = self
            .networks
            .iter()
            .map(|(name, network)| (name.clone(), network.rpc_url.clone()))
            .collect();
        NetworkRegistry::with_rpc_overrides(&overrides)
    }
}

/// Load configuration from an optional file, then `EIP7702__*` environment variables
pub fn get_config(path: Option<&Path>) -> Result<InspectorConfig, config::ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(File::from(path));
    }

    builder
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?
        .try_deserialize::<InspectorConfig>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(source: &str) -> InspectorConfig {
        Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = from_toml("");
        assert!(config.networks.is_empty());
        assert!(config.signer.private_key.is_none());
        assert!(config.delegation.contract.is_none());
        assert_eq!(config.batch.concurrency, DEFAULT_BATCH_CONCURRENCY);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn reads_overrides_and_delegation_contract() {
        let config = from_toml(
            r#"
            log_format = "json"

            [networks.sepolia]
            rpc_url = "https://sepolia.example.org"

            [delegation]
            contract = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045"

            [batch]
            concurrency = 8
            "#,
        );

        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.batch.concurrency, 8);
        assert!(config.delegation.contract.is_some());

        let registry = config.network_registry().unwrap();
        assert_eq!(
            registry.resolve("sepolia").unwrap().rpc_url,
            "https://sepolia.example.org"
        );
    }

    #[test]
    fn unknown_override_is_rejected() {
        let config = from_toml(
            r#"
            [networks.goerli]
            rpc_url = "https://goerli.example.org"
            "#,
        );
        assert!(matches!(
            config.network_registry(),
            Err(InspectorError::UnknownNetwork { .. })
        ));
    }
}
