use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    chain::{ChainService, RpcChain},
    error::InspectorError,
};

/// Chain id and RPC endpoint for a named network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDescriptor {
    pub name: String,
    pub chain_id: u64,
    pub rpc_url: String,
}

impl NetworkDescriptor {
    pub fn new(name: impl Into<String>, chain_id: u64, rpc_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chain_id,
            rpc_url: rpc_url.into(),
        }
    }
}

const DEFAULT_NETWORKS: &[(&str, u64, &str)] = &[
    ("mainnet", 1, "https://eth.llamarpc.com"),
    ("sepolia", 11155111, "https://ethereum-sepolia-rpc.publicnode.com"),
    ("base", 8453, "https://mainnet.base.org"),
    ("baseSepolia", 84532, "https://sepolia.base.org"),
    ("anvil", 31337, "http://127.0.0.1:8545"),
];

pub const DEFAULT_NETWORK: &str = "sepolia";

/// Fixed table of supported networks. Names match case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkRegistry {
    networks: Vec<NetworkDescriptor>,
}

impl Default for NetworkRegistry {
    fn default() -> Self {
        Self {
            networks: DEFAULT_NETWORKS
                .iter()
                .map(|(name, chain_id, rpc_url)| NetworkDescriptor::new(*name, *chain_id, *rpc_url))
                .collect(),
        }
    }
}

impl NetworkRegistry {
    /// Default table with RPC endpoints replaced from `overrides`, keyed by network name.
    ///
    /// Override keys go through the same case-insensitive lookup as [`Self::resolve`],
    /// so `basesepolia` (as produced by environment variables) targets `baseSepolia`.
    pub fn with_rpc_overrides(overrides: &HashMap<String, String>) -> Result<Self, InspectorError> {
        let mut registry = Self::default();
        for (name, rpc_url) in overrides {
            let network = registry.position(name)?;
            tracing::debug!(network = %registry.networks[network].name, rpc_url = %rpc_url, "Overriding RPC endpoint");
            registry.networks[network].rpc_url = rpc_url.clone();
        }
        Ok(registry)
    }

    pub fn resolve(&self, name: &str) -> Result<&NetworkDescriptor, InspectorError> {
        self.position(name).map(|index| &self.networks[index])
    }

    pub fn networks(&self) -> &[NetworkDescriptor] {
        &self.networks
    }

    pub fn names(&self) -> Vec<String> {
        self.networks.iter().map(|n| n.name.clone()).collect()
    }

    fn position(&self, name: &str) -> Result<usize, InspectorError> {
        self.networks
            .iter()
            .position(|n| n.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| InspectorError::UnknownNetwork {
                network: name.to_string(),
                known: self.names(),
            })
    }
}

#[allow(refining_impl_trait)]
impl ChainService for NetworkRegistry {
    fn get_chain(&self, network: &str) -> Result<RpcChain, InspectorError> {
        self.resolve(network)?.to_chain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::Chain;

    #[test]
    fn resolves_known_networks() {
        let registry = NetworkRegistry::default();
        assert_eq!(registry.resolve("mainnet").unwrap().chain_id, 1);
        assert_eq!(registry.resolve("sepolia").unwrap().chain_id, 11155111);
        assert_eq!(registry.resolve("base").unwrap().chain_id, 8453);
        assert_eq!(registry.resolve("baseSepolia").unwrap().chain_id, 84532);
    }

    #[test]
    fn resolve_is_case_insensitive() {
        let registry = NetworkRegistry::default();
        let network = registry.resolve("BASESEPOLIA").unwrap();
        assert_eq!(network.name, "baseSepolia");
    }

    #[test]
    fn unknown_network_is_rejected() {
        let registry = NetworkRegistry::default();
        match registry.resolve("goerli") {
            Err(InspectorError::UnknownNetwork { network, known }) => {
                assert_eq!(network, "goerli");
                assert!(known.contains(&"sepolia".to_string()));
            }
            other => panic!("Expected UnknownNetwork, got {other:?}"),
        }
    }

    #[test]
    fn overrides_replace_rpc_url() {
        let overrides = HashMap::from([(
            "basesepolia".to_string(),
            "https://base-sepolia.example.org".to_string(),
        )]);
        let registry = NetworkRegistry::with_rpc_overrides(&overrides).unwrap();
        assert_eq!(
            registry.resolve("baseSepolia").unwrap().rpc_url,
            "https://base-sepolia.example.org"
        );
        assert_eq!(
            registry.resolve("mainnet").unwrap().rpc_url,
            "https://eth.llamarpc.com"
        );
    }

    #[test]
    fn overrides_for_unknown_networks_fail() {
        let overrides = HashMap::from([("polygon".to_string(), "https://polygon.example".to_string())]);
        assert!(matches!(
            NetworkRegistry::with_rpc_overrides(&overrides),
            Err(InspectorError::UnknownNetwork { .. })
        ));
    }

    #[test]
    fn get_chain_builds_rpc_chain() {
        let registry = NetworkRegistry::default();
        let chain = registry.get_chain("anvil").unwrap();
        assert_eq!(chain.chain_id(), 31337);
        assert_eq!(chain.network(), "anvil");
        assert_eq!(chain.rpc_url().as_str(), "http://127.0.0.1:8545/");
    }

    #[test]
    fn invalid_rpc_url_is_config_error() {
        let network = NetworkDescriptor::new("broken", 1, "not a url");
        assert!(matches!(
            network.to_chain(),
            Err(InspectorError::RpcConfigError { .. })
        ));
    }
}
