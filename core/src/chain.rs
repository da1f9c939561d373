use alloy::{
    primitives::{Address, Bytes},
    providers::{Provider, ProviderBuilder, RootProvider},
    transports::{RpcError as AlloyRpcError, http::reqwest::Url},
};

use crate::{
    error::{AlloyRpcErrorToInspectorError, InspectorError},
    network::NetworkDescriptor,
};

pub trait Chain: Send + Sync {
    fn chain_id(&self) -> u64;
    /// Registry name of the network this chain was resolved from
    fn network(&self) -> &str;
    fn rpc_url(&self) -> Url;

    fn provider(&self) -> &RootProvider;
}

/// Read access to account code. Any [`Chain`] provides it through its provider.
pub trait CodeReader: Send + Sync {
    fn get_code(
        &self,
        address: Address,
    ) -> impl std::future::Future<Output = Result<Bytes, InspectorError>> + Send;
}

impl<C: Chain> CodeReader for C {
    async fn get_code(&self, address: Address) -> Result<Bytes, InspectorError> {
        self.provider()
            .get_code_at(address)
            .await
            .map_err(|e| match e {
                // The node answered, but its code is not valid hex
                AlloyRpcError::DeserError { err, .. } => InspectorError::MalformedCode {
                    message: format!("{err} for {address} on {}", self.network()),
                },
                e => e.to_inspector_error(self),
            })
    }
}

#[derive(Clone)]
pub struct RpcChain {
    network: String,
    chain_id: u64,
    rpc_url: Url,

    pub provider: RootProvider,
}

impl Chain for RpcChain {
    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn network(&self) -> &str {
        &self.network
    }

    fn rpc_url(&self) -> Url {
        self.rpc_url.clone()
    }

    fn provider(&self) -> &RootProvider {
        &self.provider
    }
}

impl NetworkDescriptor {
    pub fn to_chain(&self) -> Result<RpcChain, InspectorError> {
        let rpc_url = Url::parse(&self.rpc_url).map_err(|e| InspectorError::RpcConfigError {
            message: format!("Failed to parse RPC URL for {}: {e}", self.name),
        })?;

        tracing::debug!(
            network = %self.name,
            chain_id = self.chain_id,
            rpc_url = %rpc_url,
            "Connecting to chain"
        );

        Ok(RpcChain {
            network: self.name.clone(),
            chain_id: self.chain_id,
            rpc_url: rpc_url.clone(),
            provider: ProviderBuilder::new()
                .disable_recommended_fillers()
                .connect_http(rpc_url),
        })
    }
}

pub trait ChainService {
    fn get_chain(&self, network: &str) -> Result<impl Chain + Clone, InspectorError>;
}
