use alloy::{
    eips::eip7702::SignedAuthorization,
    primitives::Address,
    providers::Provider,
};
use inspector_core::{
    chain::Chain,
    credentials::SigningCredential,
    error::{AlloyRpcErrorToInspectorError, InspectorError},
    signer::{AccountSigner, EoaSigningOptions},
};

use crate::inspector::{DelegationRecord, check_delegation};

/// Who submits the transaction that carries an authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationExecutor {
    /// The EOA sends the transaction itself. Its nonce is consumed by the transaction
    /// before the authorization list is applied, so the authorization signs nonce + 1.
    SelfExecuting,
    /// Another account relays the authorization
    Sponsored,
}

impl AuthorizationExecutor {
    pub fn authorization_nonce(self, account_nonce: u64) -> u64 {
        match self {
            AuthorizationExecutor::SelfExecuting => account_nonce + 1,
            AuthorizationExecutor::Sponsored => account_nonce,
        }
    }
}

/// Represents an EOA address that can have EIP-7702 delegation, associated with a specific chain
#[derive(Clone, Debug)]
pub struct DelegatedAccount<C: Chain> {
    /// The EOA address that may have delegation
    pub eoa_address: Address,
    /// The chain this account operates on
    pub chain: C,
}

impl<C: Chain> DelegatedAccount<C> {
    /// Create a new delegated account from an EOA address and chain
    pub fn new(eoa_address: Address, chain: C) -> Self {
        Self { eoa_address, chain }
    }

    /// Read the account's code and decode its delegation state
    pub async fn delegation(&self) -> Result<DelegationRecord, InspectorError> {
        check_delegation(&self.chain, self.chain.network(), self.eoa_address).await
    }

    /// Whether the EOA currently delegates, optionally to a specific contract
    pub async fn is_delegated_to(
        &self,
        delegation_contract: Option<Address>,
    ) -> Result<bool, InspectorError> {
        let record = self.delegation().await?;
        Ok(match (record.delegated_to, delegation_contract) {
            (Some(target), Some(expected)) => target == expected,
            (Some(_), None) => true,
            (None, _) => false,
        })
    }

    /// Get the EOA address
    pub fn address(&self) -> Address {
        self.eoa_address
    }

    /// Get the current nonce for the EOA
    pub async fn get_nonce(&self) -> Result<u64, InspectorError> {
        self.chain
            .provider()
            .get_transaction_count(self.eoa_address)
            .await
            .map_err(|e| e.to_inspector_error(self.chain()))
    }

    /// Get a reference to the chain
    pub fn chain(&self) -> &C {
        &self.chain
    }

    /// Sign authorization for EIP-7702 delegation (automatically fetches nonce)
    pub async fn sign_authorization<S: AccountSigner>(
        &self,
        eoa_signer: &S,
        credentials: &SigningCredential,
        delegation_contract: Address,
        executor: AuthorizationExecutor,
    ) -> Result<SignedAuthorization, InspectorError> {
        let nonce = executor.authorization_nonce(self.get_nonce().await?);

        let signing_options = EoaSigningOptions {
            from: self.eoa_address,
            chain_id: Some(self.chain.chain_id()),
        };

        eoa_signer
            .sign_authorization(
                signing_options,
                self.chain.chain_id(),
                delegation_contract,
                nonce,
                credentials,
            )
            .await
    }
}
