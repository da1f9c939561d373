use alloy::{
    eips::eip7702::SignedAuthorization,
    network::{TransactionBuilder, TransactionBuilder7702},
    primitives::{Address, B256, Bytes},
    providers::{PendingTransactionError, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
};
use inspector_core::{
    chain::Chain,
    credentials::SigningCredential,
    error::{AlloyRpcErrorToInspectorError, InspectorError},
    signer::AccountSigner,
};
use serde::{Deserialize, Serialize};

use crate::{
    constants::REVOCATION_ADDRESS,
    delegated_account::{AuthorizationExecutor, DelegatedAccount},
};

/// What the authorization points the EOA at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegationTarget {
    Contract(Address),
    Revoke,
}

impl DelegationTarget {
    pub fn address(&self) -> Address {
        match self {
            DelegationTarget::Contract(address) => *address,
            DelegationTarget::Revoke => REVOCATION_ADDRESS,
        }
    }
}

/// Outcome of a mined delegate or revoke transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegationReceipt {
    pub transaction_hash: B256,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    pub success: bool,
    pub authorization: SignedAuthorization,
}

/// A self-call transaction that installs or clears an EIP-7702 delegation
pub struct DelegationTransaction<C: Chain> {
    /// The delegated account this transaction belongs to
    account: DelegatedAccount<C>,
    target: DelegationTarget,
    /// Signed authorization, present once [`Self::sign`] has run
    authorization: Option<SignedAuthorization>,
}

impl<C: Chain> DelegatedAccount<C> {
    /// Delegate the EOA's code execution to `contract`
    pub fn delegate_to(self, contract: Address) -> Result<DelegationTransaction<C>, InspectorError> {
        if contract == REVOCATION_ADDRESS {
            return Err(InspectorError::validation(
                "Cannot delegate to the zero address, use revoke instead",
            ));
        }

        Ok(DelegationTransaction {
            account: self,
            target: DelegationTarget::Contract(contract),
            authorization: None,
        })
    }

    /// Clear any delegation by authorizing the zero address
    pub fn revoke(self) -> DelegationTransaction<C> {
        DelegationTransaction {
            account: self,
            target: DelegationTarget::Revoke,
            authorization: None,
        }
    }
}

impl<C: Chain> DelegationTransaction<C> {
    /// Set the authorization directly, e.g. one signed out of band
    pub fn set_authorization(&mut self, authorization: SignedAuthorization) {
        self.authorization = Some(authorization);
    }

    /// Sign the authorization for a transaction the EOA sends itself
    pub async fn sign<S: AccountSigner>(
        mut self,
        signer: &S,
        credentials: &SigningCredential,
    ) -> Result<Self, InspectorError> {
        let authorization = self
            .account
            .sign_authorization(
                signer,
                credentials,
                self.target.address(),
                AuthorizationExecutor::SelfExecuting,
            )
            .await?;
        self.authorization = Some(authorization);
        Ok(self)
    }

    /// Build the EIP-7702 transaction request: a call from the EOA to itself with
    /// empty calldata, carrying the signed authorization
    pub fn build(&self) -> Result<TransactionRequest, InspectorError> {
        let authorization = self.signed_authorization()?.clone();

        let eoa = self.account.address();
        Ok(TransactionRequest::default()
            .with_from(eoa)
            .with_to(eoa)
            .with_input(Bytes::new())
            .with_chain_id(self.account.chain().chain_id())
            .with_authorization_list(vec![authorization]))
    }

    /// Submit through a wallet-filled provider and wait for the receipt
    pub async fn send(
        &self,
        credentials: &SigningCredential,
    ) -> Result<DelegationReceipt, InspectorError> {
        let chain = self.account.chain();
        let authorization = self.signed_authorization()?.clone();
        let request = self.build()?;

        let provider = ProviderBuilder::new()
            .wallet(credentials.wallet())
            .connect_http(chain.rpc_url());

        tracing::info!(
            eoa = ?self.account.address(),
            target = ?self.target.address(),
            network = chain.network(),
            chain_id = chain.chain_id(),
            "Sending EIP-7702 authorization transaction"
        );

        let pending = provider
            .send_transaction(request)
            .await
            .map_err(|e| e.to_inspector_error(chain))?;

        tracing::info!(transaction_hash = ?pending.tx_hash(), "Transaction submitted, waiting for receipt");

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| self.pending_error(e))?;

        let success = receipt.status();
        if success {
            tracing::info!(
                transaction_hash = ?receipt.transaction_hash,
                block_number = ?receipt.block_number,
                "Authorization transaction confirmed"
            );
        } else {
            tracing::warn!(
                transaction_hash = ?receipt.transaction_hash,
                "Authorization transaction reverted"
            );
        }

        Ok(DelegationReceipt {
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            success,
            authorization,
        })
    }

    fn signed_authorization(&self) -> Result<&SignedAuthorization, InspectorError> {
        self.authorization.as_ref().ok_or_else(|| {
            InspectorError::validation("Authorization must be signed before building the transaction")
        })
    }

    fn pending_error(&self, error: PendingTransactionError) -> InspectorError {
        match error {
            PendingTransactionError::TransportError(e) => e.to_inspector_error(self.account.chain()),
            other => InspectorError::TransactionError {
                chain_id: self.account.chain().chain_id(),
                account: Some(self.account.address()),
                message: other.to_string(),
            },
        }
    }

    pub fn target(&self) -> DelegationTarget {
        self.target
    }

    /// Get the authorization if set
    pub fn authorization(&self) -> Option<&SignedAuthorization> {
        self.authorization.as_ref()
    }
}
