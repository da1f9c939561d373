use alloy::{
    eips::eip7702::{Authorization, SignedAuthorization},
    primitives::{Address, ChainId, U256},
    signers::Signer,
};
use serde::{Deserialize, Serialize};

use crate::{credentials::SigningCredential, error::InspectorError};

/// EOA signing options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EoaSigningOptions {
    /// The EOA address to sign with
    pub from: Address,
    /// Optional chain ID for the signature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<ChainId>,
}

/// Account signer trait using the impl Future pattern
pub trait AccountSigner {
    /// Sign an EIP-7702 authorization tuple
    fn sign_authorization(
        &self,
        options: EoaSigningOptions,
        chain_id: u64,
        address: Address,
        nonce: u64,
        credentials: &SigningCredential,
    ) -> impl std::future::Future<Output = Result<SignedAuthorization, InspectorError>> + Send;
}

/// EOA signer backed by locally held key material
#[derive(Clone, Debug, Default)]
pub struct EoaSigner;

impl EoaSigner {
    pub fn new() -> Self {
        Self
    }
}

impl AccountSigner for EoaSigner {
    async fn sign_authorization(
        &self,
        options: EoaSigningOptions,
        chain_id: u64,
        address: Address,
        nonce: u64,
        credentials: &SigningCredential,
    ) -> Result<SignedAuthorization, InspectorError> {
        match credentials {
            SigningCredential::PrivateKey(signer) => {
                if signer.address() != options.from {
                    return Err(InspectorError::validation(format!(
                        "Signer {} does not match requested account {}",
                        signer.address(),
                        options.from
                    )));
                }

                let authorization = Authorization {
                    chain_id: U256::from(chain_id),
                    address,
                    nonce,
                };

                let signature = signer
                    .sign_hash(&authorization.signature_hash())
                    .await
                    .map_err(|e| {
                        tracing::error!("Error signing authorization with EOA: {:?}", e);
                        InspectorError::from(e)
                    })?;

                tracing::debug!(
                    from = ?options.from,
                    chain_id,
                    delegate = ?address,
                    nonce,
                    "Signed EIP-7702 authorization"
                );

                Ok(authorization.into_signed(signature))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::signers::local::PrivateKeySigner;

    #[tokio::test]
    async fn signs_authorization_with_requested_fields() {
        let key = PrivateKeySigner::random();
        let from = key.address();
        let credentials = SigningCredential::PrivateKey(key);
        let delegate = Address::repeat_byte(0x42);

        let signed = EoaSigner::new()
            .sign_authorization(
                EoaSigningOptions {
                    from,
                    chain_id: Some(11155111),
                },
                11155111,
                delegate,
                7,
                &credentials,
            )
            .await
            .unwrap();

        let authorization = signed.inner();
        assert_eq!(authorization.chain_id, U256::from(11155111u64));
        assert_eq!(authorization.address, delegate);
        assert_eq!(authorization.nonce, 7);
    }

    #[tokio::test]
    async fn rejects_mismatched_from_address() {
        let credentials = SigningCredential::PrivateKey(PrivateKeySigner::random());

        let result = EoaSigner::new()
            .sign_authorization(
                EoaSigningOptions {
                    from: Address::repeat_byte(0x01),
                    chain_id: None,
                },
                1,
                Address::ZERO,
                0,
                &credentials,
            )
            .await;

        assert!(matches!(result, Err(InspectorError::ValidationError { .. })));
    }
}
