use std::str::FromStr;

use alloy::{
    network::EthereumWallet,
    primitives::Address,
    signers::local::PrivateKeySigner,
};

use crate::error::InspectorError;

#[derive(Debug, Clone)]
pub enum SigningCredential {
    PrivateKey(PrivateKeySigner),
}

impl SigningCredential {
    /// Parse a hex private key, with or without the `0x` prefix
    pub fn from_private_key(key: &str) -> Result<Self, InspectorError> {
        let signer = PrivateKeySigner::from_str(key.trim()).map_err(|e| {
            InspectorError::SigningError {
                message: format!("Invalid private key: {e}"),
            }
        })?;
        Ok(SigningCredential::PrivateKey(signer))
    }

    pub fn address(&self) -> Address {
        match self {
            SigningCredential::PrivateKey(signer) => signer.address(),
        }
    }

    pub fn wallet(&self) -> EthereumWallet {
        match self {
            SigningCredential::PrivateKey(signer) => EthereumWallet::from(signer.clone()),
        }
    }
}
