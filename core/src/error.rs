use alloy::{
    primitives::Address,
    transports::{RpcError as AlloyRpcError, TransportErrorKind},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chain::Chain;

#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RpcErrorKind {
    /// Server returned an error response.
    #[error("server returned an error response: {0}")]
    ErrorResp(RpcErrorResponse),

    /// Server returned a null response when a non-null response was expected.
    #[error("server returned a null response when a non-null response was expected")]
    NullResp,

    /// Rpc server returned an unsupported feature.
    #[error("unsupported feature: {message}")]
    UnsupportedFeature { message: String },

    /// Returned when a local pre-processing step fails.
    #[error("local usage error: {message}")]
    InternalError { message: String },

    /// JSON serialization error.
    #[error("serialization error: {message}")]
    SerError { message: String },

    /// JSON deserialization error.
    #[error("deserialization error: {message}, text: {text}")]
    DeserError {
        message: String,
        /// The text that failed to deserialize.
        text: String,
    },

    #[error("HTTP error {status}")]
    TransportHttpError { status: u16, body: String },

    #[error("Other transport error: {message}")]
    OtherTransportError { message: String },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RpcErrorResponse {
    /// The error code.
    pub code: i64,
    /// The error message (if any).
    pub message: String,
    /// The error data (if any).
    pub data: Option<String>,
}

impl std::fmt::Display for RpcErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "code {}: {}", self.code, self.message)?;
        if let Some(data) = &self.data {
            write!(f, ", data: {data}")?;
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InspectorError {
    /// A chain read or write failed at the transport or RPC layer
    #[error("RPC error on {network} (chain {chain_id}) at {rpc_url}: {message}")]
    #[serde(rename_all = "camelCase")]
    RpcError {
        network: String,
        chain_id: u64,
        rpc_url: String,
        message: String,
        kind: RpcErrorKind,
    },

    #[error("Unknown network '{network}'. Known networks: {}", .known.join(", "))]
    UnknownNetwork { network: String, known: Vec<String> },

    /// Account code returned by the node is not well-formed hex
    #[error("Malformed account code: {message}")]
    MalformedCode { message: String },

    #[error("Invalid address '{input}': {message}")]
    InvalidAddress { input: String, message: String },

    #[error("Bad RPC configuration: {message}")]
    RpcConfigError { message: String },

    #[error("Signing error: {message}")]
    SigningError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Transaction error on chain {chain_id}: {message}")]
    #[serde(rename_all = "camelCase")]
    TransactionError {
        chain_id: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        account: Option<Address>,
        message: String,
    },
}

impl InspectorError {
    pub fn validation(message: impl Into<String>) -> Self {
        InspectorError::ValidationError {
            message: message.into(),
        }
    }
}

pub trait AlloyRpcErrorToInspectorError {
    fn to_inspector_error(&self, chain: &impl Chain) -> InspectorError;
}

fn to_rpc_error_kind(err: &AlloyRpcError<TransportErrorKind>) -> RpcErrorKind {
    match err {
        AlloyRpcError::ErrorResp(err) => RpcErrorKind::ErrorResp(RpcErrorResponse {
            code: err.code,
            message: err.message.to_string(),
            data: err.data.as_ref().map(|data| data.to_string()),
        }),
        AlloyRpcError::NullResp => RpcErrorKind::NullResp,
        AlloyRpcError::UnsupportedFeature(feature) => RpcErrorKind::UnsupportedFeature {
            message: feature.to_string(),
        },
        AlloyRpcError::LocalUsageError(err) => RpcErrorKind::InternalError {
            message: err.to_string(),
        },
        AlloyRpcError::SerError(err) => RpcErrorKind::SerError {
            message: err.to_string(),
        },
        AlloyRpcError::DeserError { err, text } => RpcErrorKind::DeserError {
            message: err.to_string(),
            text: text.to_string(),
        },
        AlloyRpcError::Transport(err) => match err {
            TransportErrorKind::HttpError(err) => RpcErrorKind::TransportHttpError {
                status: err.status,
                body: err.body.to_string(),
            },
            _ => RpcErrorKind::OtherTransportError {
                message: err.to_string(),
            },
        },
    }
}

impl AlloyRpcErrorToInspectorError for AlloyRpcError<TransportErrorKind> {
    fn to_inspector_error(&self, chain: &impl Chain) -> InspectorError {
        InspectorError::RpcError {
            network: chain.network().to_string(),
            chain_id: chain.chain_id(),
            rpc_url: chain.rpc_url().to_string(),
            message: self.to_string(),
            kind: to_rpc_error_kind(self),
        }
    }
}

impl From<alloy::signers::Error> for InspectorError {
    fn from(error: alloy::signers::Error) -> Self {
        InspectorError::SigningError {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_error_response_display_includes_data() {
        let response = RpcErrorResponse {
            code: -32000,
            message: "header not found".to_string(),
            data: Some("0x".to_string()),
        };
        assert_eq!(response.to_string(), "code -32000: header not found, data: 0x");
    }

    #[test]
    fn unknown_network_lists_known_names() {
        let error = InspectorError::UnknownNetwork {
            network: "goerli".to_string(),
            known: vec!["mainnet".to_string(), "sepolia".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Unknown network 'goerli'. Known networks: mainnet, sepolia"
        );
    }

    #[test]
    fn errors_serialize_with_type_tag() {
        let error = InspectorError::MalformedCode {
            message: "odd number of digits".to_string(),
        };
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["type"], "MALFORMED_CODE");
        assert_eq!(json["message"], "odd number of digits");
    }
}
