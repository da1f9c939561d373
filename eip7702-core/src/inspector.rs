use alloy::primitives::{Address, Bytes};
use futures::{StreamExt, stream};
use inspector_core::{chain::CodeReader, error::InspectorError};
use serde::{Deserialize, Serialize};

use crate::code::{DelegationStatus, inspect};

/// Result of checking one address, as reported to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegationRecord {
    pub is_delegated: bool,
    pub address: Address,
    pub network: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegated_to: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Bytes>,
    pub message: String,
    /// Set when the code fetch failed during a batch check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<InspectorError>,
}

impl DelegationRecord {
    pub fn from_status(address: Address, network: &str, status: &DelegationStatus) -> Self {
        Self {
            is_delegated: status.is_delegated(),
            address,
            network: network.to_string(),
            delegated_to: status.delegated_to(),
            code: status.code().cloned(),
            message: status.message(),
            error: None,
        }
    }

    pub fn from_error(address: Address, network: &str, error: InspectorError) -> Self {
        Self {
            is_delegated: false,
            address,
            network: network.to_string(),
            delegated_to: None,
            code: None,
            message: format!("Error checking delegation: {error}"),
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Fetch and decode the code of a single address. Read failures propagate.
pub async fn check_delegation<R: CodeReader>(
    reader: &R,
    network: &str,
    address: Address,
) -> Result<DelegationRecord, InspectorError> {
    let code = reader.get_code(address).await?;
    let status = inspect(&code);

    tracing::debug!(
        address = ?address,
        network,
        code_length = code.len(),
        has_delegation = status.is_delegated(),
        delegated_to = ?status.delegated_to(),
        "EIP-7702 delegation check result"
    );

    Ok(DelegationRecord::from_status(address, network, &status))
}

/// Check many addresses with up to `concurrency` reads in flight.
///
/// The output has one record per input address, in input order. A failed read is
/// recorded on that address's record and does not stop the others.
pub async fn check_delegations<R: CodeReader>(
    reader: &R,
    network: &str,
    addresses: &[Address],
    concurrency: usize,
) -> Vec<DelegationRecord> {
    stream::iter(addresses.iter().copied())
        .map(|address| async move {
            match check_delegation(reader, network, address).await {
                Ok(record) => record,
                Err(error) => {
                    tracing::warn!(
                        address = ?address,
                        network,
                        error = %error,
                        "Delegation check failed"
                    );
                    DelegationRecord::from_error(address, network, error)
                }
            }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await
}

/// Totals over a batch of records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub delegated: usize,
    pub not_delegated: usize,
    pub errors: usize,
}

impl BatchSummary {
    pub fn from_records(records: &[DelegationRecord]) -> Self {
        records.iter().fold(Self::default(), |mut summary, record| {
            summary.total += 1;
            if record.is_error() {
                summary.errors += 1;
            } else if record.is_delegated {
                summary.delegated += 1;
            } else {
                summary.not_delegated += 1;
            }
            summary
        })
    }
}
