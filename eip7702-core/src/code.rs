use alloy::{
    hex,
    primitives::{Address, Bytes},
};
use inspector_core::error::InspectorError;
use serde::{Deserialize, Serialize};

use crate::constants::{EIP_7702_DELEGATION_CODE_LENGTH, EIP_7702_DELEGATION_PREFIX};

/// What an account's code says about EIP-7702 delegation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum DelegationStatus {
    /// Empty code: a plain EOA, or a cleared delegation
    NoCode,
    /// Code is a delegation designator
    #[serde(rename_all = "camelCase")]
    Delegated { delegated_to: Address, code: Bytes },
    /// Code exists but is not a delegation designator
    NotDelegated { code: Bytes },
}

impl DelegationStatus {
    pub fn is_delegated(&self) -> bool {
        matches!(self, DelegationStatus::Delegated { .. })
    }

    pub fn delegated_to(&self) -> Option<Address> {
        match self {
            DelegationStatus::Delegated { delegated_to, .. } => Some(*delegated_to),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<&Bytes> {
        match self {
            DelegationStatus::NoCode => None,
            DelegationStatus::Delegated { code, .. } | DelegationStatus::NotDelegated { code } => {
                Some(code)
            }
        }
    }

    pub fn message(&self) -> String {
        match self {
            DelegationStatus::NoCode => {
                "No code at address - not delegated (regular EOA)".to_string()
            }
            DelegationStatus::Delegated { delegated_to, .. } => {
                format!("EIP-7702 delegation active to {delegated_to}")
            }
            DelegationStatus::NotDelegated { .. } => {
                "Address has code but no EIP-7702 delegation (regular contract)".to_string()
            }
        }
    }
}

/// Decode account code into a [`DelegationStatus`].
///
/// A designator is `0xef0100` followed by the 20-byte delegate address. Code that
/// carries the prefix but is too short to hold an address is treated as ordinary code.
pub fn inspect(code: &[u8]) -> DelegationStatus {
    if code.is_empty() {
        return DelegationStatus::NoCode;
    }

    if code.len() < EIP_7702_DELEGATION_CODE_LENGTH || !code.starts_with(&EIP_7702_DELEGATION_PREFIX)
    {
        return DelegationStatus::NotDelegated {
            code: Bytes::copy_from_slice(code),
        };
    }

    // EIP-7702 format: 0xef0100 + 20 bytes address
    let delegated_to = Address::from_slice(
        &code[EIP_7702_DELEGATION_PREFIX.len()..EIP_7702_DELEGATION_CODE_LENGTH],
    );

    DelegationStatus::Delegated {
        delegated_to,
        code: Bytes::copy_from_slice(code),
    }
}

/// Decode `0x`-prefixed hex code as returned by `eth_getCode`.
///
/// `""` and `"0x"` are both empty code. Hex digits may be in either case. Any other
/// input without the `0x` prefix is malformed.
pub fn inspect_hex(code: &str) -> Result<DelegationStatus, InspectorError> {
    let code = code.trim();
    if code.is_empty() {
        return Ok(DelegationStatus::NoCode);
    }

    let digits = code
        .strip_prefix("0x")
        .ok_or_else(|| InspectorError::MalformedCode {
            message: format!("missing 0x prefix in {}", abbreviate(code)),
        })?;

    let bytes = hex::decode(digits).map_err(|e| InspectorError::MalformedCode {
        message: format!("{e} in {}", abbreviate(code)),
    })?;
    Ok(inspect(&bytes))
}

fn abbreviate(code: &str) -> String {
    const MAX: usize = 18;
    if code.len() <= MAX {
        code.to_string()
    } else {
        format!("{}...", code.chars().take(MAX).collect::<String>())
    }
}
