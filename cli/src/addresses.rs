use std::str::FromStr;

use alloy::primitives::Address;
use inspector_core::error::InspectorError;

const ADDRESS_HEX_LEN: usize = 40;

/// Parse an address argument. Only `0x` followed by exactly 40 hex characters is accepted.
pub fn parse_address(input: &str) -> Result<Address, InspectorError> {
    let invalid = |message: &str| InspectorError::InvalidAddress {
        input: input.to_string(),
        message: message.to_string(),
    };

    let digits = input
        .strip_prefix("0x")
        .ok_or_else(|| invalid("missing 0x prefix"))?;

    if digits.len() != ADDRESS_HEX_LEN {
        return Err(invalid("expected 40 hex characters after 0x"));
    }

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid("contains non-hex characters"));
    }

    Address::from_str(input).map_err(|e| invalid(&e.to_string()))
}

/// Split arguments into valid addresses and rejected inputs, keeping input order
pub fn partition_addresses(inputs: &[String]) -> (Vec<Address>, Vec<InspectorError>) {
    let mut valid = Vec::with_capacity(inputs.len());
    let mut rejected = Vec::new();

    for input in inputs {
        match parse_address(input) {
            Ok(address) => valid.push(address),
            Err(error) => rejected.push(error),
        }
    }

    (valid, rejected)
}
