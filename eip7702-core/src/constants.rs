use alloy::primitives::Address;

/// EIP-7702 delegation prefix bytes
pub const EIP_7702_DELEGATION_PREFIX: [u8; 3] = [0xef, 0x01, 0x00];

/// EIP-7702 delegation code length (prefix + address)
pub const EIP_7702_DELEGATION_CODE_LENGTH: usize = 23;

/// Authorizing this address clears an existing delegation
pub const REVOCATION_ADDRESS: Address = Address::ZERO;

/// Default number of concurrent code fetches in a batch check
pub const DEFAULT_BATCH_CONCURRENCY: usize = 4;
