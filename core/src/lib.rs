pub mod chain;
pub mod credentials;
pub mod error;
pub mod network;
pub mod signer;
