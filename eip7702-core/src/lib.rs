pub mod code;
pub mod constants;
pub mod delegated_account;
pub mod inspector;
pub mod transaction;
