pub mod addresses;
pub mod cli;
pub mod commands;
pub mod config;
pub mod report;

pub use crate::cli::{Cli, Command};
pub use crate::config::{InspectorConfig, LogFormat};
