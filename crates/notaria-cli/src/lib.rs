//! Notaria CLI library.
//!
//! This library provides the core functionality for the Notaria command-line interface,
//! including configuration management, model provisioning, command execution, and
//! output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod provision;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
