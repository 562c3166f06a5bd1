//! Command implementations.

pub mod config;
pub mod extract;
pub mod sections;

pub use self::config::execute_config;
pub use self::extract::execute_extract;
pub use self::sections::execute_sections;

use crate::error::Result;
use std::io::{self, Read};

/// Source name used for documents read from stdin.
pub const STDIN_SOURCE: &str = "<stdin>";

/// Read the whole of stdin.
pub(crate) fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}
