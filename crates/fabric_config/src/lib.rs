//! Parsing and validation of `fabric.toml` builder configuration.
//!
//! The configuration controls how domain names are resolved by the module
//! builder and which pattern encoding the conditional lowering emits.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
