//! Configuration model for ccr.
//!
//! This module defines the Config struct that represents the router's
//! `config.json`. Only the fields the launcher needs are modelled; every other
//! field in the file (providers, routing rules, ...) is ignored.

mod model;
mod operations;


// Re-export public API
pub use model::{
    Config, DEFAULT_API_KEY, DEFAULT_API_TIMEOUT_MS, DEFAULT_PORT, StatusLineConfig,
};
