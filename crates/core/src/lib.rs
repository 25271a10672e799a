//! Core utilities for the Rimas bookstore
//!
//! This crate provides shared functionality used by the search and catalog crates:
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with defaults and validation
//! - **Storage**: A small key-value store abstraction with in-memory and file-backed implementations
//!
//! # Example
//!
//! ```rust,no_run
//! use rimas_core::{config::Config, store::MemoryStore, store::KeyValueStore};
//!
//! let config = Config::load(None).expect("invalid configuration");
//! let mut store = MemoryStore::new();
//! store.set(&config.schema.cart.storage_key, "{}").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod store;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{Error, ErrorCode, Result, ResultExt};
    pub use crate::store::{FileStore, KeyValueStore, MemoryStore};
}
