//! Configuration loading and schema definitions
//!
//! Shared configuration types for the catalog, search, cart, and logging.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
