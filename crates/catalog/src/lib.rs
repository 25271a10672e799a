//! Book catalog and browse session for the Rimas bookstore.
//!
//! This crate provides:
//! - The `Book`/`Comment` model and a JSON catalog source
//! - Star ratings folded into a running average, and reader comments
//! - A cart persisted through any [`rimas_core::store::KeyValueStore`]
//! - Checkout with user-facing notices
//! - [`Session`], the state behind the search box, category bar, grid, and detail view
//!
//! # Example
//!
//! ```
//! use rimas_catalog::{Catalog, Session};
//! use rimas_core::{config::ConfigSchema, store::MemoryStore};
//!
//! let catalog = Catalog::sample().unwrap();
//! let mut session = Session::new(catalog, MemoryStore::new(), &ConfigSchema::default()).unwrap();
//!
//! session.set_query("dune");
//! assert_eq!(session.suggestions(), ["Dune"]);
//! assert_eq!(session.visible_books()[0].author, "Frank Herbert");
//! ```

pub mod ack;
pub mod cart;
mod catalog;
pub mod checkout;
mod error;
mod model;
pub mod rating;
mod session;

pub use ack::AddedAck;
pub use cart::{Cart, CartLine, CartService};
pub use catalog::Catalog;
pub use checkout::{checkout, CheckoutOutcome, LogNotifier, Notice, Notifier};
pub use error::{CatalogError, CatalogErrorCode, Result};
pub use model::{Book, Comment};
pub use rating::{fold_rating, MAX_STARS, MIN_STARS};
pub use session::Session;
