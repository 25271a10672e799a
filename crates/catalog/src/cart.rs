//! Shopping cart and its persistence.
//!
//! The cart is read from the injected [`KeyValueStore`] once, when the
//! service is opened, and rewritten in full after every mutation. Missing or
//! unreadable stored data is treated as an empty cart.

use crate::error::Result;
use crate::model::Book;
use rimas_core::store::KeyValueStore;
use rimas_core::ResultExt;
use rimas_telemetry::metrics;
use serde::{Deserialize, Serialize};

/// One book in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub book_id: u64,
    pub title: String,
    /// Unit price at the time the book was added
    pub price: f64,
    pub quantity: u32,
}

impl CartLine {
    /// Price times quantity.
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Cart contents, serialized as a JSON array of lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Lines in the order books were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds nothing.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of copies across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of all line subtotals.
    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Add one copy of `book`.
    pub fn add(&mut self, book: &Book) {
        match self.lines.iter_mut().find(|l| l.book_id == book.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine {
                book_id: book.id,
                title: book.title.clone(),
                price: book.price,
                quantity: 1,
            }),
        }
    }

    /// Drop the line for `book_id`; returns whether it was present.
    pub fn remove(&mut self, book_id: u64) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.book_id != book_id);
        self.lines.len() != before
    }

    /// Set the quantity of an existing line; zero removes it.
    pub fn set_quantity(&mut self, book_id: u64, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(book_id);
        }
        match self.lines.iter_mut().find(|l| l.book_id == book_id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// A cart bound to the store it is persisted in.
#[derive(Debug)]
pub struct CartService<S> {
    store: S,
    key: String,
    cart: Cart,
}

impl<S: KeyValueStore> CartService<S> {
    /// Read the cart stored under `key`, recovering to empty on any failure.
    pub fn open(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = match store.get(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<Cart>(&raw) {
                Ok(cart) => cart,
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Stored cart is malformed; starting with an empty cart");
                    Cart::default()
                }
            },
            Ok(None) => Cart::default(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to read stored cart; starting with an empty cart");
                Cart::default()
            }
        };

        tracing::debug!(key = %key, lines = cart.lines().len(), "Cart opened");
        Self { store, key, cart }
    }

    /// Current contents.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Add one copy of `book` and persist.
    pub fn add(&mut self, book: &Book) -> Result<&Cart> {
        self.cart.add(book);
        self.persist()?;
        Ok(&self.cart)
    }

    /// Remove a line and persist; returns whether it was present.
    pub fn remove(&mut self, book_id: u64) -> Result<bool> {
        let removed = self.cart.remove(book_id);
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Change a line's quantity and persist; returns whether the line existed.
    pub fn set_quantity(&mut self, book_id: u64, quantity: u32) -> Result<bool> {
        let changed = self.cart.set_quantity(book_id, quantity);
        if changed {
            self.persist()?;
        }
        Ok(changed)
    }

    /// Empty the cart and persist.
    pub fn clear(&mut self) -> Result<()> {
        self.cart.clear();
        self.persist()
    }

    fn persist(&mut self) -> Result<()> {
        let raw = serde_json::to_string(&self.cart)?;
        self.store
            .set(&self.key, &raw)
            .context(format!("Saving cart under key '{}'", self.key))?;
        metrics().increment("cart.mutations");
        Ok(())
    }
}
