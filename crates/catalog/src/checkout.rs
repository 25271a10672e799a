//! Checkout and user-facing notices.

use crate::cart::CartService;
use crate::error::Result;
use rimas_core::store::KeyValueStore;
use rimas_telemetry::{metrics, Event};
use serde::Serialize;

/// A message the UI layer should surface to the reader.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Notice {
    /// Checkout attempted with nothing in the cart
    EmptyCart,
    /// Order accepted
    OrderPlaced { items: u32, total: f64 },
}

impl Notice {
    /// Text shown to the reader.
    pub fn message(&self) -> String {
        match self {
            Notice::EmptyCart => "السلة فارغة!".to_string(),
            Notice::OrderPlaced { items, total } => {
                format!("تم تأكيد طلبك: {items} كتاب بمجموع {total:.2}")
            }
        }
    }
}

/// Receives notices raised by checkout.
pub trait Notifier {
    fn notify(&mut self, notice: &Notice);
}

impl<F: FnMut(&Notice)> Notifier for F {
    fn notify(&mut self, notice: &Notice) {
        self(notice);
    }
}

/// Forwards notices to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notice: &Notice) {
        tracing::info!(notice = %notice.message(), "Notice");
    }
}

/// What checkout did.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// Nothing to order; the cart is untouched
    Rejected,
    /// The order went through and the cart was emptied
    Completed { items: u32, total: f64 },
}

/// Place an order for everything in the cart.
pub fn checkout<S, N>(cart: &mut CartService<S>, notifier: &mut N) -> Result<CheckoutOutcome>
where
    S: KeyValueStore,
    N: Notifier + ?Sized,
{
    if cart.cart().is_empty() {
        notifier.notify(&Notice::EmptyCart);
        return Ok(CheckoutOutcome::Rejected);
    }

    let items = cart.cart().item_count();
    let total = cart.cart().total();
    cart.clear()?;

    metrics().increment("checkout.completed");
    Event::new(
        "checkout.completed",
        serde_json::json!({ "items": items, "total": total }),
    )
    .log();

    notifier.notify(&Notice::OrderPlaced { items, total });
    Ok(CheckoutOutcome::Completed { items, total })
}
