//! A reader's browse session.
//!
//! [`Session`] is the headless model behind the bookstore screen: search box
//! with suggestions, category bar, book grid, detail view, and cart. The UI
//! layer forwards input events and renders what the accessors return.

use crate::ack::AddedAck;
use crate::cart::{Cart, CartService};
use crate::catalog::Catalog;
use crate::checkout::{checkout, CheckoutOutcome, Notifier};
use crate::error::{CatalogError, Result};
use crate::model::{Book, Comment};
use rimas_core::config::ConfigSchema;
use rimas_core::store::{FileStore, KeyValueStore};
use rimas_search::{FilterMemo, FilterOptions, MatchOptions, MemoStats, SuggestionBox};
use rimas_telemetry::{metrics, Timer};
use std::time::{Duration, Instant};

/// Browse state for one reader.
#[derive(Debug)]
pub struct Session<S> {
    catalog: Catalog,
    /// Titles and authors; fixed after load
    universe: Vec<String>,
    filter_options: FilterOptions,
    category: String,
    suggestions: SuggestionBox,
    memo: FilterMemo,
    cart: CartService<S>,
    ack: AddedAck,
    selected: Option<u64>,
    commenter: String,
    commenter_avatar: String,
}

impl Session<FileStore> {
    /// Load the configured catalog and open the cart in the configured directory.
    pub fn from_config(config: &ConfigSchema) -> Result<Self> {
        let catalog = Catalog::from_config(&config.catalog)?;
        let store = FileStore::open_configured(config.cart.storage_dir.as_deref())?;
        Self::new(catalog, store, config)
    }
}

impl<S: KeyValueStore> Session<S> {
    /// Start a session over `catalog`, reading the cart from `store`.
    ///
    /// The configuration is validated first, so schemas built in code get the
    /// same checks as loaded files.
    pub fn new(catalog: Catalog, store: S, config: &ConfigSchema) -> Result<Self> {
        config.validate()?;
        let search = &config.search;
        let matching = MatchOptions::new(
            search.short_query_len,
            search.short_threshold,
            search.long_threshold,
        )?;
        let filter_options = FilterOptions {
            all_category: catalog.all_category().to_string(),
            matching,
        };

        let universe = catalog.universe();
        let category = catalog.all_category().to_string();
        let cart = CartService::open(store, config.cart.storage_key.as_str());

        tracing::debug!(
            books = catalog.books().len(),
            universe = universe.len(),
            cart_items = cart.cart().item_count(),
            "Session started"
        );

        Ok(Self {
            catalog,
            universe,
            filter_options,
            category,
            suggestions: SuggestionBox::new(search.suggestion_cap),
            memo: FilterMemo::new(),
            cart,
            ack: AddedAck::new(Duration::from_millis(config.cart.ack_duration_ms)),
            selected: None,
            commenter: config.catalog.default_user.clone(),
            commenter_avatar: config.catalog.default_avatar.clone(),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // Search box

    /// The reader typed into the search box.
    pub fn set_query(&mut self, query: &str) {
        self.suggestions.input(&self.universe, query);
    }

    pub fn query(&self) -> &str {
        self.suggestions.query()
    }

    /// Suggestions currently shown under the search box.
    pub fn suggestions(&self) -> &[String] {
        self.suggestions.visible_suggestions()
    }

    pub fn suggestions_visible(&self) -> bool {
        self.suggestions.is_visible()
    }

    /// The search box regained focus.
    pub fn focus_search(&mut self) {
        self.suggestions.focus();
    }

    /// Show or hide the dropdown; the UI sends `false` on a click outside it.
    pub fn set_suggestions_visible(&mut self, visible: bool) {
        self.suggestions.set_visible(visible);
    }

    /// Take the shown suggestion at `index` as the query.
    pub fn choose_suggestion(&mut self, index: usize) -> Option<String> {
        self.suggestions.choose(&self.universe, index)
    }

    // Category bar

    /// Restrict the grid to `category`, or lift the restriction with the sentinel.
    pub fn select_category(&mut self, category: &str) {
        if category != self.filter_options.all_category
            && !self.catalog.categories().iter().any(|c| c == category)
        {
            tracing::warn!(category, "Selected category is not configured; no books will match");
        }
        self.category = category.to_string();
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Sentinel first, then configured categories.
    pub fn categories(&self) -> Vec<&str> {
        self.catalog.categories_with_all()
    }

    // Grid

    /// Books matching the current category and query, in catalog order.
    ///
    /// Recomputed only when the category, query, or catalog revision changed
    /// since the last call.
    pub fn visible_books(&mut self) -> Vec<&Book> {
        let _timer = Timer::start("search.filter.duration_ms");
        let before = self.memo.stats();

        let books = self.memo.filter(
            self.catalog.books(),
            self.catalog.revision(),
            &self.category,
            self.suggestions.query(),
            &self.filter_options,
        );

        if self.memo.stats().hits > before.hits {
            metrics().increment("search.filter.memo_hit");
        } else {
            metrics().increment("search.filter.recomputed");
        }
        books
    }

    /// Memo hit and miss counts for this session.
    pub fn filter_stats(&self) -> MemoStats {
        self.memo.stats()
    }

    // Detail view

    /// Open the detail view for a book.
    pub fn open_book(&mut self, id: u64) -> Result<&Book> {
        let book = self.catalog.get(id).ok_or(CatalogError::BookNotFound(id))?;
        self.selected = Some(id);
        Ok(book)
    }

    pub fn close_book(&mut self) {
        self.selected = None;
    }

    pub fn selected_book(&self) -> Option<&Book> {
        self.selected.and_then(|id| self.catalog.get(id))
    }

    /// Rate the open book.
    pub fn rate_selected(&mut self, stars: u8) -> Result<&Book> {
        let id = self.selected.ok_or(CatalogError::NoSelection)?;
        self.catalog.rate(id, stars)
    }

    /// Comment on the open book as the configured reader.
    ///
    /// Blank text is ignored.
    pub fn comment_on_selected(&mut self, text: &str) -> Result<Option<&Comment>> {
        let id = self.selected.ok_or(CatalogError::NoSelection)?;
        self.catalog
            .add_comment(id, &self.commenter, &self.commenter_avatar, text)
    }

    // Cart

    /// Add one copy of a book and acknowledge it until `now + ack_duration`.
    pub fn add_to_cart(&mut self, id: u64, now: Instant) -> Result<&Cart> {
        let book = self.catalog.get(id).ok_or(CatalogError::BookNotFound(id))?;
        self.cart.add(book)?;
        self.ack.show(book.title.as_str(), now);
        Ok(self.cart.cart())
    }

    pub fn remove_from_cart(&mut self, id: u64) -> Result<bool> {
        self.cart.remove(id)
    }

    pub fn set_cart_quantity(&mut self, id: u64, quantity: u32) -> Result<bool> {
        self.cart.set_quantity(id, quantity)
    }

    pub fn cart(&self) -> &Cart {
        self.cart.cart()
    }

    pub fn cart_store(&self) -> &S {
        self.cart.store()
    }

    /// Title of the book just added, while its acknowledgement lasts.
    pub fn added_ack(&self, now: Instant) -> Option<&str> {
        self.ack.current(now)
    }

    pub fn dismiss_ack(&mut self) {
        self.ack.dismiss();
    }

    /// Order everything in the cart.
    pub fn checkout<N: Notifier + ?Sized>(&mut self, notifier: &mut N) -> Result<CheckoutOutcome> {
        checkout(&mut self.cart, notifier)
    }
}
