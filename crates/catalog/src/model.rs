//! Book and comment records.

use rimas_search::Searchable;
use serde::{Deserialize, Serialize};

/// A reader comment on a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub user: String,
    pub avatar: String,
    pub text: String,
}

/// A book in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique, stable identifier
    pub id: u64,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover_image: String,
    /// One of the configured category names
    pub category: String,
    /// Average rating, 0 to 5
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub ratings_count: u32,
    #[serde(default)]
    pub price: f64,
    /// Oldest first
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Searchable for Book {
    fn title(&self) -> &str {
        &self.title
    }

    fn author(&self) -> &str {
        &self.author
    }

    fn category(&self) -> &str {
        &self.category
    }
}
