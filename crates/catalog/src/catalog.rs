//! The in-memory book catalog.
//!
//! Books are loaded once and kept in source order. Titles, authors, and
//! categories never change after loading; ratings and comments do, and every
//! such update bumps [`Catalog::revision`] so derived views know to refresh.

use crate::error::{CatalogError, Result};
use crate::model::{Book, Comment};
use crate::rating::fold_rating;
use rimas_core::config::CatalogConfig;
use rimas_core::{Error, ResultExt};
use rimas_search::build_universe;
use std::collections::HashSet;
use std::path::Path;

const SAMPLE_BOOKS: &str = include_str!("../data/books.json");

/// Ordered books plus the closed category set.
#[derive(Debug, Clone)]
pub struct Catalog {
    books: Vec<Book>,
    categories: Vec<String>,
    all_category: String,
    revision: u64,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn from_books(books: Vec<Book>, config: &CatalogConfig) -> Result<Self> {
        let mut seen = HashSet::with_capacity(books.len());
        for book in &books {
            if !seen.insert(book.id) {
                return Err(CatalogError::DuplicateId(book.id));
            }
            if !config.categories.contains(&book.category) {
                tracing::warn!(
                    id = book.id,
                    category = %book.category,
                    "Book category is not configured; it will only appear under all categories"
                );
            }
        }

        tracing::debug!(books = books.len(), categories = config.categories.len(), "Catalog built");

        Ok(Self {
            books,
            categories: config.categories.clone(),
            all_category: config.all_category.clone(),
            revision: 0,
        })
    }

    /// Parse a JSON array of books.
    pub fn from_json_str(json: &str, config: &CatalogConfig) -> Result<Self> {
        let books: Vec<Book> = serde_json::from_str(json)?;
        Self::from_books(books, config)
    }

    /// Load a JSON array of books from a file.
    pub fn load(path: impl AsRef<Path>, config: &CatalogConfig) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(Error::from)
            .context(format!("Failed to read catalog {}", path.display()))?;
        Self::from_json_str(&content, config)
    }

    /// The bundled sample catalog with default categories.
    pub fn sample() -> Result<Self> {
        Self::from_json_str(SAMPLE_BOOKS, &CatalogConfig::default())
    }

    /// Load the configured source, or the bundled sample when none is set.
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        match &config.source {
            Some(path) => Self::load(path, config),
            None => Self::from_json_str(SAMPLE_BOOKS, config),
        }
    }

    /// All books, in source order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Look up a book by id.
    pub fn get(&self, id: u64) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// Configured category names.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// The "no restriction" sentinel.
    pub fn all_category(&self) -> &str {
        &self.all_category
    }

    /// Sentinel first, then the configured categories, as the filter bar shows them.
    pub fn categories_with_all(&self) -> Vec<&str> {
        std::iter::once(self.all_category.as_str())
            .chain(self.categories.iter().map(String::as_str))
            .collect()
    }

    /// Version number, bumped on every rating or comment update.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Every title and author, deduplicated, in catalog order.
    pub fn universe(&self) -> Vec<String> {
        build_universe(
            self.books
                .iter()
                .flat_map(|b| [b.title.as_str(), b.author.as_str()]),
        )
    }

    /// Submit a star rating for a book.
    pub fn rate(&mut self, id: u64, stars: u8) -> Result<&Book> {
        let book = self.get_mut(id)?;
        let (rating, count) = fold_rating(book.rating, book.ratings_count, stars)?;
        book.rating = rating;
        book.ratings_count = count;
        tracing::debug!(id, stars, rating, count, "Rating recorded");

        self.revision += 1;
        self.get(id).ok_or(CatalogError::BookNotFound(id))
    }

    /// Append a comment to a book.
    ///
    /// Blank text is ignored and yields `Ok(None)`.
    pub fn add_comment(
        &mut self,
        id: u64,
        user: &str,
        avatar: &str,
        text: &str,
    ) -> Result<Option<&Comment>> {
        let book = self.get_mut(id)?;
        if text.trim().is_empty() {
            return Ok(None);
        }

        let comment_id =
            next_comment_id(&book.comments).ok_or(CatalogError::CommentIdsExhausted(id))?;
        book.comments.push(Comment {
            id: comment_id,
            user: user.to_string(),
            avatar: avatar.to_string(),
            text: text.to_string(),
        });
        tracing::debug!(id, comment_id, "Comment added");

        self.revision += 1;
        Ok(self.get(id).and_then(|b| b.comments.last()))
    }

    fn get_mut(&mut self, id: u64) -> Result<&mut Book> {
        self.books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(CatalogError::BookNotFound(id))
    }
}

/// Millisecond timestamp, moved past any existing id.
///
/// `None` when an existing comment already holds `u64::MAX`.
fn next_comment_id(existing: &[Comment]) -> Option<u64> {
    let now = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
    match existing.iter().map(|c| c.id).max() {
        Some(max) => max.checked_add(1).map(|next| now.max(next)),
        None => Some(now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> Catalog {
        Catalog::sample().unwrap()
    }

    #[test]
    fn test_sample_loads() {
        let catalog = sample();
        assert_eq!(catalog.books().len(), 9);
        assert_eq!(catalog.revision(), 0);
        assert_eq!(catalog.get(4).unwrap().title, "Dune");
        assert!(catalog.get(99).is_none());
    }

    #[test]
    fn test_categories_with_all() {
        let catalog = sample();
        assert_eq!(
            catalog.categories_with_all(),
            vec!["الكل", "Tech", "Novels", "History", "Self-Help"]
        );
    }

    #[test]
    fn test_universe_deduplicates_authors() {
        let universe = sample().universe();
        assert_eq!(&universe[..3], ["Clean Code", "Robert Martin", "Clean Architecture"]);
        assert_eq!(universe.iter().filter(|s| *s == "Robert Martin").count(), 1);
        assert_eq!(universe.len(), 17);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"[
            {"id": 1, "title": "A", "author": "X", "category": "Tech"},
            {"id": 1, "title": "B", "author": "Y", "category": "Tech"}
        ]"#;
        let err = Catalog::from_json_str(json, &CatalogConfig::default()).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(1)));
    }

    #[test]
    fn test_malformed_json() {
        let err = Catalog::from_json_str("[{", &CatalogConfig::default()).unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": 5, "title": "Dune", "author": "Frank Herbert", "category": "Novels"}}]"#).unwrap();

        let catalog = Catalog::load(file.path(), &CatalogConfig::default()).unwrap();
        assert_eq!(catalog.books()[0].author, "Frank Herbert");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load("/nonexistent/books.json", &CatalogConfig::default()).unwrap_err();
        assert!(matches!(err, CatalogError::Core(_)));
    }

    #[test]
    fn test_from_config_uses_categories() {
        let config = CatalogConfig {
            categories: vec!["Tech".to_string()],
            all_category: "All".to_string(),
            ..CatalogConfig::default()
        };
        let catalog = Catalog::from_config(&config).unwrap();
        assert_eq!(catalog.categories_with_all(), vec!["All", "Tech"]);
        assert_eq!(catalog.books().len(), 9);
    }

    #[test]
    fn test_rate_updates_running_average() {
        let mut catalog = sample();
        // Deep Work starts at 4.0 from 10 ratings.
        let book = catalog.rate(9, 5).unwrap();
        assert_eq!(book.ratings_count, 11);
        assert!((book.rating - 45.0 / 11.0).abs() < 1e-12);
        assert_eq!(catalog.revision(), 1);
    }

    #[test]
    fn test_rate_errors_leave_revision() {
        let mut catalog = sample();
        assert!(matches!(catalog.rate(99, 5), Err(CatalogError::BookNotFound(99))));
        assert!(matches!(catalog.rate(1, 9), Err(CatalogError::InvalidRating(9))));
        assert_eq!(catalog.revision(), 0);
        assert_eq!(catalog.get(1).unwrap().ratings_count, 120);
    }

    #[test]
    fn test_add_comment() {
        let mut catalog = sample();
        let comment = catalog
            .add_comment(4, "قارئ", "https://example.com/a.png", "ممتع جدا")
            .unwrap()
            .unwrap()
            .clone();

        assert_eq!(comment.text, "ممتع جدا");
        let comments = &catalog.get(4).unwrap().comments;
        assert_eq!(comments.len(), 2);
        assert!(comment.id > comments[0].id);
        assert_eq!(catalog.revision(), 1);
    }

    #[test]
    fn test_blank_comment_ignored() {
        let mut catalog = sample();
        assert!(catalog.add_comment(4, "u", "a", "   ").unwrap().is_none());
        assert_eq!(catalog.get(4).unwrap().comments.len(), 1);
        assert_eq!(catalog.revision(), 0);
    }

    #[test]
    fn test_comment_ids_unique() {
        let existing = vec![Comment {
            id: u64::MAX - 1,
            user: String::new(),
            avatar: String::new(),
            text: String::new(),
        }];
        assert_eq!(next_comment_id(&existing), Some(u64::MAX));
        assert!(next_comment_id(&[]).is_some());
    }

    #[test]
    fn test_comment_on_book_with_max_comment_id() {
        let json = r#"[{
            "id": 1, "title": "A", "author": "X", "category": "Tech",
            "comments": [{"id": 18446744073709551615, "user": "u", "avatar": "a", "text": "first"}]
        }]"#;
        let mut catalog = Catalog::from_json_str(json, &CatalogConfig::default()).unwrap();

        let err = catalog.add_comment(1, "u", "a", "hello").unwrap_err();
        assert!(matches!(err, CatalogError::CommentIdsExhausted(1)));
        assert_eq!(catalog.get(1).unwrap().comments.len(), 1);
        assert_eq!(catalog.revision(), 0);
    }
}
