//! Configuration schema definitions

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Catalog source and category set
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Matching thresholds and suggestion limits
    #[serde(default)]
    pub search: SearchConfig,

    /// Cart persistence
    #[serde(default)]
    pub cart: CartConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Reject values the rest of the workspace cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.catalog.categories.is_empty() {
            return Err(Error::config_invalid("catalog.categories must not be empty"));
        }
        if self.catalog.categories.contains(&self.catalog.all_category) {
            return Err(Error::config_invalid(format!(
                "catalog.categories must not contain the all_category sentinel '{}'",
                self.catalog.all_category
            )));
        }
        if self.search.suggestion_cap == 0 {
            return Err(Error::config_invalid("search.suggestion_cap must be at least 1"));
        }
        if self.search.short_threshold > self.search.long_threshold {
            return Err(Error::config_invalid(
                "search.short_threshold must not exceed search.long_threshold",
            ));
        }
        if self.cart.storage_key.trim().is_empty() {
            return Err(Error::config_invalid("cart.storage_key must not be blank"));
        }
        Ok(())
    }
}

/// Catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Closed set of category names, in display order
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Sentinel meaning "no category restriction"
    #[serde(default = "default_all_category")]
    pub all_category: String,

    /// JSON file holding the books; the bundled sample is used when absent
    #[serde(default)]
    pub source: Option<String>,

    /// Display name attached to comments written in this session
    #[serde(default = "default_user")]
    pub default_user: String,

    /// Avatar URL attached to comments written in this session
    #[serde(default = "default_avatar")]
    pub default_avatar: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            all_category: default_all_category(),
            source: None,
            default_user: default_user(),
            default_avatar: default_avatar(),
        }
    }
}

fn default_categories() -> Vec<String> {
    ["Tech", "Novels", "History", "Self-Help"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_all_category() -> String {
    "الكل".to_string()
}

fn default_user() -> String {
    "مستخدم جديد".to_string()
}

fn default_avatar() -> String {
    "https://i.pravatar.cc/150?u=newuser".to_string()
}

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of suggestions shown under the search box
    #[serde(default = "default_suggestion_cap")]
    pub suggestion_cap: usize,

    /// Queries shorter than this (in characters) use the short threshold
    #[serde(default = "default_short_query_len")]
    pub short_query_len: usize,

    /// Maximum edit distance for short queries
    #[serde(default = "default_short_threshold")]
    pub short_threshold: usize,

    /// Maximum edit distance for longer queries
    #[serde(default = "default_long_threshold")]
    pub long_threshold: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            suggestion_cap: default_suggestion_cap(),
            short_query_len: default_short_query_len(),
            short_threshold: default_short_threshold(),
            long_threshold: default_long_threshold(),
        }
    }
}

fn default_suggestion_cap() -> usize {
    7
}

fn default_short_query_len() -> usize {
    5
}

fn default_short_threshold() -> usize {
    1
}

fn default_long_threshold() -> usize {
    2
}

/// Cart persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartConfig {
    /// Key the serialized cart is stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Directory for the file-backed store; platform data dir when absent
    #[serde(default)]
    pub storage_dir: Option<String>,

    /// How long the "added to cart" acknowledgement stays visible
    #[serde(default = "default_ack_duration_ms")]
    pub ack_duration_ms: u64,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            storage_dir: None,
            ack_duration_ms: default_ack_duration_ms(),
        }
    }
}

fn default_storage_key() -> String {
    "rimas-cart".to_string()
}

fn default_ack_duration_ms() -> u64 {
    3000
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,

    /// Also write a daily-rolling log file into this directory
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            log_dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
