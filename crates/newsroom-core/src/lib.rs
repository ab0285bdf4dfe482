//! Newsroom Core - keyword classification and memoization.
//!
//! This crate assigns news content a category and a list of topical tags,
//! and memoizes the results so identical content is classified once.
//!
//! # Example
//!
//! ```
//! use newsroom_core::{Category, ClassificationCache};
//!
//! let cache = ClassificationCache::new();
//! let result = cache.classify("The latest innovation in technology.");
//! assert_eq!(result.category, Category::Technology);
//! assert_eq!(result.tags, vec!["Innovation".to_string()]);
//! ```

pub mod cache;
pub mod classifier;
pub mod news;

pub use cache::{CacheConfig, CacheStats, ClassificationCache};
pub use classifier::{
    Category, ClassificationResult, ContentClassifier, KeywordClassifier, KeywordTable,
    TableError, TagKeyword,
};
pub use news::{
    categorize, filter_by_category, filter_by_keyword, Article, Headline, NewsError, NewsItem,
};
