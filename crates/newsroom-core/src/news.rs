//! News items, stored articles and batch categorization.
//!
//! A [`NewsItem`] carries the text fields of an article plus the category
//! and tags assigned by the classifier. Items are classified by their
//! `content` field through a shared [`ClassificationCache`], so duplicate
//! stories in a batch are classified once.
//!
//! An [`Article`] is the stored listing shape: a free-form category string
//! and a source, with no body text. Both types implement [`Headline`], so the
//! keyword and category filters work over either.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::cache::ClassificationCache;
use crate::classifier::{Category, ClassificationResult, ContentClassifier};

/// Errors for news item validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NewsError {
    /// The title is empty.
    #[error("missing title")]
    MissingTitle,

    /// The description is empty.
    #[error("missing description")]
    MissingDescription,
}

/// Result type for news operations.
pub type Result<T> = std::result::Result<T, NewsError>;

/// Common view over listings that have a headline and a category.
pub trait Headline {
    /// Headline text.
    fn title(&self) -> &str;

    /// Short summary text.
    fn description(&self) -> &str;

    /// Category name, if one is assigned.
    fn category_name(&self) -> Option<&str>;

    /// Checks that the listing has a title and a description.
    fn validate(&self) -> Result<()> {
        if self.title().trim().is_empty() {
            return Err(NewsError::MissingTitle);
        }
        if self.description().trim().is_empty() {
            return Err(NewsError::MissingDescription);
        }
        Ok(())
    }

    /// Returns true if the title or description contains `keyword`.
    ///
    /// The match is case-sensitive.
    fn mentions(&self, keyword: &str) -> bool {
        self.title().contains(keyword) || self.description().contains(keyword)
    }

    /// Returns true if the category name equals `name`, ignoring case.
    fn in_category(&self, name: &str) -> bool {
        let wanted = name.trim().to_lowercase();
        self.category_name()
            .map(|c| c.to_lowercase() == wanted)
            .unwrap_or(false)
    }
}

/// A single news article to be classified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Headline.
    #[serde(default)]
    pub title: String,
    /// Short summary.
    #[serde(default)]
    pub description: String,
    /// Body text used for classification.
    #[serde(default)]
    pub content: String,
    /// Assigned category, once classified.
    ///
    /// Incoming values that are empty or not a known category read as `None`;
    /// categorization overwrites the field anyway.
    #[serde(default, deserialize_with = "lenient_category")]
    pub category: Option<Category>,
    /// Assigned tags, once classified. `null` reads as no tags.
    #[serde(default, deserialize_with = "nullable_tags")]
    pub tags: Vec<String>,
}

fn lenient_category<'de, D>(deserializer: D) -> std::result::Result<Option<Category>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|name| name.parse().ok()))
}

fn nullable_tags<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl NewsItem {
    /// Creates an unclassified item.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            content: content.into(),
            category: None,
            tags: Vec::new(),
        }
    }

    /// Overwrites the category and tags with a classification result.
    pub fn apply(&mut self, result: &ClassificationResult) {
        self.category = Some(result.category);
        self.tags = result.tags.clone();
    }
}

impl Headline for NewsItem {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category_name(&self) -> Option<&str> {
        self.category.map(|c| c.name())
    }
}

/// A stored article listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Headline.
    #[serde(default)]
    pub title: String,
    /// Short summary.
    #[serde(default)]
    pub description: String,
    /// Free-form category label, e.g. "Science".
    #[serde(default)]
    pub category: String,
    /// Publisher name.
    #[serde(default)]
    pub source: String,
}

impl Article {
    /// Creates an article listing.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: category.into(),
            source: source.into(),
        }
    }
}

impl Headline for Article {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category_name(&self) -> Option<&str> {
        Some(self.category.as_str()).filter(|c| !c.is_empty())
    }
}

/// Classifies every item by its content through the shared cache.
pub fn categorize<C: ContentClassifier>(
    cache: &ClassificationCache<C>,
    items: Vec<NewsItem>,
) -> Vec<NewsItem> {
    let total = items.len();
    let before = cache.stats();

    let categorized: Vec<NewsItem> = items
        .into_iter()
        .map(|mut item| {
            let result = cache.classify(&item.content);
            item.apply(&result);
            item
        })
        .collect();

    let after = cache.stats();
    tracing::debug!(
        items = total,
        computed = after.misses - before.misses,
        "categorized news batch"
    );
    categorized
}

/// Returns the listings whose title or description contains `keyword`.
pub fn filter_by_keyword<'a, T: Headline>(items: &'a [T], keyword: &str) -> Vec<&'a T> {
    items.iter().filter(|item| item.mentions(keyword)).collect()
}

/// Returns the listings in the named category, ignoring case.
pub fn filter_by_category<'a, T: Headline>(items: &'a [T], name: &str) -> Vec<&'a T> {
    items.iter().filter(|item| item.in_category(name)).collect()
}
