//! Static keyword table driving category and tag decisions.
//!
//! Each category owns two keyword lists:
//!
//! - **trigger words**, compared against whole tokens to pick the category
//! - **tag keywords**, searched as substrings of the whole content to emit tags
//!
//! The two checks are deliberately different: a tag needle embedded inside a
//! longer word still produces a tag, but a trigger word must equal a token.
//!
//! The table is built once and never mutated afterwards. Entries are kept
//! sorted by [`Category`] so iteration order (and therefore category
//! precedence) is stable.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Category;

/// Errors produced while building or loading a keyword table.
#[derive(Debug, Error)]
pub enum TableError {
    /// A category appears more than once.
    #[error("category {0} is defined more than once")]
    DuplicateCategory(Category),

    /// A fallback category was given keywords.
    #[error("category {0} is a fallback and cannot have keywords")]
    FallbackCategory(Category),

    /// A trigger word or tag keyword is blank.
    #[error("empty keyword in category {0}")]
    EmptyKeyword(Category),

    /// A tag label is blank.
    #[error("empty tag label in category {0}")]
    EmptyTagLabel(Category),

    /// Trigger words must be single tokens.
    #[error("trigger word '{word}' in category {category} contains whitespace")]
    MultiWordTrigger { category: Category, word: String },

    /// The table document could not be parsed.
    #[error("invalid keyword table: {0}")]
    Json(#[from] serde_json::Error),

    /// The table file could not be read.
    #[error("failed to read keyword table: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for keyword table operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// A keyword that emits a tag when found anywhere in the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagKeyword {
    /// Label appended to the tag list.
    pub label: String,
    /// Lower-cased substring searched for.
    pub needle: String,
}

impl TagKeyword {
    /// Creates a tag keyword. The needle is lower-cased.
    pub fn new(label: impl Into<String>, needle: impl AsRef<str>) -> Self {
        Self {
            label: label.into(),
            needle: needle.as_ref().to_lowercase(),
        }
    }
}

/// Keywords owned by a single category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryKeywords {
    /// Category selected by the trigger words.
    pub category: Category,
    /// Lower-cased words compared against content tokens.
    #[serde(default)]
    pub triggers: Vec<String>,
    /// Keywords that emit tags.
    #[serde(default)]
    pub tags: Vec<TagKeyword>,
}

impl CategoryKeywords {
    /// Returns true if any trigger word equals one of the tokens.
    pub fn matches_tokens(&self, tokens: &HashSet<&str>) -> bool {
        self.triggers.iter().any(|w| tokens.contains(w.as_str()))
    }
}

#[derive(Deserialize)]
struct TableDocument {
    categories: Vec<CategoryKeywords>,
}

/// Immutable mapping from category to its keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordTable {
    categories: Vec<CategoryKeywords>,
}

impl KeywordTable {
    /// Starts building a custom table.
    pub fn builder() -> KeywordTableBuilder {
        KeywordTableBuilder::default()
    }

    /// Parses a table from a JSON document of the form
    /// `{"categories": [{"category": "Technology", "triggers": [...], "tags": [...]}]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: TableDocument = serde_json::from_str(json)?;
        Self::from_entries(doc.categories)
    }

    /// Loads a table from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let table = Self::from_json(&json)?;
        tracing::debug!(
            "Loaded keyword table with {} categories from {:?}",
            table.categories.len(),
            path.as_ref()
        );
        Ok(table)
    }

    fn from_entries(entries: Vec<CategoryKeywords>) -> Result<Self> {
        let mut builder = Self::builder();
        for entry in entries {
            builder = builder.entry(entry);
        }
        builder.build()
    }

    /// Returns the category entries in precedence order.
    pub fn categories(&self) -> &[CategoryKeywords] {
        &self.categories
    }

    /// Returns the entry for a category, if present.
    pub fn get(&self, category: Category) -> Option<&CategoryKeywords> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Iterates over every tag keyword in table order.
    pub fn tag_keywords(&self) -> impl Iterator<Item = &TagKeyword> {
        self.categories.iter().flat_map(|c| c.tags.iter())
    }

    /// Serializes the table to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for KeywordTable {
    /// The built-in news table.
    fn default() -> Self {
        Self {
            categories: vec![
                CategoryKeywords {
                    category: Category::Finance,
                    triggers: words(&[
                        "finance",
                        "bank",
                        "banking",
                        "stocks",
                        "economy",
                        "investment",
                        "inflation",
                    ]),
                    tags: vec![
                        TagKeyword::new("Market", "market"),
                        TagKeyword::new("Investment", "invest"),
                    ],
                },
                CategoryKeywords {
                    category: Category::Politics,
                    triggers: words(&[
                        "politics",
                        "election",
                        "elections",
                        "government",
                        "senate",
                        "law",
                    ]),
                    tags: vec![
                        TagKeyword::new("Election", "election"),
                        TagKeyword::new("Legislation", "legislat"),
                    ],
                },
                CategoryKeywords {
                    category: Category::Sports,
                    triggers: words(&["sports", "soccer", "basketball", "olympics", "tournament"]),
                    tags: vec![
                        TagKeyword::new("Tournament", "tournament"),
                        TagKeyword::new("Championship", "championship"),
                    ],
                },
                CategoryKeywords {
                    category: Category::Technology,
                    triggers: words(&[
                        "technology",
                        "tech",
                        "computer",
                        "internet",
                        "AI",
                        "software",
                    ]),
                    tags: vec![
                        TagKeyword::new("Innovation", "innovat"),
                        TagKeyword::new("Software", "software"),
                    ],
                },
            ],
        }
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_lowercase()).collect()
}

/// Builder for [`KeywordTable`].
#[derive(Debug, Default)]
pub struct KeywordTableBuilder {
    entries: Vec<CategoryKeywords>,
}

impl KeywordTableBuilder {
    /// Adds a category with its trigger words and tag keywords.
    pub fn category<W, S>(mut self, category: Category, triggers: W, tags: Vec<TagKeyword>) -> Self
    where
        W: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.entries.push(CategoryKeywords {
            category,
            triggers: triggers.into_iter().map(|w| w.as_ref().to_string()).collect(),
            tags,
        });
        self
    }

    fn entry(mut self, entry: CategoryKeywords) -> Self {
        self.entries.push(entry);
        self
    }

    /// Validates, normalizes and sorts the entries.
    pub fn build(self) -> Result<KeywordTable> {
        let mut seen = HashSet::new();
        let mut categories = Vec::with_capacity(self.entries.len());

        for mut entry in self.entries {
            let category = entry.category;
            if category.is_fallback() {
                return Err(TableError::FallbackCategory(category));
            }
            if !seen.insert(category) {
                return Err(TableError::DuplicateCategory(category));
            }

            for word in &mut entry.triggers {
                let normalized = word.trim().to_lowercase();
                if normalized.is_empty() {
                    return Err(TableError::EmptyKeyword(category));
                }
                if normalized.contains(char::is_whitespace) {
                    return Err(TableError::MultiWordTrigger {
                        category,
                        word: word.clone(),
                    });
                }
                *word = normalized;
            }

            for tag in &mut entry.tags {
                if tag.label.trim().is_empty() {
                    return Err(TableError::EmptyTagLabel(category));
                }
                tag.needle = tag.needle.to_lowercase();
                if tag.needle.trim().is_empty() {
                    return Err(TableError::EmptyKeyword(category));
                }
            }

            categories.push(entry);
        }

        categories.sort_by_key(|c| c.category);
        Ok(KeywordTable { categories })
    }
}
