//! News categories and classification results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Categories a news item can be classified into.
///
/// Variant order is the precedence order used when content matches trigger
/// words from more than one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Markets, banking and the economy.
    Finance,
    /// Elections, government and legislation.
    Politics,
    /// Competitive sports.
    Sports,
    /// Computing, the internet and software.
    Technology,
    /// Non-empty content that matched no category.
    General,
    /// Empty content.
    Uncategorized,
}

impl Category {
    /// Returns the categories that can be assigned from a keyword table.
    pub fn all() -> &'static [Category] {
        &[
            Category::Finance,
            Category::Politics,
            Category::Sports,
            Category::Technology,
        ]
    }

    /// Returns the display name for this category.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Finance => "Finance",
            Category::Politics => "Politics",
            Category::Sports => "Sports",
            Category::Technology => "Technology",
            Category::General => "General",
            Category::Uncategorized => "Uncategorized",
        }
    }

    /// Returns true for the fallback values that no keyword can select.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Category::General | Category::Uncategorized)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown category name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Parses a category name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        [
            Category::Finance,
            Category::Politics,
            Category::Sports,
            Category::Technology,
            Category::General,
            Category::Uncategorized,
        ]
        .into_iter()
        .find(|c| c.name().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Result of classifying a piece of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// The winning category.
    pub category: Category,
    /// Tag labels in first-match order.
    pub tags: Vec<String>,
}

impl ClassificationResult {
    /// Creates a result for empty content.
    pub fn uncategorized() -> Self {
        Self {
            category: Category::Uncategorized,
            tags: Vec::new(),
        }
    }

    /// Creates a result with the given category and tags.
    pub fn new(category: Category, tags: Vec<String>) -> Self {
        Self { category, tags }
    }

    /// Returns true if any tag was extracted.
    pub fn has_tags(&self) -> bool {
        !self.tags.is_empty()
    }

    /// Returns true if the given tag label was extracted.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl Default for ClassificationResult {
    fn default() -> Self {
        Self::new(Category::General, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_all_excludes_fallbacks() {
        let all = Category::all();
        assert_eq!(all.len(), 4);
        assert!(all.iter().all(|c| !c.is_fallback()));
    }

    #[test]
    fn category_all_is_sorted_by_name() {
        let names: Vec<_> = Category::all().iter().map(|c| c.name()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("technology".parse::<Category>(), Ok(Category::Technology));
        assert_eq!(" FINANCE ".parse::<Category>(), Ok(Category::Finance));
        assert_eq!("general".parse::<Category>(), Ok(Category::General));
        assert!("science".parse::<Category>().is_err());
    }

    #[test]
    fn result_serializes_with_display_names() {
        let result = ClassificationResult::new(Category::Technology, vec!["Innovation".into()]);
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"category":"Technology","tags":["Innovation"]}"#);
    }

    #[test]
    fn uncategorized_has_no_tags() {
        let result = ClassificationResult::uncategorized();
        assert_eq!(result.category, Category::Uncategorized);
        assert!(!result.has_tags());
    }

    #[test]
    fn has_tag_matches_exact_label() {
        let result = ClassificationResult::new(Category::Finance, vec!["Market".into()]);
        assert!(result.has_tag("Market"));
        assert!(!result.has_tag("market"));
    }
}
