//! Keyword classifier assigning a category and tags to news content.

use std::collections::HashSet;

use super::{Category, ClassificationResult, KeywordTable};

/// Trait for content classifiers that can sit behind the cache.
///
/// Implementations must be deterministic: the same content always yields the
/// same result.
pub trait ContentClassifier {
    /// Classifies the given content.
    fn classify(&self, content: &str) -> ClassificationResult;

    /// Returns the name of this classifier for logging.
    fn name(&self) -> &'static str;
}

/// Keyword-table classifier.
///
/// Category selection compares trigger words against whitespace-separated
/// tokens; tag extraction searches the whole lower-cased content for
/// substrings. Both checks are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier {
    table: KeywordTable,
}

impl KeywordClassifier {
    /// Creates a classifier with the built-in keyword table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a classifier over a custom keyword table.
    pub fn with_table(table: KeywordTable) -> Self {
        Self { table }
    }

    /// Returns the keyword table.
    pub fn table(&self) -> &KeywordTable {
        &self.table
    }

    /// Classifies the given content.
    pub fn classify(&self, content: &str) -> ClassificationResult {
        if content.is_empty() {
            return ClassificationResult::uncategorized();
        }

        let lower = content.to_lowercase();
        let tokens = tokenize(&lower);

        let category = self
            .table
            .categories()
            .iter()
            .find(|entry| entry.matches_tokens(&tokens))
            .map(|entry| entry.category)
            .unwrap_or(Category::General);

        let tags = self
            .table
            .tag_keywords()
            .filter(|tag| lower.contains(tag.needle.as_str()))
            .map(|tag| tag.label.clone())
            .collect();

        ClassificationResult::new(category, tags)
    }
}

impl ContentClassifier for KeywordClassifier {
    fn classify(&self, content: &str) -> ClassificationResult {
        KeywordClassifier::classify(self, content)
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}

/// Splits lower-cased content into tokens, trimming surrounding punctuation
/// so that `technology.` and `(ai)` match `technology` and `ai`.
fn tokenize(lower: &str) -> HashSet<&str> {
    lower
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::TagKeyword;

    fn classifier() -> KeywordClassifier {
        KeywordClassifier::new()
    }

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    // === Fallbacks ===

    #[test]
    fn empty_content_is_uncategorized() {
        let result = classifier().classify("");
        assert_eq!(result.category, Category::Uncategorized);
        assert!(result.tags.is_empty());
    }

    #[test]
    fn whitespace_only_content_is_general() {
        let result = classifier().classify("   ");
        assert_eq!(result.category, Category::General);
        assert!(result.tags.is_empty());
    }

    #[test]
    fn unrelated_content_is_general() {
        let result = classifier().classify("Something unrelated");
        assert_eq!(result.category, Category::General);
        assert!(result.tags.is_empty());
    }

    #[test]
    fn general_news_piece_has_no_tags() {
        let result = classifier().classify("A general news piece.");
        assert_eq!(result.category, Category::General);
        assert!(result.tags.is_empty());
    }

    // === Categories ===

    #[test]
    fn technology_with_innovation_tag() {
        let result = classifier().classify("The latest innovation in technology.");
        assert_eq!(result.category, Category::Technology);
        assert_eq!(result.tags, tags(&["Innovation"]));
    }

    #[test]
    fn market_trends_tagged_but_general() {
        let result = classifier().classify("Market trends in the financial sector.");
        assert_eq!(result.category, Category::General);
        assert_eq!(result.tags, tags(&["Market"]));

        let result = classifier().classify("Market trends show a significant shift.");
        assert_eq!(result.category, Category::General);
        assert!(result.has_tag("Market"));
    }

    #[test]
    fn election_content_is_politics() {
        let result = classifier().classify("The upcoming elections will decide the new president.");
        assert_eq!(result.category, Category::Politics);
        assert_eq!(result.tags, tags(&["Election"]));
    }

    #[test]
    fn ai_content_is_technology() {
        let result =
            classifier().classify("This year's tech conference will showcase new innovations in AI.");
        assert_eq!(result.category, Category::Technology);
        assert_eq!(result.tags, tags(&["Innovation"]));
    }

    #[test]
    fn soccer_content_is_sports() {
        let result = classifier()
            .classify("Countries around the world will compete in the biggest soccer tournament.");
        assert_eq!(result.category, Category::Sports);
        assert_eq!(result.tags, tags(&["Tournament"]));
    }

    #[test]
    fn earlier_category_wins_on_conflict() {
        // Finance precedes Technology.
        let result = classifier().classify("Software stocks rally");
        assert_eq!(result.category, Category::Finance);
        assert_eq!(result.tags, tags(&["Software"]));
    }

    // === Token vs substring ===

    #[test]
    fn trigger_inside_longer_word_does_not_categorize() {
        // "lawn" contains "law" but is not the token "law".
        let result = classifier().classify("Mowing the lawn on Sunday");
        assert_eq!(result.category, Category::General);
    }

    #[test]
    fn tag_inside_longer_word_still_fires() {
        let result = classifier().classify("Supermarkets extend opening hours");
        assert_eq!(result.category, Category::General);
        assert_eq!(result.tags, tags(&["Market"]));
    }

    #[test]
    fn punctuation_is_trimmed_from_tokens() {
        let result = classifier().classify("\"Senate,\" she said.");
        assert_eq!(result.category, Category::Politics);
    }

    #[test]
    fn inner_apostrophes_stay_part_of_token() {
        // Only surrounding punctuation is trimmed: "ai's" is not the token "ai".
        let result = classifier().classify("AI's new chip");
        assert_eq!(result.category, Category::General);

        let result = classifier().classify("New chip (AI) ships");
        assert_eq!(result.category, Category::Technology);
    }

    #[test]
    fn tags_come_from_other_categories() {
        let result = classifier().classify("Basketball tournament sponsors invest in software");
        assert_eq!(result.category, Category::Sports);
        assert_eq!(result.tags, tags(&["Investment", "Tournament", "Software"]));
    }

    // === Case handling ===

    #[test]
    fn classification_is_case_insensitive() {
        let upper = classifier().classify("THE LATEST INNOVATION IN TECHNOLOGY.");
        let lower = classifier().classify("the latest innovation in technology.");
        assert_eq!(upper, lower);
    }

    // === Custom tables ===

    #[test]
    fn duplicate_tag_labels_are_kept() {
        let table = KeywordTable::builder()
            .category(
                Category::Finance,
                ["bank"],
                vec![TagKeyword::new("Money", "cash"), TagKeyword::new("Money", "coin")],
            )
            .build()
            .unwrap();
        let result = KeywordClassifier::with_table(table).classify("cash and coin");
        assert_eq!(result.category, Category::General);
        assert_eq!(result.tags, tags(&["Money", "Money"]));
    }

    #[test]
    fn empty_table_yields_general() {
        let table = KeywordTable::builder().build().unwrap();
        let result = KeywordClassifier::with_table(table).classify("technology news");
        assert_eq!(result.category, Category::General);
        assert!(result.tags.is_empty());
    }

    #[test]
    fn deterministic_results() {
        let c = classifier();
        let text = "Government software tournament market";
        assert_eq!(c.classify(text), c.classify(text));
    }

    #[test]
    fn trait_object_works() {
        let c: Box<dyn ContentClassifier> = Box::new(classifier());
        assert_eq!(c.name(), "keyword");
        assert_eq!(c.classify("basketball").category, Category::Sports);
    }
}
