//! Command implementations.
//!
//! Each command reads content, classifies it through a shared cache and
//! writes JSON to the given writer, so stdout carries only results.

use std::io::{Read, Write};

use anyhow::Context;
use newsroom_core::{
    categorize, Category, ClassificationCache, ContentClassifier, Headline, KeywordTable,
    NewsItem,
};
use serde::Serialize;

/// One classified input string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedText<'a> {
    /// The input as given.
    pub content: &'a str,
    /// Assigned category.
    pub category: Category,
    /// Extracted tags in match order.
    pub tags: &'a [String],
}

/// Classifies each text and writes one JSON object per line.
pub fn classify_texts<C, W>(
    cache: &ClassificationCache<C>,
    texts: &[String],
    out: &mut W,
) -> anyhow::Result<()>
where
    C: ContentClassifier,
    W: Write,
{
    for text in texts {
        let result = cache.classify(text);
        let line = ClassifiedText {
            content: text,
            category: result.category,
            tags: &result.tags,
        };
        serde_json::to_writer(&mut *out, &line)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Post-classification filters for batch output.
#[derive(Debug, Clone, Default)]
pub struct BatchFilter {
    /// Keep items whose category name matches, ignoring case.
    pub category: Option<String>,
    /// Keep items whose title or description contains this text.
    pub keyword: Option<String>,
}

impl BatchFilter {
    fn keeps(&self, item: &NewsItem) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .map(|name| item.in_category(name))
            .unwrap_or(true);
        let keyword_ok = self
            .keyword
            .as_deref()
            .map(|kw| item.mentions(kw))
            .unwrap_or(true);
        category_ok && keyword_ok
    }
}

/// Reads a JSON array of news items, categorizes and filters them, and
/// writes the resulting array.
///
/// Items missing a title or description are skipped with a warning.
pub fn run_batch<C, R, W>(
    cache: &ClassificationCache<C>,
    input: R,
    filter: &BatchFilter,
    out: &mut W,
) -> anyhow::Result<usize>
where
    C: ContentClassifier,
    R: Read,
    W: Write,
{
    let items: Vec<NewsItem> =
        serde_json::from_reader(input).context("parsing news items (expected a JSON array)")?;
    let total = items.len();

    let valid: Vec<NewsItem> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match item.validate() {
            Ok(()) => Some(item),
            Err(e) => {
                tracing::warn!("Skipping news item {}: {}", index, e);
                None
            }
        })
        .collect();

    let kept: Vec<NewsItem> = categorize(cache, valid)
        .into_iter()
        .filter(|item| filter.keeps(item))
        .collect();

    tracing::info!("Categorized {} of {} news items", kept.len(), total);

    serde_json::to_writer_pretty(&mut *out, &kept)?;
    writeln!(out)?;
    Ok(kept.len())
}

/// Writes the keyword table as JSON.
pub fn print_keywords<W: Write>(table: &KeywordTable, out: &mut W) -> anyhow::Result<()> {
    writeln!(out, "{}", table.to_json()?)?;
    Ok(())
}
