//! Keyword-based news classification.
//!
//! This module assigns each piece of content one [`Category`] and a list of
//! topical tags using a static [`KeywordTable`].

mod category;
mod keyword;
mod table;

pub use category::{Category, ClassificationResult, UnknownCategory};
pub use keyword::{ContentClassifier, KeywordClassifier};
pub use table::{CategoryKeywords, KeywordTable, KeywordTableBuilder, TableError, TagKeyword};
