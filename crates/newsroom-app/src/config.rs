//! Engine configuration.

use std::path::PathBuf;

use anyhow::Context;
use newsroom_core::{CacheConfig, ClassificationCache, KeywordClassifier, KeywordTable};

/// Settings used to build the classification engine at startup.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// JSON keyword table replacing the built-in one.
    pub keywords: Option<PathBuf>,
    /// Maximum cache entries (None or 0 = unbounded).
    pub cache_capacity: Option<usize>,
}

impl EngineConfig {
    /// Loads the keyword table, falling back to the built-in table.
    pub fn keyword_table(&self) -> anyhow::Result<KeywordTable> {
        match &self.keywords {
            Some(path) => KeywordTable::from_path(path)
                .with_context(|| format!("loading keyword table from {}", path.display())),
            None => Ok(KeywordTable::default()),
        }
    }

    /// Returns the cache sizing.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::from_capacity(self.cache_capacity)
    }

    /// Builds the cache and classifier.
    pub fn build_cache(&self) -> anyhow::Result<ClassificationCache<KeywordClassifier>> {
        let table = self.keyword_table()?;
        let config = self.cache_config();

        match config.capacity {
            Some(capacity) => tracing::info!("Classification cache bounded to {} entries", capacity),
            None => tracing::debug!("Classification cache is unbounded"),
        }

        Ok(ClassificationCache::with_config(
            KeywordClassifier::with_table(table),
            config,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsroom_core::Category;

    #[test]
    fn default_config_uses_builtin_table() {
        let cache = EngineConfig::default().build_cache().unwrap();
        assert_eq!(cache.classifier().table(), &KeywordTable::default());
        assert_eq!(cache.config(), CacheConfig::unbounded());
    }

    #[test]
    fn zero_capacity_is_unbounded() {
        let config = EngineConfig {
            cache_capacity: Some(0),
            ..Default::default()
        };
        assert_eq!(config.cache_config().capacity, None);

        let config = EngineConfig {
            cache_capacity: Some(16),
            ..Default::default()
        };
        assert_eq!(config.cache_config().capacity.map(|c| c.get()), Some(16));
    }

    #[test]
    fn loads_custom_keyword_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keywords.json");
        std::fs::write(
            &path,
            r#"{"categories": [{"category": "Sports", "triggers": ["cricket"]}]}"#,
        )
        .unwrap();

        let config = EngineConfig {
            keywords: Some(path),
            ..Default::default()
        };
        let cache = config.build_cache().unwrap();
        assert_eq!(cache.classify("Cricket season opens").category, Category::Sports);
        assert_eq!(cache.classify("soccer season opens").category, Category::General);
    }

    #[test]
    fn reports_missing_keyword_file() {
        let config = EngineConfig {
            keywords: Some(PathBuf::from("/nonexistent/keywords.json")),
            ..Default::default()
        };
        let err = config.build_cache().unwrap_err();
        assert!(err.to_string().contains("loading keyword table"));
    }
}
