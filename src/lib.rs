pub mod cache;
pub mod config;
pub mod discover;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod pattern;
pub mod render;
pub mod results;
pub mod summary;
pub mod walker;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types for convenience
pub use config::ScraperConfig;
pub use pattern::detect_pattern;
pub use results::ProductRecord;

use cache::{CacheStore, JsonCacheStore};
use fetch::HttpFetcher;
use filter::{LinkFilter, LinkFilterConfig};
use std::path::PathBuf;
use summary::TruncatingSummarizer;
use walker::SiteWalker;

/// Main builder for scraping a product catalog from example URLs
pub struct Products {
    config: ScraperConfig,
}

impl Products {
    /// Create a new Products builder from example product URLs
    pub fn new(samples: Vec<String>) -> Self {
        Self {
            config: ScraperConfig::new(samples),
        }
    }

    /// Search this page for more product links
    pub fn with_menu_url(mut self, menu_url: impl Into<String>) -> Self {
        self.config.menu_url = Some(menu_url.into());
        self
    }

    /// Use a fixed URL pattern instead of detecting one
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.pattern = Some(pattern.into());
        self
    }

    /// Set where scraped records are cached between runs
    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.cache_path = path.into();
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    /// Attach short highlights to records
    pub fn with_summaries(mut self, enabled: bool) -> Self {
        self.config.use_summary = enabled;
        self
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: ScraperConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a file, keeping samples already given when the
    /// file has none
    pub fn with_config_file(
        self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = ScraperConfig::from_file(path)?;
        if config.samples.is_empty() {
            config.samples = self.config.samples.clone();
        }
        Ok(self.with_config(config))
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// The pattern used for link discovery: the configured one, or one
    /// detected from the samples
    pub fn pattern(&self) -> String {
        match &self.config.pattern {
            Some(pattern) => pattern.clone(),
            None => detect_pattern(self.config.samples.as_slice()),
        }
    }

    /// Menu page to search, unless an empty pattern would match every link
    /// and broad matching has not been allowed
    fn menu_url(&self, pattern: &str) -> Option<&str> {
        let menu_url = self.config.menu_url.as_deref()?;
        if pattern.is_empty() && !self.config.allow_broad_pattern {
            ::log::warn!(
                "Samples share no URL pattern; not scanning {} since every link would match",
                menu_url
            );
            return None;
        }
        Some(menu_url)
    }

    /// Scrape every sample and discovered product page
    pub async fn generate(self) -> Result<Vec<ProductRecord>, Box<dyn std::error::Error>> {
        let config = self.config.clone().apply_env();

        let pattern = self.pattern();
        ::log::info!("Detected product URL pattern: {:?}", pattern);

        let filter = LinkFilter::new(LinkFilterConfig {
            pattern: pattern.clone(),
            exclude_patterns: config.exclude_patterns.clone(),
        })?;
        let fetcher = HttpFetcher::new(config.timeout(), &config.user_agent)?;
        let store = JsonCacheStore::new(&config.cache_path);
        let summarizer = TruncatingSummarizer::default();

        let mut walker = SiteWalker::new(&fetcher, &store).with_filter(filter);
        if config.use_summary {
            walker = walker.with_summarizer(&summarizer);
        }

        let mut cache = store.load();
        let records = walker
            .walk(
                &config.samples,
                self.menu_url(&pattern),
                &pattern,
                &mut cache,
            )
            .await;

        Ok(records)
    }
}
