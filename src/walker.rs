use crate::cache::{Cache, CacheStore};
use crate::discover;
use crate::error::ScrapeError;
use crate::extract::Extractor;
use crate::fetch::Fetch;
use crate::filter::LinkFilter;
use crate::results::ProductRecord;
use crate::summary::Summarizer;
use std::collections::HashSet;
use url::Url;

/// Visits sample and discovered product pages, reusing cached records.
///
/// Pages are fetched one at a time. Every newly extracted record is written
/// to the cache store before the next page is fetched.
pub struct SiteWalker<'a, F, S> {
    fetcher: &'a F,
    store: &'a S,
    filter: LinkFilter,
    summarizer: Option<&'a dyn Summarizer>,
}

impl<'a, F: Fetch, S: CacheStore> SiteWalker<'a, F, S> {
    pub fn new(fetcher: &'a F, store: &'a S) -> Self {
        Self {
            fetcher,
            store,
            filter: LinkFilter::default(),
            summarizer: None,
        }
    }

    /// Use this filter's exclusions when discovering links
    pub fn with_filter(mut self, filter: LinkFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Attach highlights to newly scraped records
    pub fn with_summarizer(mut self, summarizer: &'a dyn Summarizer) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    /// Collect records for `samples` plus any product links found on
    /// `menu_url`. Output follows the working-set order: samples first, then
    /// discovered links in page order.
    pub async fn walk(
        &self,
        samples: &[String],
        menu_url: Option<&str>,
        pattern: &str,
        cache: &mut Cache,
    ) -> Vec<ProductRecord> {
        let mut urls = Vec::new();
        let mut seen = HashSet::new();
        for url in samples.iter().map(|s| normalize_url(s)) {
            if seen.insert(url.clone()) {
                urls.push(url);
            }
        }

        if let Some(menu_url) = menu_url {
            ::log::info!("Scanning menu page {} for more product links", menu_url);
            let filter = self.filter.clone().with_pattern(pattern);
            for url in discover::discover(self.fetcher, menu_url, &filter).await {
                if seen.insert(url.clone()) {
                    urls.push(url);
                }
            }
            ::log::info!("Found {} product URLs so far", urls.len());
        }

        let mut results = Vec::with_capacity(urls.len());
        for url in urls {
            if let Some(record) = cache.get(&url) {
                ::log::debug!("Using cached record for {}", url);
                results.push(record.clone());
                continue;
            }

            ::log::info!("Scraping: {}", url);
            match self.scrape(&url).await {
                Ok(record) => {
                    cache.insert(url, record.clone());
                    if let Err(e) = self.store.save(cache) {
                        ::log::warn!("Could not save cache: {}", e);
                    }
                    results.push(record);
                }
                Err(e) => ::log::warn!("Skipping {}: {}", url, e),
            }
        }

        results
    }

    /// Fetch one page and extract its record
    async fn scrape(&self, url: &str) -> Result<ProductRecord, ScrapeError> {
        let body = self.fetcher.fetch(url).await?;
        let record = Extractor::extract_html(&body, url)?;

        Ok(match self.summarizer {
            Some(summarizer) if !record.description.is_empty() => {
                let highlight = summarizer.summarize(&record.description);
                record.with_highlight(highlight)
            }
            _ => record,
        })
    }
}

/// Absolute, serialized form of a URL so samples compare equal to resolved
/// links. Unparseable input is kept as given.
pub fn normalize_url(raw: &str) -> String {
    Url::parse(raw)
        .map(|url| url.to_string())
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use crate::summary::TruncatingSummarizer;
    use crate::pattern::detect_pattern;
    use crate::testing::{FakeFetcher, MemoryCacheStore};

    fn product_page(title: &str, author: &str, description: &str, image: &str) -> String {
        format!(
            r#"<html><head><title>Shop</title></head><body>
                 <h1>{title}</h1><span>{author}</span>
                 <img src="{image}"><p>Short</p><p>{description}</p>
               </body></html>"#
        )
    }

    fn samples() -> Vec<String> {
        vec![
            "http://s/cat/item/1".to_string(),
            "http://s/cat/item/2".to_string(),
        ]
    }

    fn shop() -> FakeFetcher {
        FakeFetcher::new()
            .with_page(
                "http://s/cat/item/1",
                &product_page("Lamp", "By Ann", "A bright desk lamp.", "/img/1.png"),
            )
            .with_page(
                "http://s/cat/item/2",
                &product_page("Chair", "Author: Bo", "A comfortable chair.", "2.png"),
            )
            .with_page(
                "http://s/cat/item/3",
                &product_page("Desk", "By Cy", "A sturdy oak desk.", "/img/3.png"),
            )
            .with_page(
                "http://s/menu",
                r#"<a href="/cat/item/2">Chair</a>
                   <a href="/cat/item/3">Desk</a>
                   <a href="/cat/item/3">Desk again</a>
                   <a href="/about">About</a>"#,
            )
    }

    #[tokio::test]
    async fn test_end_to_end_without_menu() {
        let samples = samples();
        let pattern = detect_pattern(samples.as_slice());
        assert_eq!(pattern, "/cat/item");

        let fetcher = shop();
        let store = MemoryCacheStore::default();
        let mut cache = Cache::new();
        let records = SiteWalker::new(&fetcher, &store)
            .walk(&samples, None, &pattern, &mut cache)
            .await;

        assert_eq!(fetcher.requests(), samples);
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].url, "http://s/cat/item/1");
        assert_eq!(records[0].title, "Lamp");
        assert_eq!(records[0].author, "By Ann");
        assert_eq!(records[0].description, "A bright desk lamp.");
        assert_eq!(records[0].image.as_deref(), Some("http://s/img/1.png"));

        assert_eq!(records[1].url, "http://s/cat/item/2");
        assert_eq!(records[1].title, "Chair");
        assert_eq!(records[1].author, "Author: Bo");
        assert_eq!(records[1].image.as_deref(), Some("http://s/cat/item/2.png"));

        assert_eq!(cache.len(), 2);
        assert_eq!(*store.saves.lock().unwrap(), 2);
        assert_eq!(store.load(), cache);
    }

    #[tokio::test]
    async fn test_second_run_uses_cache_only() {
        let samples = samples();
        let store = MemoryCacheStore::default();

        let first_fetcher = shop();
        let mut cache = Cache::new();
        let first = SiteWalker::new(&first_fetcher, &store)
            .walk(&samples, Some("http://s/menu"), "/cat/item", &mut cache)
            .await;
        assert_eq!(first.len(), 3);

        let second_fetcher = shop();
        let mut cache = store.load();
        let second = SiteWalker::new(&second_fetcher, &store)
            .walk(&samples, None, "/cat/item", &mut cache)
            .await;
        assert!(second_fetcher.requests().is_empty());
        assert_eq!(second, first[..2]);

        // Menu discovery still fetches; product pages do not
        let third_fetcher = shop();
        let third = SiteWalker::new(&third_fetcher, &store)
            .walk(&samples, Some("http://s/menu"), "/cat/item", &mut cache)
            .await;
        assert_eq!(third_fetcher.requests(), vec!["http://s/menu"]);
        assert_eq!(third, first);
    }

    #[tokio::test]
    async fn test_menu_links_are_unioned_in_order() {
        let fetcher = shop();
        let store = MemoryCacheStore::default();
        let mut cache = Cache::new();
        let records = SiteWalker::new(&fetcher, &store)
            .walk(&samples(), Some("http://s/menu"), "/cat/item", &mut cache)
            .await;

        let urls: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "http://s/cat/item/1",
                "http://s/cat/item/2",
                "http://s/cat/item/3"
            ]
        );
        assert_eq!(
            fetcher.requests(),
            vec![
                "http://s/menu",
                "http://s/cat/item/1",
                "http://s/cat/item/2",
                "http://s/cat/item/3"
            ]
        );
    }

    #[tokio::test]
    async fn test_unreachable_menu_still_scrapes_samples() {
        let fetcher = shop().with_error(
            "http://s/menu",
            FetchError::InvalidUrl("http://s/menu".to_string()),
        );
        let store = MemoryCacheStore::default();
        let mut cache = Cache::new();
        let records = SiteWalker::new(&fetcher, &store)
            .walk(&samples(), Some("http://s/menu"), "/cat/item", &mut cache)
            .await;
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_pages_are_skipped() {
        let fetcher = shop();
        let store = MemoryCacheStore::default();
        let mut cache = Cache::new();
        let samples = vec![
            "http://s/cat/item/404".to_string(),
            "http://s/cat/item/1".to_string(),
        ];
        let records = SiteWalker::new(&fetcher, &store)
            .walk(&samples, None, "/cat/item", &mut cache)
            .await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url, "http://s/cat/item/1");
        assert!(!cache.contains_key("http://s/cat/item/404"));
        assert_eq!(fetcher.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_cache_save_failure_keeps_results() {
        let fetcher = shop();
        let store = MemoryCacheStore {
            fail: true,
            ..MemoryCacheStore::default()
        };
        let mut cache = Cache::new();
        let records = SiteWalker::new(&fetcher, &store)
            .walk(&samples(), None, "/cat/item", &mut cache)
            .await;

        assert_eq!(records.len(), 2);
        assert_eq!(cache.len(), 2);
        assert_eq!(*store.saves.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_samples_fetched_once() {
        let fetcher = shop();
        let store = MemoryCacheStore::default();
        let mut cache = Cache::new();
        let samples = vec![
            "http://s/cat/item/1".to_string(),
            "http://s/cat/item/1".to_string(),
        ];
        let records = SiteWalker::new(&fetcher, &store)
            .walk(&samples, None, "/cat/item", &mut cache)
            .await;

        assert_eq!(records.len(), 1);
        assert_eq!(fetcher.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_summaries_only_for_described_pages() {
        let long = (1..=50).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let fetcher = FakeFetcher::new()
            .with_page("http://s/p/1", &format!("<h1>Long</h1><p>{long}</p>"))
            .with_page("http://s/p/2", "<h1>Bare</h1>");
        let store = MemoryCacheStore::default();
        let summarizer = TruncatingSummarizer::default();
        let mut cache = Cache::new();

        let samples = vec!["http://s/p/1".to_string(), "http://s/p/2".to_string()];
        let records = SiteWalker::new(&fetcher, &store)
            .with_summarizer(&summarizer)
            .walk(&samples, None, "/p", &mut cache)
            .await;

        let highlight = records[0].highlight.as_deref().unwrap();
        assert!(highlight.ends_with("w40..."));
        assert_eq!(records[1].highlight, None);
    }

    #[tokio::test]
    async fn test_filter_exclusions_apply_to_discovery() {
        let filter = LinkFilter::new(crate::filter::LinkFilterConfig {
            pattern: String::new(),
            exclude_patterns: vec![r"/item/3$".to_string()],
        })
        .unwrap();

        let fetcher = shop();
        let store = MemoryCacheStore::default();
        let mut cache = Cache::new();
        let records = SiteWalker::new(&fetcher, &store)
            .with_filter(filter)
            .walk(&samples(), Some("http://s/menu"), "/cat/item", &mut cache)
            .await;

        assert_eq!(records.len(), 2);
        assert!(!fetcher.requests().contains(&"http://s/cat/item/3".to_string()));
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("HTTP://S/cat/item/1"), "http://s/cat/item/1");
        assert_eq!(normalize_url("http://s"), "http://s/");
        assert_eq!(normalize_url("/cat/item/1"), "/cat/item/1");
    }

    #[tokio::test]
    async fn test_sample_and_menu_link_to_same_page_scraped_once() {
        let fetcher = shop();
        let store = MemoryCacheStore::default();
        let mut cache = Cache::new();
        let samples = vec!["HTTP://S/cat/item/2".to_string()];
        let records = SiteWalker::new(&fetcher, &store)
            .walk(&samples, Some("http://s/menu"), "/cat/item", &mut cache)
            .await;

        let urls: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["http://s/cat/item/2", "http://s/cat/item/3"]);
        assert_eq!(
            fetcher.requests(),
            vec!["http://s/menu", "http://s/cat/item/2", "http://s/cat/item/3"]
        );
        assert!(cache.contains_key("http://s/cat/item/2"));
        assert!(!cache.contains_key("HTTP://S/cat/item/2"));
    }

    #[tokio::test]
    async fn test_cached_sample_found_under_normalized_key() {
        let fetcher = shop();
        let store = MemoryCacheStore::default();
        let mut cache = Cache::new();
        SiteWalker::new(&fetcher, &store)
            .walk(&samples(), None, "/cat/item", &mut cache)
            .await;

        let refetcher = shop();
        let samples = vec!["http://S/cat/item/1".to_string()];
        let records = SiteWalker::new(&refetcher, &store)
            .walk(&samples, None, "/cat/item", &mut cache)
            .await;
        assert!(refetcher.requests().is_empty());
        assert_eq!(records[0].title, "Lamp");
    }
}
