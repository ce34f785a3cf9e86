pub mod html;
pub mod strategies;


use crate::error::ScrapeError;
use crate::results::{ProductRecord, UNTITLED};
use scraper::Html;
use strategies::Strategy;
use url::Url;

/// Title heuristics, highest priority first
pub const TITLE_STRATEGIES: &[Strategy] = &[
    strategies::first_h1,
    strategies::first_h2,
    strategies::document_title,
];

/// Author heuristics, highest priority first
pub const AUTHOR_STRATEGIES: &[Strategy] = &[strategies::byline];

/// Description heuristics, highest priority first
pub const DESCRIPTION_STRATEGIES: &[Strategy] = &[strategies::longest_paragraph];

/// Image heuristics, highest priority first. Values may be relative.
pub const IMAGE_STRATEGIES: &[Strategy] = &[strategies::first_image_src];

/// Extracts product attributes from already-parsed pages
pub struct Extractor;

impl Extractor {
    /// Build a record from a parsed page. `base_url` is the page URL; it keys
    /// the record and anchors relative image sources.
    pub fn extract(doc: &Html, base_url: &str) -> Result<ProductRecord, ScrapeError> {
        let base = Url::parse(base_url).map_err(|source| ScrapeError::Parse {
            url: base_url.to_string(),
            source,
        })?;

        let title = strategies::first_match(doc, TITLE_STRATEGIES)
            .unwrap_or_else(|| UNTITLED.to_string());
        let author = strategies::first_match(doc, AUTHOR_STRATEGIES).unwrap_or_default();
        let description = strategies::first_match(doc, DESCRIPTION_STRATEGIES).unwrap_or_default();
        let image = strategies::first_match(doc, IMAGE_STRATEGIES)
            .and_then(|src| resolve_image(&base, &src));

        ::log::debug!(
            "Extracted {:?} from {} (author: {}, description: {} chars, image: {})",
            title,
            base_url,
            !author.is_empty(),
            description.chars().count(),
            image.is_some()
        );

        Ok(ProductRecord::new(
            base_url.to_string(),
            title,
            author,
            description,
            image,
        ))
    }

    /// Parse raw HTML and build a record from it
    pub fn extract_html(html: &str, base_url: &str) -> Result<ProductRecord, ScrapeError> {
        let doc = Html::parse_document(html);
        Self::extract(&doc, base_url)
    }
}

fn resolve_image(base: &Url, src: &str) -> Option<String> {
    match base.join(src) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            ::log::debug!("Ignoring unresolvable image source {:?}: {}", src, e);
            None
        }
    }
}
