use crate::extract::html;
use crate::fetch::Fetch;
use crate::filter::LinkFilter;
use scraper::Html;
use std::collections::HashSet;
use url::Url;

/// Fetch `start_url` and return the links on it that pass `filter`.
///
/// Links are resolved against `start_url`, deduplicated by exact string and
/// returned in the order they first appear. A page that cannot be fetched
/// yields no links.
pub async fn discover<F: Fetch>(fetcher: &F, start_url: &str, filter: &LinkFilter) -> Vec<String> {
    let body = match fetcher.fetch(start_url).await {
        Ok(body) => body,
        Err(e) => {
            ::log::warn!("Could not fetch menu page {}: {}", start_url, e);
            return Vec::new();
        }
    };

    let base = match Url::parse(start_url) {
        Ok(base) => base,
        Err(e) => {
            ::log::warn!("Could not use menu page URL {}: {}", start_url, e);
            return Vec::new();
        }
    };

    let links = matching_links(&body, &base, filter);
    ::log::info!(
        "Found {} links matching {:?} on {}",
        links.len(),
        filter.pattern(),
        start_url
    );
    links
}

/// Resolve every anchor in `body` against `base` and keep the matches
pub fn matching_links(body: &str, base: &Url, filter: &LinkFilter) -> Vec<String> {
    let doc = Html::parse_document(body);
    let mut seen = HashSet::new();

    html::links(&doc)
        .into_iter()
        .filter_map(|href| match base.join(&href) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                ::log::debug!("Skipping unresolvable link {:?}: {}", href, e);
                None
            }
        })
        .filter(|url| filter.matches(url))
        .filter(|url| seen.insert(url.clone()))
        .collect()
}
