//! Single-purpose heuristics. Each one looks at a parsed page and either
//! produces a value or declines, so they can be chained in priority order.

use super::html::{self, selector};
use scraper::Html;

/// A heuristic that may produce a value from a page
pub type Strategy = fn(&Html) -> Option<String>;

/// Text of the first `<h1>`
pub fn first_h1(doc: &Html) -> Option<String> {
    html::first_text(doc, "h1")
}

/// Text of the first `<h2>`
pub fn first_h2(doc: &Html) -> Option<String> {
    html::first_text(doc, "h2")
}

/// Text of the document `<title>`
pub fn document_title(doc: &Html) -> Option<String> {
    html::first_text(doc, "title")
}

/// First text node that reads like a byline ("Author: ..." or "By ...")
pub fn byline(doc: &Html) -> Option<String> {
    html::text_nodes(doc)
        .map(str::trim)
        .find(|text| {
            let lower = text.to_lowercase();
            lower.starts_with("author") || lower.starts_with("by ")
        })
        .map(str::to_string)
}

/// Longest paragraph by trimmed character count; the first one wins ties
pub fn longest_paragraph(doc: &Html) -> Option<String> {
    doc.select(&selector("p"))
        .map(html::element_text)
        .fold(None, |best: Option<(usize, String)>, text| {
            let len = text.chars().count();
            match best {
                Some((best_len, _)) if best_len >= len => best,
                _ => Some((len, text)),
            }
        })
        .map(|(_, text)| text)
}

/// Raw `src` of the first image that has one
pub fn first_image_src(doc: &Html) -> Option<String> {
    doc.select(&selector("img[src]"))
        .filter_map(|img| img.value().attr("src"))
        .next()
        .map(|src| src.to_string())
}

/// Run strategies in order and return the first value produced
pub fn first_match(doc: &Html, strategies: &[Strategy]) -> Option<String> {
    strategies.iter().find_map(|strategy| strategy(doc))
}
