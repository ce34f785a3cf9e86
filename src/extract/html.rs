use scraper::{ElementRef, Html, Selector};

/// Compile a selector that is known to be valid at compile time
pub(crate) fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector should be valid")
}

/// Concatenated text of an element and its descendants, trimmed
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// First element matching `tag` in document order
pub fn first<'a>(doc: &'a Html, tag: &'static str) -> Option<ElementRef<'a>> {
    doc.select(&selector(tag)).next()
}

/// Trimmed text of the first element matching `tag`
pub fn first_text(doc: &Html, tag: &'static str) -> Option<String> {
    first(doc, tag).map(element_text)
}

/// Every text node of the document in document order
pub fn text_nodes(doc: &Html) -> impl Iterator<Item = &str> {
    doc.root_element().text()
}

/// Raw href values of every anchor, in document order
pub fn links(doc: &Html) -> Vec<String> {
    let links = doc
        .select(&selector("a[href]"))
        .filter_map(|e| e.value().attr("href"))
        .map(|s| s.to_string())
        .collect::<Vec<String>>();

    ::log::debug!("HTML parser found {} links", links.len());
    if !links.is_empty() {
        ::log::debug!(
            "First few links: {:?}",
            links.iter().take(5).collect::<Vec<_>>()
        );
    }

    links
}
