use url::Url;

/// Return the longest prefix shared by all strings.
///
/// Only the lexicographically smallest and largest strings need comparing:
/// any other string sorts between them, so it cannot diverge from either one
/// earlier than they diverge from each other.
pub fn common_prefix<S: AsRef<str>>(strings: &[S]) -> &str {
    let mut iter = strings.iter().map(AsRef::as_ref);
    let Some(first) = iter.next() else {
        return "";
    };

    let (min, max) = iter.fold((first, first), |(min, max), s| {
        (if s < min { s } else { min }, if s > max { s } else { max })
    });

    let end = min
        .char_indices()
        .zip(max.chars())
        .find(|((_, a), b)| a != b)
        .map(|((i, _), _)| i)
        .unwrap_or(min.len());

    &min[..end]
}

/// Path component of a URL. Strings that do not parse as absolute URLs are
/// treated as bare paths, with any query or fragment dropped.
pub fn url_path(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(url) => url.path().to_string(),
        Err(_) => raw
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

/// Detect a reusable path prefix from example product URLs.
///
/// The result carries no domain and no trailing slashes, e.g.
/// `https://shop.test/books/detail/1/` and `https://shop.test/books/detail/2/`
/// give `/books/detail`. Empty input or paths with nothing in common give an
/// empty pattern.
pub fn detect_pattern<S: AsRef<str>>(urls: &[S]) -> String {
    let paths: Vec<String> = urls.iter().map(|u| url_path(u.as_ref())).collect();
    let prefix = common_prefix(paths.as_slice());
    let pattern = prefix.trim_end_matches('/').to_string();

    ::log::debug!("Detected pattern {:?} from {} URLs", pattern, paths.len());
    pattern
}
