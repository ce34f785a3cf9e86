use serde::{Deserialize, Serialize};

/// Title used when a page has no h1, h2 or title element
pub const UNTITLED: &str = "Untitled";

/// Attributes extracted from one product page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// URL of the page (cache key)
    pub url: String,

    /// Heading or document title
    #[serde(default = "default_title")]
    pub title: String,

    /// First "Author..." / "By ..." text on the page, possibly empty
    #[serde(default)]
    pub author: String,

    /// Longest paragraph on the page, possibly empty
    #[serde(default)]
    pub description: String,

    /// Absolute URL of the first image with a src attribute
    #[serde(default)]
    pub image: Option<String>,

    /// Short summary of the description (only when summaries are enabled)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
}

fn default_title() -> String {
    UNTITLED.to_string()
}

impl ProductRecord {
    /// Create a new product record
    pub fn new(
        url: String,
        title: String,
        author: String,
        description: String,
        image: Option<String>,
    ) -> Self {
        Self {
            url,
            title,
            author,
            description,
            image,
            highlight: None,
        }
    }

    /// Return a copy of this record carrying the given highlight
    pub fn with_highlight(self, highlight: String) -> Self {
        Self {
            highlight: Some(highlight),
            ..self
        }
    }
}
