/// Maximum number of words kept in a highlight
pub const HIGHLIGHT_WORDS: usize = 40;

/// Produces a short highlight from a product description
pub trait Summarizer {
    fn summarize(&self, text: &str) -> String;
}

/// Keeps the first words of the text and marks the cut with an ellipsis
#[derive(Debug, Clone, Copy)]
pub struct TruncatingSummarizer {
    pub max_words: usize,
}

impl Default for TruncatingSummarizer {
    fn default() -> Self {
        Self {
            max_words: HIGHLIGHT_WORDS,
        }
    }
}

impl Summarizer for TruncatingSummarizer {
    fn summarize(&self, text: &str) -> String {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.len() <= self.max_words {
            return text.trim().to_string();
        }

        format!("{}...", words[..self.max_words].join(" "))
    }
}
