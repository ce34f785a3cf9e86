use regex::Regex;

/// Configuration for filtering discovered links
#[derive(Debug, Clone, Default)]
pub struct LinkFilterConfig {
    /// Literal text a link must contain (empty matches every link)
    pub pattern: String,

    /// Regex patterns for URLs to reject even when they contain the pattern
    pub exclude_patterns: Vec<String>,
}

/// Decides which discovered links look like product pages.
///
/// Matching is substring containment on the absolute URL, not a path-prefix
/// check, so a pattern can also match in the query or another path position.
#[derive(Debug, Clone, Default)]
pub struct LinkFilter {
    config: LinkFilterConfig,
    exclude_regexes: Vec<Regex>,
}

impl LinkFilter {
    /// Create a new link filter from configuration
    pub fn new(config: LinkFilterConfig) -> Result<Self, regex::Error> {
        let mut exclude_regexes = Vec::with_capacity(config.exclude_patterns.len());
        for pattern in &config.exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self {
            config,
            exclude_regexes,
        })
    }

    /// Filter that only checks for the literal pattern
    pub fn for_pattern(pattern: &str) -> Self {
        Self {
            config: LinkFilterConfig {
                pattern: pattern.to_string(),
                exclude_patterns: Vec::new(),
            },
            exclude_regexes: Vec::new(),
        }
    }

    /// Same exclusions, different pattern
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.config.pattern = pattern.to_string();
        self
    }

    /// The literal pattern links must contain
    pub fn pattern(&self) -> &str {
        &self.config.pattern
    }

    /// Determine if an absolute URL should be kept
    pub fn matches(&self, url: &str) -> bool {
        if !url.contains(self.config.pattern.as_str()) {
            return false;
        }

        // Exclusions take precedence over the pattern
        !self.exclude_regexes.iter().any(|regex| regex.is_match(url))
    }
}
