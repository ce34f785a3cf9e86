use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides the cache location
pub const CACHE_PATH_ENV: &str = "CATALOG_CACHE_PATH";

/// Configuration for a catalog scrape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Example product page URLs
    #[serde(default)]
    pub samples: Vec<String>,

    /// Category or menu page to search for more product links
    #[serde(default)]
    pub menu_url: Option<String>,

    /// Fixed URL pattern; detected from the samples when absent
    #[serde(default)]
    pub pattern: Option<String>,

    /// Where scraped records are kept between runs
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,

    /// Where the catalog is written
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Whether to attach short highlights to records
    #[serde(default)]
    pub use_summary: bool,

    /// Allow link discovery with an empty pattern, which matches every link
    #[serde(default)]
    pub allow_broad_pattern: bool,

    /// Regex patterns for discovered URLs to skip
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

/// Default value for cache_path
fn default_cache_path() -> PathBuf {
    PathBuf::from("cache.json")
}

/// Default value for output_path
fn default_output_path() -> PathBuf {
    PathBuf::from("output/catalog.json")
}

/// Default value for timeout_secs
fn default_timeout_secs() -> u64 {
    15
}

/// Default value for user_agent
fn default_user_agent() -> String {
    crate::fetch::USER_AGENT.to_string()
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ScraperConfig {
    /// Create a new configuration with default values
    pub fn new(samples: Vec<String>) -> Self {
        Self {
            samples,
            menu_url: None,
            pattern: None,
            cache_path: default_cache_path(),
            output_path: default_output_path(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            use_summary: false,
            allow_broad_pattern: false,
            exclude_patterns: Vec::new(),
        }
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Apply overrides from the environment
    pub fn apply_env(mut self) -> Self {
        if let Ok(path) = std::env::var(CACHE_PATH_ENV) {
            if !path.is_empty() {
                self.cache_path = PathBuf::from(path);
            }
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
