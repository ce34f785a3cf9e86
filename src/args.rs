use catalog_scrape::ScraperConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "catalog-scrape")]
#[command(about = "Scrapes product pages similar to a few examples into a catalog")]
#[command(version)]
pub struct Args {
    /// Example product page URLs
    #[arg(required_unless_present = "config")]
    pub samples: Vec<String>,

    /// Category or menu page to search for more product links
    #[arg(short, long)]
    pub menu: Option<String>,

    /// URL pattern for product links (detected from the samples by default)
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Cache file used to resume interrupted runs
    #[arg(long)]
    pub cache: Option<PathBuf>,

    /// Where to write the catalog
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Add a short highlight of each description
    #[arg(short, long)]
    pub summaries: bool,

    /// Scan the menu page even when the samples share no pattern
    #[arg(long)]
    pub allow_broad_pattern: bool,

    /// JSON configuration file; command-line values take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Merge command-line values over the base configuration
    pub fn apply(self, mut config: ScraperConfig) -> ScraperConfig {
        if !self.samples.is_empty() {
            config.samples = self.samples;
        }
        if let Some(menu) = self.menu {
            config.menu_url = Some(menu);
        }
        if let Some(pattern) = self.pattern {
            config.pattern = Some(pattern);
        }
        if let Some(cache) = self.cache {
            config.cache_path = cache;
        }
        if let Some(output) = self.output {
            config.output_path = output;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        config.use_summary |= self.summaries;
        config.allow_broad_pattern |= self.allow_broad_pattern;
        config
    }
}
