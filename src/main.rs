use catalog_scrape::render::{CatalogRenderer, JsonCatalog};
use catalog_scrape::{Products, ScraperConfig};
use clap::Parser;

mod args;
use args::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let base = match &args.config {
        Some(path) => match ScraperConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("Failed to load config {}: {}", path.display(), e);
                std::process::exit(2);
            }
        },
        None => ScraperConfig::default(),
    };
    let config = args.apply(base);

    if config.samples.is_empty() {
        ::log::error!("No sample URLs given");
        std::process::exit(2);
    }

    ::log::info!("Starting scrape from {} sample URLs", config.samples.len());
    let renderer = JsonCatalog::new(&config.output_path);

    let start_time = std::time::Instant::now();
    let records = match Products::new(Vec::new()).with_config(config).generate().await {
        Ok(records) => records,
        Err(e) => {
            ::log::error!("Failed to start scrape: {}", e);
            std::process::exit(1);
        }
    };

    ::log::info!(
        "Scraping complete - {} products in {:.2} seconds",
        records.len(),
        start_time.elapsed().as_secs_f64()
    );

    match renderer.render(&records) {
        Ok(path) => println!("Catalog created: {}", path.display()),
        Err(e) => {
            ::log::error!("Failed to write catalog: {}", e);
            std::process::exit(1);
        }
    }
}
