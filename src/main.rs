//! Book-Scout main entry point
//!
//! This is the command-line interface for the Book-Scout catalog scraper.

use book_scout::config::{parse_config_with_hash, validate, Config};
use book_scout::output::print_statistics;
use book_scout::url::CatalogUrls;
use book_scout::{scrape, TracingReporter};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Book-Scout: a polite catalog scraper
///
/// Book-Scout walks the numbered pages of a product catalog, extracts title,
/// price, availability, rating and product URL for every item, and writes
/// them to a CSV file. Runs with no arguments against books.toscrape.com.
#[derive(Parser, Debug)]
#[command(name = "book-scout")]
#[command(version)]
#[command(about = "A polite catalog scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Number of catalog pages to walk
    #[arg(short, long, value_name = "N")]
    pages: Option<u32>,

    /// Destination CSV file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Pause after every page, in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the effective configuration and page URLs without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            // Validated once the command-line overrides are applied
            match parse_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    apply_overrides(&mut config, &cli);
    if let Err(e) = validate(&config) {
        tracing::error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    if cli.dry_run {
        handle_dry_run(&config)?;
        return Ok(());
    }

    handle_scrape(&config, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("book_scout=info,warn"),
            1 => EnvFilter::new("book_scout=debug,info"),
            2 => EnvFilter::new("book_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Command-line flags win over the configuration file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(pages) = cli.pages {
        config.catalog.page_count = pages;
    }
    if let Some(output) = &cli.output {
        config.output.csv_path = output.display().to_string();
    }
    if let Some(delay) = cli.delay_ms {
        config.crawler.politeness_delay_ms = delay;
    }
}

/// Handles the --dry-run mode: shows what would be scraped
fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let urls = CatalogUrls::from_config(&config.catalog)?;

    println!("=== Book-Scout Dry Run ===\n");

    println!("Catalog:");
    println!("  Pages: {}", config.catalog.page_count);
    println!("  Page URL template: {}", config.catalog.page_url_template);
    println!("  Product links resolved against: {}", urls.product_base());

    println!("\nSelectors:");
    println!("  Item: {}", config.selectors.item);
    println!("  Link: {}", config.selectors.link);
    println!("  Price: {}", config.selectors.price);
    println!("  Availability: {}", config.selectors.availability);
    println!(
        "  Rating: {} (baseline token '{}')",
        config.selectors.rating, config.selectors.rating_baseline
    );

    println!("\nCrawler:");
    println!(
        "  Politeness delay: {}ms",
        config.crawler.politeness_delay_ms
    );
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_secs
    );
    println!("  User agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);

    if config.catalog.page_count > 0 {
        println!("\nPages to fetch:");
        for page in 1..=config.catalog.page_count {
            println!("  {}", urls.page_url(page));
        }
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main scrape operation
async fn handle_scrape(config: &Config, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Walking {} pages, writing to {}",
        config.catalog.page_count,
        config.output.csv_path
    );

    match scrape(config, Arc::new(TracingReporter)).await {
        Ok(stats) => {
            if !quiet {
                println!();
                print_statistics(&stats);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            Err(e.into())
        }
    }
}
