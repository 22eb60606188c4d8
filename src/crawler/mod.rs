//! Crawler module for catalog fetching and extraction
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching of catalog pages
//! - Record extraction from item fragments
//! - The sequential, paced walk over all pages

mod extractor;
mod fetcher;
mod record;
mod walker;

pub use extractor::{Extractor, ItemSelectors};
pub use fetcher::{build_http_client, fetch_document, fetch_text};
pub use record::{Catalog, Rating, Record};
pub use walker::CatalogWalker;

use crate::config::Config;
use crate::output::{write_catalog, Reporter, RunStatistics, ScrapeEvent};
use crate::ScrapeError;
use std::path::Path;
use std::sync::Arc;

/// Runs a complete scrape
///
/// This is the main entry point for a run. It will:
/// 1. Build the HTTP client, URLs and selectors from the configuration
/// 2. Walk `catalog.page_count` pages
/// 3. Write the catalog to `output.csv_path`, even when it is empty
///
/// # Returns
///
/// * `Ok(RunStatistics)` - The catalog was written
/// * `Err(ScrapeError)` - Setup failed or the output could not be written
///
/// # Example
///
/// ```no_run
/// use book_scout::{scrape, Config, TracingReporter};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let stats = scrape(&Config::default(), Arc::new(TracingReporter)).await?;
/// println!("{} records", stats.records_collected);
/// # Ok(())
/// # }
/// ```
pub async fn scrape(
    config: &Config,
    reporter: Arc<dyn Reporter>,
) -> Result<RunStatistics, ScrapeError> {
    let mut walker = CatalogWalker::from_config(config, reporter.clone())?;
    let catalog = walker.run(config.catalog.page_count).await;

    let destination = Path::new(&config.output.csv_path);
    if let Err(failure) = write_catalog(catalog.records(), destination) {
        reporter.record(ScrapeEvent::CatalogNotSaved {
            path: destination.to_path_buf(),
            message: failure.to_string(),
        });
        return Err(failure.into());
    }

    reporter.record(ScrapeEvent::CatalogSaved {
        path: destination.to_path_buf(),
        records: catalog.len(),
    });

    Ok(walker.into_statistics())
}
