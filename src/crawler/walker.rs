//! Catalog walker - pagination and collection loop
//!
//! Walks pages 1..=N strictly in order. For every page it:
//! 1. Builds the page URL from the template
//! 2. Fetches and parses the page (a failure skips to step 5)
//! 3. Selects the item fragments
//! 4. Extracts each fragment, keeping the successes
//! 5. Sleeps for the politeness delay
//!
//! The walk never retries and never stops early. A run in which every page
//! fails ends with an empty catalog.

use crate::config::Config;
use crate::crawler::extractor::{Extractor, ItemSelectors};
use crate::crawler::fetcher::{build_http_client, fetch_document};
use crate::crawler::record::Catalog;
use crate::output::{Reporter, RunStatistics, ScrapeEvent};
use crate::url::CatalogUrls;
use crate::ScrapeError;
use reqwest::Client;
use scraper::Html;
use std::sync::Arc;
use std::time::Duration;

/// Drives one pass over the catalog pages
pub struct CatalogWalker {
    client: Client,
    urls: CatalogUrls,
    extractor: Extractor,
    politeness_delay: Duration,
    reporter: Arc<dyn Reporter>,
    stats: RunStatistics,
}

impl CatalogWalker {
    /// Creates a walker from its parts
    pub fn new(
        client: Client,
        urls: CatalogUrls,
        extractor: Extractor,
        politeness_delay: Duration,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            client,
            urls,
            extractor,
            politeness_delay,
            reporter,
            stats: RunStatistics::new(),
        }
    }

    /// Creates a walker for the given configuration
    ///
    /// # Returns
    ///
    /// * `Ok(CatalogWalker)` - Ready to run
    /// * `Err(ScrapeError)` - Invalid URLs or selectors, or the HTTP client
    ///   could not be built
    pub fn from_config(config: &Config, reporter: Arc<dyn Reporter>) -> Result<Self, ScrapeError> {
        let urls = CatalogUrls::from_config(&config.catalog)?;
        let selectors = ItemSelectors::compile(&config.selectors)?;
        let client = build_http_client(&config.user_agent, &config.crawler)?;
        let extractor = Extractor::new(selectors, urls.clone());

        Ok(Self::new(
            client,
            urls,
            extractor,
            Duration::from_millis(config.crawler.politeness_delay_ms),
            reporter,
        ))
    }

    /// Walks pages `1..=page_count` and returns everything collected
    ///
    /// Fetch and extraction failures are reported and skipped; they never
    /// end the walk.
    pub async fn run(&mut self, page_count: u32) -> Catalog {
        let mut catalog = Catalog::new();
        self.stats = RunStatistics::new();

        for page in 1..=page_count {
            let url = self.urls.page_url(page);
            self.reporter.record(ScrapeEvent::PageStarted {
                page,
                url: url.clone(),
            });
            self.stats.pages_attempted += 1;

            match fetch_document(&self.client, &url).await {
                Ok(document) => self.harvest_page(page, &document, &mut catalog),
                Err(failure) => {
                    self.stats.pages_failed += 1;
                    self.reporter
                        .record(ScrapeEvent::PageFailed { page, failure });
                }
            }

            // Unconditional, also after a failed page and after the last one
            tokio::time::sleep(self.politeness_delay).await;
        }

        self.stats.records_collected = catalog.len();
        self.stats.finish();

        self.reporter.record(ScrapeEvent::WalkFinished {
            pages: page_count,
            records: catalog.len(),
        });

        catalog
    }

    /// Extracts every item fragment of a fetched page into the catalog
    fn harvest_page(&mut self, page: u32, document: &Html, catalog: &mut Catalog) {
        let mut items = 0;
        let mut records = 0;

        for (index, fragment) in self.extractor.selectors().items(document).enumerate() {
            items += 1;
            match self.extractor.extract(fragment) {
                Ok(record) => {
                    records += 1;
                    catalog.push(record);
                }
                Err(failure) => {
                    tracing::trace!("Rejected fragment: {}", fragment.html());
                    self.reporter.record(ScrapeEvent::ItemSkipped {
                        page,
                        position: index + 1,
                        failure,
                    });
                }
            }
        }

        self.stats.items_found += items;
        self.stats.items_skipped += items - records;

        self.reporter.record(ScrapeEvent::PageHarvested {
            page,
            items,
            records,
        });
    }

    /// Statistics of the most recent run
    pub fn statistics(&self) -> &RunStatistics {
        &self.stats
    }

    pub fn into_statistics(self) -> RunStatistics {
        self.stats
    }
}
