//! Reporter trait and scrape events
//!
//! Every diagnostic a run produces goes through a [`Reporter`]. The binary
//! uses [`TracingReporter`]; tests use [`MemoryReporter`] to inspect what was
//! reported without capturing process output.

use crate::{ExtractionFailure, FetchFailure};
use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;

/// Something that happened during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeEvent {
    /// A page is about to be fetched
    PageStarted { page: u32, url: String },

    /// A page could not be fetched and was skipped
    PageFailed { page: u32, failure: FetchFailure },

    /// An item fragment was rejected
    ItemSkipped {
        page: u32,
        /// 1-based position of the fragment on its page
        position: usize,
        failure: ExtractionFailure,
    },

    /// A page was fetched and mined
    PageHarvested {
        page: u32,
        items: usize,
        records: usize,
    },

    /// All pages have been attempted
    WalkFinished { pages: u32, records: usize },

    /// The catalog was written
    CatalogSaved { path: PathBuf, records: usize },

    /// The catalog could not be written
    CatalogNotSaved { path: PathBuf, message: String },
}

impl ScrapeEvent {
    /// Whether this event describes something that went wrong
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::PageFailed { .. } | Self::ItemSkipped { .. } | Self::CatalogNotSaved { .. }
        )
    }
}

impl fmt::Display for ScrapeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PageStarted { page, .. } => write!(f, "Scraping page {}...", page),
            Self::PageFailed { page, failure } => {
                write!(f, "Skipping page {}: {}", page, failure)
            }
            Self::ItemSkipped {
                page,
                position,
                failure,
            } => write!(
                f,
                "Error reading item {} on page {}, skipping: {}",
                position, page, failure
            ),
            Self::PageHarvested {
                page,
                items,
                records,
            } => write!(
                f,
                "Page {}: {} of {} items extracted",
                page, records, items
            ),
            Self::WalkFinished { pages, records } => write!(
                f,
                "Scraping done! Total items collected: {} from {} pages",
                records, pages
            ),
            Self::CatalogSaved { path, records } => {
                write!(f, "Data saved to {} ({} rows)", path.display(), records)
            }
            Self::CatalogNotSaved { path, message } => {
                write!(f, "Error writing {}: {}", path.display(), message)
            }
        }
    }
}

/// Receiver of scrape events
///
/// Implementations must be thread-safe.
pub trait Reporter: Send + Sync {
    /// Records one event
    fn record(&self, event: ScrapeEvent);
}

/// Reporter that emits every event as a `tracing` line
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn record(&self, event: ScrapeEvent) {
        match &event {
            ScrapeEvent::PageFailed { .. } | ScrapeEvent::ItemSkipped { .. } => {
                tracing::warn!("{}", event)
            }
            ScrapeEvent::CatalogNotSaved { .. } => tracing::error!("{}", event),
            ScrapeEvent::PageHarvested { .. } => tracing::debug!("{}", event),
            ScrapeEvent::PageStarted { url, .. } => {
                tracing::info!("{}", event);
                tracing::debug!("GET {}", url);
            }
            ScrapeEvent::WalkFinished { .. } | ScrapeEvent::CatalogSaved { .. } => {
                tracing::info!("{}", event)
            }
        }
    }
}

/// Reporter that keeps every event in memory
#[derive(Debug, Default)]
pub struct MemoryReporter {
    events: Mutex<Vec<ScrapeEvent>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far, in order
    pub fn events(&self) -> Vec<ScrapeEvent> {
        self.lock().clone()
    }

    /// Events rendered as diagnostic lines
    pub fn lines(&self) -> Vec<String> {
        self.lock().iter().map(ToString::to_string).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ScrapeEvent>> {
        // A poisoned log is still a valid log.
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Reporter for MemoryReporter {
    fn record(&self, event: ScrapeEvent) {
        self.lock().push(event);
    }
}
