//! Run statistics
//!
//! Counters gathered while walking the catalog, printed once the run ends.

use chrono::{DateTime, Utc};

/// Run statistics summary
#[derive(Debug, Clone)]
pub struct RunStatistics {
    /// When the walk started
    pub started_at: DateTime<Utc>,

    /// When the walk ended (None while running)
    pub finished_at: Option<DateTime<Utc>>,

    /// Pages requested
    pub pages_attempted: u32,

    /// Pages that could not be fetched
    pub pages_failed: u32,

    /// Item fragments found on fetched pages
    pub items_found: usize,

    /// Item fragments rejected by the extractor
    pub items_skipped: usize,

    /// Records in the catalog
    pub records_collected: usize,
}

impl Default for RunStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStatistics {
    /// Starts a fresh set of counters stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            pages_attempted: 0,
            pages_failed: 0,
            items_found: 0,
            items_skipped: 0,
            records_collected: 0,
        }
    }

    /// Stamps the end of the run
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock duration in milliseconds, once finished
    pub fn duration_ms(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_milliseconds())
    }

    /// Share of attempted pages that were fetched, as a percentage
    pub fn page_success_rate(&self) -> f64 {
        if self.pages_attempted == 0 {
            return 0.0;
        }
        let fetched = self.pages_attempted - self.pages_failed;
        (fetched as f64 / self.pages_attempted as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &RunStatistics) {
    println!("=== Scrape Statistics ===\n");

    println!("Pages:");
    println!("  Attempted: {}", stats.pages_attempted);
    println!("  Failed: {}", stats.pages_failed);
    println!(
        "  Success rate: {:.1}%",
        stats.page_success_rate()
    );
    println!();

    println!("Items:");
    println!("  Found: {}", stats.items_found);
    println!("  Skipped: {}", stats.items_skipped);
    println!("  Collected: {}", stats.records_collected);
    println!();

    println!("Started: {}", stats.started_at.to_rfc3339());
    if let Some(ms) = stats.duration_ms() {
        println!("Duration: {:.2} seconds", ms as f64 / 1000.0);
    }
}
