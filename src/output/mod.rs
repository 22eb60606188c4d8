//! Output module for run diagnostics and results
//!
//! This module handles:
//! - Writing the collected catalog as CSV
//! - Reporting scrape events through an injectable [`Reporter`]
//! - Recording and printing run statistics

mod csv_sink;
pub mod stats;
mod traits;

pub use csv_sink::{write_catalog, write_records, HEADER};
pub use stats::{print_statistics, RunStatistics};
pub use traits::{MemoryReporter, Reporter, ScrapeEvent, TracingReporter};
