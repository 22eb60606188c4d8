//! Book-Scout: a polite catalog scraper
//!
//! This crate walks the numbered pages of a product catalog, extracts a fixed
//! set of fields from every item on each page, and writes the collected
//! records to a CSV file.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Book-Scout operations
///
/// Only failures that end a run appear here. Page and item failures are
/// contained where they happen and never escalate.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Write(#[from] WriteFailure),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// A catalog page that could not be retrieved
///
/// The walker skips the page and carries on with the next one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("HTTP {status_code} for {url}")]
    Status { url: String, status_code: u16 },

    #[error("Request timeout for {url}: {message}")]
    Timeout { url: String, message: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("Request failed for {url}: {message}")]
    Transport { url: String, message: String },
}

impl FetchFailure {
    /// The URL whose retrieval failed
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. }
            | Self::Timeout { url, .. }
            | Self::Connect { url, .. }
            | Self::Transport { url, .. } => url,
        }
    }
}

/// An item fragment that could not be turned into a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionFailure {
    #[error("missing {field}")]
    MissingField { field: &'static str },

    #[error("empty {field}")]
    EmptyField { field: &'static str },

    #[error("cannot resolve product link '{href}': {source}")]
    InvalidLink {
        href: String,
        source: ::url::ParseError,
    },
}

/// The catalog could not be written to its destination
#[derive(Debug, Error)]
pub enum WriteFailure {
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: csv::Error },
}

impl WriteFailure {
    /// The destination that could not be written
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Open { path, .. } | Self::Write { path, .. } => path,
        }
    }
}

/// Result type alias for Book-Scout operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{scrape, Catalog, Rating, Record};
pub use output::{MemoryReporter, Reporter, ScrapeEvent, TracingReporter};
