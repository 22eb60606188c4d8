use serde::Deserialize;

/// Main configuration structure for Book-Scout
///
/// Every section and key is optional. Missing values fall back to the
/// reference deployment against `books.toscrape.com`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub selectors: SelectorConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Where the catalog lives and how many pages to walk
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CatalogConfig {
    /// Total number of pages to walk, starting at page 1
    pub page_count: u32,

    /// Page URL with a `{page}` placeholder for the 1-based page number
    pub page_url_template: String,

    /// Root of the site, used to resolve product links
    pub site_base: String,

    /// Path segment under the site base that product links are relative to
    pub catalog_path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_count: 50,
            page_url_template: "http://books.toscrape.com/catalogue/page-{page}.html".to_string(),
            site_base: "http://books.toscrape.com/".to_string(),
            catalog_path: "catalogue/".to_string(),
        }
    }
}

/// CSS selectors describing the markup of one catalog item
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SelectorConfig {
    /// Item container on a catalog page
    pub item: String,

    /// Link carrying the `title` and `href` attributes
    pub link: String,

    pub price: String,

    pub availability: String,

    /// Element whose class list carries the rating token
    pub rating: String,

    /// Class token on the rating element that is not itself a rating
    pub rating_baseline: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            item: "article.product_pod".to_string(),
            link: "h3 a".to_string(),
            price: ".price_color".to_string(),
            availability: ".availability".to_string(),
            rating: ".star-rating".to_string(),
            rating_baseline: "star-rating".to_string(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Fixed pause after every page (milliseconds)
    pub politeness_delay_ms: u64,

    /// Timeout for a single page request (seconds)
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            politeness_delay_ms: 1000,
            request_timeout_secs: 30,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name of the crawler
    pub crawler_name: String,

    /// Version of the crawler
    pub crawler_version: String,

    /// URL with information about the crawler (optional)
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "book-scout".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `CrawlerName/Version` or `CrawlerName/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match self.contact_url.as_deref().filter(|url| !url.is_empty()) {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path to the CSV file receiving the catalog
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "books_data.csv".to_string(),
        }
    }
}
