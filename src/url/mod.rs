//! URL handling module for Book-Scout
//!
//! Builds catalog page URLs from the configured template and resolves the
//! relative product links found on those pages.

use crate::config::CatalogConfig;
use crate::ConfigError;
use url::{ParseError, Url};

/// Placeholder in the page URL template replaced by the page number
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Catalog addressing: page URLs and the base for product links
#[derive(Debug, Clone)]
pub struct CatalogUrls {
    page_url_template: String,
    product_base: Url,
}

impl CatalogUrls {
    /// Builds catalog addressing from configuration
    ///
    /// # Errors
    ///
    /// * `ConfigError::Validation` - the template has no `{page}` placeholder
    /// * `ConfigError::InvalidUrl` - the template or site base is not an
    ///   absolute HTTP(S) URL
    pub fn from_config(config: &CatalogConfig) -> Result<Self, ConfigError> {
        if !config.page_url_template.contains(PAGE_PLACEHOLDER) {
            return Err(ConfigError::Validation(format!(
                "page_url_template must contain '{}', got '{}'",
                PAGE_PLACEHOLDER, config.page_url_template
            )));
        }

        let first_page = substitute(&config.page_url_template, 1);
        let first_page = Url::parse(&first_page).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid page_url_template '{}': {}", first_page, e))
        })?;
        require_http(&first_page, "page_url_template")?;

        let site = Url::parse(&config.site_base).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid site_base '{}': {}", config.site_base, e))
        })?;
        require_http(&site, "site_base")?;

        // Relative links are resolved inside the catalog directory, so the
        // path must end with '/' or `join` would drop its last segment.
        let mut catalog_path = config.catalog_path.trim().to_string();
        if !catalog_path.is_empty() && !catalog_path.ends_with('/') {
            catalog_path.push('/');
        }

        let product_base = site.join(&catalog_path).map_err(|e| {
            ConfigError::InvalidUrl(format!(
                "Invalid catalog_path '{}': {}",
                config.catalog_path, e
            ))
        })?;

        Ok(Self {
            page_url_template: config.page_url_template.clone(),
            product_base,
        })
    }

    /// URL of the given 1-based catalog page
    pub fn page_url(&self, page: u32) -> String {
        substitute(&self.page_url_template, page)
    }

    /// Resolves a relative product link to an absolute URL
    ///
    /// # Example
    ///
    /// ```
    /// use book_scout::config::CatalogConfig;
    /// use book_scout::url::CatalogUrls;
    ///
    /// let urls = CatalogUrls::from_config(&CatalogConfig::default()).unwrap();
    /// let url = urls.product_url("test.html").unwrap();
    /// assert_eq!(url.as_str(), "http://books.toscrape.com/catalogue/test.html");
    /// ```
    pub fn product_url(&self, href: &str) -> Result<Url, ParseError> {
        self.product_base.join(href.trim())
    }

    /// Base that product links are resolved against
    pub fn product_base(&self) -> &Url {
        &self.product_base
    }
}

fn substitute(template: &str, page: u32) -> String {
    template.replace(PAGE_PLACEHOLDER, &page.to_string())
}

fn require_http(url: &Url, key: &str) -> Result<(), ConfigError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidUrl(format!(
            "{} must use http or https, got '{}'",
            key, other
        ))),
    }
}
