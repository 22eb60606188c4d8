//! Record extraction from catalog item fragments
//!
//! Each catalog page holds a list of item containers. For every container this
//! module pulls out:
//! - The title and relative product link (from one link element)
//! - The price text, kept verbatim with its currency symbol
//! - The availability text
//! - The rating, encoded as a class token on a marker element
//!
//! Title, price, availability and link are required; a fragment missing any of
//! them is rejected. The rating is optional and falls back to
//! [`Rating::Unknown`].

use crate::config::SelectorConfig;
use crate::crawler::record::{Rating, Record};
use crate::url::CatalogUrls;
use crate::{ConfigError, ExtractionFailure};
use scraper::{ElementRef, Html, Selector};

/// Compiled CSS selectors for one catalog layout
#[derive(Debug, Clone)]
pub struct ItemSelectors {
    item: Selector,
    link: Selector,
    price: Selector,
    availability: Selector,
    rating: Selector,
    rating_baseline: String,
}

impl ItemSelectors {
    /// Compiles every selector in the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidSelector` naming the first selector that
    /// does not parse.
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            item: compile_selector(&config.item)?,
            link: compile_selector(&config.link)?,
            price: compile_selector(&config.price)?,
            availability: compile_selector(&config.availability)?,
            rating: compile_selector(&config.rating)?,
            rating_baseline: config.rating_baseline.clone(),
        })
    }

    /// Item fragments of a page, in document order
    pub fn items<'a>(&'a self, document: &'a Html) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        document.select(&self.item)
    }
}

fn compile_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Turns item fragments into records
#[derive(Debug, Clone)]
pub struct Extractor {
    selectors: ItemSelectors,
    urls: CatalogUrls,
}

impl Extractor {
    pub fn new(selectors: ItemSelectors, urls: CatalogUrls) -> Self {
        Self { selectors, urls }
    }

    pub fn selectors(&self) -> &ItemSelectors {
        &self.selectors
    }

    /// Extracts one record from an item fragment
    ///
    /// # Returns
    ///
    /// * `Ok(Record)` - All required fields were found
    /// * `Err(ExtractionFailure)` - A required field is missing or empty, or
    ///   the product link cannot be resolved
    ///
    /// # Example
    ///
    /// ```
    /// use book_scout::config::Config;
    /// use book_scout::crawler::{Extractor, ItemSelectors};
    /// use book_scout::url::CatalogUrls;
    /// use scraper::Html;
    ///
    /// let config = Config::default();
    /// let extractor = Extractor::new(
    ///     ItemSelectors::compile(&config.selectors).unwrap(),
    ///     CatalogUrls::from_config(&config.catalog).unwrap(),
    /// );
    ///
    /// let page = Html::parse_document(r#"
    ///     <article class="product_pod">
    ///         <p class="star-rating Two"></p>
    ///         <h3><a href="tipping-the-velvet_999/index.html" title="Tipping the Velvet">Tipping...</a></h3>
    ///         <p class="price_color">£53.74</p>
    ///         <p class="instock availability">In stock</p>
    ///     </article>"#);
    /// let item = extractor.selectors().items(&page).next().unwrap();
    /// let record = extractor.extract(item).unwrap();
    /// assert_eq!(record.title(), "Tipping the Velvet");
    /// ```
    pub fn extract(&self, fragment: ElementRef<'_>) -> Result<Record, ExtractionFailure> {
        let link = fragment
            .select(&self.selectors.link)
            .next()
            .ok_or(ExtractionFailure::MissingField {
                field: "title link",
            })?;

        let title = link
            .value()
            .attr("title")
            .ok_or(ExtractionFailure::MissingField { field: "title" })?;

        let href = link
            .value()
            .attr("href")
            .ok_or(ExtractionFailure::MissingField {
                field: "product link",
            })?;

        let price = text_of(fragment, &self.selectors.price)
            .ok_or(ExtractionFailure::MissingField { field: "price" })?;

        let availability = text_of(fragment, &self.selectors.availability).ok_or(
            ExtractionFailure::MissingField {
                field: "availability",
            },
        )?;

        let rating = self.rating(fragment);

        let product_url =
            self.urls
                .product_url(href)
                .map_err(|source| ExtractionFailure::InvalidLink {
                    href: href.to_string(),
                    source,
                })?;

        Record::new(title, &price, &availability, rating, product_url.as_str())
    }

    /// Reads the rating marker of a fragment
    ///
    /// The first class token that is not the baseline token names the rating.
    /// No marker element, or no such token, yields `Rating::Unknown`.
    pub fn rating(&self, fragment: ElementRef<'_>) -> Rating {
        fragment
            .select(&self.selectors.rating)
            .next()
            .and_then(|marker| {
                marker
                    .value()
                    .classes()
                    .find(|class| *class != self.selectors.rating_baseline)
            })
            .map(Rating::from_token)
            .unwrap_or(Rating::Unknown)
    }
}

/// Concatenated text of the first element matching `selector`
fn text_of(fragment: ElementRef<'_>, selector: &Selector) -> Option<String> {
    fragment
        .select(selector)
        .next()
        .map(|element| element.text().collect::<String>())
}
