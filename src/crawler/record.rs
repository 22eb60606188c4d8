//! Catalog records and the rating vocabulary

use crate::ExtractionFailure;
use std::fmt;

/// Star rating of a catalog item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rating {
    One,
    Two,
    Three,
    Four,
    Five,
    /// No rating marker, or a marker outside the vocabulary
    Unknown,
}

impl Rating {
    /// Maps a class token such as `Three` to a rating
    pub fn from_token(token: &str) -> Self {
        match token {
            "One" => Self::One,
            "Two" => Self::Two,
            "Three" => Self::Three,
            "Four" => Self::Four,
            "Five" => Self::Five,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::One => "One",
            Self::Two => "Two",
            Self::Three => "Three",
            Self::Four => "Four",
            Self::Five => "Five",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extracted catalog item
///
/// All text fields are trimmed and non-empty. A record cannot be changed
/// after it is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    title: String,
    price: String,
    availability: String,
    rating: Rating,
    product_url: String,
}

impl Record {
    /// Builds a record, trimming every text field
    ///
    /// # Errors
    ///
    /// Returns `ExtractionFailure::EmptyField` if any text field is empty
    /// after trimming.
    pub fn new(
        title: &str,
        price: &str,
        availability: &str,
        rating: Rating,
        product_url: &str,
    ) -> Result<Self, ExtractionFailure> {
        Ok(Self {
            title: required("title", title)?,
            price: required("price", price)?,
            availability: required("availability", availability)?,
            rating,
            product_url: required("product link", product_url)?,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Price text as shown on the page, currency symbol included
    pub fn price(&self) -> &str {
        &self.price
    }

    pub fn availability(&self) -> &str {
        &self.availability
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// Absolute URL of the item's detail page
    pub fn product_url(&self) -> &str {
        &self.product_url
    }

    /// Fields in output column order
    pub fn fields(&self) -> [&str; 5] {
        [
            self.title.as_str(),
            self.price.as_str(),
            self.availability.as_str(),
            self.rating.as_str(),
            self.product_url.as_str(),
        ]
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ExtractionFailure> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ExtractionFailure::EmptyField { field });
    }
    Ok(value.to_string())
}

/// Every record collected during one run, in page order then document order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<Record>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}
