//! Listing filters and pagination.
//!
//! A [`ListingFilter`] names every criterion the listings page understands.
//! It is built through [`ListingFilter::builder`], which rejects
//! contradictory settings up front, so matching itself cannot fail.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::property::{Property, PropertyKind};

/// Listing cards per page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Bedroom criterion. `"4+"` on the listings page is `AtLeast(4)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BedroomFilter {
    #[default]
    Any,
    Exactly(u32),
    AtLeast(u32),
}

impl BedroomFilter {
    fn matches(&self, bedrooms: u32) -> bool {
        match *self {
            BedroomFilter::Any => true,
            BedroomFilter::Exactly(n) => bedrooms == n,
            BedroomFilter::AtLeast(n) => bedrooms >= n,
        }
    }
}

impl FromStr for BedroomFilter {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("any") || s.eq_ignore_ascii_case("qualquer") {
            return Ok(BedroomFilter::Any);
        }
        let invalid = || CatalogError::InvalidFilter(format!("invalid bedroom filter '{s}'"));
        match s.strip_suffix('+') {
            Some(n) => n.trim().parse().map(BedroomFilter::AtLeast).map_err(|_| invalid()),
            None => s.parse().map(BedroomFilter::Exactly).map_err(|_| invalid()),
        }
    }
}

/// Criteria for the listings page. All set criteria must match.
///
/// Deserializing goes through [`ListingFilterBuilder::build`], so a saved
/// filter is normalized and validated like one built in code.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "StoredFilter")]
pub struct ListingFilter {
    search: Option<String>,
    kind: Option<PropertyKind>,
    bedrooms: BedroomFilter,
    min_price: Option<u64>,
    max_price: Option<u64>,
    neighborhood: Option<String>,
}

impl ListingFilter {
    pub fn builder() -> ListingFilterBuilder {
        ListingFilterBuilder::default()
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn kind(&self) -> Option<PropertyKind> {
        self.kind
    }

    pub fn bedrooms(&self) -> BedroomFilter {
        self.bedrooms
    }

    pub fn price_range(&self) -> (Option<u64>, Option<u64>) {
        (self.min_price, self.max_price)
    }

    pub fn neighborhood(&self) -> Option<&str> {
        self.neighborhood.as_deref()
    }

    pub fn matches(&self, property: &Property) -> bool {
        if let Some(needle) = &self.search {
            let haystacks = [
                &property.title,
                &property.address.neighborhood,
                &property.address.street,
            ];
            if !haystacks.iter().any(|h| h.to_lowercase().contains(needle)) {
                return false;
            }
        }
        if self.kind.is_some_and(|k| k != property.kind) {
            return false;
        }
        if !self.bedrooms.matches(property.bedrooms) {
            return false;
        }
        if self.min_price.is_some_and(|min| property.nightly_price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| property.nightly_price > max) {
            return false;
        }
        if let Some(neighborhood) = &self.neighborhood {
            if !property.address.neighborhood.eq_ignore_ascii_case(neighborhood) {
                return false;
            }
        }
        true
    }

    /// Matching properties, in their original order.
    pub fn apply(&self, properties: &[Property]) -> Vec<Property> {
        properties
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect()
    }
}

/// Wire shape of a [`ListingFilter`], before validation.
#[derive(Deserialize)]
struct StoredFilter {
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    kind: Option<PropertyKind>,
    #[serde(default)]
    bedrooms: BedroomFilter,
    #[serde(default)]
    min_price: Option<u64>,
    #[serde(default)]
    max_price: Option<u64>,
    #[serde(default)]
    neighborhood: Option<String>,
}

impl TryFrom<StoredFilter> for ListingFilter {
    type Error = CatalogError;

    fn try_from(stored: StoredFilter) -> Result<Self> {
        let mut builder = ListingFilter::builder().bedrooms(stored.bedrooms);
        if let Some(search) = stored.search {
            builder = builder.search(search);
        }
        if let Some(kind) = stored.kind {
            builder = builder.kind(kind);
        }
        if let Some(min) = stored.min_price {
            builder = builder.min_price(min);
        }
        if let Some(max) = stored.max_price {
            builder = builder.max_price(max);
        }
        if let Some(neighborhood) = stored.neighborhood {
            builder = builder.neighborhood(neighborhood);
        }
        builder.build()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListingFilterBuilder {
    filter: ListingFilter,
}

impl ListingFilterBuilder {
    /// Case-insensitive substring of title, neighborhood or street. Blank
    /// input clears the criterion.
    pub fn search(mut self, search: impl Into<String>) -> Self {
        let search = search.into().trim().to_lowercase();
        self.filter.search = (!search.is_empty()).then_some(search);
        self
    }

    pub fn kind(mut self, kind: PropertyKind) -> Self {
        self.filter.kind = Some(kind);
        self
    }

    pub fn bedrooms(mut self, bedrooms: BedroomFilter) -> Self {
        self.filter.bedrooms = bedrooms;
        self
    }

    pub fn min_price(mut self, min: u64) -> Self {
        self.filter.min_price = Some(min);
        self
    }

    pub fn max_price(mut self, max: u64) -> Self {
        self.filter.max_price = Some(max);
        self
    }

    pub fn neighborhood(mut self, neighborhood: impl Into<String>) -> Self {
        let neighborhood = neighborhood.into().trim().to_string();
        self.filter.neighborhood = (!neighborhood.is_empty()).then_some(neighborhood);
        self
    }

    /// # Errors
    /// [`CatalogError::InvalidFilter`] when `min_price > max_price` or the
    /// bedroom count is `Exactly(0)`.
    pub fn build(self) -> Result<ListingFilter> {
        let filter = self.filter;
        if let (Some(min), Some(max)) = (filter.min_price, filter.max_price) {
            if min > max {
                return Err(CatalogError::InvalidFilter(format!(
                    "minimum price {min} is above maximum price {max}"
                )));
            }
        }
        if filter.bedrooms == BedroomFilter::Exactly(0) {
            return Err(CatalogError::InvalidFilter(
                "a listing has at least one bedroom".to_string(),
            ));
        }
        Ok(filter)
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub has_more: bool,
}

/// Slice `items` into 1-based pages of `per_page`.
///
/// A page past the end is empty, not an error.
///
/// # Errors
/// [`CatalogError::InvalidPage`] for page 0 or a page size of 0.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Result<Page<T>> {
    if page == 0 {
        return Err(CatalogError::InvalidPage("pages start at 1".to_string()));
    }
    if per_page == 0 {
        return Err(CatalogError::InvalidPage("page size must be positive".to_string()));
    }

    let total = items.len();
    let start = (page - 1).saturating_mul(per_page).min(total);
    let end = start.saturating_add(per_page).min(total);

    Ok(Page {
        items: items[start..end].to_vec(),
        total,
        page,
        per_page,
        has_more: end < total,
    })
}
