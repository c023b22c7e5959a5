//! Reservation summary: guest counts, stay quotes, and the outbound link to
//! the booking provider.
//!
//! The outbound link is the only bit-exact surface of the crate: the provider
//! reads `check_in`, `check_out`, `adults`, `children` and `infants` from the
//! query string, with dates in ISO `YYYY-MM-DD` form.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AvailabilityError, Result};
use crate::resolver::SelectionRange;

/// Adults + children a loft hosts unless the listing says otherwise.
pub const DEFAULT_MAX_GUESTS: u32 = 4;

const DATE_PARAM_FORMAT: &str = "%Y-%m-%d";

/// Guests on a reservation. Infants do not count toward the capacity.
///
/// Only [`GuestCount::new`] builds one, since the capacity check needs the
/// listing's limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuestCount {
    adults: u32,
    children: u32,
    infants: u32,
}

impl GuestCount {
    /// # Errors
    /// Returns [`AvailabilityError::InvalidGuests`] when there is no adult or
    /// when adults + children exceed `max_guests`.
    pub fn new(adults: u32, children: u32, infants: u32, max_guests: u32) -> Result<Self> {
        if adults == 0 {
            return Err(AvailabilityError::InvalidGuests(
                "at least one adult is required".to_string(),
            ));
        }
        let headcount = adults.checked_add(children).ok_or_else(|| {
            AvailabilityError::InvalidGuests(format!("{adults} adults and {children} children"))
        })?;
        if headcount > max_guests {
            return Err(AvailabilityError::InvalidGuests(format!(
                "{headcount} adults and children exceed the limit of {max_guests}"
            )));
        }
        Ok(Self {
            adults,
            children,
            infants,
        })
    }

    pub fn adults(&self) -> u32 {
        self.adults
    }

    pub fn children(&self) -> u32 {
        self.children
    }

    pub fn infants(&self) -> u32 {
        self.infants
    }

    /// Guests counted against the capacity (adults + children).
    pub fn headcount(&self) -> u32 {
        self.adults + self.children
    }
}

impl Default for GuestCount {
    fn default() -> Self {
        Self {
            adults: 1,
            children: 0,
            infants: 0,
        }
    }
}

/// Build the provider URL for a reservation.
///
/// Dates are only appended for a committed range; `children` and `infants`
/// only when non-zero. Query parameters already on `base` are kept.
///
/// # Errors
/// Returns [`AvailabilityError::InvalidUrl`] if `base` is not an absolute
/// http(s) URL.
pub fn reservation_url(base: &str, range: &SelectionRange, guests: &GuestCount) -> Result<String> {
    let invalid = |reason: String| AvailabilityError::InvalidUrl {
        url: base.to_string(),
        reason,
    };

    let mut url = Url::parse(base.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }

    {
        let mut query = url.query_pairs_mut();
        if let Some((check_in, check_out)) = range.complete() {
            query.append_pair("check_in", &check_in.format(DATE_PARAM_FORMAT).to_string());
            query.append_pair("check_out", &check_out.format(DATE_PARAM_FORMAT).to_string());
        }
        query.append_pair("adults", &guests.adults.to_string());
        if guests.children > 0 {
            query.append_pair("children", &guests.children.to_string());
        }
        if guests.infants > 0 {
            query.append_pair("infants", &guests.infants.to_string());
        }
    }

    Ok(url.into())
}

/// Price estimate for a selection: nightly rate × nights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayQuote {
    pub nights: u32,
    pub nightly_price: u64,
    pub total: u64,
}

impl StayQuote {
    /// An incomplete range quotes zero nights.
    pub fn new(range: &SelectionRange, nightly_price: u64) -> Self {
        let nights = range
            .nights()
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0);
        Self {
            nights,
            nightly_price,
            total: nightly_price.saturating_mul(u64::from(nights)),
        }
    }
}
