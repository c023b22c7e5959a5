//! Property records as stored in the catalog file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyKind {
    Loft,
    #[serde(alias = "Apartamento")]
    Apartment,
    Studio,
    #[serde(alias = "Casa")]
    House,
}

impl PropertyKind {
    pub const ALL: [PropertyKind; 4] = [
        PropertyKind::Loft,
        PropertyKind::Apartment,
        PropertyKind::Studio,
        PropertyKind::House,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKind::Loft => "Loft",
            PropertyKind::Apartment => "Apartment",
            PropertyKind::Studio => "Studio",
            PropertyKind::House => "House",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "loft" => Ok(PropertyKind::Loft),
            "apartment" | "apartamento" => Ok(PropertyKind::Apartment),
            "studio" => Ok(PropertyKind::Studio),
            "house" | "casa" => Ok(PropertyKind::House),
            other => {
                let expected: Vec<String> = PropertyKind::ALL
                    .iter()
                    .map(|k| k.as_str().to_ascii_lowercase())
                    .collect();
                Err(CatalogError::InvalidFilter(format!(
                    "unknown property kind '{other}' (expected one of: {})",
                    expected.join(", ")
                )))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

/// One rentable unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub slug: String,
    pub title: String,
    /// Price per night in whole currency units.
    pub nightly_price: u64,
    pub kind: PropertyKind,
    pub area_m2: u32,
    pub bedrooms: u32,
    pub bathrooms: u32,
    #[serde(default)]
    pub parking_spaces: u32,
    pub address: Address,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Reservation page on the booking provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_url: Option<String>,
    /// iCal export of the unit's existing bookings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ical_url: Option<String>,
}

impl Property {
    /// Neighborhood + city, as shown on listing cards.
    pub fn location_label(&self) -> String {
        format!("{}, {}", self.address.neighborhood, self.address.city)
    }

    pub(crate) fn validate(&self) -> crate::error::Result<()> {
        if self.id.trim().is_empty() {
            return Err(CatalogError::InvalidProperty("id must not be empty".to_string()));
        }
        if self.title.trim().is_empty() {
            return Err(CatalogError::InvalidProperty(format!(
                "property '{}' has an empty title",
                self.id
            )));
        }
        Ok(())
    }
}
