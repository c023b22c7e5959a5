//! Error types for loft-availability operations.
//!
//! Domain outcomes (a malformed feed, a rejected date click) are not errors:
//! the feed parser degrades to an empty list and the resolver reports typed
//! [`SelectionResult`](crate::SelectionResult) variants. These errors cover
//! malformed caller input only.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid guest count: {0}")]
    InvalidGuests(String),

    #[error("Invalid reservation URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

pub type Result<T> = std::result::Result<T, AvailabilityError>;
