//! # loft-catalog
//!
//! The listing side of the loft site: property records, a repository
//! interface for the admin panel's CRUD, validated listing filters with
//! pagination, and a guest's favorites.
//!
//! ## Modules
//!
//! - [`property`]: `Property`, `Address`, `PropertyKind`
//! - [`repository`]: `PropertyRepository` trait, in-memory and JSON-file stores
//! - [`filter`]: `ListingFilter` (validated at construction) and `paginate`
//! - [`favorites`]: ordered set of favorite property ids
//! - [`error`]: Error types

pub mod error;
pub mod favorites;
pub mod filter;
pub mod property;
pub mod repository;

pub use error::CatalogError;
pub use favorites::Favorites;
pub use filter::{paginate, BedroomFilter, ListingFilter, Page, DEFAULT_PAGE_SIZE};
pub use property::{Address, Property, PropertyKind};
pub use repository::{featured, InMemoryRepository, JsonFileRepository, PropertyRepository};
