//! Error types for catalog operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Property not found: {0}")]
    NotFound(String),

    #[error("Property already exists: {0}")]
    Duplicate(String),

    #[error("Invalid property: {0}")]
    InvalidProperty(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Invalid page: {0}")]
    InvalidPage(String),

    #[error("Catalog I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
