//! A guest's favorite properties.
//!
//! Only ids are stored; listing details are looked up in the repository when
//! the favorites page is rendered, so a price change never goes stale here.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::property::Property;
use crate::repository::PropertyRepository;

/// Favorite property ids in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    ids: Vec<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or remove `id`. Returns whether it is a favorite afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.ids.iter().position(|f| f == id) {
            Some(index) => {
                self.ids.remove(index);
                false
            }
            None => {
                self.ids.push(id.to_string());
                true
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|f| f == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Current records of the favorites still in the catalog.
    pub fn resolve<R: PropertyRepository + ?Sized>(&self, repo: &R) -> Result<Vec<Property>> {
        let mut properties = Vec::with_capacity(self.ids.len());
        for id in &self.ids {
            if let Some(property) = repo.get(id)? {
                properties.push(property);
            }
        }
        Ok(properties)
    }
}
