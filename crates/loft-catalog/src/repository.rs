//! Property storage behind an explicit repository interface.
//!
//! The admin panel and the public listing pages receive a
//! [`PropertyRepository`] instead of reaching into shared global state.
//! [`InMemoryRepository`] serves tests and previews; [`JsonFileRepository`]
//! keeps the catalog in a JSON array on disk and rewrites it after every
//! mutation.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{CatalogError, Result};
use crate::property::Property;

/// CRUD over the property catalog. Ids are unique.
pub trait PropertyRepository {
    /// All properties in insertion order.
    fn list(&self) -> Result<Vec<Property>>;

    fn get(&self, id: &str) -> Result<Option<Property>>;

    /// # Errors
    /// [`CatalogError::Duplicate`] if the id is taken,
    /// [`CatalogError::InvalidProperty`] if the record is incomplete.
    fn add(&mut self, property: Property) -> Result<()>;

    /// Replace the property with the same id.
    ///
    /// # Errors
    /// [`CatalogError::NotFound`] if no property has that id.
    fn update(&mut self, property: Property) -> Result<()>;

    /// Remove and return the property.
    ///
    /// # Errors
    /// [`CatalogError::NotFound`] if no property has that id.
    fn delete(&mut self, id: &str) -> Result<Property>;
}

/// Properties flagged for the home page.
pub fn featured<R: PropertyRepository + ?Sized>(repo: &R) -> Result<Vec<Property>> {
    Ok(repo.list()?.into_iter().filter(|p| p.featured).collect())
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    properties: Vec<Property>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a repository, rejecting duplicate or incomplete records.
    pub fn with_properties(properties: Vec<Property>) -> Result<Self> {
        let mut repo = Self::new();
        for property in properties {
            repo.add(property)?;
        }
        Ok(repo)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.properties.iter().position(|p| p.id == id)
    }
}

impl PropertyRepository for InMemoryRepository {
    fn list(&self) -> Result<Vec<Property>> {
        Ok(self.properties.clone())
    }

    fn get(&self, id: &str) -> Result<Option<Property>> {
        Ok(self.position(id).map(|i| self.properties[i].clone()))
    }

    fn add(&mut self, property: Property) -> Result<()> {
        property.validate()?;
        if self.position(&property.id).is_some() {
            return Err(CatalogError::Duplicate(property.id));
        }
        self.properties.push(property);
        Ok(())
    }

    fn update(&mut self, property: Property) -> Result<()> {
        property.validate()?;
        let index = self
            .position(&property.id)
            .ok_or_else(|| CatalogError::NotFound(property.id.clone()))?;
        self.properties[index] = property;
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<Property> {
        let index = self
            .position(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        Ok(self.properties.remove(index))
    }
}

/// A catalog persisted as a pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
    inner: InMemoryRepository,
}

impl JsonFileRepository {
    /// Load the catalog at `path`; a missing file is an empty catalog.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let properties: Vec<Property> = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => Vec::new(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), properties = properties.len(), "opened catalog");
        Ok(Self {
            path,
            inner: InMemoryRepository::with_properties(properties)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write to a sibling `.tmp` file and rename it over the catalog, so a
    /// crash mid-write leaves the previous catalog intact.
    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.inner.properties)?;
        let temp = temp_path(&self.path);
        fs::write(&temp, json)?;
        fs::rename(&temp, &self.path)?;
        info!(path = %self.path.display(), properties = self.inner.len(), "saved catalog");
        Ok(())
    }
}

impl PropertyRepository for JsonFileRepository {
    fn list(&self) -> Result<Vec<Property>> {
        self.inner.list()
    }

    fn get(&self, id: &str) -> Result<Option<Property>> {
        self.inner.get(id)
    }

    fn add(&mut self, property: Property) -> Result<()> {
        self.inner.add(property)?;
        self.save()
    }

    fn update(&mut self, property: Property) -> Result<()> {
        self.inner.update(property)?;
        self.save()
    }

    fn delete(&mut self, id: &str) -> Result<Property> {
        let removed = self.inner.delete(id)?;
        self.save()?;
        Ok(removed)
    }
}

/// `lofts.json` → `lofts.json.tmp`, next to the catalog.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
