//! Read-only product catalog lookups.
//!
//! The catalog store itself lives outside this workspace; the resolver only
//! needs "give me the record for this model name".

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt::Debug;
use thiserror::Error;

/// A product record: flat field name to JSON value (`brand`, `model_name`,
/// `capacity_kwh`, `image_base64`, ...).
pub type ProductRecord = Map<String, Value>;

#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    #[error("Catalog must be a JSON object keyed by model name, got {0}")]
    InvalidShape(&'static str),

    #[error("Catalog entry '{0}' is not a JSON object")]
    InvalidEntry(String),
}

pub trait ProductCatalog: Send + Sync + Debug {
    /// Looks up a product by its exact model name.
    fn product_by_model(&self, model_name: &str) -> Option<ProductRecord>;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    products: HashMap<String, ProductRecord>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(mut self, model_name: impl Into<String>, record: ProductRecord) -> Self {
        self.insert(model_name, record);
        self
    }

    pub fn insert(&mut self, model_name: impl Into<String>, record: ProductRecord) {
        self.products.insert(model_name.into(), record);
    }

    /// Builds a catalog from a JSON object of `model name -> record`.
    pub fn from_json(value: &Value) -> Result<Self, CatalogError> {
        let entries = match value {
            Value::Object(entries) => entries,
            Value::Array(_) => return Err(CatalogError::InvalidShape("an array")),
            Value::Null => return Ok(Self::default()),
            _ => return Err(CatalogError::InvalidShape("a scalar")),
        };

        let mut catalog = Self::default();
        for (model, record) in entries {
            match record {
                Value::Object(fields) => catalog.insert(model.clone(), fields.clone()),
                _ => return Err(CatalogError::InvalidEntry(model.clone())),
            }
        }
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductCatalog for InMemoryCatalog {
    fn product_by_model(&self, model_name: &str) -> Option<ProductRecord> {
        self.products.get(model_name).cloned()
    }

    fn name(&self) -> &'static str {
        "InMemoryCatalog"
    }
}
