pub mod catalog;
pub mod resource;

pub use catalog::{CatalogError, InMemoryCatalog, ProductCatalog, ProductRecord};
pub use resource::{InMemoryResourceProvider, ResourceError, ResourceProvider, SharedResourceData};
