// src/error.rs
use offerpress_overlay::RenderError;
use offerpress_pdf_composer::ComposerError;
use offerpress_traits::{CatalogError, ResourceError};
use thiserror::Error;

/// Errors surfaced by offer generation and its configuration layer.
///
/// Missing optional data (a background, a logo, a catalog entry) never ends
/// up here; those degrade inside the components.
#[derive(Error, Debug)]
pub enum OfferError {
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Composition failed: {0}")]
    Composer(#[from] ComposerError),

    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("Invalid product catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
