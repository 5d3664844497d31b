// src/config.rs
use crate::error::OfferError;
use offerpress_overlay::OverlayLayout;
use offerpress_pdf_composer::DEFAULT_UNDERLAY_SCALE;
use offerpress_placeholders::ResolverOptions;
use offerpress_resource::TemplateNaming;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Everything that varies between template sets. Every field defaults to
/// the standard six-page offer, so a config file only lists what differs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferConfig {
    /// Number of template pages rendered before any appendix.
    pub fixed_pages: usize,
    pub naming: TemplateNaming,
    pub layout: OverlayLayout,
    pub resolver: ResolverOptions,
    /// Scale of the first-page underlay relative to its own size.
    pub underlay_scale: f32,
}

impl Default for OfferConfig {
    fn default() -> Self {
        Self {
            fixed_pages: 6,
            naming: TemplateNaming::default(),
            layout: OverlayLayout::default(),
            resolver: ResolverOptions::default(),
            underlay_scale: DEFAULT_UNDERLAY_SCALE,
        }
    }
}

impl OfferConfig {
    pub fn from_json(source: &str) -> Result<Self, OfferError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, OfferError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            OfferError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read config from '{}': {}", path.display(), e),
            ))
        })?;
        Self::from_json(&source)
    }

    pub fn validate(&self) -> Result<(), OfferError> {
        if self.fixed_pages == 0 {
            return Err(OfferError::Config("fixed_pages must be at least 1".to_string()));
        }
        if !(self.underlay_scale.is_finite() && self.underlay_scale > 0.0) {
            return Err(OfferError::Config(format!(
                "underlay_scale must be positive, got {}",
                self.underlay_scale
            )));
        }
        let size = self.layout.page_size;
        if !(size.width > 0.0 && size.height > 0.0) {
            return Err(OfferError::Config(format!(
                "page size must be positive, got {}x{}",
                size.width, size.height
            )));
        }
        for (what, page) in [
            ("kpi_page", self.layout.kpi_page),
            ("components_page", self.layout.components_page),
        ] {
            if page == 0 || page > self.fixed_pages {
                log::warn!(
                    "layout.{} = {} is outside pages 1..={}; it will never be drawn",
                    what,
                    page,
                    self.fixed_pages
                );
            }
        }
        Ok(())
    }
}
