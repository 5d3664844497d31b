// src/generator.rs

use crate::config::OfferConfig;
use crate::error::OfferError;
use chrono::NaiveDate;
use offerpress_descriptor::load_page_descriptor;
use offerpress_overlay::OverlayRenderer;
use offerpress_pdf_composer::{BackgroundSet, compose, count_pages};
use offerpress_placeholders::{DynamicValueSet, OfferInput, PlaceholderResolver};
use offerpress_resource::FilesystemResourceProvider;
use offerpress_traits::{InMemoryCatalog, ProductCatalog, ResourceProvider};
use std::path::Path;
use std::sync::Arc;

/// Page counts fixed before any overlay is rendered: the footers print the
/// total, so it has to be known up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    pub fixed_pages: usize,
    pub appendix_pages: usize,
}

impl PagePlan {
    pub fn total_pages(&self) -> usize {
        self.fixed_pages + self.appendix_pages
    }
}

/// Generates offer documents from one template set.
///
/// Generation runs in explicit phases so callers can inspect or replace any
/// of them:
///
/// 1. [`resolve`](Self::resolve) the raw input into display values,
/// 2. [`prepare_page_count`](Self::prepare_page_count) from the appendix,
/// 3. [`render_overlay`](Self::render_overlay) every fixed page,
/// 4. [`compose`](Self::compose) overlays, backgrounds and appendix.
///
/// [`generate`](Self::generate) runs all four.
#[derive(Debug, Clone)]
pub struct OfferGenerator {
    provider: Arc<dyn ResourceProvider>,
    catalog: Arc<dyn ProductCatalog>,
    config: OfferConfig,
    offer_date: Option<NaiveDate>,
    renderer: OverlayRenderer,
}

impl OfferGenerator {
    pub fn builder() -> OfferGeneratorBuilder {
        OfferGeneratorBuilder::new()
    }

    pub fn config(&self) -> &OfferConfig {
        &self.config
    }

    /// Derives the full value set. The configured offer date is used unless
    /// the input carries its own.
    pub fn resolve(&self, input: &OfferInput) -> DynamicValueSet {
        let resolver =
            PlaceholderResolver::new(Arc::clone(&self.catalog)).with_options(self.config.resolver.clone());
        match (input.offer_date, self.offer_date) {
            (None, Some(date)) => resolver.resolve(&input.clone().with_offer_date(date)),
            _ => resolver.resolve(input),
        }
    }

    /// An unreadable appendix counts as zero pages; [`compose`](Self::compose)
    /// leaves it out for the same reason.
    pub fn prepare_page_count(&self, appendix: Option<&[u8]>) -> PagePlan {
        let appendix_pages = appendix.map_or(0, count_pages);
        let plan = PagePlan { fixed_pages: self.config.fixed_pages, appendix_pages };
        log::debug!(
            "Page plan: {} fixed + {} appended = {}",
            plan.fixed_pages,
            plan.appendix_pages,
            plan.total_pages()
        );
        plan
    }

    /// Renders one overlay per fixed page of `plan`.
    pub fn render_overlay(&self, values: &DynamicValueSet, plan: &PagePlan) -> Result<Vec<Vec<u8>>, OfferError> {
        let total = plan.total_pages();
        (1..=plan.fixed_pages)
            .map(|page| {
                let descriptor = load_page_descriptor(self.provider.as_ref(), &self.config.naming, page);
                Ok(self.renderer.render(page, &descriptor, values, total)?)
            })
            .collect()
    }

    /// Stacks each overlay on its background and appends the appendix.
    pub fn compose(&self, overlays: &[Vec<u8>], appendix: Option<&[u8]>) -> Result<Vec<u8>, OfferError> {
        let backgrounds = BackgroundSet::load(self.provider.as_ref(), &self.config.naming, overlays.len());
        log::debug!(
            "Found backgrounds for {} of {} pages (underlay: {})",
            backgrounds.available(),
            overlays.len(),
            backgrounds.underlay().is_some()
        );
        Ok(compose(overlays, &backgrounds, appendix, self.config.underlay_scale)?)
    }

    pub fn generate(&self, input: &OfferInput, appendix: Option<&[u8]>) -> Result<Vec<u8>, OfferError> {
        let values = self.resolve(input);
        let plan = self.prepare_page_count(appendix);
        let overlays = self.render_overlay(&values, &plan)?;
        let document = self.compose(&overlays, appendix)?;
        log::info!(
            "Generated offer with {} pages from '{}' ({} values populated)",
            plan.total_pages(),
            self.provider.name(),
            values.populated()
        );
        Ok(document)
    }

    pub fn generate_to_file<P: AsRef<Path>>(
        &self,
        input: &OfferInput,
        appendix: Option<&[u8]>,
        path: P,
    ) -> Result<(), OfferError> {
        let bytes = self.generate(input, appendix)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

/// A builder for [`OfferGenerator`].
#[derive(Debug, Default)]
pub struct OfferGeneratorBuilder {
    provider: Option<Arc<dyn ResourceProvider>>,
    catalog: Option<Arc<dyn ProductCatalog>>,
    config: OfferConfig,
    offer_date: Option<NaiveDate>,
}

impl OfferGeneratorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads templates from a directory laid out as `coords/` and `bg/`.
    pub fn with_template_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.provider = Some(Arc::new(FilesystemResourceProvider::new(path)));
        self
    }

    pub fn with_resource_provider(mut self, provider: Arc<dyn ResourceProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Without a catalog, component details come from the input alone.
    pub fn with_catalog(mut self, catalog: Arc<dyn ProductCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_config(mut self, config: OfferConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, OfferError> {
        self.config = OfferConfig::from_file(path)?;
        Ok(self)
    }

    pub fn with_offer_date(mut self, date: NaiveDate) -> Self {
        self.offer_date = Some(date);
        self
    }

    pub fn build(self) -> Result<OfferGenerator, OfferError> {
        let provider = self.provider.ok_or_else(|| {
            OfferError::Config(
                "No template source has been configured. Use `with_template_dir` or `with_resource_provider`."
                    .to_string(),
            )
        })?;
        self.config.validate()?;
        let catalog = self.catalog.unwrap_or_else(|| Arc::new(InMemoryCatalog::new()));
        let renderer = OverlayRenderer::new(self.config.layout.clone());

        Ok(OfferGenerator { provider, catalog, config: self.config, offer_date: self.offer_date, renderer })
    }
}
