//! offerpress composes multi-page PV offer documents.
//!
//! Each fixed page of an offer is a static background template with a
//! dynamic overlay on top. The overlay's texts are placed by a per-page
//! coordinate descriptor whose sample texts are mapped onto resolved
//! business values; graphics (logo, KPI donuts, product images) follow the
//! configured layout. Extra pages such as datasheets can be appended, and
//! every footer reads "Page i of N" over the final page count.
//!
//! ```no_run
//! use offerpress::{OfferGenerator, OfferInput};
//!
//! # fn main() -> Result<(), offerpress::OfferError> {
//! let generator = OfferGenerator::builder()
//!     .with_template_dir("templates")
//!     .build()?;
//! let input: OfferInput = serde_json::from_str(&std::fs::read_to_string("offer.json")?)?;
//! generator.generate_to_file(&input, None, "offer.pdf")?;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod generator;

pub use config::OfferConfig;
pub use error::OfferError;
pub use generator::{OfferGenerator, OfferGeneratorBuilder, PagePlan};

pub use offerpress_descriptor::{PageDescriptor, TextElement};
pub use offerpress_overlay::{OverlayLayout, OverlayRenderer};
pub use offerpress_pdf_composer::{BackgroundSet, PageCompositor};
pub use offerpress_placeholders::{DynamicValueSet, OfferInput, PlaceholderKey, PlaceholderResolver, ResolverOptions};
pub use offerpress_resource::{FilesystemResourceProvider, TemplateNaming};
pub use offerpress_traits::{InMemoryCatalog, InMemoryResourceProvider, ProductCatalog, ResourceProvider};
pub use offerpress_types::{Color, Size};
