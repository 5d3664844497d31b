//! Coordinate descriptors: where each text element sits on a fixed page.
//!
//! A descriptor is a line-oriented text resource made of entries separated
//! by `---` lines:
//!
//! ```text
//! Text: 4,00 kWp
//! Position: (413.52, 231.04, 461.08, 244.91)
//! Font: Helvetica-Bold
//! FontSize: 11,0
//! Color: 0x1B3670
//! ----------------------------------------
//! ```
//!
//! Malformed fields fall back to defaults; an entry without a usable
//! `Position` is dropped. Parsing never fails.

mod element;
mod parser;

pub use element::{PageDescriptor, TextElement, DEFAULT_COLOR, DEFAULT_FONT, DEFAULT_FONT_SIZE};
pub use parser::parse;

use offerpress_resource::TemplateNaming;
use offerpress_traits::{ResourceError, ResourceProvider};

/// Loads and parses the descriptor for one fixed page.
///
/// A missing or unreadable resource yields an empty descriptor: the page
/// is still rendered, just without text.
pub fn load_page_descriptor(
    provider: &dyn ResourceProvider,
    naming: &TemplateNaming,
    page_index: usize,
) -> PageDescriptor {
    let name = naming.descriptor_for(page_index);
    let elements = match provider.load_text(&name) {
        Ok(source) => parse(&source),
        Err(ResourceError::NotFound(_)) => {
            log::debug!("No coordinate descriptor '{}' for page {}", name, page_index);
            Vec::new()
        }
        Err(e) => {
            log::warn!("Could not read coordinate descriptor '{}': {}", name, e);
            Vec::new()
        }
    };
    PageDescriptor { page_index, elements }
}
