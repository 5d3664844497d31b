pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use offerpress::{OfferError, OfferGenerator, OfferInput};
use std::path::Path;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text painted by each stacked layer of a page, bottom to top.
    pub fn layers(&self, page: u32) -> Vec<String> {
        pdf_assertions::layer_texts(&self.doc, page)
    }

    /// All text on a page, whether drawn directly or through its layers.
    pub fn page_text(&self, page: u32) -> String {
        pdf_assertions::page_text(&self.doc, page)
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Generates an offer from a template directory with default settings.
pub fn generate_offer(
    templates: &Path,
    input: &OfferInput,
    appendix: Option<&[u8]>,
) -> Result<GeneratedPdf, OfferError> {
    let generator = OfferGenerator::builder().with_template_dir(templates).build()?;
    let bytes = generator.generate(input, appendix)?;
    GeneratedPdf::from_bytes(bytes).map_err(|e| OfferError::Config(e.to_string()))
}
