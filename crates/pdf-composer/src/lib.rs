//! Page composition for offer documents.
//!
//! - Stacking a rendered overlay onto its background template, with an
//!   optional scaled underlay on the first page
//! - Appending externally supplied pages unchanged
//! - Deep object copying with cycle detection

mod background;
mod compositor;
mod copier;
mod error;
mod form;
#[cfg(test)]
mod testing;

pub use background::BackgroundSet;
pub use compositor::{DEFAULT_UNDERLAY_SCALE, PageCompositor};
pub use error::ComposerError;
pub use form::{ImportedPage, PageBox, import_first_page, import_page};

use lopdf::Document;

/// Composes the final document: one stacked page per overlay, then the
/// appendix pages.
///
/// `overlays[i]` is page `i + 1` and gets that page's background; the
/// underlay is only placed on page 1. An appendix that cannot be parsed is
/// left out, matching the zero page count [`count_pages`] reports for it.
pub fn compose(
    overlays: &[Vec<u8>],
    backgrounds: &BackgroundSet,
    appendix: Option<&[u8]>,
    underlay_scale: f32,
) -> Result<Vec<u8>, ComposerError> {
    let mut compositor = PageCompositor::with_underlay_scale(underlay_scale);

    for (index, overlay_bytes) in overlays.iter().enumerate() {
        let page = index + 1;
        let overlay = Document::load_mem(overlay_bytes)?;
        let underlay = if page == 1 { backgrounds.underlay() } else { None };
        compositor.add_stacked_page(&overlay, backgrounds.page(page), underlay)?;
    }

    let appended = match appendix.map(Document::load_mem) {
        Some(Ok(doc)) => compositor.append_document(&doc)?,
        Some(Err(err)) => {
            log::warn!("Appendix is not a readable PDF and was left out: {}", err);
            0
        }
        None => 0,
    };

    log::info!(
        "Composed {} pages ({} fixed, {} appended)",
        compositor.page_count(),
        overlays.len(),
        appended
    );
    compositor.finish()
}

/// Number of pages in a PDF, or 0 when it cannot be parsed.
pub fn count_pages(bytes: &[u8]) -> usize {
    match Document::load_mem(bytes) {
        Ok(doc) => doc.get_pages().len(),
        Err(err) => {
            log::debug!("Unreadable PDF counted as empty: {}", err);
            0
        }
    }
}
