use lopdf::Document;
use offerpress_resource::TemplateNaming;
use offerpress_traits::{ResourceError, ResourceProvider};

/// The background templates for one offer: one optional document per fixed
/// page plus the optional first-page underlay.
#[derive(Debug, Default)]
pub struct BackgroundSet {
    pages: Vec<Option<Document>>,
    underlay: Option<Document>,
}

impl BackgroundSet {
    pub fn new(pages: Vec<Option<Document>>, underlay: Option<Document>) -> Self {
        Self { pages, underlay }
    }

    /// Loads the backgrounds for pages `1..=page_count`. A page whose primary
    /// template is missing or unreadable falls back to the secondary name; a
    /// page with neither is left without background.
    pub fn load(provider: &dyn ResourceProvider, naming: &TemplateNaming, page_count: usize) -> Self {
        let pages = (1..=page_count)
            .map(|page| {
                let found = naming
                    .background_candidates(page)
                    .iter()
                    .find_map(|name| match load_pdf(provider, name) {
                        Ok(doc) => Some(doc),
                        Err(reason) => {
                            log::debug!("Background '{}' for page {} skipped: {}", name, page, reason);
                            None
                        }
                    });
                if found.is_none() {
                    log::warn!("No background template for page {}; using the overlay alone", page);
                }
                found
            })
            .collect();

        let underlay = naming.underlay().and_then(|name| match load_pdf(provider, name) {
            Ok(doc) => Some(doc),
            Err(reason) => {
                log::debug!("Underlay '{}' skipped: {}", name, reason);
                None
            }
        });

        Self { pages, underlay }
    }

    /// The background of the 1-based `page`.
    pub fn page(&self, page: usize) -> Option<&Document> {
        page.checked_sub(1)
            .and_then(|index| self.pages.get(index))
            .and_then(Option::as_ref)
    }

    pub fn underlay(&self) -> Option<&Document> {
        self.underlay.as_ref()
    }

    /// Number of pages with a usable background.
    pub fn available(&self) -> usize {
        self.pages.iter().flatten().count()
    }
}

fn load_pdf(provider: &dyn ResourceProvider, name: &str) -> Result<Document, String> {
    let bytes = provider.load(name).map_err(|err| match err {
        ResourceError::NotFound(_) => "not found".to_string(),
        other => other.to_string(),
    })?;
    let doc = Document::load_mem(&bytes).map_err(|err| err.to_string())?;
    if doc.get_pages().is_empty() {
        return Err("document has no pages".to_string());
    }
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{page_text, single_page_bytes};
    use offerpress_traits::InMemoryResourceProvider;

    #[test]
    fn primary_name_wins_over_secondary() {
        let provider = InMemoryResourceProvider::new()
            .with_resource("bg/nt_nt_01.pdf", single_page_bytes(595.0, 842.0, "primary"))
            .with_resource("bg/nt_01.pdf", single_page_bytes(595.0, 842.0, "secondary"));
        let set = BackgroundSet::load(&provider, &TemplateNaming::default(), 1);
        assert_eq!(page_text(set.page(1).unwrap()), "primary");
    }

    #[test]
    fn unreadable_primary_falls_back_to_secondary() {
        let provider = InMemoryResourceProvider::new()
            .with_resource("bg/nt_nt_02.pdf", b"not a pdf".to_vec())
            .with_resource("bg/nt_02.pdf", single_page_bytes(595.0, 842.0, "secondary"));
        let set = BackgroundSet::load(&provider, &TemplateNaming::default(), 2);
        assert!(set.page(1).is_none());
        assert_eq!(page_text(set.page(2).unwrap()), "secondary");
        assert_eq!(set.available(), 1);
    }

    #[test]
    fn underlay_is_optional() {
        let provider = InMemoryResourceProvider::new();
        let set = BackgroundSet::load(&provider, &TemplateNaming::default(), 6);
        assert!(set.underlay().is_none());
        assert_eq!(set.available(), 0);

        let provider = InMemoryResourceProvider::new()
            .with_resource("bg/haus.pdf", single_page_bytes(400.0, 300.0, "house"));
        let set = BackgroundSet::load(&provider, &TemplateNaming::default(), 6);
        assert!(set.underlay().is_some());
    }

    #[test]
    fn page_zero_has_no_background() {
        let set = BackgroundSet::new(vec![Some(Document::with_version("1.7"))], None);
        assert!(set.page(0).is_none());
        assert!(set.page(1).is_some());
        assert!(set.page(2).is_none());
    }
}
