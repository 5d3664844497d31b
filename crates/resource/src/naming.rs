use serde::{Deserialize, Serialize};

/// Resource name patterns for the per-page template assets.
///
/// Patterns may contain `{page}` (plain page number) or `{page:02}`
/// (zero-padded to two digits).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateNaming {
    pub descriptor: String,
    pub primary_background: String,
    pub secondary_background: String,
    /// First-page underlay, drawn scaled down between background and overlay.
    pub underlay: Option<String>,
}

impl Default for TemplateNaming {
    fn default() -> Self {
        Self {
            descriptor: "coords/seite{page}.yml".to_string(),
            primary_background: "bg/nt_nt_{page:02}.pdf".to_string(),
            secondary_background: "bg/nt_{page:02}.pdf".to_string(),
            underlay: Some("bg/haus.pdf".to_string()),
        }
    }
}

impl TemplateNaming {
    pub fn descriptor_for(&self, page: usize) -> String {
        expand(&self.descriptor, page)
    }

    /// Candidate background names for a page, most preferred first.
    pub fn background_candidates(&self, page: usize) -> [String; 2] {
        [
            expand(&self.primary_background, page),
            expand(&self.secondary_background, page),
        ]
    }

    pub fn underlay(&self) -> Option<&str> {
        self.underlay.as_deref().filter(|name| !name.is_empty())
    }
}

fn expand(pattern: &str, page: usize) -> String {
    pattern
        .replace("{page:02}", &format!("{:02}", page))
        .replace("{page}", &page.to_string())
}
