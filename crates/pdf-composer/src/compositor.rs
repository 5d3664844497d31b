use crate::copier::ObjectCopier;
use crate::error::ComposerError;
use crate::form::{ImportedPage, PageBox, import_first_page};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

/// Scale applied to the first-page underlay.
pub const DEFAULT_UNDERLAY_SCALE: f32 = 0.3;

const IDENTITY: [f32; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// Assembles the output document one page at a time.
///
/// Stacked pages are built from Form XObjects: every layer's first page is
/// imported as a form and painted, in order, onto a fresh page whose media
/// box is the base layer's.
pub struct PageCompositor {
    doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    underlay_scale: f32,
}

impl Default for PageCompositor {
    fn default() -> Self {
        Self::new()
    }
}

impl PageCompositor {
    pub fn new() -> Self {
        Self::with_underlay_scale(DEFAULT_UNDERLAY_SCALE)
    }

    pub fn with_underlay_scale(underlay_scale: f32) -> Self {
        let underlay_scale = if underlay_scale.is_finite() && underlay_scale > 0.0 {
            underlay_scale
        } else {
            log::warn!("Invalid underlay scale {}; using {}", underlay_scale, DEFAULT_UNDERLAY_SCALE);
            DEFAULT_UNDERLAY_SCALE
        };
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        Self { doc, pages_id, page_ids: Vec::new(), underlay_scale }
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Adds one page stacking `background`, the scaled and centered
    /// `underlay`, and `overlay`, bottom to top. The page takes the
    /// background's media box, or the overlay's when there is no background.
    ///
    /// Background and underlay are best effort: a layer that cannot be
    /// imported is left out. The overlay is required.
    pub fn add_stacked_page(
        &mut self,
        overlay: &Document,
        background: Option<&Document>,
        underlay: Option<&Document>,
    ) -> Result<ObjectId, ComposerError> {
        let background = self.import_optional(background, "Background");
        let underlay = self.import_optional(underlay, "Underlay");
        let overlay = import_first_page(&mut self.doc, overlay)?
            .ok_or_else(|| ComposerError::Other("Overlay document has no pages".to_string()))?;

        let page_box = background.map_or(overlay.media_box, |bg| bg.media_box);
        let mut layers = Vec::with_capacity(3);
        if let Some(bg) = background {
            layers.push((bg.form_id, IDENTITY));
        }
        if let Some(under) = underlay {
            layers.push((under.form_id, centered(under.media_box, page_box, self.underlay_scale)));
        }
        layers.push((overlay.form_id, IDENTITY));

        let mut operations = Vec::with_capacity(layers.len() * 4);
        let mut xobjects = Dictionary::new();
        for (index, (form_id, matrix)) in layers.into_iter().enumerate() {
            let name = format!("Fx{}", index + 1);
            operations.push(Operation::new("q", vec![]));
            operations.push(Operation::new("cm", matrix.iter().map(|v| (*v).into()).collect()));
            operations.push(Operation::new("Do", vec![Object::Name(name.as_bytes().to_vec())]));
            operations.push(Operation::new("Q", vec![]));
            xobjects.set(name, form_id);
        }
        let content = Content { operations }.encode()?;
        let content_id = self.doc.add_object(Stream::new(dictionary! {}, content));

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => page_box.to_object(),
            "Contents" => content_id,
            "Resources" => dictionary! { "XObject" => xobjects },
        });
        self.page_ids.push(page_id);
        Ok(page_id)
    }

    /// Appends every page of `source` unchanged. Returns the number of pages
    /// added.
    pub fn append_document(&mut self, source: &Document) -> Result<usize, ComposerError> {
        let source_pages: Vec<ObjectId> = source.get_pages().into_values().collect();
        if source_pages.is_empty() {
            return Ok(0);
        }

        let copies = ObjectCopier::new(source, &mut self.doc).copy_pages(&source_pages)?;
        let pages_id = self.pages_id;
        for page_id in &copies {
            if let Ok(page) = self.doc.get_object_mut(*page_id).and_then(Object::as_dict_mut) {
                page.set("Parent", pages_id);
            }
        }
        self.page_ids.extend(&copies);
        Ok(copies.len())
    }

    /// Writes the page tree and serializes the document.
    pub fn finish(mut self) -> Result<Vec<u8>, ComposerError> {
        let kids: Vec<Object> = self.page_ids.iter().map(|id| (*id).into()).collect();
        let count = kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }
            .into(),
        );
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        self.doc.save_to(&mut bytes)?;
        Ok(bytes)
    }

    fn import_optional(&mut self, source: Option<&Document>, layer: &str) -> Option<ImportedPage> {
        match import_first_page(&mut self.doc, source?) {
            Ok(imported) => imported,
            Err(err) => {
                log::warn!("{} layer skipped: {}", layer, err);
                None
            }
        }
    }
}

/// Matrix scaling `source` by `scale` and centering it on `target`.
fn centered(source: PageBox, target: PageBox, scale: f32) -> [f32; 6] {
    let tx = target.x0 + (target.width() - scale * source.width()) / 2.0 - scale * source.x0;
    let ty = target.y0 + (target.height() - scale * source.height()) / 2.0 - scale * source.y0;
    [scale, 0.0, 0.0, scale, tx, ty]
}
