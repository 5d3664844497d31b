use crate::copier::{ObjectCopier, inherited_attribute};
use crate::error::ComposerError;
use lopdf::{Document, Object, ObjectId, Stream, dictionary};

/// Media box of a page as `[x0, y0, x1, y1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl PageBox {
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    pub(crate) fn to_object(self) -> Object {
        vec![self.x0.into(), self.y0.into(), self.x1.into(), self.y1.into()].into()
    }

    fn from_object(doc: &Document, obj: &Object) -> Option<Self> {
        let array = match obj {
            Object::Reference(id) => doc.get_object(*id).ok()?.as_array().ok()?,
            other => other.as_array().ok()?,
        };
        let mut numbers = array.iter().filter_map(number);
        let (a, b, c, d) = (numbers.next()?, numbers.next()?, numbers.next()?, numbers.next()?);
        // Some producers write the corners in the wrong order.
        Some(Self { x0: a.min(c), y0: b.min(d), x1: a.max(c), y1: b.max(d) })
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(v) => Some(*v as f32),
        Object::Real(v) => Some(*v as f32),
        _ => None,
    }
}

/// A source page imported into the target document as a Form XObject.
#[derive(Debug, Clone, Copy)]
pub struct ImportedPage {
    pub form_id: ObjectId,
    pub media_box: PageBox,
}

/// Imports the first page of `source` into `target` as a Form XObject whose
/// bounding box is the page's media box. Returns `None` when the document
/// has no pages.
pub fn import_first_page(target: &mut Document, source: &Document) -> Result<Option<ImportedPage>, ComposerError> {
    let Some(page_id) = source.get_pages().values().next().copied() else {
        return Ok(None);
    };
    import_page(target, source, page_id).map(Some)
}

pub fn import_page(target: &mut Document, source: &Document, page_id: ObjectId) -> Result<ImportedPage, ComposerError> {
    let media_box = inherited_attribute(source, page_id, b"MediaBox")
        .and_then(|obj| PageBox::from_object(source, &obj))
        .ok_or_else(|| ComposerError::Other(format!("Page {:?} has no usable /MediaBox", page_id)))?;
    let content = source.get_page_content(page_id)?;

    let mut copier = ObjectCopier::new(source, target);
    let resources = match inherited_attribute(source, page_id, b"Resources") {
        Some(resources) => copier.remap_references(resources)?,
        None => Object::Dictionary(dictionary! {}),
    };

    let form = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Form",
            "BBox" => media_box.to_object(),
            "Resources" => resources,
        },
        content,
    );
    let form_id = target.add_object(form);
    Ok(ImportedPage { form_id, media_box })
}
