use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashMap;

/// Page attributes a page may inherit from its ancestors in the page tree.
pub(crate) const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Copies objects from one document into another, assigning fresh IDs.
///
/// Every source object is copied at most once; `id_map` remembers the new
/// ID so shared resources stay shared and reference cycles terminate.
pub(crate) struct ObjectCopier<'a> {
    source_doc: &'a Document,
    target_doc: &'a mut Document,
    id_map: HashMap<ObjectId, ObjectId>,
}

impl<'a> ObjectCopier<'a> {
    pub(crate) fn new(source_doc: &'a Document, target_doc: &'a mut Document) -> Self {
        Self { source_doc, target_doc, id_map: HashMap::new() }
    }

    /// Deep copies an object and everything it references.
    pub(crate) fn copy_object(&mut self, source_id: ObjectId) -> Result<ObjectId, lopdf::Error> {
        if let Some(target_id) = self.id_map.get(&source_id) {
            return Ok(*target_id);
        }

        // Reserve the new ID before recursing so that cycles
        // (Page -> Annots -> Page) resolve to the reserved slot.
        let new_id = self.target_doc.add_object(Object::Null);
        self.id_map.insert(source_id, new_id);

        let obj = self.source_doc.get_object(source_id)?.clone();
        let new_obj = self.remap_references(obj)?;
        self.target_doc.objects.insert(new_id, new_obj);
        Ok(new_id)
    }

    /// Copies pages without their page-tree parents. Inherited attributes
    /// are written onto each copy, and references between the copied pages
    /// (link destinations, annotation owners) point at the copies.
    pub(crate) fn copy_pages(&mut self, page_ids: &[ObjectId]) -> Result<Vec<ObjectId>, lopdf::Error> {
        let new_ids: Vec<ObjectId> = page_ids
            .iter()
            .map(|source_id| {
                let new_id = self.target_doc.add_object(Object::Null);
                self.id_map.insert(*source_id, new_id);
                new_id
            })
            .collect();

        for (source_id, new_id) in page_ids.iter().zip(&new_ids) {
            let mut page = self.source_doc.get_object(*source_id)?.as_dict()?.clone();
            for key in INHERITABLE {
                if !page.has(key) {
                    if let Some(value) = inherited_attribute(self.source_doc, *source_id, key) {
                        page.set(key, value);
                    }
                }
            }
            page.remove(b"Parent");
            let new_page = self.remap_references(Object::Dictionary(page))?;
            self.target_doc.objects.insert(*new_id, new_page);
        }
        Ok(new_ids)
    }

    /// Replaces every `Object::Reference` inside `obj` with a reference to
    /// the copied object.
    pub(crate) fn remap_references(&mut self, obj: Object) -> Result<Object, lopdf::Error> {
        match obj {
            Object::Reference(id) => {
                let new_id = self.copy_object(id)?;
                Ok(Object::Reference(new_id))
            }
            Object::Array(arr) => {
                let new_arr = arr
                    .into_iter()
                    .map(|o| self.remap_references(o))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Object::Array(new_arr))
            }
            Object::Dictionary(dict) => Ok(Object::Dictionary(self.remap_dictionary(dict)?)),
            Object::Stream(mut stream) => {
                stream.dict = self.remap_dictionary(std::mem::take(&mut stream.dict))?;
                Ok(Object::Stream(stream))
            }
            _ => Ok(obj),
        }
    }

    fn remap_dictionary(&mut self, mut dict: Dictionary) -> Result<Dictionary, lopdf::Error> {
        for (_, value) in dict.iter_mut() {
            *value = self.remap_references(value.clone())?;
        }
        Ok(dict)
    }
}

/// Looks up `key` on the page or the nearest ancestor that defines it.
pub(crate) fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut node = doc.get_object(page_id).ok()?.as_dict().ok()?;
    // Bounded walk; malformed files can contain parent cycles.
    for _ in 0..64 {
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        let parent_id = node.get(b"Parent").ok()?.as_reference().ok()?;
        node = doc.get_object(parent_id).ok()?.as_dict().ok()?;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    #[test]
    fn shared_objects_are_copied_once() {
        let mut source = Document::with_version("1.7");
        let font_id = source.add_object(dictionary! { "Type" => "Font", "BaseFont" => "Helvetica" });
        let a = source.add_object(dictionary! { "Font" => font_id });
        let b = source.add_object(dictionary! { "Font" => font_id });

        let mut target = Document::with_version("1.7");
        let mut copier = ObjectCopier::new(&source, &mut target);
        let new_a = copier.copy_object(a).unwrap();
        let new_b = copier.copy_object(b).unwrap();

        let font_a = target.get_object(new_a).unwrap().as_dict().unwrap().get(b"Font").unwrap().as_reference().unwrap();
        let font_b = target.get_object(new_b).unwrap().as_dict().unwrap().get(b"Font").unwrap().as_reference().unwrap();
        assert_eq!(font_a, font_b);
        assert_eq!(target.objects.len(), 3);
    }

    #[test]
    fn cycles_terminate() {
        let mut source = Document::with_version("1.7");
        let first = source.new_object_id();
        let second = source.add_object(dictionary! { "Next" => first });
        source.objects.insert(first, dictionary! { "Next" => second }.into());

        let mut target = Document::with_version("1.7");
        let new_first = ObjectCopier::new(&source, &mut target).copy_object(first).unwrap();
        assert_eq!(target.objects.len(), 2);
        let next = target.get_object(new_first).unwrap().as_dict().unwrap().get(b"Next").unwrap().as_reference().unwrap();
        let back = target.get_object(next).unwrap().as_dict().unwrap().get(b"Next").unwrap().as_reference().unwrap();
        assert_eq!(back, new_first);
    }

    #[test]
    fn copied_pages_materialize_inherited_attributes() {
        let mut source = Document::with_version("1.7");
        let pages_id = source.new_object_id();
        let resources_id = source.add_object(dictionary! { "ProcSet" => vec!["PDF".into()] });
        let page_id = source.add_object(dictionary! { "Type" => "Page", "Parent" => pages_id });
        source.objects.insert(
            pages_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Resources" => resources_id,
            }
            .into(),
        );

        let mut target = Document::with_version("1.7");
        let copies = ObjectCopier::new(&source, &mut target).copy_pages(&[page_id]).unwrap();
        let page = target.get_object(copies[0]).unwrap().as_dict().unwrap();

        assert!(page.get(b"Parent").is_err());
        assert_eq!(page.get(b"MediaBox").unwrap().as_array().unwrap().len(), 4);
        let resources = page.get(b"Resources").unwrap().as_reference().unwrap();
        assert!(target.get_object(resources).is_ok());
        // The page and its resources; the source page tree is left behind.
        assert_eq!(target.objects.len(), 2);
    }
}
