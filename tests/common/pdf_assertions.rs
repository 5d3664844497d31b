use lopdf::content::Content;
use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

fn page_id(doc: &LopdfDocument, page: u32) -> ObjectId {
    *doc.get_pages().get(&page).unwrap_or_else(|| panic!("no page {}", page))
}

fn shown_text(content: &[u8]) -> String {
    let mut text = String::new();
    for op in Content::decode(content).unwrap().operations {
        if op.operator == "Tj" {
            if let Some(Object::String(bytes, _)) = op.operands.first() {
                text.push_str(&String::from_utf8_lossy(bytes));
                text.push('\n');
            }
        }
    }
    text
}

fn xobjects(doc: &LopdfDocument, page: ObjectId) -> Option<&Dictionary> {
    let page = doc.get_object(page).ok()?.as_dict().ok()?;
    let resources = match page.get(b"Resources").ok()? {
        Object::Reference(id) => doc.get_object(*id).ok()?.as_dict().ok()?,
        other => other.as_dict().ok()?,
    };
    resources.get(b"XObject").ok()?.as_dict().ok()
}

/// Text shown by each Form XObject a page paints, in painting order.
pub fn layer_texts(doc: &LopdfDocument, page: u32) -> Vec<String> {
    let id = page_id(doc, page);
    let Some(xobjects) = xobjects(doc, id) else {
        return Vec::new();
    };
    Content::decode(&doc.get_page_content(id).unwrap())
        .unwrap()
        .operations
        .iter()
        .filter(|op| op.operator == "Do")
        .filter_map(|op| {
            let name = op.operands.first()?.as_name().ok()?;
            let form_id = xobjects.get(name).ok()?.as_reference().ok()?;
            let form = doc.get_object(form_id).ok()?.as_stream().ok()?;
            Some(shown_text(&form.content))
        })
        .collect()
}

pub fn page_text(doc: &LopdfDocument, page: u32) -> String {
    let direct = shown_text(&doc.get_page_content(page_id(doc, page)).unwrap());
    direct + &layer_texts(doc, page).concat()
}

/// Asserts that a page shows `text` somewhere.
#[macro_export]
macro_rules! assert_page_contains_text {
    ($pdf:expr, $page:expr, $text:expr) => {
        let page_text = $pdf.page_text($page);
        assert!(
            page_text.contains($text),
            "Page {} does not contain {:?}. Text was:\n{}",
            $page,
            $text,
            page_text
        );
    };
}
