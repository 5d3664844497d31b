//! Fixture documents shared by the unit tests.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};

/// A document with one page per entry of `texts`, each showing its text.
pub(crate) fn document(width: f32, height: f32, texts: &[&str]) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut page_ids = vec![];
    for text in texts {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![100.into(), 700.into()]),
                Operation::new(
                    "Tj",
                    vec![Object::String(text.as_bytes().to_vec(), StringFormat::Literal)],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id.into());
    }

    // Media box and resources live on the page tree so copies have to
    // materialize them.
    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => texts.len() as i64,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
            "Resources" => resources_id,
        }
        .into(),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

pub(crate) fn single_page_bytes(width: f32, height: f32, text: &str) -> Vec<u8> {
    let mut doc = document(width, height, &[text]);
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// Concatenated `Tj` strings of `content`.
pub(crate) fn shown_text(content: &[u8]) -> String {
    Content::decode(content)
        .unwrap()
        .operations
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| match op.operands.first() {
            Some(Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        })
        .collect()
}

/// Text shown on the first page of `doc`.
pub(crate) fn page_text(doc: &Document) -> String {
    let page_id = *doc.get_pages().values().next().unwrap();
    shown_text(&doc.get_page_content(page_id).unwrap())
}

/// Text shown by each Form XObject a page paints, in painting order.
pub(crate) fn layer_texts(doc: &Document, page_id: ObjectId) -> Vec<String> {
    let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
    let xobjects = page
        .get(b"Resources").unwrap().as_dict().unwrap()
        .get(b"XObject").unwrap().as_dict().unwrap();
    Content::decode(&doc.get_page_content(page_id).unwrap())
        .unwrap()
        .operations
        .iter()
        .filter(|op| op.operator == "Do")
        .map(|op| {
            let name = op.operands[0].as_name().unwrap();
            let form_id = xobjects.get(name).unwrap().as_reference().unwrap();
            let form = doc.get_object(form_id).unwrap().as_stream().unwrap();
            shown_text(&form.content)
        })
        .collect()
}
