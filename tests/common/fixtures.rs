//! Template directories and PDFs for the integration tests.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const A4: (f32, f32) = (595.0, 842.0);

/// A document with one page per entry of `texts`, each showing its text.
pub fn pdf_with_pages(width: f32, height: f32, texts: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids = vec![];
    for text in texts {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
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
            "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => texts.len() as i64,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
        }
        .into(),
    );
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// One descriptor entry in the template format.
pub fn descriptor_entry(text: &str, bbox: (f32, f32, f32, f32), font: &str, size: f32, color: u32) -> String {
    format!(
        "Text: {}\nPosition: ({:.2}, {:.2}, {:.2}, {:.2})\nFont: {}\nFontSize: {}\nColor: 0x{:06X}\n{}\n",
        text,
        bbox.0,
        bbox.1,
        bbox.2,
        bbox.3,
        font,
        size.to_string().replace('.', ","),
        color,
        "-".repeat(40)
    )
}

/// The white footer digit the templates print in the bottom-right corner.
pub fn page_token_entry(page: usize) -> String {
    descriptor_entry(&page.to_string(), (540.0, 790.0, 560.0, 800.0), "Helvetica", 8.0, 0xFFFFFF)
}

/// A template directory on disk, laid out as `coords/` and `bg/`.
pub struct TemplateDir {
    dir: TempDir,
}

impl TemplateDir {
    /// Six descriptors, each carrying the page token.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("coords")).unwrap();
        fs::create_dir_all(dir.path().join("bg")).unwrap();
        let templates = Self { dir };
        for page in 1..=6 {
            templates.descriptor(page, &page_token_entry(page));
        }
        templates
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn descriptor(&self, page: usize, source: &str) -> &Self {
        fs::write(self.path().join(format!("coords/seite{}.yml", page)), source).unwrap();
        self
    }

    /// Writes a one-page A4 background under `bg/`.
    pub fn background(&self, name: &str, text: &str) -> &Self {
        self.raw_background(name, &pdf_with_pages(A4.0, A4.1, &[text]))
    }

    pub fn raw_background(&self, name: &str, bytes: &[u8]) -> &Self {
        fs::write(self.path().join("bg").join(name), bytes).unwrap();
        self
    }
}
