use offerpress_types::BoundingBox;

pub const DEFAULT_FONT: &str = "Helvetica";
pub const DEFAULT_FONT_SIZE: f32 = 10.0;
pub const DEFAULT_COLOR: u32 = 0x000000;

/// One placeholder slot on a page.
///
/// `sample_text` is the literal text printed in the template; it doubles as
/// the lookup key into the placeholder mapping and as the fallback text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub sample_text: String,
    pub bbox: BoundingBox,
    pub font_name: String,
    /// Always finite and greater than zero.
    pub font_size: f32,
    /// Packed `0xRRGGBB`, never above `0xFFFFFF`.
    pub color: u32,
}

/// All text elements of one fixed page, in descriptor order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageDescriptor {
    /// 1-based.
    pub page_index: usize,
    pub elements: Vec<TextElement>,
}

impl PageDescriptor {
    pub fn new(page_index: usize, elements: Vec<TextElement>) -> Self {
        Self { page_index, elements }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
