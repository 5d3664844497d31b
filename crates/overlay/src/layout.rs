use offerpress_types::{Color, Rect, Size};
use serde::{Deserialize, Serialize};

/// Placement and styling of everything the overlay draws besides the
/// descriptor texts. The defaults reproduce the standard offer templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayLayout {
    pub page_size: Size,
    /// 1-based index of the page carrying the KPI donuts.
    pub kpi_page: usize,
    /// 1-based index of the page carrying the product images.
    pub components_page: usize,
    pub logo: LogoLayout,
    pub accent: AccentTriangle,
    pub donuts: DonutLayout,
    pub product_images: ProductImageLayout,
    pub page_label: PageLabel,
}

impl Default for OverlayLayout {
    fn default() -> Self {
        Self {
            page_size: Size::A4,
            kpi_page: 1,
            components_page: 4,
            logo: LogoLayout::default(),
            accent: AccentTriangle::default(),
            donuts: DonutLayout::default(),
            product_images: ProductImageLayout::default(),
            page_label: PageLabel::default(),
        }
    }
}

/// A box measured from the top-left page corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TopLeftBox {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl TopLeftBox {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// The same box in PDF user space.
    pub fn to_rect(&self, page_height: f32) -> Rect {
        Rect::new(self.left, page_height - self.top - self.height, self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoLayout {
    /// Painted before the logo to hide artwork baked into the background.
    pub mask: TopLeftBox,
    pub mask_color: Color,
    /// The logo is fitted into this box, centered, aspect ratio preserved.
    pub target: TopLeftBox,
}

impl Default for LogoLayout {
    fn default() -> Self {
        Self {
            mask: TopLeftBox::new(15.0, 15.0, 140.0, 60.0),
            mask_color: Color::WHITE,
            target: TopLeftBox::new(20.0, 20.0, 120.0, 50.0),
        }
    }
}

/// Right-angled triangle in the top-right corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccentTriangle {
    pub size: f32,
    pub color: Color,
}

impl Default for AccentTriangle {
    fn default() -> Self {
        Self { size: 36.0, color: Color::from_rgb_int(0x1B3670) }
    }
}

impl AccentTriangle {
    pub fn corners(&self, page: Size) -> [(f32, f32); 3] {
        [
            (page.width - self.size, page.height),
            (page.width, page.height),
            (page.width, page.height - self.size),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DonutLayout {
    /// Shared vertical center of both donuts, from the page bottom.
    pub center_y: f32,
    pub autarky_center_x: f32,
    pub self_consumption_center_x: f32,
    pub outer_radius: f32,
    pub inner_radius: f32,
    pub track_color: Color,
    pub fill_color: Color,
    pub hole_color: Color,
    pub label_size: f32,
    /// Distance from the center down to the label baseline.
    pub label_drop: f32,
}

impl Default for DonutLayout {
    fn default() -> Self {
        Self {
            center_y: 440.0,
            autarky_center_x: 95.0,
            self_consumption_center_x: 210.0,
            outer_radius: 40.0,
            inner_radius: 26.0,
            track_color: Color::new(217, 224, 230),
            fill_color: Color::new(18, 87, 153),
            hole_color: Color::WHITE,
            label_size: 12.0,
            label_drop: 6.0,
        }
    }
}

/// Slots for the module, inverter and storage images, in that order. Each
/// image is scaled into the slot and anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductImageLayout {
    pub left: f32,
    pub tops: [f32; 3],
    pub width: f32,
    pub height: f32,
}

impl Default for ProductImageLayout {
    fn default() -> Self {
        Self { left: 50.0, tops: [250.0, 440.0, 630.0], width: 140.0, height: 90.0 }
    }
}

impl ProductImageLayout {
    pub fn slots(&self) -> [TopLeftBox; 3] {
        self.tops.map(|top| TopLeftBox::new(self.left, top, self.width, self.height))
    }
}

/// The page-number token printed into the template footers, and its
/// replacement text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLabel {
    /// `{page}` and `{total}` are substituted.
    pub template: String,
    /// The token box must end at or below this y (top-left origin).
    pub min_bottom: f32,
    pub min_left: f32,
    pub token_color: u32,
}

impl Default for PageLabel {
    fn default() -> Self {
        Self {
            template: "Page {page} of {total}".to_string(),
            min_bottom: 780.0,
            min_left: 520.0,
            token_color: 0xFFFFFF,
        }
    }
}

impl PageLabel {
    pub fn render(&self, page: usize, total: usize) -> String {
        self.template
            .replace("{page}", &page.to_string())
            .replace("{total}", &total.to_string())
    }
}
