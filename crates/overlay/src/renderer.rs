use crate::canvas::Canvas;
use crate::error::RenderError;
use crate::fonts::StandardFont;
use crate::layout::{OverlayLayout, TopLeftBox};
use crate::raster::{EmbeddedImage, deflate};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};
use offerpress_descriptor::{PageDescriptor, TextElement};
use offerpress_placeholders::{DynamicValueSet, PlaceholderKey, SlotBinding, binding_for_sample};
use offerpress_types::{Color, Rect};
use std::collections::BTreeSet;

const PRODUCT_IMAGE_KEYS: [PlaceholderKey; 3] = [
    PlaceholderKey::ModuleImageB64,
    PlaceholderKey::InverterImageB64,
    PlaceholderKey::StorageImageB64,
];

/// Renders the dynamic layer of one fixed page into a standalone one-page
/// PDF, to be stacked on top of the page's background template.
///
/// Drawing order: logo, accent triangle, KPI donuts, product images, then
/// the descriptor texts. Optional assets that are missing or broken are
/// skipped one by one; only a PDF serialization failure is an error.
#[derive(Debug, Clone, Default)]
pub struct OverlayRenderer {
    layout: OverlayLayout,
}

impl OverlayRenderer {
    pub fn new(layout: OverlayLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &OverlayLayout {
        &self.layout
    }

    pub fn render(
        &self,
        page_index: usize,
        descriptor: &PageDescriptor,
        values: &DynamicValueSet,
        total_pages: usize,
    ) -> Result<Vec<u8>, RenderError> {
        let mut page = PagePainter::new(&self.layout);

        page.logo(values.get(PlaceholderKey::CompanyLogoB64));
        page.accent_triangle();
        if page_index == self.layout.kpi_page {
            page.kpi_donuts(values);
        }
        if page_index == self.layout.components_page {
            page.product_images(values);
        }
        for element in &descriptor.elements {
            page.text_element(page_index, element, values, total_pages);
        }

        log::debug!(
            "Rendered overlay for page {} ({} elements, {} images)",
            page_index,
            descriptor.elements.len(),
            page.images.len()
        );
        page.finish()
    }
}

/// Sweep of a donut wedge in degrees for a percentage, clamped to a full turn.
pub fn donut_sweep_degrees(percent: f32) -> f32 {
    360.0 * percent.clamp(0.0, 100.0) / 100.0
}

/// Reads a percentage back from a formatted value such as `"54 %"` or
/// `"1.234,5"`.
fn parse_percent(formatted: &str) -> Option<f32> {
    let number: String = formatted
        .trim()
        .trim_end_matches('%')
        .trim()
        .chars()
        .filter(|c| *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    number.parse::<f32>().ok().filter(|v| v.is_finite())
}

struct PagePainter<'a> {
    layout: &'a OverlayLayout,
    canvas: Canvas,
    fonts: BTreeSet<StandardFont>,
    images: Vec<(String, EmbeddedImage)>,
}

impl<'a> PagePainter<'a> {
    fn new(layout: &'a OverlayLayout) -> Self {
        Self {
            layout,
            canvas: Canvas::new(),
            fonts: BTreeSet::new(),
            images: Vec::new(),
        }
    }

    fn page_height(&self) -> f32 {
        self.layout.page_size.height
    }

    fn logo(&mut self, encoded: &str) {
        if encoded.is_empty() {
            return;
        }
        let logo = match EmbeddedImage::from_base64(encoded) {
            Ok(logo) => logo,
            Err(e) => {
                log::warn!("Skipping company logo: {}", e);
                return;
            }
        };
        let layout = &self.layout.logo;
        let height = self.page_height();
        let Some(target) = layout.target.to_rect(height).fit_centered(logo.size()) else {
            return;
        };
        self.canvas.fill_rect(layout.mask.to_rect(height), layout.mask_color);
        self.place_image(logo, target);
    }

    fn accent_triangle(&mut self) {
        let accent = &self.layout.accent;
        if accent.size <= 0.0 {
            return;
        }
        self.canvas.fill_polygon(&accent.corners(self.layout.page_size), accent.color);
    }

    fn kpi_donuts(&mut self, values: &DynamicValueSet) {
        let donuts = &self.layout.donuts;
        let autarky = donut_value(values, &[PlaceholderKey::SelfSupplyRatePercent]);
        let self_consumption = donut_value(
            values,
            &[PlaceholderKey::SelfConsumptionPercent, PlaceholderKey::DirectCoverConsumptionNumber],
        );

        for (center_x, value) in [
            (donuts.autarky_center_x, autarky),
            (donuts.self_consumption_center_x, self_consumption),
        ] {
            match value {
                Some((percent, label)) if percent > 0.0 => self.donut(center_x, percent, &label),
                _ => log::debug!("No positive percentage for the donut at x={}", center_x),
            }
        }
    }

    fn donut(&mut self, cx: f32, percent: f32, label: &str) {
        let layout = self.layout;
        let d = &layout.donuts;
        let cy = d.center_y;

        self.canvas.fill_circle(cx, cy, d.outer_radius, d.track_color);
        self.canvas
            .fill_wedge(cx, cy, d.outer_radius, 90.0, -donut_sweep_degrees(percent), d.fill_color);
        self.canvas.fill_circle(cx, cy, d.inner_radius, d.hole_color);

        let font = StandardFont::HelveticaBold;
        let x = cx - font.text_width(label, d.label_size) / 2.0;
        self.text(font, d.label_size, x, cy - d.label_drop, label, d.fill_color);
    }

    fn product_images(&mut self, values: &DynamicValueSet) {
        let slots = self.layout.product_images.slots();
        for (key, slot) in PRODUCT_IMAGE_KEYS.into_iter().zip(slots) {
            let encoded = values.get(key);
            if encoded.is_empty() {
                continue;
            }
            match EmbeddedImage::from_base64(encoded) {
                Ok(image) => {
                    if let Some(target) = self.top_anchored(slot, &image) {
                        self.place_image(image, target);
                    }
                }
                Err(e) => log::warn!("Skipping {} image: {}", key, e),
            }
        }
    }

    /// Fits the image into the slot, keeping it at the slot's top-left corner.
    fn top_anchored(&self, slot: TopLeftBox, image: &EmbeddedImage) -> Option<Rect> {
        let area = slot.to_rect(self.page_height());
        let fitted = area.fit_centered(image.size())?;
        Some(Rect::new(
            area.x,
            area.y + area.height - fitted.height,
            fitted.width,
            fitted.height,
        ))
    }

    fn text_element(
        &mut self,
        page_index: usize,
        element: &TextElement,
        values: &DynamicValueSet,
        total_pages: usize,
    ) {
        let binding = binding_for_sample(&element.sample_text);
        let key = binding.and_then(SlotBinding::key);

        // Drawn inside the donuts instead.
        if page_index == self.layout.kpi_page
            && matches!(
                key,
                Some(PlaceholderKey::SelfSupplyRatePercent | PlaceholderKey::SelfConsumptionPercent)
            )
        {
            return;
        }

        let font = StandardFont::from_descriptor_name(&element.font_name);
        let size = element.font_size;
        let color = Color::from_rgb_int(element.color);
        let bbox = element.bbox;
        let y = bbox.baseline_y(self.page_height());

        if binding.is_none() && self.is_page_token(page_index, element) {
            let label = self.layout.page_label.render(page_index, total_pages);
            let x = bbox.x1 - font.text_width(&label, size);
            self.text(font, size, x, y, &label, color);
            return;
        }

        let text = match binding {
            Some(SlotBinding::Key(key)) => values.get(key),
            Some(SlotBinding::Label(label)) => label,
            None => element.sample_text.as_str(),
        };

        let x = match key {
            Some(key) if key.is_centered() => bbox.center_x() - font.text_width(text, size) / 2.0,
            _ => bbox.x0,
        };
        self.text(font, size, x, y, text, color);
    }

    /// The templates print their own page number as white digits in the
    /// bottom-right corner.
    fn is_page_token(&self, page_index: usize, element: &TextElement) -> bool {
        let label = &self.layout.page_label;
        let sample = element.sample_text.trim();
        !sample.is_empty()
            && sample.bytes().all(|b| b.is_ascii_digit())
            && sample.parse::<usize>().ok() == Some(page_index)
            && element.bbox.y1 >= label.min_bottom
            && element.bbox.x0 >= label.min_left
            && element.color == label.token_color
    }

    fn text(&mut self, font: StandardFont, size: f32, x: f32, y: f32, text: &str, color: Color) {
        if text.trim().is_empty() {
            return;
        }
        self.fonts.insert(font);
        self.canvas.draw_text(font, size, x, y, text, color);
    }

    fn place_image(&mut self, image: EmbeddedImage, target: Rect) {
        let name = format!("Im{}", self.images.len() + 1);
        self.canvas.draw_xobject(&name, target);
        self.images.push((name, image));
    }

    fn finish(self) -> Result<Vec<u8>, RenderError> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for font in &self.fonts {
            let font_id = doc.add_object(font.dictionary());
            fonts.set(font.resource_name(), font_id);
        }
        let mut xobjects = Dictionary::new();
        for (name, image) in &self.images {
            let image_id = image.write_to(&mut doc);
            xobjects.set(name.as_str(), image_id);
        }

        let content = self.canvas.into_content().encode()?;
        let content_id = doc.add_object(Stream::new(
            dictionary! { "Filter" => "FlateDecode" },
            deflate(&content)?,
        ));

        let size = self.layout.page_size;
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), size.width.into(), size.height.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => fonts,
                "XObject" => xobjects,
            },
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

/// The first key whose value reads as a number, with the label shown in
/// the donut hole.
fn donut_value(values: &DynamicValueSet, keys: &[PlaceholderKey]) -> Option<(f32, String)> {
    keys.iter().find_map(|key| {
        let raw = values.get(*key).trim();
        let percent = parse_percent(raw)?;
        let label = if raw.ends_with('%') {
            raw.to_string()
        } else {
            format!("{} %", raw)
        };
        Some((percent, label))
    })
}
