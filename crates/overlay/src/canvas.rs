use crate::fonts::{StandardFont, encode_win_ansi};
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use offerpress_types::{Color, Rect};
use std::f32::consts::FRAC_PI_2;

/// Accumulates content-stream operations for one page.
///
/// Fill color and font are tracked so repeated draws in the same style do
/// not re-emit state operators. Restoring the graphics state forgets both.
#[derive(Debug, Default)]
pub struct Canvas {
    operations: Vec<Operation>,
    fill: Option<Color>,
    font: Option<(StandardFont, f32)>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&mut self) {
        self.push("q", vec![]);
    }

    pub fn restore(&mut self) {
        self.push("Q", vec![]);
        self.fill = None;
        self.font = None;
    }

    pub fn set_fill_color(&mut self, color: Color) {
        if self.fill != Some(color) {
            let (r, g, b) = color.to_unit_rgb();
            self.push("rg", vec![r.into(), g.into(), b.into()]);
            self.fill = Some(color);
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.set_fill_color(color);
        self.push(
            "re",
            vec![rect.x.into(), rect.y.into(), rect.width.into(), rect.height.into()],
        );
        self.push("f", vec![]);
    }

    pub fn fill_polygon(&mut self, points: &[(f32, f32)], color: Color) {
        let Some(((x0, y0), rest)) = points.split_first() else {
            return;
        };
        self.set_fill_color(color);
        self.move_to(*x0, *y0);
        for (x, y) in rest {
            self.line_to(*x, *y);
        }
        self.push("h", vec![]);
        self.push("f", vec![]);
    }

    /// A filled disk approximated by four cubic Bézier quarter arcs.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        self.set_fill_color(color);
        self.move_to(cx + radius, cy);
        self.arc(cx, cy, radius, 0.0, 2.0 * std::f32::consts::PI);
        self.push("h", vec![]);
        self.push("f", vec![]);
    }

    /// A filled pie slice. Angles are in degrees, counter-clockwise from
    /// 3 o'clock; a negative sweep runs clockwise.
    pub fn fill_wedge(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        start_degrees: f32,
        sweep_degrees: f32,
        color: Color,
    ) {
        if sweep_degrees == 0.0 || !sweep_degrees.is_finite() {
            return;
        }
        let start = start_degrees.to_radians();
        self.set_fill_color(color);
        self.move_to(cx, cy);
        self.line_to(cx + radius * start.cos(), cy + radius * start.sin());
        self.arc(cx, cy, radius, start, sweep_degrees.to_radians());
        self.push("h", vec![]);
        self.push("f", vec![]);
    }

    /// Shows `text` with its baseline starting at (`x`, `y`).
    pub fn draw_text(&mut self, font: StandardFont, size: f32, x: f32, y: f32, text: &str, color: Color) {
        if text.trim().is_empty() {
            return;
        }
        self.push("BT", vec![]);
        if self.font != Some((font, size)) {
            self.push(
                "Tf",
                vec![Object::Name(font.resource_name().as_bytes().to_vec()), size.into()],
            );
            self.font = Some((font, size));
        }
        self.set_fill_color(color);
        self.push("Td", vec![x.into(), y.into()]);
        self.push(
            "Tj",
            vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
    }

    /// Paints the named XObject scaled to fill `rect`.
    pub fn draw_xobject(&mut self, name: &str, rect: Rect) {
        self.save();
        self.push(
            "cm",
            vec![
                rect.width.into(),
                0.into(),
                0.into(),
                rect.height.into(),
                rect.x.into(),
                rect.y.into(),
            ],
        );
        self.push("Do", vec![Object::Name(name.as_bytes().to_vec())]);
        self.restore();
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn into_content(self) -> Content {
        Content { operations: self.operations }
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.push("m", vec![x.into(), y.into()]);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.push("l", vec![x.into(), y.into()]);
    }

    /// Appends an arc from the current point, split into segments of at
    /// most 90° so the Bézier approximation stays within 0.03% of the radius.
    fn arc(&mut self, cx: f32, cy: f32, radius: f32, start: f32, sweep: f32) {
        let segments = (sweep.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
        let step = sweep / segments as f32;
        // Control distance for a segment of `step` radians; 0.5523 for 90°.
        let k = 4.0 / 3.0 * (step / 4.0).tan();

        let mut angle = start;
        for _ in 0..segments {
            let next = angle + step;
            let (sin_a, cos_a) = angle.sin_cos();
            let (sin_b, cos_b) = next.sin_cos();
            let c1 = (cx + radius * (cos_a - k * sin_a), cy + radius * (sin_a + k * cos_a));
            let c2 = (cx + radius * (cos_b + k * sin_b), cy + radius * (sin_b - k * cos_b));
            let end = (cx + radius * cos_b, cy + radius * sin_b);
            self.push(
                "c",
                vec![
                    c1.0.into(),
                    c1.1.into(),
                    c2.0.into(),
                    c2.1.into(),
                    end.0.into(),
                    end.1.into(),
                ],
            );
            angle = next;
        }
    }
}
