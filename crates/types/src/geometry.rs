use serde::{Deserialize, Serialize};

/// A rectangle in PDF user space (origin at the bottom-left corner).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Scales `content` to fit inside this rectangle without distorting its
    /// aspect ratio and centers the result. Returns `None` for degenerate
    /// content sizes.
    pub fn fit_centered(&self, content: Size) -> Option<Rect> {
        if content.width <= 0.0 || content.height <= 0.0 {
            return None;
        }
        let scale = (self.width / content.width).min(self.height / content.height);
        if !scale.is_finite() || scale <= 0.0 {
            return None;
        }
        let width = content.width * scale;
        let height = content.height * scale;
        Some(Rect {
            x: self.x + (self.width - width) / 2.0,
            y: self.y + (self.height - height) / 2.0,
            width,
            height,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// ISO A4 portrait in points.
    pub const A4: Size = Size { width: 595.2756, height: 841.8898 };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }
}

/// A text placement box with a top-left origin: y grows downward, so
/// `y1` is the bottom edge of the box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BoundingBox {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Horizontal center of the box.
    pub fn center_x(&self) -> f32 {
        (self.x0 + self.x1) / 2.0
    }

    /// PDF baseline for text sitting on the bottom edge of this box.
    pub fn baseline_y(&self, page_height: f32) -> f32 {
        page_height - self.y1
    }
}
