//! Decoding of base64 product and logo images into PDF image XObjects.

use crate::error::RenderError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::ImageFormat;
use lopdf::{Document, ObjectId, Stream, dictionary};
use offerpress_types::Size;
use std::io::Write;

/// An image ready to be written as an XObject.
#[derive(Debug, Clone)]
pub struct EmbeddedImage {
    pub width: u32,
    pub height: u32,
    color_space: &'static str,
    filter: &'static str,
    data: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

impl EmbeddedImage {
    /// Decodes base64 image data, with or without a `data:` URI prefix.
    pub fn from_base64(encoded: &str) -> Result<Self, RenderError> {
        let payload = match encoded.trim().split_once(',') {
            Some((header, data)) if header.starts_with("data:") => data,
            _ => encoded.trim(),
        };
        let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = STANDARD.decode(cleaned)?;
        Self::from_bytes(&bytes)
    }

    /// Gray and RGB JPEG data is kept as-is; everything else (including
    /// CMYK JPEGs) is re-encoded as Flate-compressed RGB with an optional
    /// soft mask.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RenderError> {
        let decoded = image::load_from_memory(bytes)?;
        let (width, height) = (decoded.width(), decoded.height());
        if width == 0 || height == 0 {
            return Err("image has no pixels".into());
        }

        let passthrough = match image::guess_format(bytes) {
            Ok(ImageFormat::Jpeg) => jpeg_color_space(bytes),
            _ => None,
        };
        if let Some(color_space) = passthrough {
            return Ok(Self {
                width,
                height,
                color_space,
                filter: "DCTDecode",
                data: bytes.to_vec(),
                alpha: None,
            });
        }

        let rgba = decoded.to_rgba8();
        let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
        let mut alpha = Vec::with_capacity(width as usize * height as usize);
        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            rgb.extend_from_slice(&[r, g, b]);
            alpha.push(a);
        }
        let alpha = if alpha.iter().any(|a| *a != 255) {
            Some(deflate(&alpha)?)
        } else {
            None
        };

        Ok(Self {
            width,
            height,
            color_space: "DeviceRGB",
            filter: "FlateDecode",
            data: deflate(&rgb)?,
            alpha,
        })
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    pub fn has_alpha(&self) -> bool {
        self.alpha.is_some()
    }

    /// Adds the image (and its soft mask) to `doc`.
    pub fn write_to(&self, doc: &mut Document) -> ObjectId {
        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => self.width as i64,
            "Height" => self.height as i64,
            "ColorSpace" => self.color_space,
            "BitsPerComponent" => 8,
            "Filter" => self.filter,
        };
        if let Some(alpha) = &self.alpha {
            let mask = Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => self.width as i64,
                    "Height" => self.height as i64,
                    "ColorSpace" => "DeviceGray",
                    "BitsPerComponent" => 8,
                    "Filter" => "FlateDecode",
                },
                alpha.clone(),
            );
            dict.set("SMask", doc.add_object(mask));
        }
        doc.add_object(Stream::new(dict, self.data.clone()))
    }
}

/// Color space for embedding a JPEG unchanged, read from its frame
/// header. `None` for component counts DCTDecode cannot take as
/// DeviceGray or DeviceRGB.
fn jpeg_color_space(bytes: &[u8]) -> Option<&'static str> {
    match jpeg_components(bytes)? {
        1 => Some("DeviceGray"),
        3 => Some("DeviceRGB"),
        _ => None,
    }
}

/// Number of color components in the first SOF segment.
fn jpeg_components(bytes: &[u8]) -> Option<u8> {
    if !bytes.starts_with(&[0xFF, 0xD8]) {
        return None;
    }
    let mut pos = 2;
    loop {
        if *bytes.get(pos)? != 0xFF {
            return None;
        }
        while *bytes.get(pos)? == 0xFF {
            pos += 1;
        }
        let marker = *bytes.get(pos)?;
        pos += 1;
        match marker {
            0x01 | 0xD0..=0xD7 => continue,
            0xD9 | 0xDA => return None,
            _ => {}
        }
        let length = u16::from_be_bytes([*bytes.get(pos)?, *bytes.get(pos + 1)?]) as usize;
        if matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC) {
            // length(2) precision(1) height(2) width(2) components(1)
            return bytes.get(pos + 7).copied();
        }
        pos += length;
    }
}

pub(crate) fn deflate(data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
