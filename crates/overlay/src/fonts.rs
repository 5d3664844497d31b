//! The standard Helvetica family: font selection, WinAnsi encoding and
//! AFM advance widths for measuring text without embedding font files.

use lopdf::{Dictionary, dictionary};

/// One of the base-14 Helvetica faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
}

impl StandardFont {
    /// Picks the face for a descriptor font name. Weight and slant are taken
    /// from the name; any family other than Helvetica falls back to it.
    pub fn from_descriptor_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if !lower.contains("helvetica") && !lower.is_empty() {
            log::debug!("Font '{}' is not available, using Helvetica", name);
        }
        let bold = lower.contains("bold");
        let oblique = lower.contains("oblique") || lower.contains("italic");
        match (bold, oblique) {
            (true, true) => StandardFont::HelveticaBoldOblique,
            (true, false) => StandardFont::HelveticaBold,
            (false, true) => StandardFont::HelveticaOblique,
            (false, false) => StandardFont::Helvetica,
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
        }
    }

    /// Name under which the font is registered in the page resources.
    pub fn resource_name(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "F1",
            StandardFont::HelveticaBold => "F2",
            StandardFont::HelveticaOblique => "F3",
            StandardFont::HelveticaBoldOblique => "F4",
        }
    }

    pub fn is_bold(self) -> bool {
        matches!(self, StandardFont::HelveticaBold | StandardFont::HelveticaBoldOblique)
    }

    pub fn dictionary(self) -> Dictionary {
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => self.base_font(),
            "Encoding" => "WinAnsiEncoding",
        }
    }

    /// Advance width of one WinAnsi code in 1/1000 em. Oblique faces share
    /// the upright metrics.
    pub fn glyph_width(self, code: u8) -> u16 {
        let table = if self.is_bold() { &HELVETICA_BOLD_ASCII } else { &HELVETICA_ASCII };
        match code {
            32..=126 => table[(code - 32) as usize],
            _ => high_glyph_width(code, self.is_bold()),
        }
    }

    /// Width of `text` in points at `size`.
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = encode_win_ansi(text)
            .into_iter()
            .map(|code| self.glyph_width(code) as u32)
            .sum();
        units as f32 * size / 1000.0
    }
}

/// Encodes text for a WinAnsiEncoding font. Characters outside the code
/// page become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => c as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn high_glyph_width(code: u8, bold: bool) -> u16 {
    let (regular, heavy) = match code {
        0x80 => (556, 556),                 // Euro
        0x82 | 0x91 | 0x92 => (222, 278),   // single quotes
        0x84 | 0x93 | 0x94 => (333, 500),   // double quotes
        0x85 | 0x97 => (1000, 1000),        // ellipsis, em dash
        0x95 => (350, 350),                 // bullet
        0x96 => (556, 556),                 // en dash
        0x99 => (1000, 1000),               // trademark
        0xa0 => (278, 278),
        0xa7 => (556, 556),
        0xa9 | 0xae => (737, 737),
        0xb0 => (400, 400),
        0xb2 | 0xb3 => (333, 333),
        0xb5 => (556, 611),
        0xb7 => (278, 278),
        0xbd => (834, 834),
        0xc4 | 0xc5 => (667, 722),
        0xd6 => (778, 778),
        0xd7 => (584, 584),
        0xdc => (722, 722),
        0xdf => (611, 611),
        0xe4 | 0xe8 | 0xe9 => (556, 556),
        0xf6 | 0xfc => (556, 611),
        _ => (556, 556),
    };
    if bold { heavy } else { regular }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_face_from_descriptor_name() {
        assert_eq!(StandardFont::from_descriptor_name("Helvetica"), StandardFont::Helvetica);
        assert_eq!(StandardFont::from_descriptor_name("Helvetica-Bold"), StandardFont::HelveticaBold);
        assert_eq!(
            StandardFont::from_descriptor_name("helvetica-boldoblique"),
            StandardFont::HelveticaBoldOblique
        );
        assert_eq!(StandardFont::from_descriptor_name("Times-Italic"), StandardFont::HelveticaOblique);
        assert_eq!(StandardFont::from_descriptor_name("Comic Sans"), StandardFont::Helvetica);
    }

    #[test]
    fn measures_with_afm_widths() {
        // "Page" = 667 + 556 + 556 + 556 units.
        let width = StandardFont::Helvetica.text_width("Page", 10.0);
        assert!((width - 23.35).abs() < 1e-3);
        // Bold digits share the regular width, bold letters are wider.
        assert_eq!(
            StandardFont::HelveticaBold.text_width("54", 12.0),
            StandardFont::Helvetica.text_width("54", 12.0)
        );
        assert!(StandardFont::HelveticaBold.text_width("kWh", 10.0) > StandardFont::Helvetica.text_width("kWh", 10.0));
    }

    #[test]
    fn oblique_shares_upright_metrics() {
        assert_eq!(
            StandardFont::HelveticaOblique.text_width("Stück", 9.0),
            StandardFont::Helvetica.text_width("Stück", 9.0)
        );
    }

    #[test]
    fn encodes_euro_and_umlauts() {
        assert_eq!(encode_win_ansi("€ ü ß"), vec![0x80, b' ', 0xfc, b' ', 0xdf]);
        assert_eq!(encode_win_ansi("a–b"), vec![b'a', 0x96, b'b']);
        assert_eq!(encode_win_ansi("✓"), vec![b'?']);
    }
}
