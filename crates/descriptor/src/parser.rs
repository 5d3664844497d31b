use crate::element::{TextElement, DEFAULT_COLOR, DEFAULT_FONT, DEFAULT_FONT_SIZE};
use nom::IResult;
use nom::Parser;
use nom::branch::alt;
use nom::character::complete::{digit1, one_of};
use nom::combinator::{map_res, opt, recognize};
use offerpress_types::BoundingBox;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Text,
    Position,
    Font,
    FontSize,
    Color,
}

impl Tag {
    fn from_key(key: &str) -> Option<Tag> {
        match key.trim().to_lowercase().as_str() {
            "text" => Some(Tag::Text),
            "position" => Some(Tag::Position),
            "font" | "schriftart" => Some(Tag::Font),
            "fontsize" | "schriftgröße" | "schriftgroesse" => Some(Tag::FontSize),
            "color" | "farbe" => Some(Tag::Color),
            _ => None,
        }
    }
}

/// Fields collected for the entry currently being read.
#[derive(Debug, Default)]
struct PendingEntry {
    first_line: usize,
    touched: bool,
    text: Option<String>,
    bbox: Option<BoundingBox>,
    position_seen: bool,
    font: Option<String>,
    font_size: Option<f32>,
    color: Option<u32>,
}

impl PendingEntry {
    fn starting_at(line: usize) -> Self {
        Self { first_line: line, ..Default::default() }
    }

    fn finish(self) -> Option<TextElement> {
        let Some(bbox) = self.bbox else {
            if self.position_seen {
                log::warn!(
                    "Skipping descriptor entry at line {}: Position needs four numbers",
                    self.first_line
                );
            } else {
                log::warn!("Skipping descriptor entry at line {}: no Position", self.first_line);
            }
            return None;
        };

        Some(TextElement {
            sample_text: self.text.unwrap_or_default(),
            bbox,
            font_name: self
                .font
                .filter(|f| !f.is_empty())
                .unwrap_or_else(|| DEFAULT_FONT.to_string()),
            font_size: self.font_size.unwrap_or(DEFAULT_FONT_SIZE),
            color: self.color.unwrap_or(DEFAULT_COLOR),
        })
    }
}

/// Parses a coordinate descriptor into its text elements.
pub fn parse(source: &str) -> Vec<TextElement> {
    let mut elements = Vec::new();
    let mut current = PendingEntry::starting_at(1);

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with("---") {
            if current.touched {
                elements.extend(std::mem::take(&mut current).finish());
            }
            current = PendingEntry::starting_at(line_no + 1);
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let Some(tag) = Tag::from_key(key) else {
            continue;
        };
        if !current.touched {
            current.first_line = line_no;
            current.touched = true;
        }
        let value = value.trim();

        match tag {
            Tag::Text => current.text = Some(value.to_string()),
            Tag::Position => {
                current.position_seen = true;
                current.bbox = parse_position(value);
            }
            Tag::Font => current.font = Some(value.to_string()),
            Tag::FontSize => current.font_size = Some(parse_font_size(value, line_no)),
            Tag::Color => current.color = Some(parse_color(value, line_no)),
        }
    }

    if current.touched {
        elements.extend(current.finish());
    }
    elements
}

fn parse_position(value: &str) -> Option<BoundingBox> {
    match scan_numbers(value).as_slice() {
        [x0, y0, x1, y1, ..] => Some(BoundingBox::new(*x0, *y0, *x1, *y1)),
        _ => None,
    }
}

fn parse_font_size(value: &str, line_no: usize) -> f32 {
    match value.replace(',', ".").parse::<f32>() {
        Ok(size) if size.is_finite() && size > 0.0 => size,
        _ => {
            log::warn!("Invalid font size '{}' at line {}, using {}", value, line_no, DEFAULT_FONT_SIZE);
            DEFAULT_FONT_SIZE
        }
    }
}

fn parse_color(value: &str, line_no: usize) -> u32 {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => value.parse::<u32>().ok(),
    };
    match parsed {
        Some(color) if color <= 0xFF_FF_FF => color,
        _ => {
            log::warn!("Invalid color '{}' at line {}, using black", value, line_no);
            DEFAULT_COLOR
        }
    }
}

/// A signed decimal with `.` or `,` as the decimal separator.
fn decimal(input: &str) -> IResult<&str, f32> {
    map_res(
        recognize((
            opt(one_of("+-")),
            alt((
                recognize((digit1, opt((one_of(".,"), digit1)))),
                recognize((one_of(".,"), digit1)),
            )),
        )),
        |s: &str| s.replace(',', ".").parse::<f32>(),
    )
    .parse(input)
}

/// Collects every decimal in `input`, skipping anything in between.
fn scan_numbers(input: &str) -> Vec<f32> {
    let mut numbers = Vec::new();
    let mut rest = input;
    while !rest.is_empty() {
        match decimal(rest) {
            Ok((next, value)) => {
                numbers.push(value);
                rest = next;
            }
            Err(_) => {
                let mut chars = rest.chars();
                chars.next();
                rest = chars.as_str();
            }
        }
    }
    numbers
}
