//! Style attribute model.
//!
//! Styles are a closed set of optional slots rather than an open dictionary, so
//! merging and emptiness checks are exhaustive. Character-level slots live in
//! [`TextStyle`]; paragraph-level slots live in [`ParagraphStyle`].

use serde::Serialize;

/// Foreground color with channels normalized to `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RgbColor {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl RgbColor {
    pub fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    /// Parses `#rrggbb` or `#rgb`. Returns `None` for anything else.
    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channels: Vec<u8> = match hex.len() {
            6 => (0..3)
                .map(|i| u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16))
                .collect::<Result<_, _>>()
                .ok()?,
            3 => hex
                .chars()
                .map(|c| u8::from_str_radix(&format!("{c}{c}"), 16))
                .collect::<Result<_, _>>()
                .ok()?,
            _ => return None,
        };
        Some(Self::new(
            f32::from(channels[0]) / 255.0,
            f32::from(channels[1]) / 255.0,
            f32::from(channels[2]) / 255.0,
        ))
    }
}

/// Character-level style attributes. `None` means "leave untouched".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<RgbColor>,
}

impl TextStyle {
    pub fn bold() -> Self {
        Self {
            bold: Some(true),
            ..Self::default()
        }
    }

    pub fn italic() -> Self {
        Self {
            italic: Some(true),
            ..Self::default()
        }
    }

    pub fn underline() -> Self {
        Self {
            underline: Some(true),
            ..Self::default()
        }
    }

    pub fn strikethrough() -> Self {
        Self {
            strikethrough: Some(true),
            ..Self::default()
        }
    }

    pub fn link(url: impl Into<String>) -> Self {
        Self {
            link: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn foreground(color: RgbColor) -> Self {
        Self {
            foreground: Some(color),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bold.is_none()
            && self.italic.is_none()
            && self.underline.is_none()
            && self.strikethrough.is_none()
            && self.link.is_none()
            && self.foreground.is_none()
    }

    /// Key-wise union of two styles; slots set in `other` win.
    pub fn merged_with(&self, other: &TextStyle) -> TextStyle {
        TextStyle {
            bold: other.bold.or(self.bold),
            italic: other.italic.or(self.italic),
            underline: other.underline.or(self.underline),
            strikethrough: other.strikethrough.or(self.strikethrough),
            link: other.link.clone().or_else(|| self.link.clone()),
            foreground: other.foreground.or(self.foreground),
        }
    }

    /// Names of the populated slots, in the editing API's field-mask spelling.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.bold.is_some() {
            fields.push("bold");
        }
        if self.italic.is_some() {
            fields.push("italic");
        }
        if self.underline.is_some() {
            fields.push("underline");
        }
        if self.strikethrough.is_some() {
            fields.push("strikethrough");
        }
        if self.link.is_some() {
            fields.push("link");
        }
        if self.foreground.is_some() {
            fields.push("foregroundColor");
        }
        fields
    }
}

/// Named paragraph style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NamedStyle {
    #[default]
    NormalText,
    #[serde(rename = "HEADING_1")]
    Heading1,
    #[serde(rename = "HEADING_2")]
    Heading2,
    #[serde(rename = "HEADING_3")]
    Heading3,
    #[serde(rename = "HEADING_4")]
    Heading4,
    #[serde(rename = "HEADING_5")]
    Heading5,
    #[serde(rename = "HEADING_6")]
    Heading6,
}

impl NamedStyle {
    /// Heading rank 1-6; anything else maps to normal text.
    pub fn heading(rank: usize) -> Self {
        match rank {
            1 => NamedStyle::Heading1,
            2 => NamedStyle::Heading2,
            3 => NamedStyle::Heading3,
            4 => NamedStyle::Heading4,
            5 => NamedStyle::Heading5,
            6 => NamedStyle::Heading6,
            _ => NamedStyle::NormalText,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NamedStyle::NormalText => "NORMAL_TEXT",
            NamedStyle::Heading1 => "HEADING_1",
            NamedStyle::Heading2 => "HEADING_2",
            NamedStyle::Heading3 => "HEADING_3",
            NamedStyle::Heading4 => "HEADING_4",
            NamedStyle::Heading5 => "HEADING_5",
            NamedStyle::Heading6 => "HEADING_6",
        }
    }
}

/// Paragraph-level style attributes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub named: Option<NamedStyle>,
    /// Start indentation in points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent_start: Option<f64>,
}

impl ParagraphStyle {
    pub fn named(style: NamedStyle) -> Self {
        Self {
            named: Some(style),
            indent_start: None,
        }
    }

    pub fn indent(points: f64) -> Self {
        Self {
            named: None,
            indent_start: Some(points),
        }
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.named.is_some() {
            fields.push("namedStyleType");
        }
        if self.indent_start.is_some() {
            fields.push("indentStart");
        }
        fields
    }
}
