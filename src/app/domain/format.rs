use serde::{Deserialize, Serialize};

/// An sRGB color as stored in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as a lowercase `#rrggbb` string.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse `#rgb` or `#rrggbb` (case-insensitive).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |h: &str| u8::from_str_radix(h, 16).ok();
        match hex.len() {
            6 => Some(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Some(Self::new(r * 17, g * 17, b * 17))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    Helvetica,
    Courier,
    Times,
}

impl FontFamily {
    pub fn all() -> &'static [FontFamily] {
        &[FontFamily::Helvetica, FontFamily::Courier, FontFamily::Times]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FontFamily::Helvetica => "Helvetica",
            FontFamily::Courier => "Courier",
            FontFamily::Times => "Times",
        }
    }

    /// Resolve a CSS font-family value. Generic families map to their closest match.
    pub fn from_css(name: &str) -> Option<Self> {
        let name = name.trim().trim_matches(|c| c == '\'' || c == '"');
        match name.to_ascii_lowercase().as_str() {
            "helvetica" | "arial" | "sans-serif" => Some(FontFamily::Helvetica),
            "courier" | "courier new" | "monospace" => Some(FontFamily::Courier),
            "times" | "times new roman" | "serif" => Some(FontFamily::Times),
            _ => None,
        }
    }
}

/// Font family plus point size, as picked in the font dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontFace {
    pub family: FontFamily,
    pub size: u32,
}

impl FontFace {
    pub const MIN_SIZE: u32 = 6;
    pub const MAX_SIZE: u32 = 72;

    /// Round and clamp a requested point size into the supported range.
    pub fn clamp_size(size: f64) -> u32 {
        if size.is_nan() {
            return Self::MIN_SIZE;
        }
        size.round()
            .clamp(f64::from(Self::MIN_SIZE), f64::from(Self::MAX_SIZE)) as u32
    }
}

/// An embedded image reference. The document stores the path, not the pixels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef {
    pub src: String,
    pub width: u32,
}

/// Attributes of a single character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CharFormat {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: Option<Rgb>,
    pub font: Option<FontFace>,
    pub image: Option<ImageRef>,
}

impl CharFormat {
    pub fn is_plain(&self) -> bool {
        *self == CharFormat::default()
    }

    /// Same attributes without the image, used when typed text inherits a format.
    pub fn without_image(&self) -> CharFormat {
        CharFormat {
            image: None,
            ..self.clone()
        }
    }

    pub fn merge(&mut self, patch: &FormatPatch) {
        if let Some(bold) = patch.bold {
            self.bold = bold;
        }
        if let Some(italic) = patch.italic {
            self.italic = italic;
        }
        if let Some(underline) = patch.underline {
            self.underline = underline;
        }
        if let Some(color) = patch.color {
            self.color = Some(color);
        }
        if let Some(font) = patch.font {
            self.font = Some(font);
        }
    }
}

/// A partial format. Only the fields that are set are written by a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatPatch {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub color: Option<Rgb>,
    pub font: Option<FontFace>,
}

impl FormatPatch {
    pub fn color(color: Rgb) -> Self {
        Self {
            color: Some(color),
            ..Default::default()
        }
    }

    pub fn font(font: FontFace) -> Self {
        Self {
            font: Some(font),
            ..Default::default()
        }
    }
}

/// The three on/off attributes driven by toolbar toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Bold,
    Italic,
    Underline,
}

impl Toggle {
    pub fn is_set(self, format: &CharFormat) -> bool {
        match self {
            Toggle::Bold => format.bold,
            Toggle::Italic => format.italic,
            Toggle::Underline => format.underline,
        }
    }

    pub fn patch(self, on: bool) -> FormatPatch {
        let mut patch = FormatPatch::default();
        match self {
            Toggle::Bold => patch.bold = Some(on),
            Toggle::Italic => patch.italic = Some(on),
            Toggle::Underline => patch.underline = Some(on),
        }
        patch
    }
}
