use std::collections::HashMap;
use std::ops::Range;

use fltk::enums::{Color, Font};
use fltk::text::{StyleTableEntryExt, TextAttr};

use crate::app::domain::{CharFormat, FontFamily, RichDocument, Rgb};
use crate::app::services::highlight::KEYWORD_COLOR;

/// Style characters run from 'A' up to '~'.
const MAX_STYLES: usize = 62;

const IMAGE_COLOR: Rgb = Rgb::new(128, 128, 128);

/// Everything that decides how one byte is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct StyleKey {
    family: FontFamily,
    size: u32,
    bold: bool,
    italic: bool,
    underline: bool,
    /// `None` draws in the theme's text color.
    color: Option<Rgb>,
}

/// FLTK font for a family and weight/slant combination.
pub fn fltk_font(family: FontFamily, bold: bool, italic: bool) -> Font {
    match (family, bold, italic) {
        (FontFamily::Helvetica, false, false) => Font::Helvetica,
        (FontFamily::Helvetica, true, false) => Font::HelveticaBold,
        (FontFamily::Helvetica, false, true) => Font::HelveticaItalic,
        (FontFamily::Helvetica, true, true) => Font::HelveticaBoldItalic,
        (FontFamily::Courier, false, false) => Font::Courier,
        (FontFamily::Courier, true, false) => Font::CourierBold,
        (FontFamily::Courier, false, true) => Font::CourierItalic,
        (FontFamily::Courier, true, true) => Font::CourierBoldItalic,
        (FontFamily::Times, false, false) => Font::Times,
        (FontFamily::Times, true, false) => Font::TimesBold,
        (FontFamily::Times, false, true) => Font::TimesItalic,
        (FontFamily::Times, true, true) => Font::TimesBoldItalic,
    }
}

/// Font and point size a format is drawn with, given the editor's base size.
pub fn font_for(format: &CharFormat, base_size: u32) -> (Font, i32) {
    let (family, size) = match format.font {
        Some(face) => (face.family, face.size),
        None => (FontFamily::Helvetica, base_size),
    };
    (fltk_font(family, format.bold, format.italic), size as i32)
}

pub fn fltk_color(rgb: Rgb) -> Color {
    Color::from_rgb(rgb.r, rgb.g, rgb.b)
}

/// Maps document formats to FLTK style characters ('A', 'B', 'C', ...).
/// The table is rebuilt from scratch on every restyle, so only styles in use
/// take a slot.
pub struct StyleMap {
    key_to_char: HashMap<StyleKey, char>,
    entries: Vec<StyleTableEntryExt>,
    base_size: u32,
    dark_mode: bool,
    /// Set once the table is full, so the warning is logged once per build.
    overflowed: bool,
}

impl StyleMap {
    pub fn new(base_size: u32, dark_mode: bool) -> Self {
        Self {
            key_to_char: HashMap::new(),
            entries: Vec::new(),
            base_size,
            dark_mode,
            overflowed: false,
        }
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.dark_mode = dark_mode;
    }

    pub fn base_size(&self) -> u32 {
        self.base_size
    }

    /// Produce the style buffer text for `doc`: one style character per byte.
    /// Bytes inside `highlights` are drawn in the keyword color.
    pub fn build(&mut self, doc: &RichDocument, highlights: &[Range<usize>]) -> String {
        self.key_to_char.clear();
        self.entries.clear();
        self.overflowed = false;

        let mut styles = String::with_capacity(doc.len());
        let mut spans = highlights.iter().peekable();
        let mut offset = 0;
        for (text, fmt) in doc.runs() {
            let plain = self.get_or_insert(self.key_for(fmt, false));
            let mut keyword = None;
            for pos in offset..offset + text.len() {
                while spans.peek().is_some_and(|s| s.end <= pos) {
                    spans.next();
                }
                if spans.peek().is_some_and(|s| s.start <= pos) {
                    let ch = *keyword.get_or_insert_with(|| self.get_or_insert(self.key_for(fmt, true)));
                    styles.push(ch);
                } else {
                    styles.push(plain);
                }
            }
            offset += text.len();
        }
        styles
    }

    /// Get the style table entries for FLTK's set_highlight_data_ext.
    pub fn entries(&self) -> Vec<StyleTableEntryExt> {
        self.entries.clone()
    }

    fn key_for(&self, fmt: &CharFormat, highlighted: bool) -> StyleKey {
        let (family, size) = match fmt.font {
            Some(face) => (face.family, face.size),
            None => (FontFamily::Helvetica, self.base_size),
        };
        let color = if fmt.image.is_some() {
            Some(IMAGE_COLOR)
        } else if highlighted {
            Some(KEYWORD_COLOR)
        } else {
            fmt.color
        };
        StyleKey {
            family,
            size,
            bold: fmt.bold,
            italic: fmt.italic,
            underline: fmt.underline,
            color,
        }
    }

    fn get_or_insert(&mut self, key: StyleKey) -> char {
        if let Some(&ch) = self.key_to_char.get(&key) {
            return ch;
        }

        let idx = self.entries.len();
        if idx >= MAX_STYLES {
            if !self.overflowed {
                log::warn!("More than {} distinct styles; extra formats share the last one", MAX_STYLES);
                self.overflowed = true;
            }
            return (b'A' + (MAX_STYLES - 1) as u8) as char;
        }
        let ch = (b'A' + idx as u8) as char;
        let color = match key.color {
            Some(rgb) => fltk_color(rgb),
            None if self.dark_mode => Color::White,
            None => Color::Black,
        };
        self.entries.push(StyleTableEntryExt {
            color,
            font: fltk_font(key.family, key.bold, key.italic),
            size: key.size as i32,
            attr: if key.underline { TextAttr::Underline } else { TextAttr::None },
            bgcolor: Color::Background2,
        });
        self.key_to_char.insert(key, ch);
        ch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::{FontFace, FormatPatch, Toggle};

    #[test]
    fn test_one_style_char_per_byte() {
        let doc = RichDocument::from_plain("héllo wörld");
        let mut map = StyleMap::new(12, false);
        let styles = map.build(&doc, &[]);
        assert_eq!(styles.len(), doc.len());
        assert!(styles.chars().all(|c| c == 'A'));
        assert_eq!(map.entries().len(), 1);
    }

    #[test]
    fn test_highlight_uses_keyword_color() {
        let doc = RichDocument::from_plain("def foo");
        let mut map = StyleMap::new(12, false);
        let styles = map.build(&doc, &[0..3]);
        assert_eq!(&styles[..4], "BBBA");
        let entries = map.entries();
        assert_eq!(entries[1].color, Color::from_rgb(0, 0, 255));
        assert_eq!(entries[0].color, Color::Black);
    }

    #[test]
    fn test_formats_get_distinct_styles() {
        let mut doc = RichDocument::from_plain("ab cd");
        doc.toggle(0, 2, Toggle::Bold);
        doc.toggle(3, 5, Toggle::Underline);
        let mut map = StyleMap::new(12, false);
        let styles = map.build(&doc, &[]);
        let entries = map.entries();
        let first = (styles.as_bytes()[0] - b'A') as usize;
        let last = (styles.as_bytes()[4] - b'A') as usize;
        assert_eq!(entries[first].font, Font::HelveticaBold);
        assert_eq!(entries[last].attr, TextAttr::Underline);
    }

    #[test]
    fn test_font_face_and_dark_mode() {
        let mut doc = RichDocument::from_plain("x");
        doc.merge_format(0, 1, &FormatPatch::font(FontFace { family: FontFamily::Times, size: 20 }));
        let mut map = StyleMap::new(12, true);
        map.build(&doc, &[]);
        let entries = map.entries();
        let entry = &entries[0];
        assert_eq!(entry.font, Font::Times);
        assert_eq!(entry.size, 20);
        assert_eq!(entry.color, Color::White);
    }

    #[test]
    fn test_many_formats_keep_distinct_styles() {
        let mut doc = RichDocument::new();
        for i in 0..40u8 {
            doc.push_run("x", CharFormat { color: Some(Rgb::new(i, 0, 0)), ..Default::default() });
        }
        let mut map = StyleMap::new(12, false);
        let styles = map.build(&doc, &[]);
        assert_eq!(map.entries().len(), 40);
        let distinct: std::collections::HashSet<char> = styles.chars().collect();
        assert_eq!(distinct.len(), 40);
    }

    #[test]
    fn test_style_table_caps_at_last_char() {
        let mut doc = RichDocument::new();
        for i in 0..70u8 {
            doc.push_run("x", CharFormat { color: Some(Rgb::new(i, 1, 1)), ..Default::default() });
        }
        let mut map = StyleMap::new(12, false);
        let styles = map.build(&doc, &[]);
        assert_eq!(map.entries().len(), MAX_STYLES);
        assert_eq!(styles.len(), 70);
        assert!(styles.chars().skip(MAX_STYLES).all(|c| c == '~'));
    }

    #[test]
    fn test_font_for_defaults_to_base_size() {
        let fmt = CharFormat { italic: true, ..Default::default() };
        assert_eq!(font_for(&fmt, 14), (Font::HelveticaItalic, 14));
    }
}
