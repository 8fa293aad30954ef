//! Rich-text serialization.
//!
//! Documents are saved as a small HTML subset: one `<p>` per line, `<span style>`
//! for formatted runs and `<img>` for embedded images. The reader accepts that
//! subset plus a few common inline tags, so files saved by other editors open
//! with most of their formatting.

use crate::app::domain::{
    CharFormat, FontFace, FontFamily, ImageRef, OBJECT_REPLACEMENT, RichDocument, Rgb,
};
use crate::app::error::{AppError, Result};

const HEADER: &str = "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Document</title></head>\n<body style=\"white-space: pre-wrap;\">\n";
const FOOTER: &str = "</body>\n</html>\n";

/// Point size used when a style names a family but no size.
const DEFAULT_POINT_SIZE: u32 = 12;
/// Width given to images whose tag has no usable width attribute.
const DEFAULT_IMAGE_WIDTH: u32 = 200;

/// True when `content` was written by [`to_markup`]. Anything else, including
/// plain text that happens to start with an HTML tag, is loaded as text.
pub fn looks_like_markup(content: &str) -> bool {
    content.starts_with(HEADER)
}

pub fn to_markup(doc: &RichDocument) -> String {
    let mut out = String::from(HEADER);
    for line in doc.lines() {
        out.push_str("<p>");
        for (text, fmt) in line {
            write_run(&mut out, text, fmt);
        }
        out.push_str("</p>\n");
    }
    out.push_str(FOOTER);
    out
}

fn write_run(out: &mut String, text: &str, fmt: &CharFormat) {
    if let Some(image) = &fmt.image {
        for ch in text.chars() {
            if ch == OBJECT_REPLACEMENT {
                out.push_str(&format!(
                    "<img src=\"{}\" width=\"{}\" />",
                    escape(&image.src),
                    image.width
                ));
            } else {
                out.push_str(&escape(ch.encode_utf8(&mut [0u8; 4])));
            }
        }
        return;
    }
    if fmt.is_plain() {
        out.push_str(&escape(text));
        return;
    }
    out.push_str(&format!("<span style=\"{}\">", style_attr(fmt)));
    out.push_str(&escape(text));
    out.push_str("</span>");
}

fn style_attr(fmt: &CharFormat) -> String {
    let mut props = Vec::new();
    if let Some(face) = fmt.font {
        props.push(format!("font-family: '{}';", face.family.display_name()));
        props.push(format!("font-size: {}pt;", face.size));
    }
    if fmt.bold {
        props.push("font-weight: bold;".to_string());
    }
    if fmt.italic {
        props.push("font-style: italic;".to_string());
    }
    if fmt.underline {
        props.push("text-decoration: underline;".to_string());
    }
    if let Some(color) = fmt.color {
        props.push(format!("color: {};", color.to_hex()));
    }
    props.join(" ")
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Decode named and numeric character references. Unknown ones are kept verbatim.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').filter(|&semi| semi <= 10).and_then(|semi| {
            let entity = &rest[1..semi];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => {
                    let code = if let Some(hex) = entity
                        .strip_prefix("#x")
                        .or_else(|| entity.strip_prefix("#X"))
                    {
                        u32::from_str_radix(hex, 16).ok()
                    } else {
                        entity.strip_prefix('#').and_then(|dec| dec.parse().ok())
                    };
                    code.and_then(char::from_u32)
                }
            };
            ch.map(|c| (c, semi))
        });
        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

struct Tag<'a> {
    name: String,
    closing: bool,
    attrs: &'a str,
}

fn parse_tag(inner: &str) -> Tag<'_> {
    let inner = inner.trim().trim_end_matches('/').trim_end();
    let (closing, inner) = match inner.strip_prefix('/') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, inner),
    };
    let name_end = inner
        .find(|c: char| c.is_whitespace())
        .unwrap_or(inner.len());
    Tag {
        name: inner[..name_end].to_ascii_lowercase(),
        closing,
        attrs: &inner[name_end..],
    }
}

/// Value of attribute `key` in a tag's attribute text, entity-decoded.
fn attribute(attrs: &str, key: &str) -> Option<String> {
    let mut rest = attrs;
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            return None;
        }
        let name_end = rest
            .find(|c: char| c == '=' || c.is_whitespace())
            .unwrap_or(rest.len());
        let name = rest[..name_end].to_ascii_lowercase();
        rest = rest[name_end..].trim_start();
        let value = if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            match after_eq.chars().next() {
                Some(quote @ ('"' | '\'')) => {
                    let body = &after_eq[1..];
                    let end = body.find(quote).unwrap_or(body.len());
                    rest = body.get(end + 1..).unwrap_or("");
                    &body[..end]
                }
                _ => {
                    let end = after_eq
                        .find(|c: char| c.is_whitespace())
                        .unwrap_or(after_eq.len());
                    rest = &after_eq[end..];
                    &after_eq[..end]
                }
            }
        } else {
            ""
        };
        if name == key {
            return Some(unescape(value));
        }
    }
}

fn named_color(name: &str) -> Option<Rgb> {
    match name {
        "black" => Some(Rgb::new(0, 0, 0)),
        "white" => Some(Rgb::new(255, 255, 255)),
        "red" => Some(Rgb::new(255, 0, 0)),
        "green" => Some(Rgb::new(0, 128, 0)),
        "blue" => Some(Rgb::BLUE),
        "gray" | "grey" => Some(Rgb::new(128, 128, 128)),
        _ => None,
    }
}

fn apply_style(fmt: &mut CharFormat, style: &str) {
    let mut family = None;
    let mut size = None;
    for decl in style.split(';') {
        let Some((prop, value)) = decl.split_once(':') else {
            continue;
        };
        let prop = prop.trim().to_ascii_lowercase();
        let value = value.trim().to_ascii_lowercase();
        match prop.as_str() {
            "font-weight" => {
                fmt.bold = match value.as_str() {
                    "bold" | "bolder" => true,
                    "normal" | "lighter" => false,
                    n => n.parse::<u32>().map(|w| w >= 600).unwrap_or(fmt.bold),
                }
            }
            "font-style" => fmt.italic = value == "italic" || value == "oblique",
            "text-decoration" | "text-decoration-line" => {
                fmt.underline = value.contains("underline")
            }
            "color" => {
                if let Some(color) = Rgb::from_hex(&value).or_else(|| named_color(&value)) {
                    fmt.color = Some(color);
                }
            }
            "font-family" => {
                family = value.split(',').find_map(FontFamily::from_css);
            }
            "font-size" => {
                let digits: String = value
                    .chars()
                    .take_while(|c| c.is_ascii_digit() || *c == '.')
                    .collect();
                size = digits.parse::<f64>().ok().map(FontFace::clamp_size);
            }
            _ => {}
        }
    }
    if family.is_some() || size.is_some() {
        let base = fmt.font;
        fmt.font = Some(FontFace {
            family: family
                .or(base.map(|f| f.family))
                .unwrap_or(FontFamily::Helvetica),
            size: size
                .or(base.map(|f| f.size))
                .unwrap_or(DEFAULT_POINT_SIZE),
        });
    }
}

/// Tags whose content is not document text.
fn is_skipped_container(name: &str) -> bool {
    matches!(name, "head" | "title" | "style" | "script")
}

pub fn from_markup(input: &str) -> Result<RichDocument> {
    let mut doc = RichDocument::new();
    // Open inline elements with the format in effect inside each.
    let mut stack: Vec<(String, CharFormat)> = Vec::new();
    let mut skip_depth = 0usize;
    let mut paragraphs = 0usize;
    let mut in_paragraph = false;
    let mut rest = input;

    while !rest.is_empty() {
        let Some(lt) = rest.find('<') else {
            push_text(&mut doc, rest, &current(&stack), in_paragraph, skip_depth);
            break;
        };
        push_text(&mut doc, &rest[..lt], &current(&stack), in_paragraph, skip_depth);
        let at = input.len() - rest.len() + lt;
        rest = &rest[lt..];

        if let Some(comment) = rest.strip_prefix("<!--") {
            let end = comment
                .find("-->")
                .ok_or_else(|| AppError::Markup(format!("unterminated comment at byte {}", at)))?;
            rest = &comment[end + 3..];
            continue;
        }
        let gt = rest
            .find('>')
            .ok_or_else(|| AppError::Markup(format!("unterminated tag at byte {}", at)))?;
        let inner = &rest[1..gt];
        rest = &rest[gt + 1..];
        if inner.starts_with('!') || inner.starts_with('?') {
            continue;
        }

        let tag = parse_tag(inner);
        if is_skipped_container(&tag.name) {
            if tag.closing {
                skip_depth = skip_depth.saturating_sub(1);
            } else {
                skip_depth += 1;
            }
            continue;
        }
        if skip_depth > 0 {
            continue;
        }

        match (tag.name.as_str(), tag.closing) {
            ("p" | "div", false) => {
                if paragraphs > 0 {
                    let fmt = current(&stack);
                    doc.push_run("\n", fmt);
                }
                paragraphs += 1;
                in_paragraph = true;
            }
            ("p" | "div", true) => in_paragraph = false,
            ("br", _) => {
                let fmt = current(&stack);
                doc.push_run("\n", fmt);
            }
            ("img", false) => {
                let src = attribute(tag.attrs, "src").unwrap_or_default();
                let width = attribute(tag.attrs, "width")
                    .and_then(|w| w.trim().trim_end_matches("px").parse().ok())
                    .unwrap_or(DEFAULT_IMAGE_WIDTH);
                doc.push_image(ImageRef { src, width }, current(&stack).without_image());
            }
            (name @ ("span" | "b" | "strong" | "i" | "em" | "u" | "font"), false) => {
                let mut fmt = current(&stack);
                match name {
                    "b" | "strong" => fmt.bold = true,
                    "i" | "em" => fmt.italic = true,
                    "u" => fmt.underline = true,
                    "font" => {
                        if let Some(color) = attribute(tag.attrs, "color") {
                            apply_style(&mut fmt, &format!("color: {}", color));
                        }
                    }
                    _ => {}
                }
                if let Some(style) = attribute(tag.attrs, "style") {
                    apply_style(&mut fmt, &style);
                }
                stack.push((name.to_string(), fmt));
            }
            (name, true) => {
                if let Some(idx) = stack.iter().rposition(|(open, _)| open == name) {
                    stack.truncate(idx);
                }
            }
            _ => {}
        }
    }

    Ok(doc)
}

fn current(stack: &[(String, CharFormat)]) -> CharFormat {
    stack.last().map(|(_, f)| f.clone()).unwrap_or_default()
}

fn push_text(
    doc: &mut RichDocument,
    raw: &str,
    fmt: &CharFormat,
    in_paragraph: bool,
    skip_depth: usize,
) {
    if raw.is_empty() || skip_depth > 0 {
        return;
    }
    // Whitespace between block elements is layout, not content.
    if !in_paragraph && raw.trim().is_empty() {
        return;
    }
    doc.push_run(&unescape(raw), fmt.clone());
}
