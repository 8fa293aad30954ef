use std::path::{Path, PathBuf};

use crate::app::domain::{ImageRef, RichDocument};
use crate::app::error::Result;

use super::file_io::load_document;

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "webm"];
pub const DOCUMENT_EXTENSIONS: &[&str] = &["txt", "rtf"];

/// What to do with one dropped file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropAction {
    InsertImage(PathBuf),
    ReplaceDocument(PathBuf),
    Ignore(PathBuf),
}

/// Branch on the file extension (ASCII case-insensitive).
pub fn classify(path: PathBuf) -> DropAction {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some(e) if IMAGE_EXTENSIONS.contains(&e) => DropAction::InsertImage(path),
        Some(e) if DOCUMENT_EXTENSIONS.contains(&e) => DropAction::ReplaceDocument(path),
        _ => DropAction::Ignore(path),
    }
}

/// What [`apply_drop`] did to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    ImageInserted,
    DocumentReplaced(PathBuf),
    Ignored,
}

/// Apply one classified drop to `doc`: an image goes in at `pos` with
/// `image_width`, a document file replaces everything. A document that fails
/// to load leaves `doc` untouched.
pub fn apply_drop(
    doc: &mut RichDocument,
    action: DropAction,
    pos: usize,
    image_width: u32,
) -> Result<DropOutcome> {
    match action {
        DropAction::InsertImage(path) => {
            log::info!("Inserting image {}", display_name(&path));
            let image = ImageRef {
                src: path.to_string_lossy().into_owned(),
                width: image_width,
            };
            doc.insert_image(pos.min(doc.len()), image);
            Ok(DropOutcome::ImageInserted)
        }
        DropAction::ReplaceDocument(path) => {
            *doc = load_document(&path)?;
            log::info!("Opened dropped document {}", display_name(&path));
            Ok(DropOutcome::DocumentReplaced(path))
        }
        DropAction::Ignore(path) => {
            log::debug!("Ignoring dropped file {}", display_name(&path));
            Ok(DropOutcome::Ignored)
        }
    }
}

/// Split the text delivered by a drop event into local paths.
///
/// Desktops deliver either plain paths or `file://` URIs, one per line.
pub fn parse_dropped_paths(event_text: &str) -> Vec<PathBuf> {
    event_text
        .lines()
        .map(|line| line.trim_end_matches('\r').trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| match line.strip_prefix("file://") {
            Some(uri) => uri_path(uri),
            None => Some(PathBuf::from(line)),
        })
        .collect()
}

/// Path part of a `file://` URI (host dropped, percent-escapes decoded).
fn uri_path(rest: &str) -> Option<PathBuf> {
    let path = &rest[rest.find('/')?..];
    #[allow(unused_mut)]
    let mut decoded = percent_decode(path)?;
    // file:///C:/dir -> C:/dir
    #[cfg(windows)]
    if decoded.as_bytes().get(2) == Some(&b':') {
        decoded.remove(0);
    }
    Some(PathBuf::from(decoded))
}

fn percent_decode(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok()?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

/// Convenience for logging.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_inserts_image() {
        assert_eq!(
            classify(PathBuf::from("/tmp/cat.png")),
            DropAction::InsertImage(PathBuf::from("/tmp/cat.png"))
        );
    }

    #[test]
    fn test_txt_replaces_document() {
        assert_eq!(
            classify(PathBuf::from("notes.txt")),
            DropAction::ReplaceDocument(PathBuf::from("notes.txt"))
        );
        assert!(matches!(classify(PathBuf::from("a.rtf")), DropAction::ReplaceDocument(_)));
    }

    #[test]
    fn test_exe_is_ignored() {
        assert!(matches!(classify(PathBuf::from("setup.exe")), DropAction::Ignore(_)));
        assert!(matches!(classify(PathBuf::from("README")), DropAction::Ignore(_)));
    }

    #[test]
    fn test_extension_case_insensitive() {
        assert!(matches!(classify(PathBuf::from("SHOT.JPG")), DropAction::InsertImage(_)));
    }

    #[test]
    fn test_dropped_png_inserts_image_at_cursor() {
        let mut doc = RichDocument::from_plain("ab");
        let outcome = apply_drop(&mut doc, classify(PathBuf::from("/tmp/cat.png")), 1, 320).unwrap();
        assert_eq!(outcome, DropOutcome::ImageInserted);
        assert_eq!(doc.text(), "a\u{FFFC}b");
        let image = doc.format_at(1).unwrap().image.clone().unwrap();
        assert_eq!(image.src, "/tmp/cat.png");
        assert_eq!(image.width, 320);
    }

    #[test]
    fn test_dropped_png_past_end_appends() {
        let mut doc = RichDocument::from_plain("ab");
        apply_drop(&mut doc, classify(PathBuf::from("x.gif")), 99, 200).unwrap();
        assert_eq!(doc.text(), "ab\u{FFFC}");
    }

    #[test]
    fn test_dropped_txt_replaces_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "from disk\nline two").unwrap();

        let mut doc = RichDocument::from_plain("old content");
        doc.toggle(0, 3, crate::app::domain::Toggle::Bold);
        let outcome = apply_drop(&mut doc, classify(path.clone()), 4, 200).unwrap();
        assert_eq!(outcome, DropOutcome::DocumentReplaced(path));
        assert_eq!(doc.text(), "from disk\nline two");
        assert!(!doc.format_at(0).unwrap().bold);
        assert!(!doc.is_modified());
    }

    #[test]
    fn test_dropped_exe_leaves_document_alone() {
        let mut doc = RichDocument::from_plain("keep me");
        let outcome = apply_drop(&mut doc, classify(PathBuf::from("setup.exe")), 0, 200).unwrap();
        assert_eq!(outcome, DropOutcome::Ignored);
        assert_eq!(doc.text(), "keep me");
        assert_eq!(doc.images().count(), 0);
    }

    #[test]
    fn test_missing_dropped_document_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.txt");
        let mut doc = RichDocument::from_plain("keep me");
        assert!(apply_drop(&mut doc, classify(missing), 0, 200).is_err());
        assert_eq!(doc.text(), "keep me");
    }

    #[test]
    fn test_parse_plain_paths() {
        let paths = parse_dropped_paths("/home/u/a.txt\n/home/u/b.png\n");
        assert_eq!(paths, vec![PathBuf::from("/home/u/a.txt"), PathBuf::from("/home/u/b.png")]);
    }

    #[cfg(not(windows))]
    #[test]
    fn test_parse_file_uris() {
        let paths = parse_dropped_paths("file:///home/u/my%20notes.txt\r\nfile://host/srv/x.png\r\n");
        assert_eq!(
            paths,
            vec![PathBuf::from("/home/u/my notes.txt"), PathBuf::from("/srv/x.png")]
        );
    }

    #[test]
    fn test_bad_escape_dropped() {
        assert!(parse_dropped_paths("file:///a%zz.txt").is_empty());
    }
}
