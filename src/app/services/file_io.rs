use std::fs;
use std::path::Path;

use crate::app::domain::RichDocument;
use crate::app::error::Result;
use crate::app::settings::SaveFormat;

use super::markup::{from_markup, looks_like_markup, to_markup};

/// Extract filename from a file path
///
/// Returns the filename component of a path, or "Unknown" if it can't be extracted.
pub fn extract_filename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty() && *s != ".")
        .map(|s| s.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Turn file content into a document: markup is parsed, anything else is text.
pub fn parse_content(content: &str) -> Result<RichDocument> {
    if looks_like_markup(content) {
        from_markup(content)
    } else {
        Ok(RichDocument::from_plain(content))
    }
}

/// Read a UTF-8 file into a clean document.
pub fn load_document(path: &Path) -> Result<RichDocument> {
    let content = fs::read_to_string(path)?;
    let doc = parse_content(&content)?;
    log::info!("Opened {} ({} bytes)", path.display(), content.len());
    Ok(doc)
}

pub fn serialize(doc: &RichDocument, format: SaveFormat) -> String {
    match format {
        SaveFormat::RichMarkup => to_markup(doc),
        SaveFormat::PlainText => doc.plain_text(),
    }
}

/// Write the document. The extension of `path` does not change the format.
pub fn save_document(path: &Path, doc: &RichDocument, format: SaveFormat) -> Result<()> {
    let content = serialize(doc, format);
    fs::write(path, &content)?;
    log::info!("Saved {} as {:?} ({} bytes)", path.display(), format, content.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::{ImageRef, Toggle};
    use crate::app::error::AppError;

    #[test]
    fn test_extract_filename() {
        assert_eq!(extract_filename("/home/user/letter.rtf"), "letter.rtf");
        assert_eq!(extract_filename("notes.txt"), "notes.txt");
        assert_eq!(extract_filename("/"), "Unknown");
        assert_eq!(extract_filename(""), "Unknown");
    }

    #[test]
    fn test_plain_text_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.txt");
        let text = "first line\n\ttabbed ünïcödé\n\nlast without newline";
        save_document(&path, &RichDocument::from_plain(text), SaveFormat::PlainText).unwrap();
        let loaded = load_document(&path).unwrap();
        assert_eq!(loaded.text(), text);
        assert!(!loaded.is_modified());
    }

    #[test]
    fn test_markup_round_trip_reproduces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rich.rtf");
        let mut doc = RichDocument::from_plain("bold and plain\nnext");
        doc.toggle(0, 4, Toggle::Bold);
        doc.insert_image(9, ImageRef { src: "/img/p.gif".into(), width: 200 });
        save_document(&path, &doc, SaveFormat::RichMarkup).unwrap();
        let saved = fs::read_to_string(&path).unwrap();

        let reopened = load_document(&path).unwrap();
        assert_eq!(reopened.text(), doc.text());
        let again = dir.path().join("again.rtf");
        save_document(&again, &reopened, SaveFormat::RichMarkup).unwrap();
        assert_eq!(fs::read_to_string(&again).unwrap(), saved);
    }

    #[test]
    fn test_plain_text_save_drops_images() {
        let mut doc = RichDocument::from_plain("ab");
        doc.insert_image(1, ImageRef { src: "x.png".into(), width: 200 });
        assert_eq!(serialize(&doc, SaveFormat::PlainText), "ab");
    }

    #[test]
    fn test_text_that_mentions_html_stays_text() {
        let doc = parse_content("notes about <html> tags").unwrap();
        assert_eq!(doc.text(), "notes about <html> tags");
    }

    #[test]
    fn test_plain_text_starting_with_tag_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        for (i, text) in [
            "<html> is how every page starts\nsecond",
            "<!DOCTYPE html>\n<p>not rich</p>",
        ]
        .iter()
        .enumerate()
        {
            let path = dir.path().join(format!("tag{}.txt", i));
            save_document(&path, &RichDocument::from_plain(text), SaveFormat::PlainText).unwrap();
            assert_eq!(load_document(&path).unwrap().text(), *text);
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_document(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("dir.txt");
        let err = save_document(&path, &RichDocument::new(), SaveFormat::PlainText).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
