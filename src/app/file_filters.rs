/// Filter for the Open and Save dialogs.
///
/// FLTK format: "Description\tPattern\nDescription2\tPattern2".
/// FLTK adds "All Files (*)" itself, so it is not listed here.
pub fn document_filter() -> String {
    ["Text Files\t*.txt", "Rich Text Files\t*.rtf"].join("\n")
}

/// Filter for the Insert Image dialog, built from the accepted extensions.
pub fn image_filter() -> String {
    use crate::app::services::dropped::IMAGE_EXTENSIONS;
    format!("Images\t*.{{{}}}", IMAGE_EXTENSIONS.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_filter_format() {
        let filter = document_filter();
        assert_eq!(filter.lines().count(), 2);
        assert!(filter.contains("Text Files\t*.txt"));
        assert!(filter.contains("Rich Text Files\t*.rtf"));
    }

    #[test]
    fn test_image_filter_lists_extensions() {
        assert_eq!(image_filter(), "Images\t*.{png,jpg,jpeg,bmp,gif,webm}");
    }
}
