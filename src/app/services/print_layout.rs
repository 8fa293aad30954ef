use std::borrow::Cow;
use std::ops::Range;

use crate::app::domain::{CharFormat, OBJECT_REPLACEMENT, RichDocument};

use super::file_io::extract_filename;

/// A piece of one printed line drawn in a single format.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub format: CharFormat,
    pub x: f64,
    pub width: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrintLine {
    pub fragments: Vec<Fragment>,
    pub height: f64,
}

impl PrintLine {
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PrintLine>,
}

/// Word-wrap the document to `page_width` and cut it into pages of `page_height`.
///
/// `measure` returns the width and line height of a piece of text drawn in a
/// format; the printer backs it with the real font metrics.
pub fn paginate<M>(doc: &RichDocument, page_width: f64, page_height: f64, mut measure: M) -> Vec<Page>
where
    M: FnMut(&str, &CharFormat) -> (f64, f64),
{
    let mut pager = Pager {
        pages: Vec::new(),
        page: Page::default(),
        y: 0.0,
        page_height,
    };
    let blank_height = measure(" ", &CharFormat::default()).1;

    for runs in doc.lines() {
        let mut line = PrintLine::default();
        let mut x = 0.0;
        for (text, fmt) in runs {
            let shown = printable_text(text, fmt);
            for word in shown.split_inclusive(' ') {
                let (width, height) = measure(word, fmt);
                if x + width > page_width && !line.fragments.is_empty() {
                    pager.push(std::mem::take(&mut line));
                    x = 0.0;
                }
                match line.fragments.last_mut() {
                    Some(last) if last.format == *fmt => {
                        last.text.push_str(word);
                        last.width += width;
                    }
                    _ => line.fragments.push(Fragment {
                        text: word.to_string(),
                        format: fmt.clone(),
                        x,
                        width,
                    }),
                }
                x += width;
                line.height = line.height.max(height);
            }
        }
        if line.fragments.is_empty() {
            line.height = blank_height;
        }
        pager.push(line);
    }
    pager.finish()
}

/// Indices of the pages to print for a dialog range of 1-based, inclusive
/// page numbers. A missing bound means the first or last page; the result is
/// clamped to `page_count` and may be empty.
pub fn selected_pages(page_count: usize, from: Option<i32>, to: Option<i32>) -> Range<usize> {
    let first = from.map_or(0, |f| (f.max(1) - 1) as usize).min(page_count);
    let last = to.map_or(page_count, |t| t.max(0) as usize).min(page_count);
    first..last.max(first)
}

struct Pager {
    pages: Vec<Page>,
    page: Page,
    y: f64,
    page_height: f64,
}

impl Pager {
    fn push(&mut self, line: PrintLine) {
        if self.y + line.height > self.page_height && !self.page.lines.is_empty() {
            self.pages.push(std::mem::take(&mut self.page));
            self.y = 0.0;
        }
        self.y += line.height;
        self.page.lines.push(line);
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.page.lines.is_empty() || self.pages.is_empty() {
            self.pages.push(self.page);
        }
        self.pages
    }
}

/// Images print as a bracketed file name.
fn printable_text<'a>(text: &'a str, fmt: &CharFormat) -> Cow<'a, str> {
    match &fmt.image {
        Some(image) if text.contains(OBJECT_REPLACEMENT) => {
            let label = format!("[image: {}]", extract_filename(&image.src));
            Cow::Owned(text.replace(OBJECT_REPLACEMENT, &label))
        }
        _ => Cow::Borrowed(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::{ImageRef, Toggle};

    fn by_chars(text: &str, _: &CharFormat) -> (f64, f64) {
        (text.chars().count() as f64, 1.0)
    }

    fn all_lines(pages: &[Page]) -> Vec<String> {
        pages.iter().flat_map(|p| p.lines.iter().map(PrintLine::text)).collect()
    }

    #[test]
    fn test_short_document_single_page() {
        let doc = RichDocument::from_plain("hello\nworld");
        let pages = paginate(&doc, 80.0, 60.0, by_chars);
        assert_eq!(pages.len(), 1);
        assert_eq!(all_lines(&pages), vec!["hello", "world"]);
    }

    #[test]
    fn test_wraps_at_page_width() {
        let doc = RichDocument::from_plain("aaa bbb ccc");
        let pages = paginate(&doc, 8.0, 60.0, by_chars);
        assert_eq!(all_lines(&pages), vec!["aaa bbb ", "ccc"]);
        assert_eq!(pages[0].lines[1].fragments[0].x, 0.0);
    }

    #[test]
    fn test_no_words_lost() {
        let text = "the quick brown fox jumps over the lazy dog";
        let doc = RichDocument::from_plain(text);
        let pages = paginate(&doc, 10.0, 3.0, by_chars);
        assert_eq!(all_lines(&pages).concat(), text);
    }

    #[test]
    fn test_breaks_pages_at_height() {
        let doc = RichDocument::from_plain("1\n2\n3\n4\n5");
        let pages = paginate(&doc, 80.0, 2.0, by_chars);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[2].lines.len(), 1);
    }

    #[test]
    fn test_blank_lines_keep_height() {
        let doc = RichDocument::from_plain("a\n\nb");
        let pages = paginate(&doc, 80.0, 60.0, by_chars);
        assert_eq!(pages[0].lines.len(), 3);
        assert_eq!(pages[0].lines[1].height, 1.0);
    }

    #[test]
    fn test_formats_split_fragments() {
        let mut doc = RichDocument::from_plain("plain bold");
        doc.toggle(6, 10, Toggle::Bold);
        let pages = paginate(&doc, 80.0, 60.0, by_chars);
        let frags = &pages[0].lines[0].fragments;
        assert_eq!(frags.len(), 2);
        assert_eq!(frags[1].text, "bold");
        assert_eq!(frags[1].x, 6.0);
        assert!(frags[1].format.bold);
    }

    #[test]
    fn test_image_prints_as_label() {
        let mut doc = RichDocument::from_plain("see ");
        doc.insert_image(4, ImageRef { src: "/x/chart.png".into(), width: 200 });
        let pages = paginate(&doc, 80.0, 60.0, by_chars);
        assert_eq!(all_lines(&pages), vec!["see [image: chart.png]"]);
    }

    #[test]
    fn test_selected_pages_defaults_to_all() {
        assert_eq!(selected_pages(5, None, None), 0..5);
    }

    #[test]
    fn test_selected_pages_follows_dialog_range() {
        assert_eq!(selected_pages(5, Some(2), Some(3)), 1..3);
        assert_eq!(selected_pages(5, Some(4), None), 3..5);
        assert_eq!(selected_pages(5, None, Some(1)), 0..1);
    }

    #[test]
    fn test_selected_pages_clamped() {
        assert_eq!(selected_pages(3, Some(2), Some(99)), 1..3);
        assert_eq!(selected_pages(3, Some(7), Some(9)), 3..3);
        assert_eq!(selected_pages(3, Some(3), Some(1)), 2..2);
        assert_eq!(selected_pages(3, Some(0), Some(0)), 0..0);
    }

    #[test]
    fn test_empty_document_has_one_page() {
        let pages = paginate(&RichDocument::new(), 80.0, 60.0, by_chars);
        assert_eq!(pages.len(), 1);
    }
}
