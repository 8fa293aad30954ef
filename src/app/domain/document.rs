use super::format::{CharFormat, FormatPatch, ImageRef, Toggle};

/// Placeholder character standing in for an embedded image.
pub const OBJECT_REPLACEMENT: char = '\u{FFFC}';

/// The in-memory rich-text buffer.
///
/// Text is kept as UTF-8 with one [`CharFormat`] per byte, so positions are the
/// same byte offsets FLTK's `TextBuffer` reports. All bytes of a character always
/// share one format. An image is a single [`OBJECT_REPLACEMENT`] character whose
/// format carries the [`ImageRef`].
#[derive(Debug, Clone, Default)]
pub struct RichDocument {
    text: String,
    formats: Vec<CharFormat>,
    /// Format for the next insertion at the given position, set by a merge with
    /// an empty selection.
    typing_format: Option<(usize, CharFormat)>,
    modified: bool,
}

impl RichDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_plain(text: &str) -> Self {
        let mut doc = Self::new();
        doc.push_run(text, CharFormat::default());
        doc
    }

    /// Append text with an explicit format. Used by loaders; does not mark the
    /// document as modified.
    pub fn push_run(&mut self, text: &str, format: CharFormat) {
        self.text.push_str(text);
        self.formats
            .extend(std::iter::repeat_n(format, text.len()));
    }

    pub fn push_image(&mut self, image: ImageRef, format: CharFormat) {
        let format = CharFormat {
            image: Some(image),
            ..format
        };
        let mut buf = [0u8; 4];
        self.push_run(OBJECT_REPLACEMENT.encode_utf8(&mut buf), format);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text with image placeholders removed.
    pub fn plain_text(&self) -> String {
        self.text.chars().filter(|c| *c != OBJECT_REPLACEMENT).collect()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn mark_clean(&mut self) {
        self.modified = false;
    }

    pub fn format_at(&self, pos: usize) -> Option<&CharFormat> {
        self.formats.get(pos)
    }

    /// Format new text at `pos` would get: the pending typing format if one is
    /// set there, else the format of the preceding character (or the following
    /// one at the very start). Images are never inherited.
    pub fn insertion_format(&self, pos: usize) -> CharFormat {
        let pos = self.floor_boundary(pos);
        if let Some((at, fmt)) = &self.typing_format
            && *at == pos
        {
            return fmt.clone();
        }
        let neighbour = if pos > 0 {
            self.formats.get(self.floor_boundary(pos - 1))
        } else {
            self.formats.first()
        };
        neighbour.map(CharFormat::without_image).unwrap_or_default()
    }

    /// Insert typed or pasted text, inheriting the format at `pos`.
    pub fn insert(&mut self, pos: usize, text: &str) {
        let format = self.insertion_format(pos);
        self.insert_with_format(pos, text, format);
    }

    pub fn insert_with_format(&mut self, pos: usize, text: &str, format: CharFormat) {
        if text.is_empty() {
            return;
        }
        let pos = self.floor_boundary(pos);
        self.text.insert_str(pos, text);
        self.formats
            .splice(pos..pos, std::iter::repeat_n(format, text.len()));
        self.typing_format = None;
        self.modified = true;
    }

    pub fn insert_image(&mut self, pos: usize, image: ImageRef) {
        let format = CharFormat {
            image: Some(image),
            ..self.insertion_format(pos)
        };
        let mut buf = [0u8; 4];
        self.insert_with_format(pos, OBJECT_REPLACEMENT.encode_utf8(&mut buf), format);
    }

    /// Remove the byte range `start..end`, clamped to the document.
    pub fn remove(&mut self, start: usize, end: usize) {
        let (start, end) = self.clamp_range(start, end);
        if start == end {
            return;
        }
        self.text.replace_range(start..end, "");
        self.formats.drain(start..end);
        self.typing_format = None;
        self.modified = true;
    }

    /// Merge `patch` into every character of `start..end`. With an empty range
    /// the patch goes into the typing format at `start` instead.
    pub fn merge_format(&mut self, start: usize, end: usize, patch: &FormatPatch) {
        let (start, end) = self.clamp_range(start, end);
        if start == end {
            let mut fmt = self.insertion_format(start);
            fmt.merge(patch);
            self.typing_format = Some((start, fmt));
            return;
        }
        for fmt in &mut self.formats[start..end] {
            fmt.merge(patch);
        }
        self.modified = true;
    }

    /// Toggle an attribute over `start..end`: cleared when every character
    /// already has it, set otherwise.
    pub fn toggle(&mut self, start: usize, end: usize, toggle: Toggle) {
        let (start, end) = self.clamp_range(start, end);
        let all_set = if start == end {
            toggle.is_set(&self.insertion_format(start))
        } else {
            self.formats[start..end].iter().all(|f| toggle.is_set(f))
        };
        self.merge_format(start, end, &toggle.patch(!all_set));
    }

    /// Consecutive stretches of text sharing one format.
    pub fn runs(&self) -> Vec<(&str, &CharFormat)> {
        let mut runs = Vec::new();
        let mut start = 0;
        for i in 1..=self.formats.len() {
            if i == self.formats.len() || self.formats[i] != self.formats[start] {
                runs.push((&self.text[start..i], &self.formats[start]));
                start = i;
            }
        }
        runs
    }

    /// Runs split at newlines: one entry per line, newline characters dropped.
    pub fn lines(&self) -> Vec<Vec<(&str, &CharFormat)>> {
        let mut lines = vec![Vec::new()];
        for (text, fmt) in self.runs() {
            for (i, piece) in text.split('\n').enumerate() {
                if i > 0 {
                    lines.push(Vec::new());
                }
                if !piece.is_empty()
                    && let Some(line) = lines.last_mut()
                {
                    line.push((piece, fmt));
                }
            }
        }
        lines
    }

    pub fn images(&self) -> impl Iterator<Item = &ImageRef> {
        self.text
            .char_indices()
            .filter(|(_, c)| *c == OBJECT_REPLACEMENT)
            .filter_map(|(i, _)| self.formats[i].image.as_ref())
    }

    fn floor_boundary(&self, pos: usize) -> usize {
        let mut pos = pos.min(self.text.len());
        while !self.text.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }

    fn clamp_range(&self, start: usize, end: usize) -> (usize, usize) {
        let (a, b) = if start <= end { (start, end) } else { (end, start) };
        (self.floor_boundary(a), self.floor_boundary(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::format::{FontFace, FontFamily, Rgb};

    fn bold() -> CharFormat {
        CharFormat { bold: true, ..Default::default() }
    }

    #[test]
    fn test_from_plain_is_clean() {
        let doc = RichDocument::from_plain("hello");
        assert_eq!(doc.text(), "hello");
        assert!(!doc.is_modified());
        assert_eq!(doc.runs().len(), 1);
    }

    #[test]
    fn test_insert_keeps_formats_aligned() {
        let mut doc = RichDocument::from_plain("héllo");
        doc.insert(3, "XY");
        assert_eq!(doc.text(), "héXYllo");
        assert_eq!(doc.formats.len(), doc.text().len());
        assert!(doc.is_modified());
    }

    #[test]
    fn test_insert_inside_multibyte_char_snaps_to_boundary() {
        let mut doc = RichDocument::from_plain("é");
        doc.insert(1, "a");
        assert_eq!(doc.text(), "aé");
    }

    #[test]
    fn test_remove_keeps_formats_aligned() {
        let mut doc = RichDocument::from_plain("abcdef");
        doc.merge_format(2, 4, &Toggle::Bold.patch(true));
        doc.remove(1, 3);
        assert_eq!(doc.text(), "adef");
        assert_eq!(doc.formats.len(), 4);
        assert!(doc.format_at(1).unwrap().bold);
        assert!(!doc.format_at(2).unwrap().bold);
    }

    #[test]
    fn test_remove_out_of_range_is_clamped() {
        let mut doc = RichDocument::from_plain("abc");
        doc.remove(2, 99);
        assert_eq!(doc.text(), "ab");
    }

    #[test]
    fn test_bold_twice_restores_original() {
        let mut doc = RichDocument::from_plain("some text");
        let before = doc.runs().iter().map(|(t, f)| (t.to_string(), (*f).clone())).collect::<Vec<_>>();
        doc.toggle(0, 4, Toggle::Bold);
        assert!(doc.format_at(0).unwrap().bold);
        assert!(!doc.format_at(5).unwrap().bold);
        doc.toggle(0, 4, Toggle::Bold);
        let after = doc.runs().iter().map(|(t, f)| (t.to_string(), (*f).clone())).collect::<Vec<_>>();
        assert_eq!(before, after);
    }

    #[test]
    fn test_toggle_partially_bold_selection_sets_all() {
        let mut doc = RichDocument::from_plain("abcd");
        doc.toggle(0, 2, Toggle::Bold);
        doc.toggle(0, 4, Toggle::Bold);
        assert!(doc.runs().iter().all(|(_, f)| f.bold));
    }

    #[test]
    fn test_formatting_never_changes_text() {
        let mut doc = RichDocument::from_plain("keep me");
        doc.toggle(0, 7, Toggle::Italic);
        doc.merge_format(2, 5, &FormatPatch::color(Rgb::new(9, 9, 9)));
        doc.merge_format(0, 3, &FormatPatch::font(FontFace { family: FontFamily::Courier, size: 20 }));
        assert_eq!(doc.text(), "keep me");
    }

    #[test]
    fn test_typed_text_inherits_previous_format() {
        let mut doc = RichDocument::new();
        doc.insert_with_format(0, "ab", bold());
        doc.insert(2, "c");
        assert!(doc.format_at(2).unwrap().bold);
    }

    #[test]
    fn test_typing_format_applies_to_next_insert_only() {
        let mut doc = RichDocument::from_plain("ab");
        doc.toggle(2, 2, Toggle::Underline);
        assert!(!doc.format_at(1).unwrap().underline);
        doc.insert(2, "c");
        assert!(doc.format_at(2).unwrap().underline);
        assert!(!doc.format_at(0).unwrap().underline);
    }

    #[test]
    fn test_typing_format_ignored_at_other_position() {
        let mut doc = RichDocument::from_plain("ab");
        doc.toggle(2, 2, Toggle::Bold);
        doc.insert(0, "x");
        assert!(!doc.format_at(0).unwrap().bold);
    }

    #[test]
    fn test_insert_image() {
        let mut doc = RichDocument::from_plain("ab");
        doc.insert_image(1, ImageRef { src: "/tmp/cat.png".into(), width: 200 });
        assert_eq!(doc.text(), "a\u{FFFC}b");
        let images: Vec<_> = doc.images().collect();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].src, "/tmp/cat.png");
        assert_eq!(doc.plain_text(), "ab");
    }

    #[test]
    fn test_text_after_image_does_not_inherit_image() {
        let mut doc = RichDocument::new();
        doc.insert_image(0, ImageRef { src: "x.png".into(), width: 200 });
        doc.insert(3, "z");
        assert_eq!(doc.images().count(), 1);
        assert!(doc.format_at(3).unwrap().image.is_none());
    }

    #[test]
    fn test_lines_split_runs_at_newlines() {
        let mut doc = RichDocument::from_plain("ab\ncd\n");
        doc.toggle(1, 4, Toggle::Bold);
        let lines = doc.lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].iter().map(|(t, _)| *t).collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(lines[1][0].0, "c");
        assert!(lines[1][0].1.bold);
        assert!(lines[2].is_empty());
    }

    #[test]
    fn test_runs_group_identical_formats() {
        let mut doc = RichDocument::from_plain("aaa");
        doc.push_run("bbb", bold());
        doc.push_run("ccc", bold());
        let runs = doc.runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].0, "bbbccc");
    }
}
