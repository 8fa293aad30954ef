use std::cell::RefCell;
use std::rc::Rc;

use fltk::app::Sender;
use fltk::text::TextBuffer;

use super::domain::RichDocument;
use super::infrastructure::buffer::buffer_text_range_no_leak;
use super::messages::Message;
use super::services::file_io::extract_filename;

/// The open document: the FLTK text and style buffers plus the rich model
/// they display.
///
/// Edits typed into the editor reach the model through the buffer's modify
/// callback. Changes made from code (open, drop, insert image) hold a mutable
/// borrow of the model while they touch the buffer, which the callback
/// detects and skips, so nothing is mirrored twice.
pub struct EditorDocument {
    pub buffer: TextBuffer,
    pub style_buffer: TextBuffer,
    pub model: Rc<RefCell<RichDocument>>,
    pub file_path: Option<String>,
    pub display_name: String,
}

impl EditorDocument {
    pub fn new(sender: Sender<Message>) -> Self {
        let mut buffer = TextBuffer::default();
        let style_buffer = TextBuffer::default();
        let model = Rc::new(RefCell::new(RichDocument::new()));

        let mirror = model.clone();
        let text_buf = buffer.clone();
        let mut style_buf = style_buffer.clone();
        buffer.add_modify_callback(move |pos, inserted, deleted, _restyled, _deleted_text| {
            if inserted <= 0 && deleted <= 0 {
                return;
            }
            if deleted > 0 {
                style_buf.remove(pos, pos + deleted);
            }
            if inserted > 0 {
                let filler = "A".repeat(inserted as usize);
                style_buf.insert(pos, &filler);
            }
            if let Ok(mut doc) = mirror.try_borrow_mut() {
                let start = pos as usize;
                if deleted > 0 {
                    doc.remove(start, start + deleted as usize);
                }
                if inserted > 0 {
                    let text = buffer_text_range_no_leak(&text_buf, pos, pos + inserted);
                    doc.insert(start, &text);
                }
            }
            sender.send(Message::BufferModified);
        });

        Self {
            buffer,
            style_buffer,
            model,
            file_path: None,
            display_name: "Untitled".to_string(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.model.borrow().is_modified()
    }

    pub fn mark_clean(&self) {
        self.model.borrow_mut().mark_clean();
    }

    /// Run an edit on the model from code, then show the model's text.
    pub fn apply<T>(&mut self, edit: impl FnOnce(&mut RichDocument) -> T) -> T {
        let mut model = self.model.borrow_mut();
        let out = edit(&mut model);
        self.buffer.set_text(model.text());
        out
    }

    /// Swap in a freshly loaded document and show its text.
    pub fn replace(&mut self, doc: RichDocument, path: Option<String>) {
        self.apply(|model| *model = doc);
        self.set_path(path);
    }

    pub fn set_path(&mut self, path: Option<String>) {
        self.file_path = path;
        self.update_display_name();
    }

    pub fn update_display_name(&mut self) {
        self.display_name = match self.file_path {
            Some(ref path) => extract_filename(path),
            None => "Untitled".to_string(),
        };
    }
}
