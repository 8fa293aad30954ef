use std::cell::Cell;
use std::rc::Rc;

use fltk::{
    app::{self, Sender},
    enums::Event,
    prelude::*,
    text::TextEditor,
};

use crate::app::messages::Message;
use crate::app::services::dropped::parse_dropped_paths;

/// Let the editor accept files dropped from the desktop.
///
/// FLTK delivers a drop as a Paste event right after DndRelease. Only that
/// paste is taken over, and only when it names existing files; keyboard
/// pastes and dragged plain text fall through to the editor.
pub fn install_drop_target(editor: &mut TextEditor, sender: Sender<Message>) {
    let dropping = Rc::new(Cell::new(false));
    editor.handle(move |_, event| match event {
        Event::DndEnter | Event::DndDrag => true,
        Event::DndLeave => {
            dropping.set(false);
            true
        }
        Event::DndRelease => {
            dropping.set(true);
            true
        }
        Event::Paste if dropping.replace(false) => {
            let paths = parse_dropped_paths(&app::event_text());
            if paths.is_empty() || !paths.iter().all(|p| p.exists()) {
                return false;
            }
            log::debug!("{} file(s) dropped", paths.len());
            sender.send(Message::FilesDropped(paths));
            true
        }
        _ => false,
    });
}
