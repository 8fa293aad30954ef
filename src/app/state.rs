use std::path::{Path, PathBuf};

use fltk::{
    app::Sender,
    dialog::{self, ColorMode},
    enums::Font,
    menu::MenuBar,
    prelude::*,
    text::{TextEditor, WrapMode},
    window::Window,
};

use super::document::EditorDocument;
use super::domain::{EmailCredentials, EmailProvider, FontFace, FontFamily, FormatPatch, Rgb, Toggle};
use super::error::Result;
use super::file_filters::{document_filter, image_filter};
use super::infrastructure::style_map::StyleMap;
use super::messages::Message;
use super::services::dropped::{DropAction, DropOutcome, apply_drop, classify};
use super::services::file_io::{load_document, save_document};
use super::services::highlight::KeywordHighlighter;
use super::services::mailer::{SmtpMailer, send_document};
use super::settings::AppSettings;
use crate::ui::dialogs::email_settings::show_email_settings_dialog;
use crate::ui::dialogs::font::show_font_dialog;
use crate::ui::file_dialogs::{native_open_dialog, native_save_dialog};
use crate::ui::main_window::Toolbar;
use crate::ui::print::print_document;
use crate::ui::theme::apply_theme;
#[cfg(target_os = "windows")]
use crate::ui::theme::set_windows_titlebar_theme;

pub const APP_NAME: &str = "Docs on Ketamine";

pub struct AppState {
    pub document: EditorDocument,
    pub editor: TextEditor,
    pub window: Window,
    pub menu: MenuBar,
    pub toolbar: Toolbar,
    pub settings: AppSettings,
    pub dark_mode: bool,
    /// Provider picked in the toolbar dropdown. Not persisted.
    pub provider: EmailProvider,
    /// Set through File/Email Settings. Not persisted.
    pub credentials: Option<EmailCredentials>,
    highlighter: KeywordHighlighter,
    style_map: StyleMap,
    /// Last directory used in a file open/save dialog.
    pub last_open_directory: Option<String>,
}

impl AppState {
    pub fn new(
        mut editor: TextEditor,
        window: Window,
        menu: MenuBar,
        toolbar: Toolbar,
        sender: Sender<Message>,
        settings: AppSettings,
    ) -> Result<Self> {
        let highlighter = KeywordHighlighter::new()?;
        let style_map = StyleMap::new(settings.font_size, false);
        let document = EditorDocument::new(sender);

        editor.set_buffer(document.buffer.clone());
        editor.set_text_font(Font::Helvetica);
        editor.set_text_size(settings.font_size as i32);
        editor.wrap_mode(WrapMode::AtBounds, 0);

        let mut state = Self {
            document,
            editor,
            window,
            menu,
            toolbar,
            settings,
            dark_mode: false,
            provider: EmailProvider::default(),
            credentials: None,
            highlighter,
            style_map,
            last_open_directory: None,
        };
        state.apply_theme();
        state.restyle();
        state.update_window_title();
        Ok(state)
    }

    /// Update the window title based on the document
    pub fn update_window_title(&mut self) {
        let prefix = if self.document.is_dirty() { "*" } else { "" };
        self.window.set_label(&format!(
            "{}{} - {}",
            prefix, self.document.display_name, APP_NAME
        ));
    }

    /// Rebuild the style buffer and table from the model and redraw.
    pub fn restyle(&mut self) {
        let styles = {
            let doc = self.document.model.borrow();
            let spans = if self.settings.highlighting_enabled {
                self.highlighter.highlight(doc.text())
            } else {
                Vec::new()
            };
            self.style_map.build(&doc, &spans)
        };
        self.document.style_buffer.set_text(&styles);
        self.editor
            .set_highlight_data_ext(self.document.style_buffer.clone(), self.style_map.entries());
        self.editor.redraw();
    }

    pub fn on_buffer_modified(&mut self) {
        self.restyle();
        self.update_window_title();
    }

    fn remember_directory(&mut self, path: &str) {
        if let Some(parent) = Path::new(path).parent() {
            self.last_open_directory = Some(parent.to_string_lossy().to_string());
        }
    }

    /// Selected byte range, or an empty range at the cursor.
    fn selection_or_cursor(&self) -> (usize, usize) {
        match self.document.buffer.selection_position() {
            Some((start, end)) if start != end => (start as usize, end as usize),
            _ => {
                let pos = self.editor.insert_position().max(0) as usize;
                (pos, pos)
            }
        }
    }

    // --- File operations ---

    pub fn open_file(&mut self, path: String) {
        self.remember_directory(&path);
        match load_document(Path::new(&path)) {
            Ok(doc) => {
                self.document.replace(doc, Some(path));
                self.editor.set_insert_position(0);
                self.restyle();
                self.update_window_title();
            }
            Err(e) => {
                log::warn!("Failed to open {}: {}", path, e);
                dialog::alert_default(&format!("Error opening file: {}", e));
            }
        }
    }

    pub fn file_open(&mut self) {
        let dir = self.last_open_directory.clone();
        if let Some(path) = native_open_dialog("Open File", &document_filter(), dir.as_deref()) {
            self.open_file(path);
        }
    }

    pub fn file_save(&mut self) {
        let dir = self.last_open_directory.clone();
        let Some(path) = native_save_dialog("Save File", &document_filter(), dir.as_deref()) else {
            return;
        };
        self.remember_directory(&path);

        let result = {
            let doc = self.document.model.borrow();
            save_document(Path::new(&path), &doc, self.settings.save_format)
        };
        match result {
            Ok(()) => {
                self.document.mark_clean();
                self.document.file_path = Some(path);
                self.document.update_display_name();
                self.update_window_title();
            }
            Err(e) => {
                log::warn!("Failed to save {}: {}", path, e);
                dialog::alert_default(&format!("Error saving file: {}", e));
            }
        }
    }

    pub fn file_print(&mut self) {
        let result = {
            let doc = self.document.model.borrow();
            print_document(&doc, self.style_map.base_size())
        };
        if let Err(e) = result {
            log::warn!("Printing failed: {}", e);
            dialog::alert_default(&format!("Error printing document: {}", e));
        }
    }

    // --- Email ---

    pub fn send_email(&mut self) {
        let result = {
            let doc = self.document.model.borrow();
            send_document(&SmtpMailer, self.provider, self.credentials.as_ref(), &doc)
        };
        match result {
            Ok(()) => {
                log::info!("Document sent via {}", self.provider.display_name());
                dialog::message_default("Email sent successfully!");
            }
            Err(e) => {
                log::warn!("Sending failed: {}", e);
                dialog::alert_default(&e.to_string());
            }
        }
    }

    pub fn email_settings(&mut self) {
        if let Some(credentials) = show_email_settings_dialog(self.credentials.as_ref()) {
            log::debug!("Email settings updated for {}", credentials.address);
            self.credentials = Some(credentials);
            dialog::message_default("Email settings updated successfully.");
        }
    }

    pub fn provider_changed(&mut self, provider: EmailProvider) {
        log::debug!("Email provider set to {}", provider.display_name());
        self.provider = provider;
    }

    // --- Format ---

    pub fn toggle(&mut self, toggle: Toggle) {
        let (start, end) = self.selection_or_cursor();
        self.document.model.borrow_mut().toggle(start, end, toggle);
        self.on_buffer_modified();
    }

    fn merge_format(&mut self, patch: FormatPatch) {
        let (start, end) = self.selection_or_cursor();
        self.document.model.borrow_mut().merge_format(start, end, &patch);
        self.on_buffer_modified();
    }

    pub fn text_color(&mut self) {
        if let Some((r, g, b)) = dialog::color_chooser("Select Color", ColorMode::Rgb) {
            self.merge_format(FormatPatch::color(Rgb::new(r, g, b)));
        }
    }

    pub fn change_font(&mut self) {
        let (start, _) = self.selection_or_cursor();
        let current = self
            .document
            .model
            .borrow()
            .insertion_format(start)
            .font
            .unwrap_or(FontFace {
                family: FontFamily::Helvetica,
                size: self.settings.font_size,
            });
        if let Some(face) = show_font_dialog(current) {
            self.merge_format(FormatPatch::font(face));
        }
    }

    pub fn insert_image(&mut self) {
        let dir = self.last_open_directory.clone();
        if let Some(path) = native_open_dialog("Insert Image", &image_filter(), dir.as_deref()) {
            self.remember_directory(&path);
            self.insert_image_file(Path::new(&path));
        }
    }

    fn insert_image_file(&mut self, path: &Path) {
        self.handle_drop(DropAction::InsertImage(path.to_path_buf()));
    }

    // --- Drag and drop ---

    pub fn files_dropped(&mut self, paths: Vec<PathBuf>) {
        for path in paths {
            self.handle_drop(classify(path));
        }
    }

    fn handle_drop(&mut self, action: DropAction) {
        let pos = self.editor.insert_position().max(0);
        let width = self.settings.image_width;
        let result = self
            .document
            .apply(|model| apply_drop(model, action, pos as usize, width));
        match result {
            Ok(DropOutcome::ImageInserted) => {
                self.editor.set_insert_position(pos + OBJECT_LEN);
            }
            Ok(DropOutcome::DocumentReplaced(path)) => {
                let path = path.to_string_lossy().into_owned();
                self.remember_directory(&path);
                self.document.set_path(Some(path));
                self.editor.set_insert_position(0);
            }
            Ok(DropOutcome::Ignored) => {
                self.editor.set_insert_position(pos);
                return;
            }
            Err(e) => {
                self.editor.set_insert_position(pos);
                log::warn!("Failed to apply drop: {}", e);
                dialog::alert_default(&format!("Error opening file: {}", e));
                return;
            }
        }
        self.on_buffer_modified();
    }

    // --- View toggles ---

    fn apply_theme(&mut self) {
        apply_theme(
            &mut self.editor,
            &mut self.window,
            &mut self.menu,
            &mut self.toolbar,
            self.dark_mode,
        );
        #[cfg(target_os = "windows")]
        set_windows_titlebar_theme(&self.window, self.dark_mode);
        self.style_map.set_dark_mode(self.dark_mode);
    }

    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
        self.apply_theme();
        self.update_menu_checkbox("View/Toggle Theme", self.dark_mode);
        self.restyle();
    }

    pub fn toggle_highlighting(&mut self) {
        self.settings.highlighting_enabled = !self.settings.highlighting_enabled;
        if let Err(e) = self.settings.save() {
            log::warn!("Failed to save settings: {}", e);
        }
        self.update_menu_checkbox(
            "View/Toggle Syntax Highlighting",
            self.settings.highlighting_enabled,
        );
        self.restyle();
    }

    fn update_menu_checkbox(&self, path: &str, checked: bool) {
        let idx = self.menu.find_index(path);
        if idx >= 0
            && let Some(mut item) = self.menu.at(idx)
        {
            if checked {
                item.set();
            } else {
                item.clear();
            }
        }
    }
}

/// Byte length of the image placeholder character.
const OBJECT_LEN: i32 = super::domain::OBJECT_REPLACEMENT.len_utf8() as i32;
