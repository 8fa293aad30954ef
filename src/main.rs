// Hide console window on Windows in release builds
#![cfg_attr(all(target_os = "windows", not(debug_assertions)), windows_subsystem = "windows")]

use fltk::{app, dialog, prelude::*};

use docs_on_ketamine::app::domain::Toggle;
use docs_on_ketamine::app::messages::Message;
use docs_on_ketamine::app::settings::AppSettings;
use docs_on_ketamine::app::state::AppState;
use docs_on_ketamine::ui::drop_target::install_drop_target;
use docs_on_ketamine::ui::main_window::build_main_window;
use docs_on_ketamine::ui::menu::build_menu;
#[cfg(target_os = "windows")]
use docs_on_ketamine::ui::theme::set_windows_titlebar_theme;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = app::App::default().with_scheme(app::Scheme::Gtk);
    let (sender, receiver) = app::channel::<Message>();

    let settings = AppSettings::load();

    let mut w = build_main_window(&sender);
    build_menu(&mut w.menu, &sender, &settings);
    install_drop_target(&mut w.text_editor, sender);

    let mut state = match AppState::new(w.text_editor, w.wind, w.menu, w.toolbar, sender, settings) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Failed to start: {}", e);
            dialog::alert_default(&format!("Failed to start: {}", e));
            return;
        }
    };

    state.window.show();
    #[cfg(target_os = "windows")]
    set_windows_titlebar_theme(&state.window, state.dark_mode);
    log::info!("Docs on Ketamine started");

    while app.wait() {
        if let Some(msg) = receiver.recv() {
            log::debug!("Dispatching {:?}", msg);
            match msg {
                Message::FileOpen => state.file_open(),
                Message::FileSave => state.file_save(),
                Message::FilePrint => state.file_print(),
                Message::SendEmail => state.send_email(),
                Message::EmailSettings => state.email_settings(),
                Message::FileQuit => app.quit(),

                Message::Bold => state.toggle(Toggle::Bold),
                Message::Italic => state.toggle(Toggle::Italic),
                Message::Underline => state.toggle(Toggle::Underline),
                Message::TextColor => state.text_color(),
                Message::ChangeFont => state.change_font(),
                Message::InsertImage => state.insert_image(),

                Message::ToggleTheme => state.toggle_theme(),
                Message::ToggleHighlighting => state.toggle_highlighting(),

                Message::ProviderChanged(provider) => state.provider_changed(provider),
                Message::FilesDropped(paths) => state.files_dropped(paths),
                Message::BufferModified => state.on_buffer_modified(),
            }
        }
    }
}
