use fltk::{
    enums::Color,
    menu::MenuBar,
    prelude::*,
    text::TextEditor,
    window::Window,
};

use super::main_window::Toolbar;

pub fn apply_theme(
    editor: &mut TextEditor,
    window: &mut Window,
    menu: &mut MenuBar,
    toolbar: &mut Toolbar,
    is_dark: bool,
) {
    let (bg, fg) = if is_dark {
        // #333333 with white text
        (Color::from_rgb(51, 51, 51), Color::White)
    } else {
        (Color::from_rgb(240, 240, 240), Color::Black)
    };

    if is_dark {
        editor.set_color(bg);
        editor.set_text_color(fg);
        editor.set_cursor_color(Color::White);
        editor.set_selection_color(Color::from_rgb(70, 70, 100));
        menu.set_selection_color(Color::from_rgb(80, 80, 80)); // Hover color
    } else {
        editor.set_color(Color::White);
        editor.set_text_color(fg);
        editor.set_cursor_color(Color::Black);
        editor.set_selection_color(Color::from_rgb(173, 216, 230));
        menu.set_selection_color(Color::from_rgb(200, 200, 200)); // Hover color
    }
    window.set_color(bg);
    window.set_label_color(fg);
    menu.set_color(bg);
    menu.set_text_color(fg);

    for row in &mut toolbar.rows {
        row.set_color(bg);
        for i in 0..row.children() {
            if let Some(mut child) = row.child(i) {
                child.set_color(bg);
                child.set_label_color(fg);
            }
        }
        row.redraw();
    }
    toolbar.provider_choice.set_text_color(fg);

    editor.redraw();
    window.redraw();
    menu.redraw();
}

/// Set Windows title bar theme (Windows 10 build 1809+)
/// Must be called AFTER window.show() to have a valid HWND
#[cfg(target_os = "windows")]
pub fn set_windows_titlebar_theme(window: &Window, is_dark: bool) {
    use std::mem::size_of;
    use std::ptr::from_ref;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::Graphics::Dwm::{DWMWINDOWATTRIBUTE, DwmSetWindowAttribute};

    if !window.shown() {
        return;
    }

    unsafe {
        let hwnd = HWND(window.raw_handle() as *mut std::ffi::c_void);
        let on: i32 = if is_dark { 1 } else { 0 };

        // DWMWA_USE_IMMERSIVE_DARK_MODE is 20 on current builds, 19 on 1809-1903
        for attr in [20, 19] {
            let _ = DwmSetWindowAttribute(
                hwnd,
                DWMWINDOWATTRIBUTE(attr),
                from_ref(&on).cast(),
                size_of::<i32>() as u32,
            );
        }
    }
}
