use fltk::dialog::{FileDialogType, NativeFileChooser, NativeFileChooserOptions};

fn chooser(kind: FileDialogType, title: &str, filter: &str, dir: Option<&str>) -> NativeFileChooser {
    let mut nfc = NativeFileChooser::new(kind);
    nfc.set_title(title);
    nfc.set_filter(filter);
    if let Some(dir) = dir
        && let Err(e) = nfc.set_directory(&dir)
    {
        log::debug!("Could not start chooser in {}: {}", dir, e);
    }
    nfc
}

/// Block until the chooser closes; `None` on cancel.
fn picked(mut nfc: NativeFileChooser) -> Option<String> {
    nfc.show();
    let filename = nfc.filename();
    let s = filename.to_string_lossy();
    if s.is_empty() { None } else { Some(s.to_string()) }
}

pub fn native_open_dialog(title: &str, filter: &str, dir: Option<&str>) -> Option<String> {
    picked(chooser(FileDialogType::BrowseFile, title, filter, dir))
}

pub fn native_save_dialog(title: &str, filter: &str, dir: Option<&str>) -> Option<String> {
    let mut nfc = chooser(FileDialogType::BrowseSaveFile, title, filter, dir);
    nfc.set_option(NativeFileChooserOptions::SaveAsConfirm);
    picked(nfc)
}
