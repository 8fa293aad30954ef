use fltk::{
    button::{Button, ReturnButton},
    enums::Align,
    frame::Frame,
    menu::Choice,
    misc::Spinner,
    prelude::*,
    window::Window,
};
use std::cell::RefCell;
use std::rc::Rc;

use crate::app::domain::{FontFace, FontFamily};

/// Pick a font family and point size. `None` when cancelled.
pub fn show_font_dialog(current: FontFace) -> Option<FontFace> {
    let mut dialog = Window::default()
        .with_size(300, 130)
        .with_label("Select Font")
        .center_screen();
    dialog.make_modal(true);

    Frame::default()
        .with_pos(10, 15)
        .with_size(70, 28)
        .with_label("Family:")
        .with_align(Align::Right | Align::Inside);
    let mut family_choice = Choice::default().with_pos(90, 15).with_size(195, 28);
    for family in FontFamily::all() {
        family_choice.add_choice(family.display_name());
    }
    family_choice.set_value(family_index(current.family));

    Frame::default()
        .with_pos(10, 50)
        .with_size(70, 28)
        .with_label("Size:")
        .with_align(Align::Right | Align::Inside);
    let mut size_spinner = Spinner::default().with_pos(90, 50).with_size(80, 28);
    size_spinner.set_range(f64::from(FontFace::MIN_SIZE), f64::from(FontFace::MAX_SIZE));
    size_spinner.set_step(1.0);
    size_spinner.set_value(f64::from(FontFace::clamp_size(f64::from(current.size))));

    let mut ok_btn = ReturnButton::default().with_pos(115, 90).with_size(80, 30).with_label("OK");
    let mut cancel_btn = Button::default().with_pos(205, 90).with_size(80, 30).with_label("Cancel");

    dialog.end();
    dialog.show();

    let result = Rc::new(RefCell::new(None));

    let result_ok = result.clone();
    let dialog_ok = dialog.clone();
    ok_btn.set_callback(move |_| {
        let family = index_to_family(family_choice.value()).unwrap_or(current.family);
        let size = FontFace::clamp_size(size_spinner.value());
        *result_ok.borrow_mut() = Some(FontFace { family, size });
        dialog_ok.clone().hide();
    });

    let dialog_cancel = dialog.clone();
    cancel_btn.set_callback(move |_| {
        dialog_cancel.clone().hide();
    });

    dialog.set_callback(move |w| {
        w.hide();
    });

    super::run_dialog(&dialog);

    result.borrow_mut().take()
}

/// Convert FontFamily to dropdown index
fn family_index(family: FontFamily) -> i32 {
    FontFamily::all()
        .iter()
        .position(|f| *f == family)
        .map(|i| i as i32)
        .unwrap_or(0)
}

/// Convert dropdown index to FontFamily
fn index_to_family(index: i32) -> Option<FontFamily> {
    if index < 0 {
        return None;
    }
    FontFamily::all().get(index as usize).copied()
}
