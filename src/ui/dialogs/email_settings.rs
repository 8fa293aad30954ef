use fltk::{
    button::{Button, ReturnButton},
    dialog,
    enums::Align,
    frame::Frame,
    input::{Input, SecretInput},
    prelude::*,
    window::Window,
};
use std::cell::RefCell;
use std::rc::Rc;

use crate::app::domain::EmailCredentials;

const HELP_TEXT: &str = "Enter your email address and password to configure the email settings.\n\n\
This information will be used to send emails from the application.";

/// Show the Email Settings dialog. Returns the validated credentials on OK,
/// `None` on Cancel or close. Blank fields keep the dialog open.
pub fn show_email_settings_dialog(current: Option<&EmailCredentials>) -> Option<EmailCredentials> {
    let mut dialog = Window::default()
        .with_size(400, 140)
        .with_label("Email Settings")
        .center_screen();
    dialog.make_modal(true);

    Frame::default()
        .with_pos(10, 15)
        .with_size(110, 28)
        .with_label("Email Address:")
        .with_align(Align::Right | Align::Inside);
    let mut address_input = Input::default().with_pos(125, 15).with_size(260, 28);
    address_input.set_tooltip("Enter your email address");

    Frame::default()
        .with_pos(10, 50)
        .with_size(110, 28)
        .with_label("Password:")
        .with_align(Align::Right | Align::Inside);
    let mut password_input = SecretInput::default().with_pos(125, 50).with_size(260, 28);
    password_input.set_tooltip("Enter your password");

    if let Some(creds) = current {
        address_input.set_value(&creds.address);
        password_input.set_value(&creds.password);
    }

    let mut help_btn = Button::default().with_pos(15, 100).with_size(80, 30).with_label("Help");
    let mut ok_btn = ReturnButton::default().with_pos(215, 100).with_size(80, 30).with_label("OK");
    let mut cancel_btn = Button::default().with_pos(305, 100).with_size(80, 30).with_label("Cancel");

    dialog.end();
    dialog.show();

    let result = Rc::new(RefCell::new(None));

    let result_ok = result.clone();
    let dialog_ok = dialog.clone();
    ok_btn.set_callback(move |_| {
        match EmailCredentials::validate(&address_input.value(), &password_input.value()) {
            Ok(creds) => {
                *result_ok.borrow_mut() = Some(creds);
                dialog_ok.clone().hide();
            }
            Err(e) => dialog::alert_default(&e.to_string()),
        }
    });

    help_btn.set_callback(|_| dialog::message_default(HELP_TEXT));

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
