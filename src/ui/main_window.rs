use fltk::{
    app::Sender,
    button::Button,
    dialog,
    frame::Frame,
    group::Flex,
    menu::{Choice, MenuBar},
    prelude::*,
    text::TextEditor,
    window::Window,
};

use crate::app::domain::EmailProvider;
use crate::app::messages::Message;
use crate::app::state::APP_NAME;

const TOOLBAR_HEIGHT: i32 = 30;

/// The two toolbar rows under the menu bar.
pub struct Toolbar {
    pub rows: Vec<Flex>,
    pub provider_choice: Choice,
}

pub struct MainWidgets {
    pub wind: Window,
    pub menu: MenuBar,
    pub toolbar: Toolbar,
    pub text_editor: TextEditor,
}

pub fn build_main_window(sender: &Sender<Message>) -> MainWidgets {
    let mut wind = Window::new(100, 100, 1000, 700, None);
    wind.set_label(&format!("Untitled - {}", APP_NAME));
    wind.set_xclass("DocsOnKetamine");

    let mut flex = Flex::new(0, 0, 1000, 700, None);
    flex.set_type(fltk::group::FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, 30, "");
    flex.fixed(&menu, 30);

    let format_row = build_format_row(sender);
    flex.fixed(&format_row, TOOLBAR_HEIGHT);
    let (email_row, provider_choice) = build_email_row(sender);
    flex.fixed(&email_row, TOOLBAR_HEIGHT);

    let text_editor = TextEditor::new(0, 0, 0, 0, "");

    flex.end();
    wind.resizable(&flex);
    wind.end();

    MainWidgets {
        wind,
        menu,
        toolbar: Toolbar {
            rows: vec![format_row, email_row],
            provider_choice,
        },
        text_editor,
    }
}

fn toolbar_button(row: &mut Flex, label: &str, width: i32, sender: Sender<Message>, msg: Message) {
    let mut btn = Button::default().with_label(label);
    btn.set_callback(move |_| sender.send(msg.clone()));
    row.fixed(&btn, width);
}

fn build_format_row(sender: &Sender<Message>) -> Flex {
    let mut row = Flex::default().row();
    row.set_margin(2);
    row.set_pad(4);
    toolbar_button(&mut row, "Bold", 60, *sender, Message::Bold);
    toolbar_button(&mut row, "Italic", 60, *sender, Message::Italic);
    toolbar_button(&mut row, "Underline", 80, *sender, Message::Underline);
    toolbar_button(&mut row, "Text Color", 90, *sender, Message::TextColor);
    toolbar_button(&mut row, "Font", 60, *sender, Message::ChangeFont);
    toolbar_button(&mut row, "Insert Image", 100, *sender, Message::InsertImage);
    Frame::default();
    row.end();
    row
}

fn build_email_row(sender: &Sender<Message>) -> (Flex, Choice) {
    let mut row = Flex::default().row();
    row.set_margin(2);
    row.set_pad(4);
    toolbar_button(&mut row, "Toggle Theme", 110, *sender, Message::ToggleTheme);

    let label = Frame::default().with_label("Email Provider:");
    row.fixed(&label, 110);

    let mut choice = Choice::default();
    for provider in EmailProvider::all() {
        choice.add_choice(provider.display_name());
    }
    choice.set_value(0);
    let s = *sender;
    choice.set_callback(move |c| {
        let Some(name) = c.choice() else { return };
        match EmailProvider::from_name(&name) {
            Ok(provider) => s.send(Message::ProviderChanged(provider)),
            Err(e) => dialog::alert_default(&e.to_string()),
        }
    });
    row.fixed(&choice, 130);

    Frame::default();
    row.end();
    (row, choice)
}
