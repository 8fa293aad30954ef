pub mod dialogs;
pub mod drop_target;
pub mod file_dialogs;
pub mod main_window;
pub mod menu;
pub mod print;
pub mod theme;
