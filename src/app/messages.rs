use std::path::PathBuf;

use super::domain::EmailProvider;

/// All messages that can be sent through the FLTK channel.
/// Each menu callback sends one of these; the dispatch loop in main handles them.
#[derive(Debug, Clone)]
pub enum Message {
    // File
    FileOpen,
    FileSave,
    FilePrint,
    SendEmail,
    EmailSettings,
    FileQuit,

    // Format
    Bold,
    Italic,
    Underline,
    TextColor,
    ChangeFont,
    InsertImage,

    // View
    ToggleTheme,
    ToggleHighlighting,

    // Email provider dropdown
    ProviderChanged(EmailProvider),

    // Editor events
    FilesDropped(Vec<PathBuf>),
    BufferModified,
}
