use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Markup error: {0}")]
    Markup(String),

    #[error("Highlighter error: {0}")]
    Highlight(#[from] regex_lite::Error),

    #[error("Print error: {0}")]
    Print(String),

    #[error(transparent)]
    Mail(#[from] MailError),
}

impl From<fltk::prelude::FltkError> for AppError {
    fn from(err: fltk::prelude::FltkError) -> Self {
        AppError::Print(err.to_string())
    }
}

/// Failures of the send-email command. Every variant is shown to the user as is.
#[derive(Error, Debug)]
pub enum MailError {
    #[error("Email and password cannot be empty.")]
    EmptyCredentials,

    #[error("Please configure your email settings first.")]
    MissingCredentials,

    #[error("Unsupported email provider: {0}")]
    UnsupportedProvider(String),

    #[error("Failed to send email: invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to send email: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("Failed to send email: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;
