//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (RichDocument, formats, email providers)
//! - `services/` - Business operations (file I/O, markup, highlighting, mail, printing)
//! - `infrastructure/` - FLTK integrations (buffer access, style table)
//! - `document.rs` - The open document bound to its FLTK buffers
//! - `state.rs` - Main application coordinator

pub mod document;
pub mod domain;
pub mod error;
pub mod file_filters;
pub mod infrastructure;
pub mod messages;
pub mod services;
pub mod settings;
pub mod state;

// Re-exports for convenient external access
pub use domain::{EmailCredentials, EmailProvider, RichDocument};
pub use error::{AppError, MailError};
pub use messages::Message;
pub use settings::{AppSettings, SaveFormat};
