//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - The rich-text document and its character formats
//! - Email providers and credentials

pub mod document;
pub mod email;
pub mod format;

pub use document::{OBJECT_REPLACEMENT, RichDocument};
pub use email::{EmailCredentials, EmailProvider, SmtpEndpoint};
pub use format::{CharFormat, FontFace, FontFamily, FormatPatch, ImageRef, Rgb, Toggle};
