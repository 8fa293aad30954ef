//! Services layer - business operations and utilities.
//!
//! This module contains business logic and operations:
//! - Document load/save and the rich markup format
//! - Keyword highlighting
//! - Email composition and delivery
//! - Drag-and-drop classification
//! - Print pagination

pub mod dropped;
pub mod file_io;
pub mod highlight;
pub mod mailer;
pub mod markup;
pub mod print_layout;
