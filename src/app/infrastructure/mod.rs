//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with FLTK directly:
//! - Buffer access without leaks
//! - Style table construction

pub mod buffer;
pub mod style_map;
