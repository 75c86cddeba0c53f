//! Utility functions shared across the application.
//!
//! - [`code_generator`] - Short code generation
//! - [`time_format`] - Record timestamp formatting

pub mod code_generator;
pub mod time_format;
