//! Parsers and repair utilities for the raw sleep export.
//!
//! This module turns the tracker's malformed CSV export into a usable frame:
//! a streaming sanitizer removes the trailing-separator noise the export pads
//! onto every line, and the CSV parser loads the repaired file, projects the
//! feature columns, and converts cleaned frames to typed records and back.
//!
//! # Modules
//!
//! - [`sanitizer`]: Strip trailing separator runs from each raw line
//! - [`csv_parser`]: Parse the sanitized CSV, project columns, convert frames
//!
//! # Example
//!
//! ```no_run
//! use sleep_insights::parsing::{csv_parser, sanitize_export};
//! use std::path::Path;
//!
//! sanitize_export(Path::new("sleep.csv"), Path::new("sleep_pre.csv"))
//!     .expect("Failed to sanitize export");
//! let df = csv_parser::parse_sleep_csv(Path::new("sleep_pre.csv"))
//!     .expect("Failed to parse export");
//! ```

pub mod csv_parser;
pub mod sanitizer;


pub use sanitizer::sanitize_export;
