//! Cleaning and visualization pipeline for personal sleep-tracking exports.
//!
//! Repairs a malformed sleep CSV export, projects and renames the feature
//! columns, drops rows without a sleep score, localizes timestamps to
//! America/Santiago, imputes missing nap scores from session duration, and
//! persists the cleaned table alongside two exploratory charts.

pub mod core;
pub mod io;
pub mod parsing;
pub mod plotting;
pub mod preprocessing;
pub mod time;
pub mod transformations;
