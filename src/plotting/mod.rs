//! Exploratory charts over the cleaned records.

pub mod charts;

pub use charts::{render_duration_histogram, render_score_vs_duration};
