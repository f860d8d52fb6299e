//! File output for the cleaned dataset.

pub mod writers;

pub use writers::write_cleaned_csv;
