//! Frame-level cleaning transformations.
//!
//! This module provides the operations the pipeline applies to the projected
//! sleep frame: dropping unscored rows, localizing timestamps, imputing
//! missing nap scores, deriving the nap flag, and filtering typed records for
//! presentation.
//!
//! # Modules
//!
//! - [`cleaning`]: Row filter, nap-score imputation, nap flag derivation
//! - [`timezone`]: Localize timestamp columns into the fixed zone
//! - [`filtering`]: Split typed records by the nap flag
//!
//! # Example
//!
//! ```no_run
//! use sleep_insights::transformations::{drop_missing_scores, impute_nap_score};
//! use polars::prelude::*;
//!
//! # fn example(df: DataFrame) -> PolarsResult<()> {
//! let scored = drop_missing_scores(&df)?;
//! let (imputed, filled) = impute_nap_score(&scored)?;
//! println!("Filled {} nap scores", filled);
//! # Ok(())
//! # }
//! ```

pub mod cleaning;
pub mod filtering;
pub mod timezone;

pub use cleaning::{add_nap_flag, drop_missing_scores, impute_nap_score};
pub use filtering::{filter_by_nap, NapFilter};
pub use timezone::localize_timestamps;
