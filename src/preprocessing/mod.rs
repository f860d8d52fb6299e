//! Pipeline orchestration and data-quality validation.
//!
//! This module sequences the cleaning stages over a raw export and checks the
//! result against the invariants the pipeline promises.
//!
//! # Modules
//!
//! - [`pipeline`]: Run sanitize, parse, filter, localize, impute and flag in order
//! - [`validator`]: Invariant checks and quality findings over the cleaned data

pub mod pipeline;
pub mod validator;

pub use pipeline::{clean_sleep_export, CleanConfig, CleanPipeline, CleanResult};
pub use validator::{SleepValidator, ValidationResult, ValidationStats};
