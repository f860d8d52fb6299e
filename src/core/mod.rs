//! Core domain models for sleep-session records.
//!
//! This module defines the fundamental data structure produced by the cleaning
//! pipeline, representing one detected sleep session with its quality metrics
//! and localized timestamps.

pub mod domain;
