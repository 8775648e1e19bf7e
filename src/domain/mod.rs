//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the selectable operations (`Operation`)
//! - computed tables and their cells (`Table`, `Cell`)
//! - the validated run configuration (`JobConfig`)

pub mod types;

pub use types::*;
