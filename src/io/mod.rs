//! Input/output helpers.
//!
//! - CSV ingest + x-value parsing (`ingest`)
//! - table serialization + CSV export (`export`)
//! - table JSON read/write (`json`)

pub mod export;
pub mod ingest;
pub mod json;

pub use export::*;
pub use ingest::*;
pub use json::*;
