//! Console rendering of computed tables.

pub mod format;

pub use format::*;
