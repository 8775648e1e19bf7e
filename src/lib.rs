//! `diff-tables` library crate.
//!
//! The binary (`dtab`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the engines are reusable from other tools
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod expr;
pub mod io;
pub mod math;
pub mod report;
