//! Table engines: finite differences and Pascal's triangle.

pub mod difference;
pub mod pascal;

pub use difference::*;
pub use pascal::*;
