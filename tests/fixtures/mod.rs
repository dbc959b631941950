//! Test fixtures and data generators
//!
//! Builders that assemble `.splice` byte buffers for decoder tests.

pub mod builders;

pub use builders::*;
