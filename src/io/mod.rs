//! Input/output helpers.
//!
//! - whitespace-pair sample ingest (`ingest`)
//! - report JSON read/write (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
