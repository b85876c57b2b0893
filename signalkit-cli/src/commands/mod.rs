//! Command implementations for the signalkit CLI

pub mod serve;
pub mod signals;

// Re-export dispatcher functions for flat access from main.rs
pub use serve::run_serve;
pub use signals::{run_count, run_insert, run_recent};
