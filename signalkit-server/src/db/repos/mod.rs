//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One pooled connection per call, released on every exit path
//! - One statement per call; no multi-step transactions
//! - Explicit row structs mapped into domain types

pub mod signals;

pub use signals::PgSignalStore;
