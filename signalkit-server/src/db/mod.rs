//! Database layer - connection pool, schema, and repositories
//!
//! # Design Principles
//!
//! - Bounded connection pool (default 1..=5 connections)
//! - Pool is owned and injected, never a global
//! - Rely on DB constraints (side CHECK) as a second line behind validation

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{PoolConfig, PoolError, PooledConnection, SignalPool};
pub use repos::PgSignalStore;
pub use schema::ensure_schema;
