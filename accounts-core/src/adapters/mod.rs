//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - a locked in-memory map for the AccountStore port
//! - DuckDB for the AccountStore port (SQL-backed variant)

pub mod duckdb;
pub mod memory;

pub use self::duckdb::DuckDbAccountStore;
pub use self::memory::InMemoryAccountStore;
