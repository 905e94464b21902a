//! SQLite storage implementation for Pennywise.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `pennywise-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The core crate and the server work with the repository traits only.
//!
//! ```text
//!   server (HTTP)
//!        │
//!        ▼
//!   core (domain)
//!        │ traits
//!        ▼
//!   storage-sqlite (this crate)
//!        │
//!        ▼
//!    SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod budgets;
pub mod categories;
pub mod goals;
pub mod transactions;
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, open, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from pennywise-core for convenience
pub use pennywise_core::errors::{DatabaseError, Error, Result};

#[cfg(test)]
pub(crate) mod test_support;
