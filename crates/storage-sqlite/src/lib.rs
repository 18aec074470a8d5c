//! SQLite storage implementation for localset.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the `RecordStoreTrait` defined in `localset-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The settings repository
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the workspace where Diesel dependencies exist.
//! The `core` crate is database-agnostic and works with the trait.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod settings;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use settings::SettingsRepository;

// Re-export from localset-core for convenience
pub use localset_core::errors::{DatabaseError, Error, Result};
