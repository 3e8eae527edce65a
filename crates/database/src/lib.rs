//! # Tradelog Database Crate
//!
//! This crate is the trade store: the single source of truth for journal
//! trades, kept in a SQLite database.
//!
//! ## Architectural Principles
//!
//! - **Layer 3 Adapter:** This crate is an adapter that encapsulates all database-specific
//!   logic. Callers see the `TradeStore` trait and never the underlying SQL.
//! - **Single Logical Writer:** The pool is normally sized to one connection, so every
//!   `upsert` and `delete` is serialized and atomic per row. There is no cross-row
//!   transaction.
//! - **Asynchronous:** All operations are asynchronous. A caller cancels one by
//!   dropping its future, e.g. through `tokio::time::timeout`.
//!
//! ## Public API
//!
//! - `connect`: Opens the SQLite pool from `DatabaseSettings`.
//! - `run_migrations`: Applies the embedded migrations, creating the `trades` table.
//! - `TradeStore`: The upsert/list/delete contract.
//! - `DbRepository`: The SQLite implementation of `TradeStore`.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use repository::{DbRepository, TradeStore};
