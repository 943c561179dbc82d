//! # Storage Module
//!
//! Handles persistence for subscription records.
//!
//! The module abstracts the storage implementation behind a trait so the
//! domain layer never depends on a concrete backend. Two backends ship:
//!
//! - **SQLite**: durable storage with SQLx, used when `DATABASE_URL` is set
//! - **In-memory**: process-local storage used for development and tests
//!
//! Both honor the same ordering contract (listings come back sorted by
//! billing day), so the rest of the app cannot tell them apart.

pub mod memory;
pub mod sqlite;
pub mod traits;

// Re-export the main types that other modules need
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::SubscriptionStore;
