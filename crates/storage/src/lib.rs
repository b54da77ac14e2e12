//! Storage layer for querygpt
//!
//! Question/answer session records, always scoped by the owning user.
//! PostgreSQL via sqlx in production, an in-process store otherwise.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]

mod backend;
mod error;
mod memory;
pub mod pg_migrations;
mod pg_storage;
pub mod traits;


pub use backend::StorageBackend;
pub use error::StorageError;
pub use memory::MemoryStorage;
pub use pg_storage::PgStorage;
