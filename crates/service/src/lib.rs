//! Service layer for querygpt
//!
//! Centralizes business logic between HTTP handlers and storage/llm.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod error;
mod health_service;
mod qa_service;


pub use error::ServiceError;
pub use health_service::{HealthReport, HealthService};
pub use qa_service::{AskResult, QaService};
