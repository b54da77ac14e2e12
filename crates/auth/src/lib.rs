//! Token verification for querygpt
//!
//! Resolves a bearer credential to a [`UserId`](querygpt_core::UserId) by
//! trying the strategies configured for the current environment in order.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod bearer;
mod error;
mod strategy;
mod verifier;


pub use bearer::bearer_token;
pub use error::AuthError;
pub use strategy::{RemoteSessionMode, RemoteSessionStrategy, UnverifiedJwtStrategy, VerificationStrategy};
pub use verifier::TokenVerifier;
