//! Core types and configuration for querygpt
//!
//! This crate contains domain types shared across all other crates.

mod config;
mod constants;
mod env_config;
mod error;
mod health;
mod pagination;
mod session;
mod user;

pub use config::*;
pub use constants::*;
pub use env_config::{env_non_empty, parse_with_default};
pub use error::*;
pub use health::*;
pub use pagination::*;
pub use session::*;
pub use user::*;
