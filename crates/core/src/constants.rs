//! Shared constants for querygpt.
//!
//! Centralizes limits and defaults that more than one crate needs.

/// Maximum accepted question length, in characters.
pub const MAX_QUESTION_CHARS: usize = 1000;

/// History page size used when the caller does not pass one.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Hard upper bound for a history page. Configuration may lower it, never raise it.
pub const MAX_PAGE_SIZE: u32 = 100;

/// PostgreSQL connection pool: maximum connections (10 base + 20 overflow).
pub const PG_POOL_MAX_CONNECTIONS: u32 = 30;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: connections are recycled after this many seconds.
pub const PG_POOL_MAX_LIFETIME_SECS: u64 = 300;

/// Timeout for remote session verification against the auth provider.
pub const AUTH_TIMEOUT_SECS: u64 = 10;

/// Timeout for a single chat-completion call.
pub const LLM_TIMEOUT_SECS: u64 = 60;

/// Default age, in days, for `purge`.
pub const DEFAULT_PURGE_DAYS: u32 = 30;

/// Service name reported by the simple health check.
pub const SERVICE_NAME: &str = "qa-api";
