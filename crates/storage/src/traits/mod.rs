//! Storage backend trait abstraction
//!
//! Async domain traits for session persistence. Every read, delete and
//! aggregate is scoped by the owning [`UserId`](querygpt_core::UserId).

pub mod maintenance;
pub mod session;
pub mod stats;

pub use maintenance::MaintenanceStore;
pub use session::SessionStore;
pub use stats::StatsStore;
