//! Typed error enum for the service layer.
//!
//! Lets handlers match on the failure mode instead of inspecting strings.

use querygpt_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, unavailable, corrupt row).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Caller provided invalid input (empty question, bad id).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Target does not exist or is owned by another user.
    #[error("not found: {0}")]
    NotFound(String),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_)) || matches!(self, Self::Storage(e) if e.is_not_found())
    }
}
