use async_trait::async_trait;
use querygpt_core::{NewQaSession, PageRequest, PaginatedResult, QaSession, UserId};

use crate::error::StorageError;

/// Question/answer session lifecycle: create, list, delete.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a new session and return it with its assigned id.
    async fn insert_session(&self, session: &NewQaSession) -> Result<QaSession, StorageError>;

    /// One page of the user's sessions, newest first, plus the user's total.
    async fn list_sessions(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<PaginatedResult<QaSession>, StorageError>;

    /// Delete one session owned by `user_id`.
    ///
    /// Returns `NotFound` when no row matches both the id and the owner.
    async fn delete_session(&self, user_id: &UserId, id: i64) -> Result<(), StorageError>;

    /// Delete every session of `user_id`. Returns the number removed.
    async fn delete_all_sessions(&self, user_id: &UserId) -> Result<u64, StorageError>;
}
