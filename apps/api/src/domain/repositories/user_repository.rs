use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::user::{User, UserId};

/// Repository trait for users
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: &UserId) -> DomainResult<Option<User>>;

    /// Update the user's active flag, returning the updated user
    ///
    /// Returns `Ok(None)` when no such user exists.
    async fn set_is_active(&self, id: &UserId, is_active: bool) -> DomainResult<Option<User>>;
}
