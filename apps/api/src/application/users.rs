use std::sync::Arc;

use tracing::{info, instrument};

use super::{log_failure, require};
use crate::domain::errors::DomainResult;
use crate::domain::repositories::UserRepository;
use crate::domain::user::{User, UserId};

/// Reads users and toggles their review availability
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Marks a user as available (or not) for future assignments
    ///
    /// Existing assignments are left alone.
    #[instrument(skip_all, fields(user_id = %user_id, is_active = is_active))]
    pub async fn set_is_active(&self, user_id: &UserId, is_active: bool) -> DomainResult<User> {
        let user = self
            .users
            .set_is_active(user_id, is_active)
            .await
            .and_then(|found| require(found, "User", user_id.as_str()))
            .map_err(|e| log_failure("set user is_active", e))?;

        info!("user activity updated");
        Ok(user)
    }

    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn get(&self, user_id: &UserId) -> DomainResult<User> {
        self.users
            .find_by_id(user_id)
            .await
            .and_then(|found| require(found, "User", user_id.as_str()))
            .map_err(|e| log_failure("get user", e))
    }
}
