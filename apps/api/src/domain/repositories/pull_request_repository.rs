use async_trait::async_trait;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pull_request::PullRequest;
use crate::domain::user::UserId;

/// Repository trait for PullRequest aggregate
#[async_trait]
pub trait PullRequestRepository: Send + Sync {
    /// Find a pull request by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<PullRequest>>;

    /// Insert a new pull request
    ///
    /// Fails with `DomainError::PrExists` when the ID is taken.
    async fn create(&self, pull_request: &PullRequest) -> DomainResult<PullRequest>;

    /// Write back a modified pull request and return the stored snapshot
    ///
    /// The write only succeeds if the stored version still equals
    /// `pull_request.version()`; otherwise it fails with
    /// `DomainError::Conflict`. Fails with `DomainError::NotFound` when the
    /// row is gone.
    async fn update(&self, pull_request: &PullRequest) -> DomainResult<PullRequest>;

    /// Find every pull request where `user_id` is an assigned reviewer
    async fn find_by_reviewer(&self, user_id: &UserId) -> DomainResult<Vec<PullRequest>>;

    /// Merge a pull request by ID (read, merge, write back)
    ///
    /// Idempotent at the domain level, but always re-reads and re-writes.
    async fn merge(&self, id: &str) -> DomainResult<PullRequest> {
        let mut pull_request = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Pull request", id))?;

        pull_request.merge();

        self.update(&pull_request).await
    }
}
