use std::sync::Arc;

use tracing::{info, instrument};

use super::{log_failure, require};
use crate::domain::assignment::{reassign_reviewer, select_reviewers, RandomSource};
use crate::domain::errors::DomainResult;
use crate::domain::pull_request::PullRequest;
use crate::domain::repositories::{PullRequestRepository, TeamRepository, UserRepository};
use crate::domain::user::UserId;

/// Input for opening a pull request
#[derive(Debug, Clone)]
pub struct CreatePullRequest {
    pub id: String,
    pub name: String,
    pub author_id: UserId,
}

/// Outcome of a successful reviewer reassignment
#[derive(Debug, Clone)]
pub struct Reassignment {
    pub pull_request: PullRequest,
    pub replaced_by: UserId,
}

/// Creates, merges and reassigns pull requests
#[derive(Clone)]
pub struct PullRequestService {
    pull_requests: Arc<dyn PullRequestRepository>,
    users: Arc<dyn UserRepository>,
    teams: Arc<dyn TeamRepository>,
    random: Arc<dyn RandomSource>,
}

impl PullRequestService {
    pub fn new(
        pull_requests: Arc<dyn PullRequestRepository>,
        users: Arc<dyn UserRepository>,
        teams: Arc<dyn TeamRepository>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            pull_requests,
            users,
            teams,
            random,
        }
    }

    /// Opens a pull request with reviewers drawn from the author's team
    ///
    /// Author lookup, then team lookup, then selection, then insert.
    /// Fails with `NotFound` for a missing author or team and `PrExists`
    /// for a taken id.
    #[instrument(skip_all, fields(pr_id = %command.id, author_id = %command.author_id))]
    pub async fn create(&self, command: CreatePullRequest) -> DomainResult<PullRequest> {
        let author = self
            .users
            .find_by_id(&command.author_id)
            .await
            .and_then(|found| require(found, "User", command.author_id.as_str()))
            .map_err(|e| log_failure("get author", e))?;

        let team = self
            .teams
            .find_by_name(&author.team_name)
            .await
            .and_then(|found| require(found, "Team", &author.team_name))
            .map_err(|e| log_failure("get author team", e))?;

        let reviewers = {
            let mut rng = self.random.rng();
            select_reviewers(Some(&team), &author.id, &mut rng).unwrap_or_default()
        };

        let pull_request =
            PullRequest::new(command.id, command.name, command.author_id, reviewers)
                .map_err(|e| log_failure("build pull request", e))?;

        let created = self
            .pull_requests
            .create(&pull_request)
            .await
            .map_err(|e| log_failure("create pull request", e))?;

        info!(
            status = %created.status(),
            reviewers = ?created.assigned_reviewers(),
            "pull request created"
        );
        Ok(created)
    }

    /// Merges a pull request; merging twice keeps the first merge time
    #[instrument(skip_all, fields(pr_id = %pr_id))]
    pub async fn merge(&self, pr_id: &str) -> DomainResult<PullRequest> {
        let merged = self
            .pull_requests
            .merge(pr_id)
            .await
            .map_err(|e| log_failure("merge pull request", e))?;

        info!(status = %merged.status(), "pull request merged");
        Ok(merged)
    }

    /// Swaps `old_reviewer_id` for another active member of their team
    ///
    /// A merged pull request is rejected before the reviewer or the team is
    /// looked up.
    #[instrument(skip_all, fields(pr_id = %pr_id, old_reviewer_id = %old_reviewer_id))]
    pub async fn reassign(
        &self,
        pr_id: &str,
        old_reviewer_id: &UserId,
    ) -> DomainResult<Reassignment> {
        let mut pull_request = self
            .pull_requests
            .find_by_id(pr_id)
            .await
            .and_then(|found| require(found, "Pull request", pr_id))
            .map_err(|e| log_failure("get pull request", e))?;

        pull_request
            .can_reassign()
            .map_err(|e| log_failure("check pull request is open", e))?;

        let old_reviewer = self
            .users
            .find_by_id(old_reviewer_id)
            .await
            .and_then(|found| require(found, "User", old_reviewer_id.as_str()))
            .map_err(|e| log_failure("get old reviewer", e))?;

        let team = self
            .teams
            .find_by_name(&old_reviewer.team_name)
            .await
            .and_then(|found| require(found, "Team", &old_reviewer.team_name))
            .map_err(|e| log_failure("get old reviewer team", e))?;

        let replaced_by = {
            let mut rng = self.random.rng();
            reassign_reviewer(Some(&mut pull_request), Some(&team), old_reviewer_id, &mut rng)
        }
        .map_err(|e| log_failure("pick replacement", e))?;

        let updated = self
            .pull_requests
            .update(&pull_request)
            .await
            .map_err(|e| log_failure("update pull request", e))?;

        info!(new_reviewer_id = %replaced_by, "reviewer reassigned");
        Ok(Reassignment {
            pull_request: updated,
            replaced_by,
        })
    }

    /// Lists pull requests where `user_id` is an assigned reviewer
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn reviews_for(&self, user_id: &UserId) -> DomainResult<Vec<PullRequest>> {
        self.pull_requests
            .find_by_reviewer(user_id)
            .await
            .map_err(|e| log_failure("get reviews", e))
    }
}
