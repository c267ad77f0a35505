//! In-memory implementation of the repository traits.
//!
//! Mirrors the PostgreSQL adapters: team creation upserts members as users,
//! pull request ids are unique and updates are guarded by the row version.
//! All state is lost on restart.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pull_request::PullRequest;
use crate::domain::repositories::{PullRequestRepository, TeamRepository, UserRepository};
use crate::domain::team::{Team, TeamMember};
use crate::domain::user::{User, UserId};

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    /// Insertion counter used to keep roster order
    position: u64,
}

#[derive(Debug, Default)]
struct StoreState {
    teams: HashSet<String>,
    users: HashMap<UserId, StoredUser>,
    pull_requests: HashMap<String, PullRequest>,
    next_position: u64,
}

impl StoreState {
    fn roster(&self, team_name: &str) -> Vec<TeamMember> {
        let mut members: Vec<&StoredUser> = self
            .users
            .values()
            .filter(|stored| stored.user.team_name == team_name)
            .collect();
        members.sort_by_key(|stored| stored.position);

        members
            .into_iter()
            .map(|stored| {
                TeamMember::new(
                    stored.user.id.clone(),
                    stored.user.name.clone(),
                    stored.user.is_active,
                )
            })
            .collect()
    }
}

/// In-memory store implementing every repository trait.
///
/// A single `RwLock` guards all tables so multi-row writes such as team
/// creation are atomic.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_version(pull_request: &PullRequest) -> PullRequest {
    PullRequest::from_persistence(
        pull_request.id().to_string(),
        pull_request.name().to_string(),
        pull_request.author_id().clone(),
        pull_request.status(),
        pull_request.assigned_reviewers().to_vec(),
        pull_request.created_at(),
        pull_request.merged_at(),
        pull_request.version() + 1,
    )
}

#[async_trait]
impl TeamRepository for InMemoryStore {
    async fn create(&self, team: &Team) -> DomainResult<Team> {
        let mut state = self.state.write().await;

        if !state.teams.insert(team.name().to_string()) {
            return Err(DomainError::TeamExists(team.name().to_string()));
        }

        for member in team.members() {
            let position = state.next_position;
            state.next_position += 1;
            state.users.insert(
                member.id.clone(),
                StoredUser {
                    user: User {
                        id: member.id.clone(),
                        name: member.name.clone(),
                        team_name: team.name().to_string(),
                        is_active: member.is_active,
                    },
                    position,
                },
            );
        }

        Ok(Team::from_persistence(
            team.name().to_string(),
            state.roster(team.name()),
        ))
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Team>> {
        let state = self.state.read().await;

        if !state.teams.contains(name) {
            return Ok(None);
        }

        Ok(Some(Team::from_persistence(
            name.to_string(),
            state.roster(name),
        )))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: &UserId) -> DomainResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.get(id).map(|stored| stored.user.clone()))
    }

    async fn set_is_active(&self, id: &UserId, is_active: bool) -> DomainResult<Option<User>> {
        let mut state = self.state.write().await;
        Ok(state.users.get_mut(id).map(|stored| {
            stored.user.is_active = is_active;
            stored.user.clone()
        }))
    }
}

#[async_trait]
impl PullRequestRepository for InMemoryStore {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<PullRequest>> {
        let state = self.state.read().await;
        Ok(state.pull_requests.get(id).cloned())
    }

    async fn create(&self, pull_request: &PullRequest) -> DomainResult<PullRequest> {
        let mut state = self.state.write().await;

        if state.pull_requests.contains_key(pull_request.id()) {
            return Err(DomainError::PrExists(pull_request.id().to_string()));
        }

        state
            .pull_requests
            .insert(pull_request.id().to_string(), pull_request.clone());
        Ok(pull_request.clone())
    }

    async fn update(&self, pull_request: &PullRequest) -> DomainResult<PullRequest> {
        let mut state = self.state.write().await;

        let stored = state
            .pull_requests
            .get_mut(pull_request.id())
            .ok_or_else(|| DomainError::not_found("Pull request", pull_request.id()))?;

        if stored.version() != pull_request.version() {
            return Err(DomainError::Conflict(pull_request.id().to_string()));
        }

        *stored = next_version(pull_request);
        Ok(stored.clone())
    }

    async fn find_by_reviewer(&self, user_id: &UserId) -> DomainResult<Vec<PullRequest>> {
        let state = self.state.read().await;

        let mut found: Vec<PullRequest> = state
            .pull_requests
            .values()
            .filter(|pr| pr.is_assigned(user_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });

        Ok(found)
    }
}
