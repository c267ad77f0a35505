use std::sync::Arc;

use sqlx::PgPool;

use crate::application::{PullRequestService, TeamService, UserService};
use crate::domain::assignment::{EntropySource, RandomSource};
use crate::domain::repositories::{PullRequestRepository, TeamRepository, UserRepository};
use crate::infrastructure::repositories::{
    InMemoryStore, PostgresPullRequestRepository, PostgresTeamRepository, PostgresUserRepository,
};

/// Services shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub teams: TeamService,
    pub users: UserService,
    pub pull_requests: PullRequestService,
}

impl AppState {
    pub fn new(
        teams: Arc<dyn TeamRepository>,
        users: Arc<dyn UserRepository>,
        pull_requests: Arc<dyn PullRequestRepository>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            teams: TeamService::new(teams.clone()),
            users: UserService::new(users.clone()),
            pull_requests: PullRequestService::new(pull_requests, users, teams, random),
        }
    }

    /// Wires the PostgreSQL repositories with entropy-seeded randomness
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PostgresTeamRepository::new(pool.clone())),
            Arc::new(PostgresUserRepository::new(pool.clone())),
            Arc::new(PostgresPullRequestRepository::new(pool)),
            Arc::new(EntropySource),
        )
    }

    /// Wires a fresh in-memory store
    pub fn in_memory(random: Arc<dyn RandomSource>) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::new(store.clone(), store.clone(), store, random)
    }
}
