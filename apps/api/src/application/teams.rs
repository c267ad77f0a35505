use std::sync::Arc;

use tracing::{info, instrument};

use super::{log_failure, require};
use crate::domain::errors::DomainResult;
use crate::domain::repositories::TeamRepository;
use crate::domain::team::Team;

/// Registers teams and reads their rosters
#[derive(Clone)]
pub struct TeamService {
    teams: Arc<dyn TeamRepository>,
}

impl TeamService {
    pub fn new(teams: Arc<dyn TeamRepository>) -> Self {
        Self { teams }
    }

    /// Stores a new team; members already on another team move to this one
    #[instrument(skip_all, fields(team_name = %team.name()))]
    pub async fn create(&self, team: Team) -> DomainResult<Team> {
        let created = self
            .teams
            .create(&team)
            .await
            .map_err(|e| log_failure("create team", e))?;

        info!(members = created.members().len(), "team created");
        Ok(created)
    }

    #[instrument(skip_all, fields(team_name = %name))]
    pub async fn get(&self, name: &str) -> DomainResult<Team> {
        self.teams
            .find_by_name(name)
            .await
            .and_then(|found| require(found, "Team", name))
            .map_err(|e| log_failure("get team", e))
    }
}
