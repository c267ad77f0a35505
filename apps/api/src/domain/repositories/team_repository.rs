use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::team::Team;

/// Repository trait for Team aggregate
///
/// Defines the contract for persisting and retrieving teams.
/// Implementations should handle database-specific details.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Insert a new team and upsert its members as users
    ///
    /// Fails with `DomainError::TeamExists` when the name is taken.
    async fn create(&self, team: &Team) -> DomainResult<Team>;

    /// Find a team by its name, members in roster order
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Team>>;
}
