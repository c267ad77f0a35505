use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::repositories::TeamRepository;
use crate::domain::team::{Team, TeamMember};
use crate::domain::user::UserId;
use crate::infrastructure::database::is_unique_violation;

#[derive(sqlx::FromRow)]
struct MemberRow {
    id: UserId,
    name: String,
    is_active: bool,
}

impl From<MemberRow> for TeamMember {
    fn from(row: MemberRow) -> Self {
        TeamMember::new(row.id, row.name, row.is_active)
    }
}

/// PostgreSQL implementation of TeamRepository
///
/// Team members live in the `users` table; `team_position` keeps the
/// roster order the team was created with.
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Creates a new PostgresTeamRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn create(&self, team: &Team) -> DomainResult<Team> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage("begin team transaction", e))?;

        sqlx::query("INSERT INTO teams (name) VALUES ($1)")
            .bind(team.name())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::TeamExists(team.name().to_string())
                } else {
                    DomainError::storage("create team", e)
                }
            })?;

        for (position, member) in team.members().iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO users (id, name, team_name, team_position, is_active)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (id) DO UPDATE SET
                    name = EXCLUDED.name,
                    team_name = EXCLUDED.team_name,
                    team_position = EXCLUDED.team_position,
                    is_active = EXCLUDED.is_active
                "#,
            )
            .bind(&member.id)
            .bind(&member.name)
            .bind(team.name())
            .bind(position as i32)
            .bind(member.is_active)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::storage("upsert team member", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::storage("commit team transaction", e))?;

        Ok(team.clone())
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Team>> {
        let team_name: Option<String> =
            sqlx::query_scalar("SELECT name FROM teams WHERE name = $1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::storage("find team by name", e))?;

        let Some(team_name) = team_name else {
            return Ok(None);
        };

        let rows: Vec<MemberRow> = sqlx::query_as(
            r#"
            SELECT id, name, is_active
            FROM users
            WHERE team_name = $1
            ORDER BY team_position, id
            "#,
        )
        .bind(&team_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage("find team members", e))?;

        Ok(Some(Team::from_persistence(
            team_name,
            rows.into_iter().map(TeamMember::from).collect(),
        )))
    }
}
