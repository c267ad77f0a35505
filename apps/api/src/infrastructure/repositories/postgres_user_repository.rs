use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::repositories::UserRepository;
use crate::domain::user::{User, UserId};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: UserId,
    name: String,
    team_name: String,
    is_active: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            team_name: row.team_name,
            is_active: row.is_active,
        }
    }
}

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new PostgresUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> DomainResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, team_name, is_active
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage("find user by id", e))?;

        Ok(row.map(User::from))
    }

    async fn set_is_active(&self, id: &UserId, is_active: bool) -> DomainResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            UPDATE users
            SET is_active = $2
            WHERE id = $1
            RETURNING id, name, team_name, is_active
            "#,
        )
        .bind(id)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage("update user is_active", e))?;

        Ok(row.map(User::from))
    }
}
