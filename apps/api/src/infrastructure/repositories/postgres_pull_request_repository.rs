use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pull_request::{PullRequest, PullRequestStatus};
use crate::domain::repositories::PullRequestRepository;
use crate::domain::user::UserId;
use crate::infrastructure::database::is_unique_violation;

const PULL_REQUEST_COLUMNS: &str =
    "id, name, author_id, status, reviewer1_id, reviewer2_id, created_at, merged_at, version";

/// Row shape of `pull_requests`; reviewers are stored in two nullable slots
#[derive(sqlx::FromRow)]
struct PullRequestRow {
    id: String,
    name: String,
    author_id: UserId,
    status: PullRequestStatus,
    reviewer1_id: Option<UserId>,
    reviewer2_id: Option<UserId>,
    created_at: DateTime<Utc>,
    merged_at: Option<DateTime<Utc>>,
    version: i64,
}

impl From<PullRequestRow> for PullRequest {
    fn from(row: PullRequestRow) -> Self {
        let reviewers = row.reviewer1_id.into_iter().chain(row.reviewer2_id).collect();

        PullRequest::from_persistence(
            row.id,
            row.name,
            row.author_id,
            row.status,
            reviewers,
            row.created_at,
            row.merged_at,
            row.version,
        )
    }
}

/// PostgreSQL implementation of PullRequestRepository
///
/// Updates are optimistic: a write only lands when the stored `version`
/// still matches the one the caller read.
pub struct PostgresPullRequestRepository {
    pool: PgPool,
}

impl PostgresPullRequestRepository {
    /// Creates a new PostgresPullRequestRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: &str) -> DomainResult<bool> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pull_requests WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage("check pull request exists", e))
    }
}

#[async_trait]
impl PullRequestRepository for PostgresPullRequestRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<PullRequest>> {
        let row: Option<PullRequestRow> = sqlx::query_as(&format!(
            "SELECT {PULL_REQUEST_COLUMNS} FROM pull_requests WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage("find pull request by id", e))?;

        Ok(row.map(PullRequest::from))
    }

    async fn create(&self, pull_request: &PullRequest) -> DomainResult<PullRequest> {
        let reviewers = pull_request.assigned_reviewers();

        let row: PullRequestRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO pull_requests (
                id, name, author_id, status, reviewer1_id, reviewer2_id,
                created_at, merged_at, version
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {PULL_REQUEST_COLUMNS}
            "#
        ))
        .bind(pull_request.id())
        .bind(pull_request.name())
        .bind(pull_request.author_id())
        .bind(pull_request.status())
        .bind(reviewers.first())
        .bind(reviewers.get(1))
        .bind(pull_request.created_at())
        .bind(pull_request.merged_at())
        .bind(pull_request.version())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::PrExists(pull_request.id().to_string())
            } else {
                DomainError::storage("create pull request", e)
            }
        })?;

        Ok(row.into())
    }

    async fn update(&self, pull_request: &PullRequest) -> DomainResult<PullRequest> {
        let reviewers = pull_request.assigned_reviewers();

        let row: Option<PullRequestRow> = sqlx::query_as(&format!(
            r#"
            UPDATE pull_requests
            SET name = $2,
                status = $3,
                reviewer1_id = $4,
                reviewer2_id = $5,
                merged_at = $6,
                version = version + 1
            WHERE id = $1 AND version = $7
            RETURNING {PULL_REQUEST_COLUMNS}
            "#
        ))
        .bind(pull_request.id())
        .bind(pull_request.name())
        .bind(pull_request.status())
        .bind(reviewers.first())
        .bind(reviewers.get(1))
        .bind(pull_request.merged_at())
        .bind(pull_request.version())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage("update pull request", e))?;

        match row {
            Some(row) => Ok(row.into()),
            None if self.exists(pull_request.id()).await? => {
                Err(DomainError::Conflict(pull_request.id().to_string()))
            }
            None => Err(DomainError::not_found("Pull request", pull_request.id())),
        }
    }

    async fn find_by_reviewer(&self, user_id: &UserId) -> DomainResult<Vec<PullRequest>> {
        let rows: Vec<PullRequestRow> = sqlx::query_as(&format!(
            r#"
            SELECT {PULL_REQUEST_COLUMNS}
            FROM pull_requests
            WHERE reviewer1_id = $1 OR reviewer2_id = $1
            ORDER BY created_at, id
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage("find pull requests by reviewer", e))?;

        Ok(rows.into_iter().map(PullRequest::from).collect())
    }
}
