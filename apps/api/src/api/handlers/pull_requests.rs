use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::application::CreatePullRequest;
use crate::domain::pull_request::{PullRequest, PullRequestStatus};
use crate::domain::user::UserId;

/// Full pull request representation
#[derive(Debug, Serialize)]
pub struct PullRequestDto {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: UserId,
    pub status: PullRequestStatus,
    pub assigned_reviewers: Vec<UserId>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "mergedAt", skip_serializing_if = "Option::is_none")]
    pub merged_at: Option<DateTime<Utc>>,
}

impl From<&PullRequest> for PullRequestDto {
    fn from(pr: &PullRequest) -> Self {
        Self {
            pull_request_id: pr.id().to_string(),
            pull_request_name: pr.name().to_string(),
            author_id: pr.author_id().clone(),
            status: pr.status(),
            assigned_reviewers: pr.assigned_reviewers().to_vec(),
            created_at: pr.created_at(),
            merged_at: pr.merged_at(),
        }
    }
}

/// Pull request summary used in review listings
#[derive(Debug, Serialize)]
pub struct PullRequestShortDto {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: UserId,
    pub status: PullRequestStatus,
}

impl From<&PullRequest> for PullRequestShortDto {
    fn from(pr: &PullRequest) -> Self {
        Self {
            pull_request_id: pr.id().to_string(),
            pull_request_name: pr.name().to_string(),
            author_id: pr.author_id().clone(),
            status: pr.status(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePullRequestRequest {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: UserId,
}

#[derive(Debug, Deserialize)]
pub struct MergePullRequestRequest {
    pub pull_request_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ReassignReviewerRequest {
    pub pull_request_id: String,
    pub old_reviewer_id: UserId,
}

#[derive(Debug, Serialize)]
pub struct PullRequestResponse {
    pub pr: PullRequestDto,
}

#[derive(Debug, Serialize)]
pub struct ReassignResponse {
    pub pr: PullRequestDto,
    pub replaced_by: UserId,
}

/// Open a pull request and auto-assign reviewers
///
/// POST /pullRequest/create
pub async fn create_pull_request(
    State(state): State<AppState>,
    payload: Result<Json<CreatePullRequestRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PullRequestResponse>), ApiError> {
    let Json(req) = payload?;
    let pr = state
        .pull_requests
        .create(CreatePullRequest {
            id: req.pull_request_id,
            name: req.pull_request_name,
            author_id: req.author_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PullRequestResponse {
            pr: PullRequestDto::from(&pr),
        }),
    ))
}

/// POST /pullRequest/merge
pub async fn merge_pull_request(
    State(state): State<AppState>,
    payload: Result<Json<MergePullRequestRequest>, JsonRejection>,
) -> Result<Json<PullRequestResponse>, ApiError> {
    let Json(req) = payload?;
    let pr = state.pull_requests.merge(&req.pull_request_id).await?;

    Ok(Json(PullRequestResponse {
        pr: PullRequestDto::from(&pr),
    }))
}

/// Replace one reviewer with another active member of their team
///
/// POST /pullRequest/reassign
pub async fn reassign_reviewer(
    State(state): State<AppState>,
    payload: Result<Json<ReassignReviewerRequest>, JsonRejection>,
) -> Result<Json<ReassignResponse>, ApiError> {
    let Json(req) = payload?;
    let outcome = state
        .pull_requests
        .reassign(&req.pull_request_id, &req.old_reviewer_id)
        .await?;

    Ok(Json(ReassignResponse {
        pr: PullRequestDto::from(&outcome.pull_request),
        replaced_by: outcome.replaced_by,
    }))
}
