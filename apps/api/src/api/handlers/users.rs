use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::handlers::pull_requests::PullRequestShortDto;
use crate::api::state::AppState;
use crate::domain::user::{User, UserId};

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub user_id: UserId,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.name,
            team_name: user.team_name,
            is_active: user.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: UserDto,
}

#[derive(Debug, Deserialize)]
pub struct SetIsActiveRequest {
    pub user_id: UserId,
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: UserId,
}

#[derive(Debug, Serialize)]
pub struct ReviewsResponse {
    pub user_id: UserId,
    pub pull_requests: Vec<PullRequestShortDto>,
}

/// Toggle whether a user can be picked as a reviewer
///
/// POST /users/setIsActive
pub async fn set_is_active(
    State(state): State<AppState>,
    payload: Result<Json<SetIsActiveRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Json(req) = payload?;
    let user = state.users.set_is_active(&req.user_id, req.is_active).await?;

    Ok(Json(UserResponse { user: user.into() }))
}

/// GET /users/get?user_id=
pub async fn get_user(
    State(state): State<AppState>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Query(params) = query?;
    let user = state.users.get(&params.user_id).await?;

    Ok(Json(UserResponse { user: user.into() }))
}

/// List pull requests the user is assigned to review
///
/// GET /users/getReview?user_id=
pub async fn get_reviews(
    State(state): State<AppState>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> Result<Json<ReviewsResponse>, ApiError> {
    let Query(params) = query?;
    let pull_requests = state.pull_requests.reviews_for(&params.user_id).await?;

    Ok(Json(ReviewsResponse {
        user_id: params.user_id,
        pull_requests: pull_requests.iter().map(PullRequestShortDto::from).collect(),
    }))
}
