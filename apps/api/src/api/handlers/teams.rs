use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::team::{Team, TeamMember};
use crate::domain::user::UserId;

/// Team member as it appears on the wire
#[derive(Debug, Serialize, Deserialize)]
pub struct TeamMemberDto {
    pub user_id: UserId,
    pub username: String,
    pub is_active: bool,
}

/// Team with its full roster; used for both request and response
#[derive(Debug, Serialize, Deserialize)]
pub struct TeamDto {
    pub team_name: String,
    pub members: Vec<TeamMemberDto>,
}

impl From<&Team> for TeamDto {
    fn from(team: &Team) -> Self {
        Self {
            team_name: team.name().to_string(),
            members: team
                .members()
                .iter()
                .map(|member| TeamMemberDto {
                    user_id: member.id.clone(),
                    username: member.name.clone(),
                    is_active: member.is_active,
                })
                .collect(),
        }
    }
}

impl TryFrom<TeamDto> for Team {
    type Error = ApiError;

    fn try_from(dto: TeamDto) -> Result<Self, Self::Error> {
        let members = dto
            .members
            .into_iter()
            .map(|m| TeamMember::new(m.user_id, m.username, m.is_active))
            .collect();

        Ok(Team::new(dto.team_name, members)?)
    }
}

#[derive(Debug, Serialize)]
pub struct AddTeamResponse {
    pub team: TeamDto,
}

#[derive(Debug, Deserialize)]
pub struct TeamNameQuery {
    pub team_name: String,
}

/// Create a team and upsert its members
///
/// POST /team/add
pub async fn add_team(
    State(state): State<AppState>,
    payload: Result<Json<TeamDto>, JsonRejection>,
) -> Result<(StatusCode, Json<AddTeamResponse>), ApiError> {
    let Json(req) = payload?;
    let team = state.teams.create(Team::try_from(req)?).await?;

    Ok((
        StatusCode::CREATED,
        Json(AddTeamResponse {
            team: TeamDto::from(&team),
        }),
    ))
}

/// Get a team by name
///
/// GET /team/get?team_name=
pub async fn get_team(
    State(state): State<AppState>,
    query: Result<Query<TeamNameQuery>, QueryRejection>,
) -> Result<Json<TeamDto>, ApiError> {
    let Query(params) = query?;
    let team = state.teams.get(&params.team_name).await?;

    Ok(Json(TeamDto::from(&team)))
}
