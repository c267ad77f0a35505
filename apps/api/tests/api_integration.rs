//! End-to-end API integration tests
//!
//! These tests drive the full router over the in-memory store:
//! - Team registration and lookup
//! - User activity toggling and review listings
//! - Pull request creation, merge and reviewer reassignment
//! - Error status codes and stable error codes

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use pr_reviewers_api::api::{self, AppState};
use pr_reviewers_api::domain::assignment::SeededSource;
use serde_json::{json, Value};
use tower::util::ServiceExt; // for oneshot

/// Setup test application over a fresh in-memory store
fn setup_app() -> Router {
    api::router(AppState::in_memory(Arc::new(SeededSource::new(7))))
}

/// Sends a request and returns the status with the parsed JSON body
async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

async fn add_team(app: &Router, name: &str, members: &[(&str, bool)]) {
    let members: Vec<Value> = members
        .iter()
        .map(|(id, active)| json!({"user_id": id, "username": format!("User {id}"), "is_active": active}))
        .collect();

    let (status, _) = send(
        app,
        "POST",
        "/team/add",
        Some(json!({"team_name": name, "members": members})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn create_pr(app: &Router, id: &str, author: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/pullRequest/create",
        Some(json!({
            "pull_request_id": id,
            "pull_request_name": format!("Change {id}"),
            "author_id": author,
        })),
    )
    .await
}

async fn reassign(app: &Router, pr_id: &str, old: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/pullRequest/reassign",
        Some(json!({"pull_request_id": pr_id, "old_reviewer_id": old})),
    )
    .await
}

fn reviewers(pr: &Value) -> HashSet<String> {
    pr["assigned_reviewers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_str().unwrap().to_string())
        .collect()
}

fn set(ids: &[&str]) -> HashSet<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_add_and_get_team() {
    let app = setup_app();

    let (status, json) = send(
        &app,
        "POST",
        "/team/add",
        Some(json!({
            "team_name": "backend",
            "members": [
                {"user_id": "u1", "username": "Alice", "is_active": true},
                {"user_id": "u2", "username": "Bob", "is_active": false}
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["team"]["team_name"], "backend");
    assert_eq!(json["team"]["members"].as_array().unwrap().len(), 2);

    let (status, json) = send(&app, "GET", "/team/get?team_name=backend", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({
            "team_name": "backend",
            "members": [
                {"user_id": "u1", "username": "Alice", "is_active": true},
                {"user_id": "u2", "username": "Bob", "is_active": false}
            ]
        })
    );
}

#[tokio::test]
async fn test_duplicate_team_is_rejected() {
    let app = setup_app();
    add_team(&app, "backend", &[("u1", true)]).await;

    let (status, json) = send(
        &app,
        "POST",
        "/team/add",
        Some(json!({"team_name": "backend", "members": []})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "TEAM_EXISTS");
}

#[tokio::test]
async fn test_get_unknown_team_is_not_found() {
    let app = setup_app();

    let (status, json) = send(&app, "GET", "/team/get?team_name=payments", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_missing_query_param_is_bad_request() {
    let app = setup_app();

    let (status, json) = send(&app, "GET", "/team/get", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_set_is_active_and_get_user() {
    let app = setup_app();
    add_team(&app, "backend", &[("u1", true)]).await;

    let (status, json) = send(
        &app,
        "POST",
        "/users/setIsActive",
        Some(json!({"user_id": "u1", "is_active": false})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["user"],
        json!({"user_id": "u1", "username": "User u1", "team_name": "backend", "is_active": false})
    );

    let (status, json) = send(&app, "GET", "/users/get?user_id=u1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["user"]["is_active"], false);
}

#[tokio::test]
async fn test_set_is_active_for_unknown_user() {
    let app = setup_app();

    let (status, json) = send(
        &app,
        "POST",
        "/users/setIsActive",
        Some(json!({"user_id": "ghost", "is_active": true})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_pull_request_assigns_both_candidates() {
    let app = setup_app();
    add_team(&app, "backend", &[("u1", true), ("u2", true), ("u3", true)]).await;

    let (status, json) = create_pr(&app, "pr-1", "u1").await;

    assert_eq!(status, StatusCode::CREATED);
    let pr = &json["pr"];
    assert_eq!(pr["pull_request_id"], "pr-1");
    assert_eq!(pr["author_id"], "u1");
    assert_eq!(pr["status"], "OPEN");
    assert_eq!(reviewers(pr), set(&["u2", "u3"]));
    assert!(pr["createdAt"].is_string());
    assert!(pr.get("mergedAt").is_none());
}

#[tokio::test]
async fn test_create_pull_request_picks_two_of_many() {
    let app = setup_app();
    add_team(
        &app,
        "backend",
        &[("u1", true), ("u2", true), ("u3", true), ("u4", true), ("u5", false)],
    )
    .await;

    let (status, json) = create_pr(&app, "pr-1", "u1").await;

    assert_eq!(status, StatusCode::CREATED);
    let picked = reviewers(&json["pr"]);
    assert_eq!(picked.len(), 2);
    assert!(picked.is_subset(&set(&["u2", "u3", "u4"])));
}

#[tokio::test]
async fn test_create_pull_request_errors() {
    let app = setup_app();
    add_team(&app, "backend", &[("u1", true), ("u2", true)]).await;
    create_pr(&app, "pr-1", "u1").await;

    let (status, json) = create_pr(&app, "pr-1", "u2").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "PR_EXISTS");

    let (status, json) = create_pr(&app, "pr-2", "ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");

    let (status, json) = create_pr(&app, "pr-3", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = setup_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/pullRequest/create")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_merge_is_idempotent() {
    let app = setup_app();
    add_team(&app, "backend", &[("u1", true), ("u2", true)]).await;
    create_pr(&app, "pr-1", "u1").await;

    let merge = json!({"pull_request_id": "pr-1"});
    let (status, first) = send(&app, "POST", "/pullRequest/merge", Some(merge.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["pr"]["status"], "MERGED");
    assert!(first["pr"]["mergedAt"].is_string());

    let (status, second) = send(&app, "POST", "/pullRequest/merge", Some(merge)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["pr"]["mergedAt"], second["pr"]["mergedAt"]);
}

#[tokio::test]
async fn test_merge_unknown_pull_request() {
    let app = setup_app();

    let (status, json) = send(
        &app,
        "POST",
        "/pullRequest/merge",
        Some(json!({"pull_request_id": "pr-404"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_reassign_moves_review_to_new_reviewer() {
    let app = setup_app();
    add_team(&app, "backend", &[("u1", true), ("u2", true)]).await;
    create_pr(&app, "pr-1", "u1").await;
    // u3 joins after the pull request was opened
    add_team(&app, "backend-2", &[("u2", true), ("u3", true)]).await;

    let (status, json) = reassign(&app, "pr-1", "u2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["replaced_by"], "u3");
    assert_eq!(reviewers(&json["pr"]), set(&["u3"]));

    let (_, old) = send(&app, "GET", "/users/getReview?user_id=u2", None).await;
    assert_eq!(old["pull_requests"], json!([]));

    let (status, new) = send(&app, "GET", "/users/getReview?user_id=u3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(new["user_id"], "u3");
    assert_eq!(
        new["pull_requests"],
        json!([{
            "pull_request_id": "pr-1",
            "pull_request_name": "Change pr-1",
            "author_id": "u1",
            "status": "OPEN"
        }])
    );
}

#[tokio::test]
async fn test_reassign_on_merged_pull_request() {
    let app = setup_app();
    add_team(&app, "backend", &[("u1", true), ("u2", true), ("u3", true), ("u4", true)]).await;
    create_pr(&app, "pr-1", "u1").await;
    send(
        &app,
        "POST",
        "/pullRequest/merge",
        Some(json!({"pull_request_id": "pr-1"})),
    )
    .await;

    let (status, json) = reassign(&app, "pr-1", "u2").await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "PR_MERGED");
}

#[tokio::test]
async fn test_reassign_without_candidates() {
    let app = setup_app();
    add_team(&app, "backend", &[("u1", true), ("u2", true), ("u3", true)]).await;
    create_pr(&app, "pr-1", "u1").await;

    let (status, json) = reassign(&app, "pr-1", "u2").await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "NO_CANDIDATE");
}

#[tokio::test]
async fn test_reassign_reviewer_not_assigned() {
    let app = setup_app();
    add_team(&app, "backend", &[("u1", true), ("u2", true)]).await;
    create_pr(&app, "pr-1", "u1").await;

    let (status, json) = reassign(&app, "pr-1", "u1").await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "NOT_ASSIGNED");
}

#[tokio::test]
async fn test_inactive_members_are_not_assigned() {
    let app = setup_app();
    add_team(&app, "backend", &[("u1", true), ("u2", true), ("u3", true)]).await;
    send(
        &app,
        "POST",
        "/users/setIsActive",
        Some(json!({"user_id": "u3", "is_active": false})),
    )
    .await;

    let (status, json) = create_pr(&app, "pr-1", "u1").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(reviewers(&json["pr"]), set(&["u2"]));
}
