// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;
pub mod state;

pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use handlers::{health, pull_requests, teams, users};

/// Builds the application router
///
/// Transport concerns that depend on deployment (CORS, timeouts) are
/// layered on by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        // Teams
        .route("/team/add", post(teams::add_team))
        .route("/team/get", get(teams::get_team))
        // Users
        .route("/users/setIsActive", post(users::set_is_active))
        .route("/users/get", get(users::get_user))
        .route("/users/getReview", get(users::get_reviews))
        // Pull requests
        .route("/pullRequest/create", post(pull_requests::create_pull_request))
        .route("/pullRequest/merge", post(pull_requests::merge_pull_request))
        .route("/pullRequest/reassign", post(pull_requests::reassign_reviewer))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
