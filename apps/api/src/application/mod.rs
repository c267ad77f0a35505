//! Application services
//!
//! Each service sequences repository lookups around the pure domain
//! algorithms. Services hold their collaborators behind `Arc<dyn ...>` so
//! the same code runs against PostgreSQL and the in-memory store.

pub mod pull_requests;
pub mod teams;
pub mod users;

pub use pull_requests::{CreatePullRequest, PullRequestService, Reassignment};
pub use teams::TeamService;
pub use users::UserService;

use tracing::{error, info};

use crate::domain::errors::{DomainError, DomainResult};

/// Turns an absent lookup result into `NotFound`
fn require<T>(found: Option<T>, entity: &'static str, id: &str) -> DomainResult<T> {
    found.ok_or_else(|| DomainError::not_found(entity, id))
}

/// Logs a failed step and hands the error back
///
/// Storage and internal failures are errors; business-rule rejections are
/// expected outcomes and logged at info.
fn log_failure(step: &'static str, err: DomainError) -> DomainError {
    match &err {
        DomainError::Storage { .. } | DomainError::Internal(_) => {
            error!(step, error = %err, "operation failed")
        }
        _ => info!(step, error = %err, "operation rejected"),
    }
    err
}
