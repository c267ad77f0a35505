use serde::{Deserialize, Serialize};

/// Represents the lifecycle status of a pull request
///
/// # Status Transitions
/// ```text
/// Open -> Merged
/// ```
/// `Merged` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "pr_status", rename_all = "UPPERCASE")]
pub enum PullRequestStatus {
    /// Pull request is under review
    Open,
    /// Pull request has been merged
    Merged,
}

impl PullRequestStatus {
    /// Checks if a transition from current status to next status is valid
    ///
    /// # Example
    /// ```
    /// use pr_reviewers_api::domain::pull_request::PullRequestStatus;
    ///
    /// assert!(PullRequestStatus::Open.can_transition_to(PullRequestStatus::Merged));
    /// assert!(!PullRequestStatus::Merged.can_transition_to(PullRequestStatus::Open));
    /// ```
    pub fn can_transition_to(&self, next: PullRequestStatus) -> bool {
        use PullRequestStatus::*;
        matches!((self, next), (Open, Merged))
    }

    /// Returns true when no further transitions are allowed
    pub fn is_terminal(&self) -> bool {
        matches!(self, PullRequestStatus::Merged)
    }
}

impl std::fmt::Display for PullRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PullRequestStatus::Open => write!(f, "OPEN"),
            PullRequestStatus::Merged => write!(f, "MERGED"),
        }
    }
}
