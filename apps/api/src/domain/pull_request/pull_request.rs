use chrono::{DateTime, Utc};

use super::value_objects::PullRequestStatus;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;

/// Upper bound on reviewers assigned to a single pull request
pub const MAX_REVIEWERS: usize = 2;

/// Pull request aggregate root
///
/// Tracks the review lifecycle of a pull request and the reviewers
/// assigned to it.
///
/// # Invariants
/// - Id and name cannot be empty
/// - At most [`MAX_REVIEWERS`] reviewers, no duplicates
/// - The author is never one of the reviewers
/// - `merged_at` is set if and only if status is `Merged`
///
/// # Example
/// ```
/// use pr_reviewers_api::domain::pull_request::PullRequest;
/// use pr_reviewers_api::domain::user::UserId;
///
/// let mut pr = PullRequest::new(
///     "pr-1".to_string(),
///     "Add search".to_string(),
///     UserId::new("u1").unwrap(),
///     vec![UserId::new("u2").unwrap()],
/// )
/// .expect("valid pull request");
///
/// assert!(!pr.is_merged());
/// pr.merge();
/// assert!(pr.is_merged());
/// assert!(pr.merged_at().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    id: String,
    name: String,
    author_id: UserId,
    status: PullRequestStatus,
    assigned_reviewers: Vec<UserId>,
    created_at: DateTime<Utc>,
    merged_at: Option<DateTime<Utc>>,
    version: i64,
}

impl PullRequest {
    /// Creates a new open pull request
    ///
    /// # Returns
    /// * `Ok(PullRequest)` - New pull request in `Open` status
    /// * `Err(DomainError::Validation)` - If any invariant is violated
    pub fn new(
        id: String,
        name: String,
        author_id: UserId,
        reviewers: Vec<UserId>,
    ) -> DomainResult<Self> {
        if id.trim().is_empty() {
            return Err(DomainError::Validation(
                "pull_request_id cannot be empty".to_string(),
            ));
        }
        if name.trim().is_empty() {
            return Err(DomainError::Validation(
                "pull_request_name cannot be empty".to_string(),
            ));
        }
        if reviewers.len() > MAX_REVIEWERS {
            return Err(DomainError::Validation(format!(
                "at most {} reviewers can be assigned, got {}",
                MAX_REVIEWERS,
                reviewers.len()
            )));
        }
        if reviewers.contains(&author_id) {
            return Err(DomainError::Validation(format!(
                "author {} cannot review their own pull request",
                author_id
            )));
        }
        if reviewers.len() == MAX_REVIEWERS && reviewers[0] == reviewers[1] {
            return Err(DomainError::Validation(format!(
                "reviewer {} is assigned twice",
                reviewers[0]
            )));
        }

        Ok(Self {
            id,
            name,
            author_id,
            status: PullRequestStatus::Open,
            assigned_reviewers: reviewers,
            created_at: Utc::now(),
            merged_at: None,
            version: 0,
        })
    }

    /// Returns true once the pull request reached `Merged`
    pub fn is_merged(&self) -> bool {
        self.status == PullRequestStatus::Merged
    }

    /// Checks whether reviewers may still be changed
    ///
    /// # Returns
    /// * `Err(DomainError::PrMerged)` - If the pull request is merged
    pub fn can_reassign(&self) -> DomainResult<()> {
        if self.is_merged() {
            return Err(DomainError::PrMerged(self.id.clone()));
        }
        Ok(())
    }

    /// Returns true when `reviewer` is currently assigned
    pub fn is_assigned(&self, reviewer: &UserId) -> bool {
        self.assigned_reviewers.contains(reviewer)
    }

    /// Replaces the first occurrence of `old_id` with `new_id`, keeping its position
    ///
    /// Replacing a reviewer with itself is a no-op.
    ///
    /// # Returns
    /// * `Err(DomainError::NotAssigned)` - If `old_id` is not assigned; reviewers are unchanged
    pub fn replace_reviewer(&mut self, old_id: &UserId, new_id: UserId) -> DomainResult<()> {
        if *old_id == new_id {
            return Ok(());
        }

        match self.assigned_reviewers.iter_mut().find(|r| **r == *old_id) {
            Some(slot) => {
                *slot = new_id;
                Ok(())
            }
            None => Err(DomainError::NotAssigned {
                pr_id: self.id.clone(),
                reviewer_id: old_id.to_string(),
            }),
        }
    }

    /// Merges the pull request
    ///
    /// Idempotent: merging an already merged pull request keeps the
    /// original `merged_at`.
    pub fn merge(&mut self) {
        let next_status = PullRequestStatus::Merged;
        if !self.status.can_transition_to(next_status) {
            return;
        }

        self.status = next_status;
        self.merged_at = Some(Utc::now());
    }

    // ===== Getters =====

    /// Returns the pull request's ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the pull request's title
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the author's ID
    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    /// Returns the current status
    pub fn status(&self) -> PullRequestStatus {
        self.status
    }

    /// Returns the assigned reviewers in assignment order
    pub fn assigned_reviewers(&self) -> &[UserId] {
        &self.assigned_reviewers
    }

    /// Returns the creation timestamp
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the merge timestamp if merged
    pub fn merged_at(&self) -> Option<DateTime<Utc>> {
        self.merged_at
    }

    /// Returns the persisted row version used for optimistic updates
    pub fn version(&self) -> i64 {
        self.version
    }

    /// Reconstructs a PullRequest from persistence layer data
    ///
    /// This method bypasses business rules validation since the data
    /// is already validated and stored in the database.
    ///
    /// # Note
    /// Only to be used by repository implementations for data reconstruction.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persistence(
        id: String,
        name: String,
        author_id: UserId,
        status: PullRequestStatus,
        assigned_reviewers: Vec<UserId>,
        created_at: DateTime<Utc>,
        merged_at: Option<DateTime<Utc>>,
        version: i64,
    ) -> Self {
        Self {
            id,
            name,
            author_id,
            status,
            assigned_reviewers,
            created_at,
            merged_at,
            version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn open_pr(reviewers: &[&str]) -> PullRequest {
        PullRequest::new(
            "pr-1".to_string(),
            "Add feature".to_string(),
            uid("author"),
            reviewers.iter().map(|r| uid(r)).collect(),
        )
        .unwrap()
    }

    fn reviewer_ids(pr: &PullRequest) -> Vec<&str> {
        pr.assigned_reviewers().iter().map(UserId::as_str).collect()
    }

    #[test]
    fn new_pull_request_is_open() {
        let pr = open_pr(&["u1", "u2"]);

        assert_eq!(pr.status(), PullRequestStatus::Open);
        assert!(!pr.is_merged());
        assert!(pr.merged_at().is_none());
        assert_eq!(pr.version(), 0);
        assert_eq!(reviewer_ids(&pr), vec!["u1", "u2"]);
    }

    #[test]
    fn new_pull_request_without_reviewers() {
        let pr = open_pr(&[]);

        assert!(pr.assigned_reviewers().is_empty());
    }

    #[test]
    fn new_pull_request_with_empty_id_fails() {
        let result = PullRequest::new(String::new(), "x".to_string(), uid("a"), Vec::new());

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn new_pull_request_with_too_many_reviewers_fails() {
        let result = PullRequest::new(
            "pr-1".to_string(),
            "x".to_string(),
            uid("a"),
            vec![uid("u1"), uid("u2"), uid("u3")],
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn author_cannot_review_own_pull_request() {
        let result = PullRequest::new(
            "pr-1".to_string(),
            "x".to_string(),
            uid("a"),
            vec![uid("a")],
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn duplicate_reviewers_are_rejected() {
        let result = PullRequest::new(
            "pr-1".to_string(),
            "x".to_string(),
            uid("a"),
            vec![uid("u1"), uid("u1")],
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn open_pr_can_be_reassigned() {
        assert!(open_pr(&["u1"]).can_reassign().is_ok());
    }

    #[test]
    fn merged_pr_cannot_be_reassigned() {
        let mut pr = open_pr(&["u1"]);
        pr.merge();

        assert_eq!(
            pr.can_reassign(),
            Err(DomainError::PrMerged("pr-1".to_string()))
        );
    }

    #[test]
    fn replace_existing_reviewer_keeps_position() {
        let mut pr = open_pr(&["u1", "u2"]);

        pr.replace_reviewer(&uid("u1"), uid("u3")).unwrap();

        assert_eq!(reviewer_ids(&pr), vec!["u3", "u2"]);
    }

    #[test]
    fn replace_second_reviewer() {
        let mut pr = open_pr(&["u1", "u2"]);

        pr.replace_reviewer(&uid("u2"), uid("u3")).unwrap();

        assert_eq!(reviewer_ids(&pr), vec!["u1", "u3"]);
    }

    #[test]
    fn replace_with_same_reviewer_is_noop() {
        let mut pr = open_pr(&["u1", "u2"]);

        pr.replace_reviewer(&uid("u1"), uid("u1")).unwrap();

        assert_eq!(reviewer_ids(&pr), vec!["u1", "u2"]);
    }

    #[test]
    fn replace_same_id_succeeds_even_when_not_assigned() {
        let mut pr = open_pr(&["u1"]);

        assert!(pr.replace_reviewer(&uid("u9"), uid("u9")).is_ok());
        assert_eq!(reviewer_ids(&pr), vec!["u1"]);
    }

    #[test]
    fn replace_unassigned_reviewer_fails_and_leaves_list() {
        let mut pr = open_pr(&["u1", "u2"]);

        let result = pr.replace_reviewer(&uid("u3"), uid("u4"));

        assert_eq!(
            result,
            Err(DomainError::NotAssigned {
                pr_id: "pr-1".to_string(),
                reviewer_id: "u3".to_string(),
            })
        );
        assert_eq!(reviewer_ids(&pr), vec!["u1", "u2"]);
    }

    #[test]
    fn merge_sets_status_and_timestamp() {
        let mut pr = open_pr(&["u1"]);

        pr.merge();

        assert!(pr.is_merged());
        assert_eq!(pr.status(), PullRequestStatus::Merged);
        assert!(pr.merged_at().is_some());
    }

    #[test]
    fn merge_is_idempotent() {
        let mut pr = open_pr(&["u1"]);

        pr.merge();
        let merged_at = pr.merged_at();
        assert!(pr.is_merged());

        pr.merge();
        assert!(pr.is_merged());
        assert_eq!(pr.merged_at(), merged_at);
    }

    #[test]
    fn from_persistence_round_trips_fields() {
        let created_at = Utc::now();
        let pr = PullRequest::from_persistence(
            "pr-7".to_string(),
            "Fix bug".to_string(),
            uid("a"),
            PullRequestStatus::Merged,
            vec![uid("u1")],
            created_at,
            Some(created_at),
            3,
        );

        assert_eq!(pr.id(), "pr-7");
        assert_eq!(pr.name(), "Fix bug");
        assert_eq!(pr.author_id().as_str(), "a");
        assert!(pr.is_merged());
        assert!(pr.is_assigned(&uid("u1")));
        assert_eq!(pr.created_at(), created_at);
        assert_eq!(pr.version(), 3);
    }
}
