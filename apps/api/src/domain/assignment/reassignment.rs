use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pull_request::PullRequest;
use crate::domain::team::Team;
use crate::domain::user::UserId;

/// Replaces `old_reviewer_id` on a pull request with a random eligible team member
///
/// Gates are checked in order and the first failure wins:
/// 1. both the pull request and the team must be present (`NoCandidate`)
/// 2. the pull request must still be open (`PrMerged`)
/// 3. the old reviewer must be assigned (`NotAssigned`)
/// 4. some active member other than the old reviewer, the current
///    reviewers and the author must remain (`NoCandidate`)
///
/// The replacement is drawn uniformly from the remaining candidates and
/// written into the old reviewer's slot. Returns the new reviewer's id.
pub fn reassign_reviewer<R: Rng + ?Sized>(
    pull_request: Option<&mut PullRequest>,
    team: Option<&Team>,
    old_reviewer_id: &UserId,
    rng: &mut R,
) -> DomainResult<UserId> {
    let (pull_request, team) = match (pull_request, team) {
        (Some(pull_request), Some(team)) => (pull_request, team),
        _ => {
            return Err(DomainError::NoCandidate(
                "pull request or team is missing".to_string(),
            ))
        }
    };

    pull_request.can_reassign()?;

    if !pull_request.is_assigned(old_reviewer_id) {
        return Err(DomainError::NotAssigned {
            pr_id: pull_request.id().to_string(),
            reviewer_id: old_reviewer_id.to_string(),
        });
    }

    let candidates: Vec<&UserId> = team
        .active_members_except(&[old_reviewer_id, pull_request.author_id()])
        .into_iter()
        .map(|member| &member.id)
        .filter(|id| !pull_request.is_assigned(id))
        .collect();

    let new_reviewer_id = candidates
        .choose(rng)
        .map(|id| (*id).clone())
        .ok_or_else(|| {
            DomainError::NoCandidate(format!(
                "no active member of team {} can replace {} on {}",
                team.name(),
                old_reviewer_id,
                pull_request.id()
            ))
        })?;

    pull_request
        .replace_reviewer(old_reviewer_id, new_reviewer_id.clone())
        .map_err(|e| DomainError::Internal(format!("reviewer slot vanished: {}", e)))?;

    Ok(new_reviewer_id)
}
