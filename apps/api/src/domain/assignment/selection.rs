use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::pull_request::MAX_REVIEWERS;
use crate::domain::team::Team;
use crate::domain::user::UserId;

/// Chooses the initial reviewers for a new pull request
///
/// Candidates are the active team members other than the author. When there
/// are at most [`MAX_REVIEWERS`] of them all are taken in roster order;
/// otherwise the candidates are shuffled uniformly and the first
/// [`MAX_REVIEWERS`] are taken.
///
/// Returns `None` when there is no team. The pull request is then created
/// without reviewers.
pub fn select_reviewers<R: Rng + ?Sized>(
    team: Option<&Team>,
    author_id: &UserId,
    rng: &mut R,
) -> Option<Vec<UserId>> {
    let team = team?;

    let mut candidates: Vec<UserId> = team
        .active_members_except(&[author_id])
        .into_iter()
        .map(|member| member.id.clone())
        .collect();

    if candidates.len() > MAX_REVIEWERS {
        candidates.shuffle(rng);
        candidates.truncate(MAX_REVIEWERS);
    }

    Some(candidates)
}
