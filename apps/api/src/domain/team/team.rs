use std::collections::HashSet;

use super::value_objects::TeamMember;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;

/// Team aggregate root
///
/// A named roster of members from which reviewers are drawn.
///
/// # Invariants
/// - Name cannot be empty
/// - Member ids are unique within the team
/// - Member order is preserved as given
///
/// # Example
/// ```
/// use pr_reviewers_api::domain::team::{Team, TeamMember};
/// use pr_reviewers_api::domain::user::UserId;
///
/// let team = Team::new(
///     "backend".to_string(),
///     vec![
///         TeamMember::new(UserId::new("u1").unwrap(), "Alice", true),
///         TeamMember::new(UserId::new("u2").unwrap(), "Bob", false),
///     ],
/// )
/// .expect("valid team");
///
/// assert_eq!(team.name(), "backend");
/// assert_eq!(team.active_members_except(&[]).len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    name: String,
    members: Vec<TeamMember>,
}

impl Team {
    /// Creates a new Team aggregate
    ///
    /// # Returns
    /// * `Ok(Team)` - New team
    /// * `Err(DomainError::Validation)` - If the name is empty or a member id repeats
    pub fn new(name: String, members: Vec<TeamMember>) -> DomainResult<Self> {
        if name.trim().is_empty() {
            return Err(DomainError::Validation(
                "team_name cannot be empty".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(members.len());
        for member in &members {
            if !seen.insert(&member.id) {
                return Err(DomainError::Validation(format!(
                    "user_id must be unique within team members: {}",
                    member.id
                )));
            }
        }

        Ok(Self { name, members })
    }

    /// Returns every active member whose id is not excluded, in roster order
    pub fn active_members_except(&self, excluded: &[&UserId]) -> Vec<&TeamMember> {
        self.members
            .iter()
            .filter(|m| m.is_active && !excluded.contains(&&m.id))
            .collect()
    }

    // ===== Getters =====

    /// Returns the team's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the roster in order
    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    /// Reconstructs a Team from persistence layer data
    ///
    /// # Note
    /// Only to be used by repository implementations for data reconstruction.
    pub fn from_persistence(name: String, members: Vec<TeamMember>) -> Self {
        Self { name, members }
    }
}
