use crate::domain::user::UserId;

/// A member entry inside a team roster
///
/// `is_active` marks whether the member may currently be picked as a
/// reviewer. Inactive members stay on the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    pub id: UserId,
    pub name: String,
    pub is_active: bool,
}

impl TeamMember {
    /// Creates a new team member
    pub fn new(id: UserId, name: impl Into<String>, is_active: bool) -> Self {
        Self {
            id,
            name: name.into(),
            is_active,
        }
    }
}
