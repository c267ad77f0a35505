// User domain module
// A user is a member of exactly one team

pub mod value_objects;

pub use value_objects::UserId;

/// A user as stored by the service
///
/// Users are created implicitly when a team is added; `team_name` always
/// points at the last team that listed them as a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub team_name: String,
    pub is_active: bool,
}
