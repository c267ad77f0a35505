use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::errors::DomainError;

/// UserId value object identifying a user and team member
///
/// # Invariants
/// - Never empty or whitespace-only
/// - Is immutable after construction
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "String", into = "String")]
#[sqlx(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId value object
    ///
    /// # Returns
    /// * `Ok(UserId)` - If the id is non-empty
    /// * `Err(DomainError::Validation)` - If the id is empty
    ///
    /// # Example
    /// ```
    /// use pr_reviewers_api::domain::user::value_objects::UserId;
    ///
    /// let id = UserId::new("u1").expect("valid id");
    /// assert_eq!(id.as_str(), "u1");
    /// assert!(UserId::new("  ").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::Validation("user_id cannot be empty".to_string()));
        }
        Ok(UserId(id))
    }

    /// Returns the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
