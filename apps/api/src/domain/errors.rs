use std::fmt::Display;

use thiserror::Error;

/// Errors produced by the review-assignment domain and its repositories
///
/// Every variant is a distinct kind so callers can tell "not found" from
/// "conflict" from "invalid operation" without parsing messages.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Team already exists: {0}")]
    TeamExists(String),

    #[error("Pull request already exists: {0}")]
    PrExists(String),

    #[error("Pull request is already merged: {0}")]
    PrMerged(String),

    #[error("Reviewer {reviewer_id} is not assigned to pull request {pr_id}")]
    NotAssigned { pr_id: String, reviewer_id: String },

    #[error("No active replacement candidate: {0}")]
    NoCandidate(String),

    #[error("Pull request was modified concurrently: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Storage error while trying to {context}: {message}")]
    Storage {
        context: &'static str,
        message: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Shorthand for a missing entity
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Wraps a storage-layer failure with the operation that was running
    pub fn storage(context: &'static str, err: impl Display) -> Self {
        Self::Storage {
            context,
            message: err.to_string(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
