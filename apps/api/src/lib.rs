//! Pull request reviewer assignment service
//!
//! Teams register their members, pull requests get up to two reviewers
//! picked from the author's team, and reviewers can be swapped for another
//! active teammate until the pull request is merged.

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
