// Repository interfaces (ports)
// Implemented by adapters in the infrastructure layer

pub mod pull_request_repository;
pub mod team_repository;
pub mod user_repository;

pub use pull_request_repository::PullRequestRepository;
pub use team_repository::TeamRepository;
pub use user_repository::UserRepository;
