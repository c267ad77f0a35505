// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod memory;
pub mod postgres_pull_request_repository;
pub mod postgres_team_repository;
pub mod postgres_user_repository;

pub use memory::InMemoryStore;
pub use postgres_pull_request_repository::PostgresPullRequestRepository;
pub use postgres_team_repository::PostgresTeamRepository;
pub use postgres_user_repository::PostgresUserRepository;
