//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod issue_repo;
pub mod journal_repo;
pub mod member_repo;
pub mod project_repo;
pub mod role_repo;
pub mod user_repo;

pub use issue_repo::IssueRepo;
pub use journal_repo::JournalRepo;
pub use member_repo::MemberRepo;
pub use project_repo::ProjectRepo;
pub use role_repo::RoleRepo;
pub use user_repo::UserRepo;
