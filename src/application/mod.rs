//! Application layer: use-cases orchestrating the domain repositories.

pub mod issues;
pub mod users;

pub use issues::IssueService;
pub use users::UserService;
