//! Issue aggregate

pub mod draft;
pub mod model;
pub mod repository;

mod dto_create;
mod dto_get;
mod dto_update;

pub use model::{Issue, IssueFields, IssueStatus};

pub use draft::IssueDraft;

pub use dto_create::{CreateIssueDto, ReplaceIssueDto};
pub use dto_get::GetIssuesDto;
pub use dto_update::UpdateIssueDto;

pub use repository::IssueRepository;
