//! Domain layer: records, write drafts, validation rules and repository
//! interfaces. Nothing here knows about HTTP or SeaORM.

pub mod error;
pub mod input;
pub mod issue;
pub mod repositories;
pub mod user;
pub mod validation;

pub use error::{DomainError, DomainResult};
pub use input::{NumericInput, TagsInput};
pub use issue::{
    CreateIssueDto, GetIssuesDto, Issue, IssueDraft, IssueFields, IssueRepository, IssueStatus,
    ReplaceIssueDto, UpdateIssueDto,
};
pub use repositories::RepositoryProvider;
pub use user::{
    CreateUserDto, GetUsersDto, UpdateUserDto, User, UserDraft, UserFields, UserRepository,
    UserRole, UserSummary,
};
pub use validation::{FieldError, ValidationFailure};
