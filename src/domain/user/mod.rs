//! User aggregate
//!
//! Contains the User entity, write draft, DTOs, and repository interface.

pub mod draft;
pub mod model;
pub mod repository;

mod dto_create;
mod dto_get;
mod dto_update;

// Re-export model types
pub use model::{User, UserFields, UserRole, UserSummary};

pub use draft::UserDraft;

// Re-export DTOs
pub use dto_create::CreateUserDto;
pub use dto_get::GetUsersDto;
pub use dto_update::UpdateUserDto;

// Re-export repository trait
pub use repository::UserRepository;
