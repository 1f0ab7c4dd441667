//! Database entities module

pub mod issue;
pub mod user;

pub use issue::Entity as Issue;
pub use user::Entity as User;
