//! Users module: user management use-cases
//!
//! Contains the `UserService` used by the `/users` endpoints.

pub mod service;

pub use service::UserService;
