//! Users module: citizen and manager accounts

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
