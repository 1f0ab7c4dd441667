//! Issues module: reported civic problems

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
