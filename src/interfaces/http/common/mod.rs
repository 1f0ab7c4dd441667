//! Shared HTTP helpers: body extraction and pagination headers.

pub mod json_body;
pub mod pagination;

pub use json_body::JsonBody;
pub use pagination::{PageQuery, Paging};
