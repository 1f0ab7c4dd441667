//! HTTP REST API interfaces
//!
//! - `common`: JSON body extractor and pagination headers
//! - `error`: domain error → HTTP response mapping
//! - `modules`: handlers and DTOs per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod error;
pub mod modules;
pub mod router;

pub use common::Paging;
pub use error::{ApiError, ApiResult, ErrorBody};
pub use router::{create_api_router, router_with_state, ApiDoc, ApiState};
