//! Issues module: reporting and tracking use-cases

pub mod service;

pub use service::IssueService;
