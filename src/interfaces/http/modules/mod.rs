pub mod health;
pub mod issues;
pub mod request_id;
pub mod users;
