pub mod auth;
pub mod response;

pub use auth::{require_admin, session_token, AdminSession};
pub use response::ApiResponse;
