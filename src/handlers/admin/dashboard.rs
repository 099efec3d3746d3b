use axum::{extract::Extension, response::IntoResponse};

use crate::content::pages;
use crate::middleware::{AdminSession, ApiResponse};

/// GET /admin - section links plus the signed-in user's email
pub async fn dashboard(Extension(session): Extension<AdminSession>) -> impl IntoResponse {
    ApiResponse::success(pages::admin_dashboard(session.user.email))
}
