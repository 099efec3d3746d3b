use axum::{extract::State, response::IntoResponse};

use crate::content::pages;
use crate::middleware::ApiResponse;
use crate::mutations::{about, ActionResult, FormData};
use crate::state::AppState;

/// GET /admin/about - org, contact and the instagram/facebook links
pub async fn about_get(State(state): State<AppState>) -> impl IntoResponse {
    ApiResponse::success(pages::load_admin_about(state.store.as_ref()).await)
}

/// POST /admin/about
pub async fn about_post(State(state): State<AppState>, form: FormData) -> ActionResult {
    about::save_about(&state, &form).await
}
