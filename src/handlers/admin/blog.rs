use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::content::pages;
use crate::middleware::ApiResponse;
use crate::mutations::{blog, ActionResult, FormData};
use crate::state::AppState;

/// GET /admin/blog - posts with their tag names
pub async fn blog_get(State(state): State<AppState>) -> impl IntoResponse {
    ApiResponse::success(pages::load_admin_blog(state.store.as_ref()).await)
}

/// POST /admin/blog - creates a post, or updates it when the form carries an id
pub async fn blog_post(State(state): State<AppState>, form: FormData) -> ActionResult {
    blog::save_blog_post(&state, &form).await
}

/// POST|PUT /admin/blog/:id
pub async fn blog_item_put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut form: FormData,
) -> ActionResult {
    form.set("id", id);
    blog::save_blog_post(&state, &form).await
}

/// DELETE /admin/blog/:id
pub async fn blog_item_delete(State(state): State<AppState>, Path(id): Path<String>) -> ActionResult {
    blog::delete_blog_post(&state, &id).await
}
