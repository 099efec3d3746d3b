use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::content::pages;
use crate::middleware::ApiResponse;
use crate::mutations::{gallery, ActionResult, FormData};
use crate::state::AppState;

/// GET /admin/gallery - every item with colors, badges and detail images
pub async fn gallery_get(State(state): State<AppState>) -> impl IntoResponse {
    ApiResponse::success(pages::load_admin_gallery(state.store.as_ref()).await)
}

/// POST /admin/gallery
pub async fn gallery_post(State(state): State<AppState>, form: FormData) -> ActionResult {
    gallery::create_gallery_item(&state, &form).await
}

/// POST|PUT /admin/gallery/:id
pub async fn gallery_item_put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut form: FormData,
) -> ActionResult {
    form.set("id", id);
    gallery::update_gallery_item(&state, &form).await
}

/// DELETE /admin/gallery/:id
pub async fn gallery_item_delete(State(state): State<AppState>, Path(id): Path<String>) -> ActionResult {
    gallery::delete_gallery_item(&state, &id).await
}
