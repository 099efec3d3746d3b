use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::content::pages;
use crate::middleware::ApiResponse;
use crate::mutations::{faq, ActionResult, FormData};
use crate::state::AppState;

/// GET /admin/faq
pub async fn faq_get(State(state): State<AppState>) -> impl IntoResponse {
    ApiResponse::success(pages::load_admin_faq(state.store.as_ref()).await)
}

/// POST /admin/faq
pub async fn faq_post(State(state): State<AppState>, form: FormData) -> ActionResult {
    faq::create_faq(&state, &form).await
}

/// POST|PUT /admin/faq/:id - `intent=delete` deletes instead of updating
pub async fn faq_item_put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut form: FormData,
) -> ActionResult {
    form.set("id", id);
    faq::update_faq(&state, &form).await
}

/// DELETE /admin/faq/:id
pub async fn faq_item_delete(State(state): State<AppState>, Path(id): Path<String>) -> ActionResult {
    let mut form = FormData::default();
    form.set("id", id);
    form.set("intent", "delete");
    faq::update_faq(&state, &form).await
}
