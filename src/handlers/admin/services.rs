use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::content::pages;
use crate::middleware::ApiResponse;
use crate::mutations::{services, ActionResult, FormData};
use crate::state::AppState;

/// GET /admin/services
pub async fn services_get(State(state): State<AppState>) -> impl IntoResponse {
    ApiResponse::success(pages::load_admin_services(state.store.as_ref()).await)
}

/// POST /admin/services
pub async fn services_post(State(state): State<AppState>, form: FormData) -> ActionResult {
    services::create_service(&state, &form).await
}

/// POST|PUT /admin/services/:id
pub async fn service_put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut form: FormData,
) -> ActionResult {
    form.set("id", id);
    services::update_service(&state, &form).await
}

/// DELETE /admin/services/:id
pub async fn service_delete(State(state): State<AppState>, Path(id): Path<String>) -> ActionResult {
    services::delete_service(&state, &id).await
}
