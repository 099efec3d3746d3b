use axum::{extract::State, response::IntoResponse};

use crate::content::pages;
use crate::middleware::ApiResponse;
use crate::mutations::{hero, ActionResult, FormData};
use crate::state::AppState;

/// GET /admin/hero
pub async fn hero_get(State(state): State<AppState>) -> impl IntoResponse {
    ApiResponse::success(pages::load_admin_hero(state.store.as_ref()).await)
}

/// POST /admin/hero
pub async fn hero_post(State(state): State<AppState>, form: FormData) -> ActionResult {
    hero::save_hero(&state, &form).await
}
