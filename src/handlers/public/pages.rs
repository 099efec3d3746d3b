// handlers/public/pages.rs - storefront page view models
//
// Every page is served from the page cache when fresh and rebuilt from the
// content store otherwise. The response carries the layout shell next to the
// page itself.

use axum::{
    extract::{Path, RawQuery, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tracing::error;

use crate::cache::LAYOUT;
use crate::content::pages;
use crate::content::views::{GalleryItemView, PageView};
use crate::error::ApiError;
use crate::filter::Filter;
use crate::middleware::ApiResponse;
use crate::state::AppState;

const GALLERY: &str = "/gallery";

async fn layout(state: &AppState) -> Option<Arc<Value>> {
    state
        .cache
        .get_or_load(LAYOUT, || async {
            Some(pages::load_layout(state.store.as_ref(), &state.config).await)
        })
        .await
}

async fn render<T, F, Fut>(state: &AppState, key: &str, load: F) -> Response
where
    T: Serialize,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let layout = layout(state).await;

    let Some(page) = state.cache.get_or_load(key, load).await else {
        return ApiError::not_found(format!("Page not found: {}", key)).into_response();
    };

    let page: &Value = &page;
    ApiResponse::success(PageView {
        layout: layout.as_deref(),
        page,
    })
    .into_response()
}

/// GET / - hero, value props, features, testimonials, FAQ and featured rugs
pub async fn home(State(state): State<AppState>) -> Response {
    render(&state, "/", || async {
        Some(pages::load_home(state.store.as_ref(), &state.config).await)
    })
    .await
}

/// GET /about
pub async fn about(State(state): State<AppState>) -> Response {
    render(&state, "/about", || async {
        Some(pages::load_about(state.store.as_ref()).await)
    })
    .await
}

/// GET /services
pub async fn services(State(state): State<AppState>) -> Response {
    render(&state, "/services", || async {
        Some(pages::load_services(state.store.as_ref()).await)
    })
    .await
}

/// GET /gallery?q=&category=&size=&material=&color=&sort=
///
/// Only the unfiltered item list is cached; search, facets and sort run on
/// every request.
pub async fn gallery(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Response {
    let filter = Filter::from_query_string(raw.as_deref());
    let layout = layout(&state).await;

    let Some(cached) = state
        .cache
        .get_or_load(GALLERY, || async {
            Some(pages::load_gallery_items(state.store.as_ref()).await)
        })
        .await
    else {
        return ApiError::internal_server_error("Gallery could not be loaded").into_response();
    };

    let items = match Vec::<GalleryItemView>::deserialize(&*cached) {
        Ok(items) => items,
        Err(e) => {
            error!("Cached gallery list is unreadable: {}", e);
            return ApiError::internal_server_error("Gallery could not be loaded").into_response();
        }
    };

    ApiResponse::success(PageView {
        layout: layout.as_deref(),
        page: pages::gallery_page(&items, filter, &state.config),
    })
    .into_response()
}

/// GET /gallery/:id
pub async fn gallery_item(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let key = format!("/gallery/{}", id);
    render(&state, &key, || {
        pages::load_gallery_item(state.store.as_ref(), &state.config, &id)
    })
    .await
}

/// GET /blog
pub async fn blog(State(state): State<AppState>) -> Response {
    render(&state, "/blog", || async {
        Some(pages::load_blog(state.store.as_ref()).await)
    })
    .await
}

/// GET /blog/:id
pub async fn blog_post(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let key = format!("/blog/{}", id);
    render(&state, &key, || {
        pages::load_blog_post(state.store.as_ref(), &state.config, &id)
    })
    .await
}
