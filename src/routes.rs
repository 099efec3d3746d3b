use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{admin, public};
use crate::middleware::require_admin;
use crate::state::AppState;

/// Gallery uploads arrive as multipart bodies with a photo attached
const ADMIN_BODY_LIMIT: usize = 10 * 1024 * 1024;

pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security);

    Router::new()
        .merge(public_routes())
        .merge(admin_routes(state.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::home))
        .route("/about", get(public::about))
        .route("/services", get(public::services))
        .route("/gallery", get(public::gallery))
        .route("/gallery/:id", get(public::gallery_item))
        .route("/blog", get(public::blog))
        .route("/blog/:id", get(public::blog_post))
        .route("/sitemap.xml", get(public::sitemap_xml))
        .route("/robots.txt", get(public::robots_txt))
        .route("/health", get(public::health))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    use admin::{about, blog, faq, gallery, hero, services};

    let gated = Router::new()
        .route("/admin", get(admin::dashboard))
        .route("/admin/hero", get(hero::hero_get).post(hero::hero_post))
        .route("/admin/gallery", get(gallery::gallery_get).post(gallery::gallery_post))
        .route(
            "/admin/gallery/:id",
            post(gallery::gallery_item_put)
                .put(gallery::gallery_item_put)
                .delete(gallery::gallery_item_delete),
        )
        .route("/admin/services", get(services::services_get).post(services::services_post))
        .route(
            "/admin/services/:id",
            post(services::service_put)
                .put(services::service_put)
                .delete(services::service_delete),
        )
        .route("/admin/blog", get(blog::blog_get).post(blog::blog_post))
        .route(
            "/admin/blog/:id",
            post(blog::blog_item_put)
                .put(blog::blog_item_put)
                .delete(blog::blog_item_delete),
        )
        .route("/admin/faq", get(faq::faq_get).post(faq::faq_post))
        .route(
            "/admin/faq/:id",
            post(faq::faq_item_put)
                .put(faq::faq_item_put)
                .delete(faq::faq_item_delete),
        )
        .route("/admin/about", get(about::about_get).post(about::about_post))
        .route_layer(from_fn_with_state(state, require_admin));

    Router::new()
        .route("/admin/login", get(public::login_get).post(public::login_post))
        .route("/admin/logout", post(public::logout_post))
        .merge(gated)
        .layer(DefaultBodyLimit::max(ADMIN_BODY_LIMIT))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
