// handlers/public/seo.rs - GET /sitemap.xml and GET /robots.txt

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};

use crate::config::SiteConfig;
use crate::state::AppState;

const SITEMAP_ROUTES: [&str; 5] = ["", "/about", "/services", "/gallery", "/blog"];

pub fn sitemap(site: &SiteConfig, last_modified: &str) -> String {
    let base = site.base_url.trim_end_matches('/');
    let urls: String = SITEMAP_ROUTES
        .iter()
        .map(|path| {
            let priority = if path.is_empty() { "1.0" } else { "0.7" };
            format!(
                "  <url>\n    <loc>{base}{path}</loc>\n    <lastmod>{last_modified}</lastmod>\n    <changefreq>weekly</changefreq>\n    <priority>{priority}</priority>\n  </url>\n"
            )
        })
        .collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{urls}</urlset>\n"
    )
}

pub fn robots(site: &SiteConfig) -> String {
    format!(
        "User-Agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n",
        site.base_url.trim_end_matches('/')
    )
}

pub async fn sitemap_xml(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    (
        [(header::CONTENT_TYPE, "application/xml")],
        sitemap(&state.config.site, &now),
    )
}

pub async fn robots_txt(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain")],
        robots(&state.config.site),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn sitemap_lists_public_routes() {
        let config = AppConfig::development();
        let xml = sitemap(&config.site, "2024-05-01T00:00:00Z");

        assert_eq!(xml.matches("<url>").count(), 5);
        assert!(xml.contains("<loc>https://IVA.co.za</loc>\n    <lastmod>2024-05-01T00:00:00Z</lastmod>\n    <changefreq>weekly</changefreq>\n    <priority>1.0</priority>"));
        assert!(xml.contains("<loc>https://IVA.co.za/gallery</loc>"));
        assert_eq!(xml.matches("<priority>0.7</priority>").count(), 4);
    }

    #[test]
    fn robots_allows_everything() {
        let config = AppConfig::development();
        let txt = robots(&config.site);
        assert!(txt.starts_with("User-Agent: *\nAllow: /"));
        assert!(txt.contains("Sitemap: https://IVA.co.za/sitemap.xml"));
    }
}
