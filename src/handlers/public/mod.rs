// handlers/public/mod.rs - Public handlers (no authentication)
//
// Storefront pages, crawler files, health and the admin login/logout
// endpoints that must stay reachable without a session.

pub mod health;
pub mod login;
pub mod pages;
pub mod seo;

pub use health::health;
pub use login::{login_get, login_post, logout_post};
pub use pages::{about, blog, blog_post, gallery, gallery_item, home, services};
pub use seo::{robots_txt, sitemap_xml};
