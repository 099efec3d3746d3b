//! Table names of the site schema (see `migrations/0001_site_schema.sql`)

pub const HERO: &str = "site_hero";
pub const THEME: &str = "site_theme";
pub const NAV_ITEMS: &str = "site_nav_items";
pub const VALUE_PROPS: &str = "site_value_props";
pub const FEATURES: &str = "site_features";
pub const TESTIMONIALS: &str = "site_testimonials";
pub const FAQ: &str = "site_faq";
pub const ORG: &str = "site_org";
pub const ORG_SOCIAL: &str = "site_org_social";
pub const CONTACT: &str = "site_contact";
pub const GALLERY_ITEMS: &str = "site_gallery_items";
pub const GALLERY_COLORS: &str = "site_gallery_colors";
pub const GALLERY_BADGES: &str = "site_gallery_badges";
pub const GALLERY_DETAIL_IMAGES: &str = "site_gallery_detail_images";
pub const SERVICES: &str = "site_services";
pub const SERVICE_BULLETS: &str = "site_service_bullets";
pub const BLOG_POSTS: &str = "site_blog_posts";
pub const BLOG_TAGS: &str = "site_blog_tags";
pub const BLOG_POST_TAGS: &str = "site_blog_post_tags";

/// Singleton row ids
pub const HERO_ID: &str = "home_hero";
pub const DEFAULT_ID: &str = "default";
