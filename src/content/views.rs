//! View models handed to the presentational layer.
//!
//! Column names are snake_case in the store and camelCase here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ThemeConfig;
use crate::database::models::*;
use crate::filter::GalleryQuery;

use super::format::{format_price_zar, price_value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeView {
    pub brand: String,
    pub accent: String,
    pub bg: String,
    pub fg: String,
}

impl ThemeView {
    /// Row values win; blank or missing columns fall back to the configured defaults
    pub fn merge(defaults: &ThemeConfig, row: Option<&ThemeRow>) -> Self {
        let pick = |value: Option<&Option<String>>, fallback: &str| {
            value
                .and_then(|v| v.as_deref())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };
        Self {
            brand: pick(row.map(|r| &r.brand), &defaults.brand),
            accent: pick(row.map(|r| &r.accent), &defaults.accent),
            bg: pick(row.map(|r| &r.bg), &defaults.bg),
            fg: pick(row.map(|r| &r.fg), &defaults.fg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavItemView {
    pub label: String,
    pub href: String,
}

impl From<NavItemRow> for NavItemView {
    fn from(row: NavItemRow) -> Self {
        Self {
            label: row.label,
            href: row.href,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgView {
    pub brand_name: String,
    pub domain: String,
}

impl From<OrgRow> for OrgView {
    fn from(row: OrgRow) -> Self {
        Self {
            brand_name: row.brand_name,
            domain: row.domain,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactView {
    pub phone: String,
    pub whatsapp: Option<String>,
    pub email: String,
    pub hours: Option<String>,
    pub address: String,
    pub map_query: String,
    pub map_embed_src: String,
}

impl From<ContactRow> for ContactView {
    fn from(row: ContactRow) -> Self {
        Self {
            phone: row.phone,
            whatsapp: row.whatsapp,
            email: row.email,
            hours: row.hours,
            address: row.address,
            map_query: row.map_query,
            map_embed_src: row.map_embed_src,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocialLinkView {
    pub platform: String,
    pub url: String,
}

impl From<SocialLinkRow> for SocialLinkView {
    fn from(row: SocialLinkRow) -> Self {
        Self {
            platform: row.platform,
            url: row.url,
        }
    }
}

/// Shell around every public page: header nav, footer and theme variables
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutView {
    pub theme: ThemeView,
    pub nav: Vec<NavItemView>,
    pub org: Option<OrgView>,
    pub contact: Option<ContactView>,
    pub social_links: Vec<SocialLinkView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroView {
    pub eyebrow: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub primary_cta_label: Option<String>,
    pub primary_cta_href: Option<String>,
    pub secondary_cta_label: Option<String>,
    pub secondary_cta_href: Option<String>,
    pub image: Option<String>,
    pub alt: Option<String>,
}

impl From<HeroRow> for HeroView {
    fn from(row: HeroRow) -> Self {
        Self {
            eyebrow: row.eyebrow,
            title: row.title,
            description: row.description,
            primary_cta_label: row.primary_cta_label,
            primary_cta_href: row.primary_cta_href,
            secondary_cta_label: row.secondary_cta_label,
            secondary_cta_href: row.secondary_cta_href,
            image: row.image_url,
            alt: row.alt,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuePropView {
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
}

impl From<ValuePropRow> for ValuePropView {
    fn from(row: ValuePropRow) -> Self {
        Self {
            title: row.title,
            description: row.description,
            icon: row.icon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureView {
    pub title: String,
    pub description: String,
}

impl From<FeatureRow> for FeatureView {
    fn from(row: FeatureRow) -> Self {
        Self {
            title: row.title,
            description: row.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestimonialView {
    pub quote: String,
    pub name: String,
    pub role: Option<String>,
}

impl From<TestimonialRow> for TestimonialView {
    fn from(row: TestimonialRow) -> Self {
        Self {
            quote: row.quote,
            name: row.name,
            role: row.role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaqEntry {
    pub q: String,
    pub a: String,
}

impl From<FaqRow> for FaqEntry {
    fn from(row: FaqRow) -> Self {
        Self {
            q: row.question,
            a: row.answer,
        }
    }
}

/// Also read back from the cached `/gallery` item list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItemView {
    pub id: String,
    pub title: String,
    pub category: String,
    pub size: String,
    pub dimensions: Option<String>,
    pub material: String,
    pub origin: Option<String>,
    #[serde(rename = "priceZAR")]
    pub price_zar: f64,
    pub price_label: String,
    pub description: String,
    pub image: String,
    pub colors: Vec<String>,
    pub badges: Vec<String>,
    pub gallery: Vec<String>,
}

impl GalleryItemView {
    /// Project an item row; child collections start empty
    pub fn from_row(row: GalleryItemRow) -> Self {
        Self {
            price_zar: price_value(row.price_zar),
            price_label: format_price_zar(row.price_zar),
            id: row.id,
            title: row.title,
            category: row.category,
            size: row.size,
            dimensions: row.dimensions,
            material: row.material,
            origin: row.origin,
            description: row.description,
            image: row.image_url,
            colors: Vec::new(),
            badges: Vec::new(),
            gallery: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub bullets: Vec<String>,
    #[serde(rename = "fromPriceZAR")]
    pub from_price_zar: Option<f64>,
    pub from_price_label: Option<String>,
    pub sort_order: i32,
}

impl ServiceView {
    pub fn from_row(row: ServiceRow, bullets: Vec<String>) -> Self {
        Self {
            from_price_zar: row.from_price_zar.map(price_value),
            from_price_label: row.from_price_zar.map(format_price_zar),
            id: row.id,
            title: row.title,
            description: row.description,
            bullets,
            sort_order: row.sort_order,
        }
    }
}

/// One entry of the blog index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogPostSummary {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub date: Option<DateTime<Utc>>,
    pub excerpt: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostView {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub published_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

impl BlogPostView {
    pub fn from_row(row: BlogPostRow, tags: Vec<String>) -> Self {
        Self {
            id: row.id,
            title: row.title,
            slug: row.slug,
            excerpt: row.excerpt.unwrap_or_default(),
            content: row.content,
            published_at: row.published_at,
            tags,
        }
    }

    pub fn summary(&self) -> BlogPostSummary {
        BlogPostSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            slug: self.slug.clone(),
            date: self.published_at,
            excerpt: self.excerpt.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// Head tags for a detail page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub canonical_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub hero: Option<HeroView>,
    pub value_props: Vec<ValuePropView>,
    pub features: Vec<FeatureView>,
    pub testimonials: Vec<TestimonialView>,
    pub faq: Vec<FaqEntry>,
    pub contact: Option<ContactView>,
    pub featured_gallery: Vec<GalleryItemView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AboutPage {
    pub contact: Option<ContactView>,
    pub org: Option<OrgView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServicesPage {
    pub services: Vec<ServiceView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetOptions {
    pub categories: Vec<&'static str>,
    pub sizes: Vec<&'static str>,
    pub materials: Vec<&'static str>,
    pub colors: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryPage {
    /// Items left after search, facets and sort
    pub items: Vec<GalleryItemView>,
    pub total: usize,
    pub query: GalleryQuery,
    pub options: FacetOptions,
    pub search_debounce_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryItemPage {
    pub item: GalleryItemView,
    /// Main image followed by the detail images
    pub images: Vec<String>,
    pub metadata: PageMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogPage {
    pub posts: Vec<BlogPostSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogPostPage {
    pub post: BlogPostView,
    pub metadata: PageMetadata,
}

/// Public page with its layout shell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView<T: Serialize, L: Serialize = LayoutView> {
    pub layout: L,
    pub page: T,
}

// Admin views

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminSection {
    pub href: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminDashboard {
    pub user: Option<String>,
    pub sections: Vec<AdminSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminHeroPage {
    pub hero: Option<HeroRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminGalleryPage {
    pub items: Vec<GalleryItemView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminServicesPage {
    pub services: Vec<ServiceView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminBlogPage {
    pub posts: Vec<BlogPostView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminFaqPage {
    pub items: Vec<FaqRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAboutPage {
    pub org: Option<OrgView>,
    pub contact: Option<ContactView>,
    pub instagram_url: Option<String>,
    pub facebook_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginView {
    pub default_email: String,
    pub error: Option<String>,
}
