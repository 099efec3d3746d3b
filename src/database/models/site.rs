use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Singleton hero banner (`site_hero`, id `home_hero`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct HeroRow {
    pub id: String,
    pub eyebrow: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub primary_cta_label: Option<String>,
    pub primary_cta_href: Option<String>,
    pub secondary_cta_label: Option<String>,
    pub secondary_cta_href: Option<String>,
    pub image_url: Option<String>,
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ThemeRow {
    pub brand: Option<String>,
    pub accent: Option<String>,
    pub bg: Option<String>,
    pub fg: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct NavItemRow {
    pub label: String,
    pub href: String,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ValuePropRow {
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FeatureRow {
    pub title: String,
    pub description: String,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TestimonialRow {
    pub quote: String,
    pub name: String,
    pub role: Option<String>,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FaqRow {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub sort_order: i32,
}

/// Singleton organisation row (`site_org`, id `default`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct OrgRow {
    pub id: String,
    pub brand_name: String,
    pub domain: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SocialLinkRow {
    pub org_id: String,
    pub platform: String,
    pub url: String,
}

/// Singleton contact row (`site_contact`, id `default`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ContactRow {
    pub id: String,
    pub phone: String,
    pub whatsapp: Option<String>,
    pub email: String,
    pub hours: Option<String>,
    pub address: String,
    pub map_query: String,
    pub map_embed_src: String,
}

/// Everything the about form writes in one go
#[derive(Debug, Clone, PartialEq)]
pub struct AboutRecord {
    pub org: OrgRow,
    pub contact: ContactRow,
    /// Platforms whose rows are replaced for `org.id`
    pub managed_platforms: Vec<String>,
    /// New rows; only platforms listed in `managed_platforms`
    pub social_links: Vec<SocialLinkRow>,
}
