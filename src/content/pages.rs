//! Page loaders: concurrent reads, grouping, projection.
//!
//! A failing read is logged and treated as empty so the rest of the page
//! still renders.

use tracing::error;

use crate::config::{AppConfig, SiteConfig};
use crate::database::store::{ContentStore, StoreResult};
use crate::database::tables;
use crate::filter::{options, Filter};

use super::aggregate::{blog_views, gallery_views, service_views};
use super::views::*;

fn settle<T: Default>(what: &str, result: StoreResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            error!("Error fetching {}: {}", what, e);
            T::default()
        }
    }
}

fn canonical(site: &SiteConfig, path: &str) -> String {
    format!("{}{}", site.base_url.trim_end_matches('/'), path)
}

pub async fn load_layout(store: &dyn ContentStore, config: &AppConfig) -> LayoutView {
    let (theme, nav, org, contact, social) = tokio::join!(
        store.theme(),
        store.nav_items(),
        store.org(),
        store.contact(),
        store.social_links(tables::DEFAULT_ID),
    );

    let theme = settle(tables::THEME, theme);
    LayoutView {
        theme: ThemeView::merge(&config.theme, theme.as_ref()),
        nav: settle(tables::NAV_ITEMS, nav).into_iter().map(Into::into).collect(),
        org: settle(tables::ORG, org).map(Into::into),
        contact: settle(tables::CONTACT, contact).map(Into::into),
        social_links: settle(tables::ORG_SOCIAL, social)
            .into_iter()
            .map(Into::into)
            .collect(),
    }
}

pub async fn load_home(store: &dyn ContentStore, config: &AppConfig) -> HomePage {
    let (hero, value_props, features, testimonials, faq, contact, featured) = tokio::join!(
        store.hero(),
        store.value_props(),
        store.features(),
        store.testimonials(),
        store.faq_items(),
        store.contact(),
        store.gallery_items(Some(config.site.featured_limit)),
    );

    HomePage {
        hero: settle(tables::HERO, hero).map(Into::into),
        value_props: settle(tables::VALUE_PROPS, value_props)
            .into_iter()
            .map(Into::into)
            .collect(),
        features: settle(tables::FEATURES, features)
            .into_iter()
            .map(Into::into)
            .collect(),
        testimonials: settle(tables::TESTIMONIALS, testimonials)
            .into_iter()
            .map(Into::into)
            .collect(),
        faq: settle(tables::FAQ, faq).into_iter().map(Into::into).collect(),
        contact: settle(tables::CONTACT, contact).map(Into::into),
        // Featured cards show the main image only
        featured_gallery: settle(tables::GALLERY_ITEMS, featured)
            .into_iter()
            .map(GalleryItemView::from_row)
            .collect(),
    }
}

pub async fn load_about(store: &dyn ContentStore) -> AboutPage {
    let (contact, org) = tokio::join!(store.contact(), store.org());
    AboutPage {
        contact: settle(tables::CONTACT, contact).map(Into::into),
        org: settle(tables::ORG, org).map(Into::into),
    }
}

pub async fn load_services(store: &dyn ContentStore) -> ServicesPage {
    let (services, bullets) = tokio::join!(store.services(), store.service_bullets());
    ServicesPage {
        services: service_views(
            settle(tables::SERVICES, services),
            settle(tables::SERVICE_BULLETS, bullets),
        ),
    }
}

/// Every gallery item with its children, ordered by title
pub async fn load_gallery_items(store: &dyn ContentStore) -> Vec<GalleryItemView> {
    let (items, colors, badges, images) = tokio::join!(
        store.gallery_items(None),
        store.gallery_colors(None),
        store.gallery_badges(None),
        store.gallery_detail_images(None),
    );

    gallery_views(
        settle(tables::GALLERY_ITEMS, items),
        settle(tables::GALLERY_COLORS, colors),
        settle(tables::GALLERY_BADGES, badges),
        settle(tables::GALLERY_DETAIL_IMAGES, images),
    )
}

pub fn facet_options() -> FacetOptions {
    FacetOptions {
        categories: options::CATEGORY_OPTIONS.to_vec(),
        sizes: options::SIZE_OPTIONS.to_vec(),
        materials: options::MATERIAL_OPTIONS.to_vec(),
        colors: options::COLOR_OPTIONS.to_vec(),
    }
}

/// Apply the request's filter to an already loaded item list
pub fn gallery_page(items: &[GalleryItemView], filter: Filter, config: &AppConfig) -> GalleryPage {
    let matched = filter.apply(items);
    GalleryPage {
        total: items.len(),
        items: matched,
        query: filter.into_query(),
        options: facet_options(),
        search_debounce_ms: config.site.search_debounce_ms,
    }
}

pub async fn load_gallery_item(
    store: &dyn ContentStore,
    config: &AppConfig,
    id: &str,
) -> Option<GalleryItemPage> {
    let (item, colors, badges, images) = tokio::join!(
        store.gallery_item(id),
        store.gallery_colors(Some(id)),
        store.gallery_badges(Some(id)),
        store.gallery_detail_images(Some(id)),
    );

    let row = settle(tables::GALLERY_ITEMS, item)?;
    let item = gallery_views(
        vec![row],
        settle(tables::GALLERY_COLORS, colors),
        settle(tables::GALLERY_BADGES, badges),
        settle(tables::GALLERY_DETAIL_IMAGES, images),
    )
    .into_iter()
    .next()?;

    let description = if item.description.trim().is_empty() {
        format!("Browse details of {} from the IVA rug gallery.", item.title)
    } else {
        item.description.clone()
    };
    let metadata = PageMetadata {
        title: format!("{} | IVA gallery", item.title),
        description,
        canonical_url: canonical(&config.site, &format!("/gallery/{}", item.id)),
    };

    let mut images = vec![item.image.clone()];
    images.extend(item.gallery.iter().cloned());

    Some(GalleryItemPage {
        item,
        images,
        metadata,
    })
}

async fn load_blog_views(store: &dyn ContentStore) -> Vec<BlogPostView> {
    let (posts, tags, links) = tokio::join!(
        store.blog_posts(),
        store.blog_tags(),
        store.blog_post_tags(None),
    );
    blog_views(
        settle(tables::BLOG_POSTS, posts),
        settle(tables::BLOG_TAGS, tags),
        settle(tables::BLOG_POST_TAGS, links),
    )
}

pub async fn load_blog(store: &dyn ContentStore) -> BlogPage {
    BlogPage {
        posts: load_blog_views(store)
            .await
            .iter()
            .map(BlogPostView::summary)
            .collect(),
    }
}

pub async fn load_blog_post(
    store: &dyn ContentStore,
    config: &AppConfig,
    id: &str,
) -> Option<BlogPostPage> {
    let (post, tags, links) = tokio::join!(
        store.blog_post(id),
        store.blog_tags(),
        store.blog_post_tags(Some(id)),
    );

    let row = settle(tables::BLOG_POSTS, post)?;
    let post = blog_views(
        vec![row],
        settle(tables::BLOG_TAGS, tags),
        settle(tables::BLOG_POST_TAGS, links),
    )
    .into_iter()
    .next()?;

    let description = if post.excerpt.trim().is_empty() {
        "Rug care tips and buying guides from IVA in Klerksdorp.".to_string()
    } else {
        post.excerpt.clone()
    };
    let slug_or_id = if post.slug.is_empty() { &post.id } else { &post.slug };
    let metadata = PageMetadata {
        title: format!("{} | IVA Blog", post.title),
        description,
        canonical_url: canonical(&config.site, &format!("/blog/{slug_or_id}")),
    };

    Some(BlogPostPage { post, metadata })
}

// Admin read views

pub fn admin_dashboard(user: Option<String>) -> AdminDashboard {
    let section = |href, label, description| AdminSection {
        href,
        label,
        description,
    };
    AdminDashboard {
        user,
        sections: vec![
            section("/admin/hero", "Homepage", "Edit headline, description and buttons on the homepage."),
            section("/admin/gallery", "Products", "Add, edit and remove rugs, colours, badges and images."),
            section("/admin/services", "Services", "Manage service cards and bullet points."),
            section("/admin/blog", "Blog", "Create and edit rug care guides and buying tips."),
            section("/admin/about", "Contact & brand", "Edit brand name, phone, WhatsApp, email, address and map embed."),
            section("/admin/faq", "FAQ", "Manage common customer questions."),
        ],
    }
}

pub async fn load_admin_hero(store: &dyn ContentStore) -> AdminHeroPage {
    AdminHeroPage {
        hero: settle(tables::HERO, store.hero().await),
    }
}

pub async fn load_admin_gallery(store: &dyn ContentStore) -> AdminGalleryPage {
    AdminGalleryPage {
        items: load_gallery_items(store).await,
    }
}

pub async fn load_admin_services(store: &dyn ContentStore) -> AdminServicesPage {
    AdminServicesPage {
        services: load_services(store).await.services,
    }
}

pub async fn load_admin_blog(store: &dyn ContentStore) -> AdminBlogPage {
    AdminBlogPage {
        posts: load_blog_views(store).await,
    }
}

pub async fn load_admin_faq(store: &dyn ContentStore) -> AdminFaqPage {
    AdminFaqPage {
        items: settle(tables::FAQ, store.faq_items().await),
    }
}

pub async fn load_admin_about(store: &dyn ContentStore) -> AdminAboutPage {
    let (org, contact, social) = tokio::join!(
        store.org(),
        store.contact(),
        store.social_links(tables::DEFAULT_ID),
    );
    let social = settle(tables::ORG_SOCIAL, social);
    let url_for = |platform: &str| {
        social
            .iter()
            .find(|link| link.platform == platform)
            .map(|link| link.url.clone())
    };

    AdminAboutPage {
        org: settle(tables::ORG, org).map(Into::into),
        contact: settle(tables::CONTACT, contact).map(Into::into),
        instagram_url: url_for("instagram"),
        facebook_url: url_for("facebook"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::*;
    use crate::database::{MemoryStore, MemoryTables};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn rug(id: &str, title: &str, price: i64) -> GalleryItemRow {
        GalleryItemRow {
            id: id.to_string(),
            title: title.to_string(),
            category: "Persian".to_string(),
            size: "Large (200x300)".to_string(),
            material: "Wool".to_string(),
            price_zar: Decimal::new(price, 0),
            description: String::new(),
            image_url: format!("https://cdn/{id}.jpg"),
            ..Default::default()
        }
    }

    fn seeded() -> MemoryStore {
        let gallery_items = (0..10)
            .map(|i| rug(&format!("rug-{i}"), &format!("Rug {i:02}"), 1000 + i))
            .collect();
        MemoryStore::from_tables(MemoryTables {
            gallery_items,
            gallery_colors: vec![GalleryColorRow {
                item_id: "rug-3".to_string(),
                color: "Red".to_string(),
            }],
            gallery_detail_images: vec![GalleryDetailImageRow {
                item_id: "rug-3".to_string(),
                image_url: "https://cdn/rug-3-detail.jpg".to_string(),
            }],
            faq: vec![FaqRow {
                id: 1,
                question: "Do you deliver?".to_string(),
                answer: "Yes, locally.".to_string(),
                sort_order: 0,
            }],
            blog_posts: vec![
                BlogPostRow {
                    id: "old".to_string(),
                    title: "Old".to_string(),
                    slug: "old-post".to_string(),
                    published_at: Some(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()),
                    ..Default::default()
                },
                BlogPostRow {
                    id: "new".to_string(),
                    title: "New".to_string(),
                    slug: "new-post".to_string(),
                    excerpt: Some("Fresh".to_string()),
                    published_at: Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn home_features_first_items_without_children() {
        let store = seeded();
        let config = AppConfig::development();
        let home = load_home(&store, &config).await;

        assert_eq!(home.featured_gallery.len(), 8);
        assert_eq!(home.featured_gallery[0].title, "Rug 00");
        assert!(home.featured_gallery[3].colors.is_empty());
        assert_eq!(home.faq[0].q, "Do you deliver?");
        assert!(home.hero.is_none());
    }

    #[tokio::test]
    async fn failing_table_blanks_only_its_section() {
        let store = seeded().with_unavailable_table(tables::FAQ);
        let home = load_home(&store, &AppConfig::development()).await;
        assert!(home.faq.is_empty());
        assert_eq!(home.featured_gallery.len(), 8);
    }

    #[tokio::test]
    async fn layout_uses_theme_defaults_without_row() {
        let layout = load_layout(&seeded(), &AppConfig::development()).await;
        assert_eq!(layout.theme.brand, "#ED1944");
        assert!(layout.org.is_none());
    }

    #[tokio::test]
    async fn gallery_item_page_has_metadata_and_images() {
        let page = load_gallery_item(&seeded(), &AppConfig::development(), "rug-3")
            .await
            .unwrap();

        assert_eq!(page.metadata.title, "Rug 03 | IVA gallery");
        assert_eq!(page.metadata.canonical_url, "https://IVA.co.za/gallery/rug-3");
        assert_eq!(
            page.metadata.description,
            "Browse details of Rug 03 from the IVA rug gallery."
        );
        assert_eq!(page.images, vec!["https://cdn/rug-3.jpg", "https://cdn/rug-3-detail.jpg"]);
        assert_eq!(page.item.colors, vec!["Red"]);

        assert!(load_gallery_item(&seeded(), &AppConfig::development(), "nope")
            .await
            .is_none());
    }

    #[tokio::test]
    async fn blog_is_newest_first_and_post_uses_slug_url() {
        let store = seeded();
        let blog = load_blog(&store).await;
        let ids: Vec<_> = blog.posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
        assert_eq!(blog.posts[1].excerpt, "");

        let post = load_blog_post(&store, &AppConfig::development(), "new")
            .await
            .unwrap();
        assert_eq!(post.metadata.title, "New | IVA Blog");
        assert_eq!(post.metadata.canonical_url, "https://IVA.co.za/blog/new-post");
        assert_eq!(post.metadata.description, "Fresh");
    }

    #[test]
    fn gallery_page_reports_total_and_debounce() {
        let items = vec![GalleryItemView::from_row(rug("a", "A", 100))];
        let page = gallery_page(
            &items,
            Filter::from_query_string(Some("q=zzz")),
            &AppConfig::development(),
        );
        assert_eq!(page.total, 1);
        assert!(page.items.is_empty());
        assert_eq!(page.search_debounce_ms, 250);
        assert_eq!(page.options.categories.len(), 11);
    }
}
