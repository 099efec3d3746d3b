use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::RwLock;

use super::models::*;
use super::store::{ContentStore, StoreError, StoreResult};
use super::tables;

/// Every table of the site schema, held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryTables {
    pub hero: Option<HeroRow>,
    pub theme: Option<ThemeRow>,
    pub org: Option<OrgRow>,
    pub contact: Option<ContactRow>,
    pub social_links: Vec<SocialLinkRow>,
    pub nav_items: Vec<NavItemRow>,
    pub value_props: Vec<ValuePropRow>,
    pub features: Vec<FeatureRow>,
    pub testimonials: Vec<TestimonialRow>,
    pub faq: Vec<FaqRow>,
    pub gallery_items: Vec<GalleryItemRow>,
    pub gallery_colors: Vec<GalleryColorRow>,
    pub gallery_badges: Vec<GalleryBadgeRow>,
    pub gallery_detail_images: Vec<GalleryDetailImageRow>,
    pub services: Vec<ServiceRow>,
    pub service_bullets: Vec<ServiceBulletRow>,
    pub blog_posts: Vec<BlogPostRow>,
    pub blog_tags: Vec<BlogTagRow>,
    pub blog_post_tags: Vec<PostTagRow>,
}

impl MemoryTables {
    fn next_faq_id(&self) -> i64 {
        self.faq.iter().map(|f| f.id).max().unwrap_or(0) + 1
    }

    fn next_tag_id(&self) -> i64 {
        self.blog_tags.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    fn replace_gallery_children(&mut self, record: &GalleryItemRecord) {
        let id = record.item.id.as_str();
        self.gallery_colors.retain(|row| row.item_id != id);
        self.gallery_badges.retain(|row| row.item_id != id);

        self.gallery_colors
            .extend(record.colors.iter().map(|color| GalleryColorRow {
                item_id: id.to_string(),
                color: color.clone(),
            }));
        self.gallery_badges
            .extend(record.badges.iter().map(|badge| GalleryBadgeRow {
                item_id: id.to_string(),
                badge: badge.clone(),
            }));
        if let Some(detail_images) = &record.detail_images {
            self.gallery_detail_images.retain(|row| row.item_id != id);
            self.gallery_detail_images
                .extend(detail_images.iter().map(|url| GalleryDetailImageRow {
                    item_id: id.to_string(),
                    image_url: url.clone(),
                }));
        }
    }

    fn remove_gallery_children(&mut self, id: &str) {
        self.gallery_colors.retain(|row| row.item_id != id);
        self.gallery_badges.retain(|row| row.item_id != id);
        self.gallery_detail_images.retain(|row| row.item_id != id);
    }

    fn replace_service_bullets(&mut self, record: &ServiceRecord) {
        let id = record.service.id.as_str();
        self.service_bullets.retain(|row| row.service_id != id);
        self.service_bullets
            .extend(record.bullets.iter().map(|bullet| ServiceBulletRow {
                service_id: id.to_string(),
                bullet: bullet.clone(),
            }));
    }

    fn slug_taken(&self, slug: &str, except_id: Option<&str>) -> bool {
        self.blog_posts
            .iter()
            .any(|post| post.slug == slug && Some(post.id.as_str()) != except_id)
    }

    /// Existing tag ids are reused by name; only missing names get new rows
    fn replace_post_tags(&mut self, record: &BlogPostRecord) {
        let post_id = record.post.id.as_str();
        self.blog_post_tags.retain(|row| row.post_id != post_id);

        for name in &record.tags {
            let tag_id = match self.blog_tags.iter().find(|tag| &tag.name == name) {
                Some(tag) => tag.id,
                None => {
                    let id = self.next_tag_id();
                    self.blog_tags.push(BlogTagRow {
                        id,
                        name: name.clone(),
                    });
                    id
                }
            };
            if !self
                .blog_post_tags
                .iter()
                .any(|row| row.post_id == post_id && row.tag_id == tag_id)
            {
                self.blog_post_tags.push(PostTagRow {
                    post_id: post_id.to_string(),
                    tag_id,
                });
            }
        }
    }
}

/// In-process content store for local development and tests.
///
/// Every write runs under a single write lock, so a mutation's parent row and
/// child collections change together.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<MemoryTables>,
    unavailable: HashSet<&'static str>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tables(tables: MemoryTables) -> Self {
        Self {
            tables: RwLock::new(tables),
            unavailable: HashSet::new(),
        }
    }

    /// Make every read and write touching `table` fail, as a dropped relation would
    pub fn with_unavailable_table(mut self, table: &'static str) -> Self {
        self.unavailable.insert(table);
        self
    }

    pub async fn snapshot(&self) -> MemoryTables {
        self.tables.read().await.clone()
    }

    fn check(&self, table: &'static str) -> StoreResult<()> {
        if self.unavailable.contains(table) {
            return Err(StoreError::Unavailable(table));
        }
        Ok(())
    }

    fn check_all(&self, names: &[&'static str]) -> StoreResult<()> {
        names.iter().try_for_each(|table| self.check(table))
    }
}

fn sorted_by_order<T: Clone>(rows: &[T], key: impl Fn(&T) -> i32) -> Vec<T> {
    let mut rows = rows.to_vec();
    rows.sort_by_key(|row| key(row));
    rows
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn hero(&self) -> StoreResult<Option<HeroRow>> {
        self.check(tables::HERO)?;
        Ok(self.tables.read().await.hero.clone())
    }

    async fn theme(&self) -> StoreResult<Option<ThemeRow>> {
        self.check(tables::THEME)?;
        Ok(self.tables.read().await.theme.clone())
    }

    async fn org(&self) -> StoreResult<Option<OrgRow>> {
        self.check(tables::ORG)?;
        Ok(self.tables.read().await.org.clone())
    }

    async fn contact(&self) -> StoreResult<Option<ContactRow>> {
        self.check(tables::CONTACT)?;
        Ok(self.tables.read().await.contact.clone())
    }

    async fn social_links(&self, org_id: &str) -> StoreResult<Vec<SocialLinkRow>> {
        self.check(tables::ORG_SOCIAL)?;
        let tables = self.tables.read().await;
        let mut rows: Vec<SocialLinkRow> = tables
            .social_links
            .iter()
            .filter(|row| row.org_id == org_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.platform.cmp(&b.platform));
        Ok(rows)
    }

    async fn nav_items(&self) -> StoreResult<Vec<NavItemRow>> {
        self.check(tables::NAV_ITEMS)?;
        let tables = self.tables.read().await;
        Ok(sorted_by_order(&tables.nav_items, |row| row.sort_order))
    }

    async fn value_props(&self) -> StoreResult<Vec<ValuePropRow>> {
        self.check(tables::VALUE_PROPS)?;
        let tables = self.tables.read().await;
        Ok(sorted_by_order(&tables.value_props, |row| row.sort_order))
    }

    async fn features(&self) -> StoreResult<Vec<FeatureRow>> {
        self.check(tables::FEATURES)?;
        let tables = self.tables.read().await;
        Ok(sorted_by_order(&tables.features, |row| row.sort_order))
    }

    async fn testimonials(&self) -> StoreResult<Vec<TestimonialRow>> {
        self.check(tables::TESTIMONIALS)?;
        let tables = self.tables.read().await;
        Ok(sorted_by_order(&tables.testimonials, |row| row.sort_order))
    }

    async fn faq_items(&self) -> StoreResult<Vec<FaqRow>> {
        self.check(tables::FAQ)?;
        let mut rows = self.tables.read().await.faq.clone();
        rows.sort_by_key(|row| (row.sort_order, row.id));
        Ok(rows)
    }

    async fn gallery_items(&self, limit: Option<usize>) -> StoreResult<Vec<GalleryItemRow>> {
        self.check(tables::GALLERY_ITEMS)?;
        let mut rows = self.tables.read().await.gallery_items.clone();
        rows.sort_by(|a, b| a.title.cmp(&b.title));
        if let Some(limit) = limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn gallery_item(&self, id: &str) -> StoreResult<Option<GalleryItemRow>> {
        self.check(tables::GALLERY_ITEMS)?;
        let tables = self.tables.read().await;
        Ok(tables.gallery_items.iter().find(|row| row.id == id).cloned())
    }

    async fn gallery_colors(&self, item_id: Option<&str>) -> StoreResult<Vec<GalleryColorRow>> {
        self.check(tables::GALLERY_COLORS)?;
        let tables = self.tables.read().await;
        Ok(tables
            .gallery_colors
            .iter()
            .filter(|row| item_id.map_or(true, |id| row.item_id == id))
            .cloned()
            .collect())
    }

    async fn gallery_badges(&self, item_id: Option<&str>) -> StoreResult<Vec<GalleryBadgeRow>> {
        self.check(tables::GALLERY_BADGES)?;
        let tables = self.tables.read().await;
        Ok(tables
            .gallery_badges
            .iter()
            .filter(|row| item_id.map_or(true, |id| row.item_id == id))
            .cloned()
            .collect())
    }

    async fn gallery_detail_images(
        &self,
        item_id: Option<&str>,
    ) -> StoreResult<Vec<GalleryDetailImageRow>> {
        self.check(tables::GALLERY_DETAIL_IMAGES)?;
        let tables = self.tables.read().await;
        Ok(tables
            .gallery_detail_images
            .iter()
            .filter(|row| item_id.map_or(true, |id| row.item_id == id))
            .cloned()
            .collect())
    }

    async fn services(&self) -> StoreResult<Vec<ServiceRow>> {
        self.check(tables::SERVICES)?;
        let mut rows = self.tables.read().await.services.clone();
        rows.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn service_bullets(&self) -> StoreResult<Vec<ServiceBulletRow>> {
        self.check(tables::SERVICE_BULLETS)?;
        Ok(self.tables.read().await.service_bullets.clone())
    }

    async fn blog_posts(&self) -> StoreResult<Vec<BlogPostRow>> {
        self.check(tables::BLOG_POSTS)?;
        let mut rows = self.tables.read().await.blog_posts.clone();
        // Newest first, undated posts last
        rows.sort_by(|a, b| match (a.published_at, b.published_at) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        Ok(rows)
    }

    async fn blog_post(&self, id: &str) -> StoreResult<Option<BlogPostRow>> {
        self.check(tables::BLOG_POSTS)?;
        let tables = self.tables.read().await;
        Ok(tables.blog_posts.iter().find(|row| row.id == id).cloned())
    }

    async fn blog_tags(&self) -> StoreResult<Vec<BlogTagRow>> {
        self.check(tables::BLOG_TAGS)?;
        Ok(self.tables.read().await.blog_tags.clone())
    }

    async fn blog_post_tags(&self, post_id: Option<&str>) -> StoreResult<Vec<PostTagRow>> {
        self.check(tables::BLOG_POST_TAGS)?;
        let tables = self.tables.read().await;
        Ok(tables
            .blog_post_tags
            .iter()
            .filter(|row| post_id.map_or(true, |id| row.post_id == id))
            .cloned()
            .collect())
    }

    async fn upsert_hero(&self, hero: &HeroRow) -> StoreResult<()> {
        self.check(tables::HERO)?;
        self.tables.write().await.hero = Some(hero.clone());
        Ok(())
    }

    async fn insert_gallery_item(&self, record: &GalleryItemRecord) -> StoreResult<()> {
        self.check_all(&[
            tables::GALLERY_ITEMS,
            tables::GALLERY_COLORS,
            tables::GALLERY_BADGES,
            tables::GALLERY_DETAIL_IMAGES,
        ])?;
        let mut tables = self.tables.write().await;
        if tables.gallery_items.iter().any(|row| row.id == record.item.id) {
            return Err(StoreError::Conflict(format!(
                "gallery item {} already exists",
                record.item.id
            )));
        }
        tables.gallery_items.push(record.item.clone());
        tables.replace_gallery_children(record);
        Ok(())
    }

    async fn update_gallery_item(&self, record: &GalleryItemRecord) -> StoreResult<()> {
        self.check_all(&[
            tables::GALLERY_ITEMS,
            tables::GALLERY_COLORS,
            tables::GALLERY_BADGES,
            tables::GALLERY_DETAIL_IMAGES,
        ])?;
        let mut tables = self.tables.write().await;
        let row = tables
            .gallery_items
            .iter_mut()
            .find(|row| row.id == record.item.id)
            .ok_or_else(|| StoreError::NotFound(format!("gallery item {}", record.item.id)))?;
        *row = record.item.clone();
        tables.replace_gallery_children(record);
        Ok(())
    }

    async fn delete_gallery_item(&self, id: &str) -> StoreResult<()> {
        self.check(tables::GALLERY_ITEMS)?;
        let mut tables = self.tables.write().await;
        let before = tables.gallery_items.len();
        tables.gallery_items.retain(|row| row.id != id);
        if tables.gallery_items.len() == before {
            return Err(StoreError::NotFound(format!("gallery item {id}")));
        }
        tables.remove_gallery_children(id);
        Ok(())
    }

    async fn insert_service(&self, record: &ServiceRecord) -> StoreResult<()> {
        self.check_all(&[tables::SERVICES, tables::SERVICE_BULLETS])?;
        let mut tables = self.tables.write().await;
        if tables.services.iter().any(|row| row.id == record.service.id) {
            return Err(StoreError::Conflict(format!(
                "service {} already exists",
                record.service.id
            )));
        }
        tables.services.push(record.service.clone());
        tables.replace_service_bullets(record);
        Ok(())
    }

    async fn update_service(&self, record: &ServiceRecord) -> StoreResult<()> {
        self.check_all(&[tables::SERVICES, tables::SERVICE_BULLETS])?;
        let mut tables = self.tables.write().await;
        let row = tables
            .services
            .iter_mut()
            .find(|row| row.id == record.service.id)
            .ok_or_else(|| StoreError::NotFound(format!("service {}", record.service.id)))?;
        *row = record.service.clone();
        tables.replace_service_bullets(record);
        Ok(())
    }

    async fn delete_service(&self, id: &str) -> StoreResult<()> {
        self.check(tables::SERVICES)?;
        let mut tables = self.tables.write().await;
        let before = tables.services.len();
        tables.services.retain(|row| row.id != id);
        if tables.services.len() == before {
            return Err(StoreError::NotFound(format!("service {id}")));
        }
        tables.service_bullets.retain(|row| row.service_id != id);
        Ok(())
    }

    async fn insert_blog_post(&self, record: &BlogPostRecord) -> StoreResult<()> {
        self.check_all(&[tables::BLOG_POSTS, tables::BLOG_TAGS, tables::BLOG_POST_TAGS])?;
        let mut tables = self.tables.write().await;
        let post = &record.post;
        if tables.blog_posts.iter().any(|row| row.id == post.id) {
            return Err(StoreError::Conflict(format!("blog post {} already exists", post.id)));
        }
        if tables.slug_taken(&post.slug, None) {
            return Err(StoreError::Conflict(format!("slug {} already exists", post.slug)));
        }
        tables.blog_posts.push(post.clone());
        tables.replace_post_tags(record);
        Ok(())
    }

    async fn update_blog_post(&self, record: &BlogPostRecord) -> StoreResult<()> {
        self.check_all(&[tables::BLOG_POSTS, tables::BLOG_TAGS, tables::BLOG_POST_TAGS])?;
        let mut tables = self.tables.write().await;
        let post = &record.post;
        if tables.slug_taken(&post.slug, Some(&post.id)) {
            return Err(StoreError::Conflict(format!("slug {} already exists", post.slug)));
        }
        let row = tables
            .blog_posts
            .iter_mut()
            .find(|row| row.id == post.id)
            .ok_or_else(|| StoreError::NotFound(format!("blog post {}", post.id)))?;
        *row = post.clone();
        tables.replace_post_tags(record);
        Ok(())
    }

    async fn delete_blog_post(&self, id: &str) -> StoreResult<()> {
        self.check_all(&[tables::BLOG_POSTS, tables::BLOG_POST_TAGS])?;
        let mut tables = self.tables.write().await;
        let before = tables.blog_posts.len();
        tables.blog_posts.retain(|row| row.id != id);
        if tables.blog_posts.len() == before {
            return Err(StoreError::NotFound(format!("blog post {id}")));
        }
        tables.blog_post_tags.retain(|row| row.post_id != id);
        Ok(())
    }

    async fn insert_faq(&self, question: &str, answer: &str, sort_order: i32) -> StoreResult<i64> {
        self.check(tables::FAQ)?;
        let mut tables = self.tables.write().await;
        let id = tables.next_faq_id();
        tables.faq.push(FaqRow {
            id,
            question: question.to_string(),
            answer: answer.to_string(),
            sort_order,
        });
        Ok(id)
    }

    async fn update_faq(&self, id: i64, question: &str, answer: &str) -> StoreResult<()> {
        self.check(tables::FAQ)?;
        let mut tables = self.tables.write().await;
        let row = tables
            .faq
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("faq {id}")))?;
        row.question = question.to_string();
        row.answer = answer.to_string();
        Ok(())
    }

    async fn delete_faq(&self, id: i64) -> StoreResult<()> {
        self.check(tables::FAQ)?;
        let mut tables = self.tables.write().await;
        let before = tables.faq.len();
        tables.faq.retain(|row| row.id != id);
        if tables.faq.len() == before {
            return Err(StoreError::NotFound(format!("faq {id}")));
        }
        Ok(())
    }

    async fn save_about(&self, record: &AboutRecord) -> StoreResult<()> {
        self.check_all(&[tables::ORG, tables::CONTACT, tables::ORG_SOCIAL])?;
        let mut tables = self.tables.write().await;
        tables.org = Some(record.org.clone());
        tables.contact = Some(record.contact.clone());

        let org_id = record.org.id.as_str();
        tables.social_links.retain(|row| {
            row.org_id != org_id || !record.managed_platforms.contains(&row.platform)
        });
        tables.social_links.extend(record.social_links.iter().cloned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn rug(id: &str, title: &str) -> GalleryItemRecord {
        GalleryItemRecord {
            item: GalleryItemRow {
                id: id.to_string(),
                title: title.to_string(),
                category: "Persian".to_string(),
                size: "Large (200x300)".to_string(),
                material: "Wool".to_string(),
                price_zar: Decimal::new(18500, 0),
                image_url: "/og-image.png".to_string(),
                ..Default::default()
            },
            colors: vec!["Red".to_string(), "Navy".to_string()],
            badges: vec!["Best Seller".to_string()],
            detail_images: Some(vec!["https://cdn/a.jpg".to_string()]),
        }
    }

    fn post(id: &str, slug: &str, tags: &[&str]) -> BlogPostRecord {
        BlogPostRecord {
            post: BlogPostRow {
                id: id.to_string(),
                title: id.to_string(),
                slug: slug.to_string(),
                content: "body".to_string(),
                ..Default::default()
            },
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn deleting_gallery_item_removes_child_rows() {
        let store = MemoryStore::new();
        store.insert_gallery_item(&rug("persian-red-201", "Persian Red")).await.unwrap();
        store.insert_gallery_item(&rug("kilim-7", "Kilim")).await.unwrap();

        store.delete_gallery_item("persian-red-201").await.unwrap();

        let tables = store.snapshot().await;
        assert!(tables.gallery_colors.iter().all(|r| r.item_id != "persian-red-201"));
        assert!(tables.gallery_badges.iter().all(|r| r.item_id != "persian-red-201"));
        assert!(tables
            .gallery_detail_images
            .iter()
            .all(|r| r.item_id != "persian-red-201"));
        assert_eq!(tables.gallery_colors.len(), 2);
    }

    #[tokio::test]
    async fn duplicate_gallery_id_conflicts() {
        let store = MemoryStore::new();
        store.insert_gallery_item(&rug("a", "A")).await.unwrap();
        let err = store.insert_gallery_item(&rug("a", "A")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_replaces_children_and_missing_id_is_not_found() {
        let store = MemoryStore::new();
        store.insert_gallery_item(&rug("a", "A")).await.unwrap();

        let mut record = rug("a", "A2");
        record.colors = vec!["Ivory".to_string()];
        store.update_gallery_item(&record).await.unwrap();

        let colors = store.gallery_colors(Some("a")).await.unwrap();
        assert_eq!(colors.len(), 1);
        assert_eq!(colors[0].color, "Ivory");

        let err = store.update_gallery_item(&rug("missing", "M")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn existing_tag_names_reuse_ids() {
        let store = MemoryStore::new();
        store.insert_blog_post(&post("care", "care", &["rugs", "care"])).await.unwrap();
        store.insert_blog_post(&post("sizing", "sizing", &["rugs"])).await.unwrap();

        let tables = store.snapshot().await;
        assert_eq!(tables.blog_tags.len(), 2);
        let rugs_id = tables.blog_tags.iter().find(|t| t.name == "rugs").unwrap().id;
        let linked: Vec<_> = tables
            .blog_post_tags
            .iter()
            .filter(|r| r.tag_id == rugs_id)
            .map(|r| r.post_id.as_str())
            .collect();
        assert_eq!(linked, vec!["care", "sizing"]);
    }

    #[tokio::test]
    async fn duplicate_slug_conflicts() {
        let store = MemoryStore::new();
        store.insert_blog_post(&post("one", "same", &[])).await.unwrap();
        let err = store.insert_blog_post(&post("two", "same", &[])).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn unavailable_table_fails_reads_and_writes() {
        let store = MemoryStore::new().with_unavailable_table(tables::GALLERY_COLORS);
        assert!(matches!(
            store.gallery_colors(None).await,
            Err(StoreError::Unavailable("site_gallery_colors"))
        ));
        assert!(store.insert_gallery_item(&rug("a", "A")).await.is_err());
        assert!(store.snapshot().await.gallery_items.is_empty());
    }

    #[tokio::test]
    async fn about_replaces_only_managed_platforms() {
        let store = MemoryStore::from_tables(MemoryTables {
            social_links: vec![
                SocialLinkRow {
                    org_id: "default".to_string(),
                    platform: "instagram".to_string(),
                    url: "https://instagram.com/old".to_string(),
                },
                SocialLinkRow {
                    org_id: "default".to_string(),
                    platform: "tiktok".to_string(),
                    url: "https://tiktok.com/@iva".to_string(),
                },
            ],
            ..Default::default()
        });

        store
            .save_about(&AboutRecord {
                org: OrgRow {
                    id: "default".to_string(),
                    brand_name: "IVA".to_string(),
                    domain: "https://IVA.co.za".to_string(),
                },
                contact: ContactRow {
                    id: "default".to_string(),
                    ..Default::default()
                },
                managed_platforms: vec!["instagram".to_string(), "facebook".to_string()],
                social_links: vec![SocialLinkRow {
                    org_id: "default".to_string(),
                    platform: "facebook".to_string(),
                    url: "https://facebook.com/iva".to_string(),
                }],
            })
            .await
            .unwrap();

        let links = store.social_links("default").await.unwrap();
        let platforms: Vec<_> = links.iter().map(|l| l.platform.as_str()).collect();
        assert_eq!(platforms, vec!["facebook", "tiktok"]);
    }
}
