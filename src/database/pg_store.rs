use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashSet;

use super::manager::DatabaseManager;
use super::models::*;
use super::store::{ContentStore, StoreError, StoreResult};

/// Content store over the hosted Postgres schema
#[derive(Clone)]
pub struct PgContentStore {
    db: DatabaseManager,
}

impl PgContentStore {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }

    fn pool(&self) -> &PgPool {
        self.db.pool()
    }

    async fn begin(&self) -> StoreResult<Transaction<'static, Postgres>> {
        Ok(self.pool().begin().await?)
    }
}

fn ensure_affected(rows: u64, what: &str, id: &str) -> StoreResult<()> {
    if rows == 0 {
        return Err(StoreError::NotFound(format!("{what} {id}")));
    }
    Ok(())
}

async fn replace_gallery_children(
    tx: &mut Transaction<'static, Postgres>,
    record: &GalleryItemRecord,
) -> StoreResult<()> {
    let id = &record.item.id;

    sqlx::query("DELETE FROM site_gallery_colors WHERE item_id = $1")
        .bind(id)
        .execute(&mut **tx)
        .await?;
    sqlx::query("DELETE FROM site_gallery_badges WHERE item_id = $1")
        .bind(id)
        .execute(&mut **tx)
        .await?;

    for color in &record.colors {
        sqlx::query("INSERT INTO site_gallery_colors (item_id, color) VALUES ($1, $2)")
            .bind(id)
            .bind(color)
            .execute(&mut **tx)
            .await?;
    }
    for badge in &record.badges {
        sqlx::query("INSERT INTO site_gallery_badges (item_id, badge) VALUES ($1, $2)")
            .bind(id)
            .bind(badge)
            .execute(&mut **tx)
            .await?;
    }

    let Some(detail_images) = &record.detail_images else {
        return Ok(());
    };
    sqlx::query("DELETE FROM site_gallery_detail_images WHERE item_id = $1")
        .bind(id)
        .execute(&mut **tx)
        .await?;
    for image_url in detail_images {
        sqlx::query("INSERT INTO site_gallery_detail_images (item_id, image_url) VALUES ($1, $2)")
            .bind(id)
            .bind(image_url)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

async fn replace_service_bullets(
    tx: &mut Transaction<'static, Postgres>,
    record: &ServiceRecord,
) -> StoreResult<()> {
    let id = &record.service.id;
    sqlx::query("DELETE FROM site_service_bullets WHERE service_id = $1")
        .bind(id)
        .execute(&mut **tx)
        .await?;
    for bullet in &record.bullets {
        sqlx::query("INSERT INTO site_service_bullets (service_id, bullet) VALUES ($1, $2)")
            .bind(id)
            .bind(bullet)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

/// Resolve tag names to ids, inserting only names that do not exist yet
async fn resolve_tag_ids(
    tx: &mut Transaction<'static, Postgres>,
    names: &[String],
) -> StoreResult<Vec<i64>> {
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let existing = sqlx::query_as::<_, BlogTagRow>(
        "SELECT id, name FROM site_blog_tags WHERE name = ANY($1)",
    )
    .bind(names)
    .fetch_all(&mut **tx)
    .await?;

    let known: HashSet<&str> = existing.iter().map(|tag| tag.name.as_str()).collect();
    let missing: Vec<&String> = names.iter().filter(|n| !known.contains(n.as_str())).collect();

    if missing.is_empty() {
        return Ok(existing.into_iter().map(|tag| tag.id).collect());
    }

    for name in missing {
        sqlx::query("INSERT INTO site_blog_tags (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(&mut **tx)
            .await?;
    }

    let ids = sqlx::query_scalar::<_, i64>("SELECT id FROM site_blog_tags WHERE name = ANY($1)")
        .bind(names)
        .fetch_all(&mut **tx)
        .await?;
    Ok(ids)
}

async fn replace_post_tags(
    tx: &mut Transaction<'static, Postgres>,
    record: &BlogPostRecord,
) -> StoreResult<()> {
    let post_id = &record.post.id;
    sqlx::query("DELETE FROM site_blog_post_tags WHERE post_id = $1")
        .bind(post_id)
        .execute(&mut **tx)
        .await?;

    for tag_id in resolve_tag_ids(tx, &record.tags).await? {
        sqlx::query("INSERT INTO site_blog_post_tags (post_id, tag_id) VALUES ($1, $2)")
            .bind(post_id)
            .bind(tag_id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn health_check(&self) -> StoreResult<()> {
        self.db.health_check().await.map_err(StoreError::from)
    }

    async fn hero(&self) -> StoreResult<Option<HeroRow>> {
        let row = sqlx::query_as::<_, HeroRow>(
            "SELECT id, eyebrow, title, description, primary_cta_label, primary_cta_href, \
             secondary_cta_label, secondary_cta_href, image_url, alt \
             FROM site_hero WHERE id = $1",
        )
        .bind(super::tables::HERO_ID)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    async fn theme(&self) -> StoreResult<Option<ThemeRow>> {
        let row = sqlx::query_as::<_, ThemeRow>(
            "SELECT brand, accent, bg, fg FROM site_theme LIMIT 1",
        )
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    async fn org(&self) -> StoreResult<Option<OrgRow>> {
        let row = sqlx::query_as::<_, OrgRow>(
            "SELECT id, brand_name, domain FROM site_org WHERE id = $1",
        )
        .bind(super::tables::DEFAULT_ID)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    async fn contact(&self) -> StoreResult<Option<ContactRow>> {
        let row = sqlx::query_as::<_, ContactRow>(
            "SELECT id, phone, whatsapp, email, hours, address, map_query, map_embed_src \
             FROM site_contact WHERE id = $1",
        )
        .bind(super::tables::DEFAULT_ID)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    async fn social_links(&self, org_id: &str) -> StoreResult<Vec<SocialLinkRow>> {
        let rows = sqlx::query_as::<_, SocialLinkRow>(
            "SELECT org_id, platform, url FROM site_org_social WHERE org_id = $1 ORDER BY platform",
        )
        .bind(org_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    async fn nav_items(&self) -> StoreResult<Vec<NavItemRow>> {
        let rows = sqlx::query_as::<_, NavItemRow>(
            "SELECT label, href, sort_order FROM site_nav_items ORDER BY sort_order",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    async fn value_props(&self) -> StoreResult<Vec<ValuePropRow>> {
        let rows = sqlx::query_as::<_, ValuePropRow>(
            "SELECT title, description, icon, sort_order FROM site_value_props ORDER BY sort_order",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    async fn features(&self) -> StoreResult<Vec<FeatureRow>> {
        let rows = sqlx::query_as::<_, FeatureRow>(
            "SELECT title, description, sort_order FROM site_features ORDER BY sort_order",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    async fn testimonials(&self) -> StoreResult<Vec<TestimonialRow>> {
        let rows = sqlx::query_as::<_, TestimonialRow>(
            "SELECT quote, name, role, sort_order FROM site_testimonials ORDER BY sort_order",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    async fn faq_items(&self) -> StoreResult<Vec<FaqRow>> {
        let rows = sqlx::query_as::<_, FaqRow>(
            "SELECT id, question, answer, sort_order FROM site_faq ORDER BY sort_order, id",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    async fn gallery_items(&self, limit: Option<usize>) -> StoreResult<Vec<GalleryItemRow>> {
        let rows = sqlx::query_as::<_, GalleryItemRow>(
            "SELECT id, title, category, size, dimensions, material, origin, price_zar, \
             description, image_url FROM site_gallery_items ORDER BY title LIMIT $1",
        )
        .bind(limit.map(|n| n as i64))
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    async fn gallery_item(&self, id: &str) -> StoreResult<Option<GalleryItemRow>> {
        let row = sqlx::query_as::<_, GalleryItemRow>(
            "SELECT id, title, category, size, dimensions, material, origin, price_zar, \
             description, image_url FROM site_gallery_items WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    async fn gallery_colors(&self, item_id: Option<&str>) -> StoreResult<Vec<GalleryColorRow>> {
        let rows = sqlx::query_as::<_, GalleryColorRow>(
            "SELECT item_id, color FROM site_gallery_colors \
             WHERE $1::text IS NULL OR item_id = $1",
        )
        .bind(item_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    async fn gallery_badges(&self, item_id: Option<&str>) -> StoreResult<Vec<GalleryBadgeRow>> {
        let rows = sqlx::query_as::<_, GalleryBadgeRow>(
            "SELECT item_id, badge FROM site_gallery_badges \
             WHERE $1::text IS NULL OR item_id = $1",
        )
        .bind(item_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    async fn gallery_detail_images(
        &self,
        item_id: Option<&str>,
    ) -> StoreResult<Vec<GalleryDetailImageRow>> {
        let rows = sqlx::query_as::<_, GalleryDetailImageRow>(
            "SELECT item_id, image_url FROM site_gallery_detail_images \
             WHERE $1::text IS NULL OR item_id = $1",
        )
        .bind(item_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    async fn services(&self) -> StoreResult<Vec<ServiceRow>> {
        let rows = sqlx::query_as::<_, ServiceRow>(
            "SELECT id, title, description, from_price_zar, sort_order \
             FROM site_services ORDER BY sort_order, id",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    async fn service_bullets(&self) -> StoreResult<Vec<ServiceBulletRow>> {
        let rows = sqlx::query_as::<_, ServiceBulletRow>(
            "SELECT service_id, bullet FROM site_service_bullets",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    async fn blog_posts(&self) -> StoreResult<Vec<BlogPostRow>> {
        let rows = sqlx::query_as::<_, BlogPostRow>(
            "SELECT id, title, slug, excerpt, content, published_at \
             FROM site_blog_posts ORDER BY published_at DESC NULLS LAST",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    async fn blog_post(&self, id: &str) -> StoreResult<Option<BlogPostRow>> {
        let row = sqlx::query_as::<_, BlogPostRow>(
            "SELECT id, title, slug, excerpt, content, published_at \
             FROM site_blog_posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    async fn blog_tags(&self) -> StoreResult<Vec<BlogTagRow>> {
        let rows = sqlx::query_as::<_, BlogTagRow>("SELECT id, name FROM site_blog_tags")
            .fetch_all(self.pool())
            .await?;
        Ok(rows)
    }

    async fn blog_post_tags(&self, post_id: Option<&str>) -> StoreResult<Vec<PostTagRow>> {
        let rows = sqlx::query_as::<_, PostTagRow>(
            "SELECT post_id, tag_id FROM site_blog_post_tags \
             WHERE $1::text IS NULL OR post_id = $1",
        )
        .bind(post_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows)
    }

    async fn upsert_hero(&self, hero: &HeroRow) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO site_hero (id, eyebrow, title, description, primary_cta_label, \
             primary_cta_href, secondary_cta_label, secondary_cta_href, image_url, alt) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             ON CONFLICT (id) DO UPDATE SET eyebrow = EXCLUDED.eyebrow, title = EXCLUDED.title, \
             description = EXCLUDED.description, primary_cta_label = EXCLUDED.primary_cta_label, \
             primary_cta_href = EXCLUDED.primary_cta_href, \
             secondary_cta_label = EXCLUDED.secondary_cta_label, \
             secondary_cta_href = EXCLUDED.secondary_cta_href, \
             image_url = EXCLUDED.image_url, alt = EXCLUDED.alt",
        )
        .bind(&hero.id)
        .bind(&hero.eyebrow)
        .bind(&hero.title)
        .bind(&hero.description)
        .bind(&hero.primary_cta_label)
        .bind(&hero.primary_cta_href)
        .bind(&hero.secondary_cta_label)
        .bind(&hero.secondary_cta_href)
        .bind(&hero.image_url)
        .bind(&hero.alt)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    async fn insert_gallery_item(&self, record: &GalleryItemRecord) -> StoreResult<()> {
        let item = &record.item;
        let mut tx = self.begin().await?;

        sqlx::query(
            "INSERT INTO site_gallery_items (id, title, category, size, dimensions, material, \
             origin, price_zar, description, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(&item.id)
        .bind(&item.title)
        .bind(&item.category)
        .bind(&item.size)
        .bind(&item.dimensions)
        .bind(&item.material)
        .bind(&item.origin)
        .bind(item.price_zar)
        .bind(&item.description)
        .bind(&item.image_url)
        .execute(&mut *tx)
        .await?;

        replace_gallery_children(&mut tx, record).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn update_gallery_item(&self, record: &GalleryItemRecord) -> StoreResult<()> {
        let item = &record.item;
        let mut tx = self.begin().await?;

        let result = sqlx::query(
            "UPDATE site_gallery_items SET title = $2, category = $3, size = $4, \
             dimensions = $5, material = $6, origin = $7, price_zar = $8, description = $9, \
             image_url = $10 WHERE id = $1",
        )
        .bind(&item.id)
        .bind(&item.title)
        .bind(&item.category)
        .bind(&item.size)
        .bind(&item.dimensions)
        .bind(&item.material)
        .bind(&item.origin)
        .bind(item.price_zar)
        .bind(&item.description)
        .bind(&item.image_url)
        .execute(&mut *tx)
        .await?;
        ensure_affected(result.rows_affected(), "gallery item", &item.id)?;

        replace_gallery_children(&mut tx, record).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn delete_gallery_item(&self, id: &str) -> StoreResult<()> {
        let mut tx = self.begin().await?;
        for table in [
            "site_gallery_colors",
            "site_gallery_badges",
            "site_gallery_detail_images",
        ] {
            sqlx::query(&format!("DELETE FROM {table} WHERE item_id = $1"))
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }
        let result = sqlx::query("DELETE FROM site_gallery_items WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        ensure_affected(result.rows_affected(), "gallery item", id)?;
        tx.commit().await?;
        Ok(())
    }

    async fn insert_service(&self, record: &ServiceRecord) -> StoreResult<()> {
        let service = &record.service;
        let mut tx = self.begin().await?;
        sqlx::query(
            "INSERT INTO site_services (id, title, description, from_price_zar, sort_order) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&service.id)
        .bind(&service.title)
        .bind(&service.description)
        .bind(service.from_price_zar)
        .bind(service.sort_order)
        .execute(&mut *tx)
        .await?;
        replace_service_bullets(&mut tx, record).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn update_service(&self, record: &ServiceRecord) -> StoreResult<()> {
        let service = &record.service;
        let mut tx = self.begin().await?;
        let result = sqlx::query(
            "UPDATE site_services SET title = $2, description = $3, from_price_zar = $4, \
             sort_order = $5 WHERE id = $1",
        )
        .bind(&service.id)
        .bind(&service.title)
        .bind(&service.description)
        .bind(service.from_price_zar)
        .bind(service.sort_order)
        .execute(&mut *tx)
        .await?;
        ensure_affected(result.rows_affected(), "service", &service.id)?;
        replace_service_bullets(&mut tx, record).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn delete_service(&self, id: &str) -> StoreResult<()> {
        let mut tx = self.begin().await?;
        sqlx::query("DELETE FROM site_service_bullets WHERE service_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM site_services WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        ensure_affected(result.rows_affected(), "service", id)?;
        tx.commit().await?;
        Ok(())
    }

    async fn insert_blog_post(&self, record: &BlogPostRecord) -> StoreResult<()> {
        let post = &record.post;
        let mut tx = self.begin().await?;
        sqlx::query(
            "INSERT INTO site_blog_posts (id, title, slug, excerpt, content, published_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&post.id)
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.excerpt)
        .bind(&post.content)
        .bind(post.published_at)
        .execute(&mut *tx)
        .await?;
        replace_post_tags(&mut tx, record).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn update_blog_post(&self, record: &BlogPostRecord) -> StoreResult<()> {
        let post = &record.post;
        let mut tx = self.begin().await?;
        let result = sqlx::query(
            "UPDATE site_blog_posts SET title = $2, slug = $3, excerpt = $4, content = $5, \
             published_at = $6 WHERE id = $1",
        )
        .bind(&post.id)
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.excerpt)
        .bind(&post.content)
        .bind(post.published_at)
        .execute(&mut *tx)
        .await?;
        ensure_affected(result.rows_affected(), "blog post", &post.id)?;
        replace_post_tags(&mut tx, record).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn delete_blog_post(&self, id: &str) -> StoreResult<()> {
        let mut tx = self.begin().await?;
        sqlx::query("DELETE FROM site_blog_post_tags WHERE post_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM site_blog_posts WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        ensure_affected(result.rows_affected(), "blog post", id)?;
        tx.commit().await?;
        Ok(())
    }

    async fn insert_faq(&self, question: &str, answer: &str, sort_order: i32) -> StoreResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO site_faq (question, answer, sort_order) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(question)
        .bind(answer)
        .bind(sort_order)
        .fetch_one(self.pool())
        .await?;
        Ok(id)
    }

    async fn update_faq(&self, id: i64, question: &str, answer: &str) -> StoreResult<()> {
        let result = sqlx::query("UPDATE site_faq SET question = $2, answer = $3 WHERE id = $1")
            .bind(id)
            .bind(question)
            .bind(answer)
            .execute(self.pool())
            .await?;
        ensure_affected(result.rows_affected(), "faq", &id.to_string())
    }

    async fn delete_faq(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM site_faq WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        ensure_affected(result.rows_affected(), "faq", &id.to_string())
    }

    async fn save_about(&self, record: &AboutRecord) -> StoreResult<()> {
        let org = &record.org;
        let contact = &record.contact;
        let mut tx = self.begin().await?;

        sqlx::query(
            "INSERT INTO site_org (id, brand_name, domain) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE SET brand_name = EXCLUDED.brand_name, \
             domain = EXCLUDED.domain",
        )
        .bind(&org.id)
        .bind(&org.brand_name)
        .bind(&org.domain)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO site_contact (id, phone, whatsapp, email, hours, address, map_query, \
             map_embed_src) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (id) DO UPDATE SET phone = EXCLUDED.phone, whatsapp = EXCLUDED.whatsapp, \
             email = EXCLUDED.email, hours = EXCLUDED.hours, address = EXCLUDED.address, \
             map_query = EXCLUDED.map_query, map_embed_src = EXCLUDED.map_embed_src",
        )
        .bind(&contact.id)
        .bind(&contact.phone)
        .bind(&contact.whatsapp)
        .bind(&contact.email)
        .bind(&contact.hours)
        .bind(&contact.address)
        .bind(&contact.map_query)
        .bind(&contact.map_embed_src)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM site_org_social WHERE org_id = $1 AND platform = ANY($2)")
            .bind(&org.id)
            .bind(&record.managed_platforms)
            .execute(&mut *tx)
            .await?;

        for link in &record.social_links {
            sqlx::query("INSERT INTO site_org_social (org_id, platform, url) VALUES ($1, $2, $3)")
                .bind(&link.org_id)
                .bind(&link.platform)
                .bind(&link.url)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
