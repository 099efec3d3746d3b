use async_trait::async_trait;
use thiserror::Error;

use super::manager::DatabaseError;
use super::models::*;

/// Errors surfaced by a content store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique constraint violated (duplicate id, slug or tag name)
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Table unavailable: {0}")]
    Unavailable(&'static str),

    #[error(transparent)]
    Database(DatabaseError),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                StoreError::Conflict(db.message().to_string())
            }
            sqlx::Error::RowNotFound => StoreError::NotFound("row".to_string()),
            _ => StoreError::Sqlx(err),
        }
    }
}

impl From<DatabaseError> for StoreError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Sqlx(inner) => StoreError::from(inner),
            other => StoreError::Database(other),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read and write access to the site content tables.
///
/// Reads return rows in the order the pages need them. Writes that touch a
/// parent row and its child collections are atomic: either the parent and the
/// full replacement child set land, or nothing does. Updates and deletes of an
/// id that does not exist fail with [`StoreError::NotFound`].
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn health_check(&self) -> StoreResult<()>;

    // Singletons and site chrome
    async fn hero(&self) -> StoreResult<Option<HeroRow>>;
    async fn theme(&self) -> StoreResult<Option<ThemeRow>>;
    async fn org(&self) -> StoreResult<Option<OrgRow>>;
    async fn contact(&self) -> StoreResult<Option<ContactRow>>;
    async fn social_links(&self, org_id: &str) -> StoreResult<Vec<SocialLinkRow>>;
    async fn nav_items(&self) -> StoreResult<Vec<NavItemRow>>;
    async fn value_props(&self) -> StoreResult<Vec<ValuePropRow>>;
    async fn features(&self) -> StoreResult<Vec<FeatureRow>>;
    async fn testimonials(&self) -> StoreResult<Vec<TestimonialRow>>;
    async fn faq_items(&self) -> StoreResult<Vec<FaqRow>>;

    // Gallery; child reads take `Some(item_id)` to scope to one item
    async fn gallery_items(&self, limit: Option<usize>) -> StoreResult<Vec<GalleryItemRow>>;
    async fn gallery_item(&self, id: &str) -> StoreResult<Option<GalleryItemRow>>;
    async fn gallery_colors(&self, item_id: Option<&str>) -> StoreResult<Vec<GalleryColorRow>>;
    async fn gallery_badges(&self, item_id: Option<&str>) -> StoreResult<Vec<GalleryBadgeRow>>;
    async fn gallery_detail_images(
        &self,
        item_id: Option<&str>,
    ) -> StoreResult<Vec<GalleryDetailImageRow>>;

    // Services
    async fn services(&self) -> StoreResult<Vec<ServiceRow>>;
    async fn service_bullets(&self) -> StoreResult<Vec<ServiceBulletRow>>;

    // Blog
    async fn blog_posts(&self) -> StoreResult<Vec<BlogPostRow>>;
    async fn blog_post(&self, id: &str) -> StoreResult<Option<BlogPostRow>>;
    async fn blog_tags(&self) -> StoreResult<Vec<BlogTagRow>>;
    async fn blog_post_tags(&self, post_id: Option<&str>) -> StoreResult<Vec<PostTagRow>>;

    // Writes
    async fn upsert_hero(&self, hero: &HeroRow) -> StoreResult<()>;

    async fn insert_gallery_item(&self, record: &GalleryItemRecord) -> StoreResult<()>;
    async fn update_gallery_item(&self, record: &GalleryItemRecord) -> StoreResult<()>;
    async fn delete_gallery_item(&self, id: &str) -> StoreResult<()>;

    async fn insert_service(&self, record: &ServiceRecord) -> StoreResult<()>;
    async fn update_service(&self, record: &ServiceRecord) -> StoreResult<()>;
    async fn delete_service(&self, id: &str) -> StoreResult<()>;

    async fn insert_blog_post(&self, record: &BlogPostRecord) -> StoreResult<()>;
    async fn update_blog_post(&self, record: &BlogPostRecord) -> StoreResult<()>;
    async fn delete_blog_post(&self, id: &str) -> StoreResult<()>;

    /// Returns the id assigned to the new row
    async fn insert_faq(&self, question: &str, answer: &str, sort_order: i32) -> StoreResult<i64>;
    async fn update_faq(&self, id: i64, question: &str, answer: &str) -> StoreResult<()>;
    async fn delete_faq(&self, id: i64) -> StoreResult<()>;

    async fn save_about(&self, record: &AboutRecord) -> StoreResult<()>;
}
