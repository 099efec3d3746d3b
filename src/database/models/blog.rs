use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BlogPostRow {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BlogTagRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PostTagRow {
    pub post_id: String,
    pub tag_id: i64,
}

/// A post plus the tag names it should be linked to (already deduplicated)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogPostRecord {
    pub post: BlogPostRow,
    pub tags: Vec<String>,
}
