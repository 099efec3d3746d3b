use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct GalleryItemRow {
    pub id: String,
    pub title: String,
    pub category: String,
    pub size: String,
    pub dimensions: Option<String>,
    pub material: String,
    pub origin: Option<String>,
    pub price_zar: Decimal,
    pub description: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct GalleryColorRow {
    pub item_id: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct GalleryBadgeRow {
    pub item_id: String,
    pub badge: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct GalleryDetailImageRow {
    pub item_id: String,
    pub image_url: String,
}

/// A gallery item together with the full replacement set of its child rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryItemRecord {
    pub item: GalleryItemRow,
    pub colors: Vec<String>,
    pub badges: Vec<String>,
    /// `None` leaves the stored detail images untouched
    pub detail_images: Option<Vec<String>>,
}
