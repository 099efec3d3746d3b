use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ServiceRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub from_price_zar: Option<Decimal>,
    pub sort_order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ServiceBulletRow {
    pub service_id: String,
    pub bullet: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceRecord {
    pub service: ServiceRow,
    pub bullets: Vec<String>,
}
