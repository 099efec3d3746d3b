pub mod aggregate;
pub mod format;
pub mod pages;
pub mod views;

pub use format::{format_price_zar, slugify};
