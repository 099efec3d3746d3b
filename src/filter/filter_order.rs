use std::cmp::Ordering;

use crate::content::views::GalleryItemView;

use super::error::FilterError;
use super::types::SortOption;

pub struct FilterOrder;

impl FilterOrder {
    pub fn parse(raw: &str) -> Result<SortOption, FilterError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "price-asc" => Ok(SortOption::PriceAsc),
            "price-desc" => Ok(SortOption::PriceDesc),
            "newest" => Ok(SortOption::Newest),
            "bestselling" => Ok(SortOption::Bestselling),
            other => Err(FilterError::UnknownSort(other.to_string())),
        }
    }

    /// Stable in every mode: equal keys keep their incoming order
    pub fn sort(items: &mut [GalleryItemView], sort: SortOption) {
        match sort {
            SortOption::PriceAsc => items.sort_by(|a, b| Self::by_price(a, b)),
            SortOption::PriceDesc | SortOption::Newest => {
                items.sort_by(|a, b| Self::by_price(b, a))
            }
            SortOption::Bestselling => {
                items.sort_by_key(|item| !Self::is_bestseller(item));
            }
        }
    }

    fn by_price(a: &GalleryItemView, b: &GalleryItemView) -> Ordering {
        a.price_zar.total_cmp(&b.price_zar)
    }

    pub fn is_bestseller(item: &GalleryItemView) -> bool {
        item.badges
            .iter()
            .any(|badge| badge.to_lowercase().contains("best"))
    }
}
