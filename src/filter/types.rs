use serde::{Deserialize, Serialize};

/// Gallery sort order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    #[default]
    PriceAsc,
    PriceDesc,
    /// Uses the price-desc comparator; there is no creation date to sort on
    Newest,
    Bestselling,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::Newest => "newest",
            SortOption::Bestselling => "bestselling",
        }
    }
}

/// Search text, facet selections and sort for one gallery request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryQuery {
    pub search: String,
    pub categories: Vec<String>,
    pub sizes: Vec<String>,
    pub materials: Vec<String>,
    pub colors: Vec<String>,
    pub sort: SortOption,
}
