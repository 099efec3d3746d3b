use tracing::warn;

use crate::content::views::GalleryItemView;

use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::GalleryQuery;

/// Search, facet filter and sort over an in-memory gallery list.
///
/// Built from the raw query string of `/gallery`:
/// `q`, repeated `category`, `size`, `material`, `color`, and `sort`.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    query: GalleryQuery,
}

impl Filter {
    /// Unknown sort values fall back to `price-asc`
    pub fn from_query_string(raw: Option<&str>) -> Self {
        let mut query = GalleryQuery::default();

        for (key, value) in url::form_urlencoded::parse(raw.unwrap_or("").as_bytes()) {
            let value = value.trim().to_string();
            match &*key {
                "q" => query.search = value,
                "sort" => {
                    query.sort = FilterOrder::parse(&value).unwrap_or_else(|err| {
                        warn!("{}, using price-asc", err);
                        Default::default()
                    })
                }
                _ if value.is_empty() => {}
                "category" => push_unique(&mut query.categories, value),
                "size" => push_unique(&mut query.sizes, value),
                "material" => push_unique(&mut query.materials, value),
                "color" => push_unique(&mut query.colors, value),
                _ => {}
            }
        }

        Self { query }
    }

    pub fn into_query(self) -> GalleryQuery {
        self.query
    }

    /// Search first, then facets, then sort
    pub fn apply(&self, items: &[GalleryItemView]) -> Vec<GalleryItemView> {
        let mut matched: Vec<GalleryItemView> = items
            .iter()
            .filter(|item| FilterWhere::matches_search(item, &self.query.search))
            .filter(|item| FilterWhere::matches_facets(item, &self.query))
            .cloned()
            .collect();

        FilterOrder::sort(&mut matched, self.query.sort);
        matched
    }
}

fn push_unique(values: &mut Vec<String>, value: String) {
    if !values.contains(&value) {
        values.push(value);
    }
}
