use crate::content::views::GalleryItemView;

use super::types::GalleryQuery;

pub struct FilterWhere;

impl FilterWhere {
    /// Lowercased, space-joined text the search box is matched against
    pub fn haystack(item: &GalleryItemView) -> String {
        let mut parts: Vec<&str> = vec![&item.title, &item.category, &item.size];
        if let Some(dimensions) = item.dimensions.as_deref() {
            parts.push(dimensions);
        }
        parts.push(&item.material);
        if let Some(origin) = item.origin.as_deref() {
            parts.push(origin);
        }
        parts.extend(item.colors.iter().map(String::as_str));
        parts.push(&item.description);

        parts.join(" ").to_lowercase()
    }

    /// Empty or blank search matches everything
    pub fn matches_search(item: &GalleryItemView, search: &str) -> bool {
        let needle = search.trim().to_lowercase();
        needle.is_empty() || Self::haystack(item).contains(&needle)
    }

    /// AND across facets, OR within one; an empty selection does not constrain
    pub fn matches_facets(item: &GalleryItemView, query: &GalleryQuery) -> bool {
        let one_of = |selected: &[String], value: &str| {
            selected.is_empty() || selected.iter().any(|s| s == value)
        };

        one_of(&query.categories, &item.category)
            && one_of(&query.sizes, &item.size)
            && one_of(&query.materials, &item.material)
            && (query.colors.is_empty()
                || item.colors.iter().any(|color| query.colors.contains(color)))
    }
}
