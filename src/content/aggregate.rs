use std::collections::HashMap;

use crate::database::models::*;

use super::views::{BlogPostView, GalleryItemView, ServiceView};

/// Group child rows by their parent id, keeping row order within each group
pub fn group_by<R>(
    rows: Vec<R>,
    key: impl Fn(&R) -> &str,
    value: impl Fn(R) -> String,
) -> HashMap<String, Vec<String>> {
    let mut groups: HashMap<String, Vec<String>> = HashMap::new();
    for row in rows {
        let parent = key(&row).to_string();
        groups.entry(parent).or_default().push(value(row));
    }
    groups
}

/// Attach colors, badges and detail images to each item
pub fn gallery_views(
    items: Vec<GalleryItemRow>,
    colors: Vec<GalleryColorRow>,
    badges: Vec<GalleryBadgeRow>,
    detail_images: Vec<GalleryDetailImageRow>,
) -> Vec<GalleryItemView> {
    let mut colors = group_by(colors, |r| r.item_id.as_str(), |r| r.color);
    let mut badges = group_by(badges, |r| r.item_id.as_str(), |r| r.badge);
    let mut images = group_by(detail_images, |r| r.item_id.as_str(), |r| r.image_url);

    items
        .into_iter()
        .map(|row| {
            let mut view = GalleryItemView::from_row(row);
            view.colors = colors.remove(&view.id).unwrap_or_default();
            view.badges = badges.remove(&view.id).unwrap_or_default();
            view.gallery = images.remove(&view.id).unwrap_or_default();
            view
        })
        .collect()
}

pub fn service_views(services: Vec<ServiceRow>, bullets: Vec<ServiceBulletRow>) -> Vec<ServiceView> {
    let mut bullets = group_by(bullets, |r| r.service_id.as_str(), |r| r.bullet);
    services
        .into_iter()
        .map(|row| {
            let own = bullets.remove(&row.id).unwrap_or_default();
            ServiceView::from_row(row, own)
        })
        .collect()
}

/// Resolve tag names through the join table; links to unknown tag ids are skipped
pub fn blog_views(
    posts: Vec<BlogPostRow>,
    tags: Vec<BlogTagRow>,
    links: Vec<PostTagRow>,
) -> Vec<BlogPostView> {
    let tag_names: HashMap<i64, String> = tags.into_iter().map(|t| (t.id, t.name)).collect();

    let mut tags_by_post: HashMap<String, Vec<String>> = HashMap::new();
    for link in links {
        if let Some(name) = tag_names.get(&link.tag_id) {
            tags_by_post.entry(link.post_id).or_default().push(name.clone());
        }
    }

    posts
        .into_iter()
        .map(|row| {
            let tags = tags_by_post.remove(&row.id).unwrap_or_default();
            BlogPostView::from_row(row, tags)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn item(id: &str) -> GalleryItemRow {
        GalleryItemRow {
            id: id.to_string(),
            title: id.to_uppercase(),
            price_zar: Decimal::new(1000, 0),
            ..Default::default()
        }
    }

    fn color(item_id: &str, color: &str) -> GalleryColorRow {
        GalleryColorRow {
            item_id: item_id.to_string(),
            color: color.to_string(),
        }
    }

    #[test]
    fn children_attach_only_to_their_parent() {
        let views = gallery_views(
            vec![item("a"), item("b"), item("c")],
            vec![color("a", "Red"), color("b", "Blue"), color("a", "Navy"), color("zz", "Grey")],
            vec![GalleryBadgeRow {
                item_id: "b".to_string(),
                badge: "New".to_string(),
            }],
            vec![GalleryDetailImageRow {
                item_id: "a".to_string(),
                image_url: "https://cdn/a-1.jpg".to_string(),
            }],
        );

        assert_eq!(views[0].colors, vec!["Red", "Navy"]);
        assert_eq!(views[0].gallery, vec!["https://cdn/a-1.jpg"]);
        assert!(views[0].badges.is_empty());
        assert_eq!(views[1].colors, vec!["Blue"]);
        assert_eq!(views[1].badges, vec!["New"]);
        assert!(views[2].colors.is_empty());
    }

    #[test]
    fn bullets_group_by_service() {
        let services = vec![
            ServiceRow {
                id: "cleaning".to_string(),
                ..Default::default()
            },
            ServiceRow {
                id: "repairs".to_string(),
                from_price_zar: Some(Decimal::new(450, 0)),
                ..Default::default()
            },
        ];
        let bullets = vec![ServiceBulletRow {
            service_id: "repairs".to_string(),
            bullet: "Fringe repair".to_string(),
        }];

        let views = service_views(services, bullets);
        assert!(views[0].bullets.is_empty());
        assert_eq!(views[1].bullets, vec!["Fringe repair"]);
        assert_eq!(views[1].from_price_label.as_deref(), Some("ZAR 450"));
    }

    #[test]
    fn unknown_tag_ids_are_skipped() {
        let posts = vec![BlogPostRow {
            id: "care".to_string(),
            ..Default::default()
        }];
        let tags = vec![BlogTagRow {
            id: 1,
            name: "rugs".to_string(),
        }];
        let links = vec![
            PostTagRow {
                post_id: "care".to_string(),
                tag_id: 1,
            },
            PostTagRow {
                post_id: "care".to_string(),
                tag_id: 99,
            },
        ];

        let views = blog_views(posts, tags, links);
        assert_eq!(views[0].tags, vec!["rugs"]);
    }
}
