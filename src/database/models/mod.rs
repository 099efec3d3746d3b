pub mod blog;
pub mod gallery;
pub mod service;
pub mod site;

pub use blog::{BlogPostRecord, BlogPostRow, BlogTagRow, PostTagRow};
pub use gallery::{
    GalleryBadgeRow, GalleryColorRow, GalleryDetailImageRow, GalleryItemRecord, GalleryItemRow,
};
pub use service::{ServiceBulletRow, ServiceRecord, ServiceRow};
pub use site::{
    AboutRecord, ContactRow, FaqRow, FeatureRow, HeroRow, NavItemRow, OrgRow, SocialLinkRow,
    TestimonialRow, ThemeRow, ValuePropRow,
};
