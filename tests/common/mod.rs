#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use iva_site::auth::{AdminUser, AuthError, AuthProvider, Session};
use iva_site::config::AppConfig;
use iva_site::database::models::*;
use iva_site::database::{MemoryStore, MemoryTables};
use iva_site::storage::{ObjectStorage, StorageError};
use iva_site::AppState;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const ADMIN_EMAIL: &str = "admin@IVA.co.za";
pub const ADMIN_PASSWORD: &str = "correct-horse";

/// Identity provider that knows one admin and one live token
pub struct FakeAuth;

#[async_trait]
impl AuthProvider for FakeAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        if email != ADMIN_EMAIL || password != ADMIN_PASSWORD {
            return Err(AuthError::InvalidCredentials("Invalid login credentials".to_string()));
        }
        Ok(Session {
            access_token: ADMIN_TOKEN.to_string(),
            expires_in: Some(3600),
            refresh_token: None,
            user: admin_user(),
        })
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<AdminUser>, AuthError> {
        Ok((access_token == ADMIN_TOKEN).then(admin_user))
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), AuthError> {
        Ok(())
    }
}

fn admin_user() -> AdminUser {
    AdminUser {
        id: "user-1".to_string(),
        email: Some(ADMIN_EMAIL.to_string()),
    }
}

/// Bucket that accepts every upload
pub struct FakeStorage;

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn put(&self, path: &str, _bytes: Vec<u8>, _content_type: &str) -> Result<String, StorageError> {
        Ok(format!("https://storage.test/gallery/{}", path))
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_tables(seed())
    }

    pub fn with_tables(tables: MemoryTables) -> Self {
        let store = Arc::new(MemoryStore::from_tables(tables));
        let state = AppState::new(AppConfig::development(), store.clone())
            .with_auth(Arc::new(FakeAuth))
            .with_storage(Arc::new(FakeStorage));
        Self {
            router: iva_site::app(state.clone()),
            store,
            state,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Result<Response> {
        Ok(self.router.clone().oneshot(request).await?)
    }

    pub async fn get(&self, uri: &str) -> Result<(StatusCode, Value)> {
        let request = Request::get(uri).body(Body::empty())?;
        json_response(self.send(request).await?).await
    }

    pub async fn admin_get(&self, uri: &str) -> Result<(StatusCode, Value)> {
        let request = Request::get(uri)
            .header(header::COOKIE, format!("iva_admin_session={}", ADMIN_TOKEN))
            .body(Body::empty())?;
        json_response(self.send(request).await?).await
    }

    pub async fn admin_form(&self, method: &str, uri: &str, pairs: &[(&str, &str)]) -> Result<(StatusCode, Value)> {
        let body: String = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_TOKEN))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))?;
        json_response(self.send(request).await?).await
    }
}

pub async fn json_response(response: Response) -> Result<(StatusCode, Value)> {
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

pub async fn text_response(response: Response) -> Result<String> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(String::from_utf8(bytes.to_vec())?)
}

fn item(id: &str, title: &str, category: &str, size: &str, material: &str, price: i64) -> GalleryItemRow {
    GalleryItemRow {
        id: id.to_string(),
        title: title.to_string(),
        category: category.to_string(),
        size: size.to_string(),
        dimensions: None,
        material: material.to_string(),
        origin: Some("Iran".to_string()),
        price_zar: Decimal::new(price, 0),
        description: format!("{} in {}", title, material),
        image_url: format!("https://img.test/{}.jpg", id),
    }
}

/// A small catalogue with layout rows, three rugs, one service and one post
pub fn seed() -> MemoryTables {
    MemoryTables {
        hero: Some(HeroRow {
            id: "home_hero".to_string(),
            title: "Handmade rugs in Klerksdorp".to_string(),
            ..Default::default()
        }),
        org: Some(OrgRow {
            id: "default".to_string(),
            brand_name: "IVA".to_string(),
            domain: "https://IVA.co.za".to_string(),
        }),
        contact: Some(ContactRow {
            id: "default".to_string(),
            phone: "018 000 0000".to_string(),
            whatsapp: None,
            email: "hello@iva.co.za".to_string(),
            hours: None,
            address: "12 Main St, Klerksdorp".to_string(),
            map_query: "IVA, Klerksdorp".to_string(),
            map_embed_src: "https://www.google.com/maps/embed?pb=...".to_string(),
        }),
        nav_items: vec![NavItemRow {
            label: "Gallery".to_string(),
            href: "/gallery".to_string(),
            sort_order: 1,
        }],
        faq: vec![FaqRow {
            id: 1,
            question: "Do you deliver?".to_string(),
            answer: "Yes.".to_string(),
            sort_order: 0,
        }],
        gallery_items: vec![
            item("kilim-blue-7", "Blue Kilim", "Kilim", "Small", "Wool", 4200),
            item("persian-red-201", "Persian Red", "Persian", "Large", "Wool", 18500),
            item("silk-tabriz-3", "Silk Tabriz", "Persian", "Medium", "Silk", 32000),
        ],
        gallery_colors: vec![
            GalleryColorRow {
                item_id: "persian-red-201".to_string(),
                color: "Red".to_string(),
            },
            GalleryColorRow {
                item_id: "kilim-blue-7".to_string(),
                color: "Blue".to_string(),
            },
        ],
        gallery_badges: vec![GalleryBadgeRow {
            item_id: "silk-tabriz-3".to_string(),
            badge: "Bestseller".to_string(),
        }],
        services: vec![ServiceRow {
            id: "washing".to_string(),
            title: "Rug washing".to_string(),
            description: "Hand wash.".to_string(),
            from_price_zar: Some(Decimal::new(450, 0)),
            sort_order: 1,
        }],
        service_bullets: vec![ServiceBulletRow {
            service_id: "washing".to_string(),
            bullet: "Dust removal".to_string(),
        }],
        blog_posts: vec![BlogPostRow {
            id: "rug-care".to_string(),
            title: "Rug care".to_string(),
            slug: "rug-care".to_string(),
            excerpt: None,
            content: "Vacuum both sides.".to_string(),
            published_at: None,
        }],
        blog_tags: vec![BlogTagRow {
            id: 1,
            name: "care".to_string(),
        }],
        blog_post_tags: vec![PostTagRow {
            post_id: "rug-care".to_string(),
            tag_id: 1,
        }],
        ..Default::default()
    }
}
