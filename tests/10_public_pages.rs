mod common;

use anyhow::Result;
use axum::{body::Body, http::{header, Request, StatusCode}};

use common::TestApp;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let app = TestApp::new();
    let (status, body) = app.get("/health").await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn home_page_carries_layout_and_featured_items() -> Result<()> {
    let app = TestApp::new();
    let (status, body) = app.get("/").await?;

    assert_eq!(status, StatusCode::OK, "unexpected body: {}", body);
    let layout = &body["data"]["layout"];
    assert_eq!(layout["org"]["brandName"], "IVA");
    assert_eq!(layout["theme"]["brand"], "#ED1944");
    assert_eq!(layout["nav"][0]["href"], "/gallery");

    let page = &body["data"]["page"];
    assert_eq!(page["hero"]["title"], "Handmade rugs in Klerksdorp");
    assert_eq!(page["faq"][0]["q"], "Do you deliver?");
    let featured: Vec<String> = page["featuredGallery"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .iter()
        .filter_map(|item| item["title"].as_str().map(str::to_string))
        .collect();
    assert_eq!(featured, vec!["Blue Kilim", "Persian Red", "Silk Tabriz"]);
    Ok(())
}

#[tokio::test]
async fn gallery_applies_query_filters() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app.get("/gallery?material=Wool&sort=price-desc").await?;
    assert_eq!(status, StatusCode::OK);
    let page = &body["data"]["page"];
    assert_eq!(page["total"], 2);
    assert_eq!(page["items"][0]["id"], "persian-red-201");
    assert_eq!(page["items"][0]["priceLabel"], "ZAR 18,500");
    assert_eq!(page["items"][0]["colors"][0], "Red");
    assert_eq!(page["query"]["sort"], "price-desc");
    assert_eq!(page["searchDebounceMs"], 250);

    let (_, body) = app.get("/gallery?q=TABRIZ").await?;
    assert_eq!(body["data"]["page"]["total"], 1);

    let (_, body) = app.get("/gallery?sort=bestselling").await?;
    assert_eq!(body["data"]["page"]["items"][0]["id"], "silk-tabriz-3");

    let (_, body) = app.get("/gallery?sort=cheapest").await?;
    assert_eq!(body["data"]["page"]["query"]["sort"], "price-asc");
    assert_eq!(body["data"]["page"]["items"][0]["id"], "kilim-blue-7");
    Ok(())
}

#[tokio::test]
async fn gallery_searches_share_one_cache_entry() -> Result<()> {
    let app = TestApp::new();

    for i in 0..200 {
        let (status, body) = app.get(&format!("/gallery?q=nomatch{}", i)).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["page"]["items"].as_array().map(Vec::len), Some(0));
    }

    // layout shell plus the unfiltered item list
    assert_eq!(app.state.cache.len().await, 2);
    Ok(())
}

#[tokio::test]
async fn gallery_item_has_metadata_or_404() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app.get("/gallery/persian-red-201").await?;
    assert_eq!(status, StatusCode::OK);
    let page = &body["data"]["page"];
    assert_eq!(page["metadata"]["title"], "Persian Red | IVA gallery");
    assert_eq!(
        page["metadata"]["canonicalUrl"],
        "https://IVA.co.za/gallery/persian-red-201"
    );

    let (status, _) = app.get("/gallery/nope").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn services_and_blog_pages() -> Result<()> {
    let app = TestApp::new();

    let (_, body) = app.get("/services").await?;
    let service = &body["data"]["page"]["services"][0];
    assert_eq!(service["bullets"][0], "Dust removal");
    assert_eq!(service["fromPriceLabel"], "ZAR 450");

    let (_, body) = app.get("/blog").await?;
    let post = &body["data"]["page"]["posts"][0];
    assert_eq!(post["tags"][0], "care");
    assert_eq!(post["excerpt"], "");

    let (status, body) = app.get("/blog/rug-care").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["page"]["metadata"]["title"], "Rug care | IVA Blog");

    let (status, _) = app.get("/blog/missing").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn sitemap_and_robots() -> Result<()> {
    let app = TestApp::new();

    let response = app.send(Request::get("/sitemap.xml").body(Body::empty())?).await?;
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/xml");
    let xml = common::text_response(response).await?;
    assert!(xml.contains("<loc>https://IVA.co.za/services</loc>"));

    let response = app.send(Request::get("/robots.txt").body(Body::empty())?).await?;
    let txt = common::text_response(response).await?;
    assert!(txt.contains("Sitemap: https://IVA.co.za/sitemap.xml"));
    Ok(())
}
