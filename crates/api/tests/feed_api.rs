//! HTTP-level tests for sitemaps, RSS, the merchant feed and text files.

mod common;

use axum::http::{header, StatusCode};
use common::{body_text, get, login_token, post_json_auth};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sitemap_index_lists_child_sitemaps(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/sitemap.xml").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/xml; charset=utf-8"
    );
    assert_eq!(
        response.headers()[header::CACHE_CONTROL],
        "public, max-age=3600"
    );
    let body = body_text(response).await;
    assert!(body.contains("<sitemapindex"));
    assert!(body.contains("https://transfer.test/sitemaps/blog.xml"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_sitemap_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/sitemaps/nope.xml").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blog_sitemap_and_rss_only_list_published(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = login_token(app.clone()).await;

    for (slug, published) in [("open-post", true), ("draft-post", false)] {
        let response = post_json_auth(
            app.clone(),
            "/api/v1/blog",
            json!({
                "title": "A post title",
                "slug": slug,
                "content": "Some text & more",
                "isPublished": published,
            }),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(app.clone(), "/sitemaps/blog.xml").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("https://transfer.test/blog/open-post"));
    assert!(!body.contains("draft-post"));

    let response = get(app, "/rss.xml").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/rss+xml; charset=utf-8"
    );
    let body = body_text(response).await;
    assert!(body.contains("open-post"));
    assert!(!body.contains("draft-post"));
    assert!(body.contains("&amp; more"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_merchant_feed_lists_active_routes(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = login_token(app.clone()).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/routes",
        json!({
            "originCity": "Sochi",
            "destinationCity": "Adler",
            "distance": 30,
            "estimatedTime": "40 min",
            "priceEconomy": 1500,
            "priceComfort": 2000,
            "priceBusiness": 3000,
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(app, "/merchant-feed.xml").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Sochi"));
    assert!(body.contains("RUB"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_robots_and_indexnow(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/robots.txt").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Sitemap: https://transfer.test/sitemap.xml"));

    let response = get(app, "/indexnow.txt").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await.trim(), "test-indexnow-key");
}
