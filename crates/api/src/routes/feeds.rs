use axum::routing::get;
use axum::Router;

use crate::handlers::feed;
use crate::state::AppState;

/// Crawler-facing documents, mounted at the root next to `/health`.
///
/// ```text
/// GET /sitemap.xml          -> sitemap_index
/// GET /sitemaps/{file}      -> sitemap (static.xml, blog.xml, ...)
/// GET /rss.xml              -> rss
/// GET /merchant-feed.xml    -> merchant_feed
/// GET /robots.txt           -> robots
/// GET /indexnow.txt         -> indexnow_key
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sitemap.xml", get(feed::sitemap_index))
        .route("/sitemaps/{file}", get(feed::sitemap))
        .route("/rss.xml", get(feed::rss))
        .route("/merchant-feed.xml", get(feed::merchant_feed))
        .route("/robots.txt", get(feed::robots))
        .route("/indexnow.txt", get(feed::indexnow_key))
}
