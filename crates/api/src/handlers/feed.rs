//! Public XML and text feeds: sitemaps, RSS, the Merchant product feed,
//! robots.txt and the IndexNow key file.
//!
//! Every document is built in memory and only sent once complete. A failed
//! query yields a JSON error response, never a truncated document.

use axum::extract::{Path, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use transfer_core::feed::{
    absolute_url, plain_excerpt, render_merchant_feed, render_rss, render_sitemap_index,
    render_urlset, static_page_urls, MerchantProduct, RssChannel, RssItem, SitemapKind,
    SitemapRef, SitemapUrl, FEED_CACHE_CONTROL, RSS_ITEM_LIMIT,
};
use transfer_core::types::Timestamp;
use transfer_db::models::feed::SitemapEntry;
use transfer_db::models::route::Route;
use transfer_db::repositories::{BlogPostRepo, GalleryRepo, RouteRepo, SiteSettingsRepo, TransferConfigRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";
const RSS_CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Characters of post body used as an RSS description when the excerpt is
/// blank.
const RSS_DESCRIPTION_CHARS: usize = 300;

fn cached(content_type: &'static str, body: String) -> Response {
    (
        [(CONTENT_TYPE, content_type), (CACHE_CONTROL, FEED_CACHE_CONTROL)],
        body,
    )
        .into_response()
}

fn blog_path(slug: &str) -> String {
    format!("/blog/{slug}")
}

fn gallery_path(slug: &str) -> String {
    format!("/gallery/{slug}")
}

fn route_path(id: i64) -> String {
    format!("/routes/{id}")
}

fn latest<'a>(stamps: impl Iterator<Item = &'a Timestamp>) -> Option<Timestamp> {
    stamps.max().copied()
}

/// GET /sitemap.xml
pub async fn sitemap_index(State(state): State<AppState>) -> AppResult<Response> {
    let base = &state.config.base_url;
    let blog = BlogPostRepo::sitemap_entries(&state.pool).await?;
    let galleries = GalleryRepo::sitemap_entries(&state.pool).await?;
    let routes = RouteRepo::list_active(&state.pool).await?;

    let refs: Vec<SitemapRef> = SitemapKind::ALL
        .into_iter()
        .map(|kind| SitemapRef {
            loc: absolute_url(base, &kind.path()),
            lastmod: match kind {
                SitemapKind::Pages => None,
                SitemapKind::Blog => latest(blog.iter().map(|e| &e.updated_at)),
                SitemapKind::Gallery => latest(galleries.iter().map(|e| &e.updated_at)),
                SitemapKind::Routes => latest(routes.iter().map(|r| &r.updated_at)),
            },
        })
        .collect();

    Ok(cached(XML_CONTENT_TYPE, render_sitemap_index(&refs)))
}

/// GET /sitemaps/{file}
///
/// `file` is `pages.xml`, `blog.xml`, `gallery.xml` or `routes.xml`.
pub async fn sitemap(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> AppResult<Response> {
    let kind = SitemapKind::from_file_name(&file)
        .ok_or_else(|| AppError::NotFound(format!("sitemap '{file}' not found")))?;
    let base = &state.config.base_url;

    let urls = match kind {
        SitemapKind::Pages => static_page_urls(base),
        SitemapKind::Blog => entry_urls(
            base,
            &BlogPostRepo::sitemap_entries(&state.pool).await?,
            blog_path,
            0.7,
        ),
        SitemapKind::Gallery => entry_urls(
            base,
            &GalleryRepo::sitemap_entries(&state.pool).await?,
            gallery_path,
            0.6,
        ),
        SitemapKind::Routes => route_urls(base, &RouteRepo::list_active(&state.pool).await?),
    };

    Ok(cached(XML_CONTENT_TYPE, render_urlset(&urls)))
}

fn entry_urls(
    base: &str,
    entries: &[SitemapEntry],
    path: fn(&str) -> String,
    priority: f32,
) -> Vec<SitemapUrl> {
    entries
        .iter()
        .map(|e| {
            SitemapUrl::new(absolute_url(base, &path(&e.slug)))
                .lastmod(e.updated_at)
                .changefreq("weekly")
                .priority(priority)
        })
        .collect()
}

fn route_urls(base: &str, routes: &[Route]) -> Vec<SitemapUrl> {
    routes
        .iter()
        .map(|r| {
            SitemapUrl::new(absolute_url(base, &route_path(r.id)))
                .lastmod(r.updated_at)
                .changefreq("monthly")
                .priority(0.8)
        })
        .collect()
}

/// GET /rss.xml
///
/// The latest published blog posts.
pub async fn rss(State(state): State<AppState>) -> AppResult<Response> {
    let base = &state.config.base_url;
    let site = SiteSettingsRepo::get_or_create_default(&state.pool).await?;
    let posts = BlogPostRepo::list_recent_published(&state.pool, RSS_ITEM_LIMIT).await?;

    let channel = RssChannel {
        title: site.site_name.clone(),
        link: absolute_url(base, "/blog"),
        description: site.meta_description.clone(),
        language: "ru".to_string(),
        self_link: absolute_url(base, "/rss.xml"),
    };

    let items: Vec<RssItem> = posts
        .iter()
        .map(|post| RssItem {
            title: post.title.clone(),
            link: absolute_url(base, &blog_path(&post.slug)),
            description: if post.excerpt.trim().is_empty() {
                plain_excerpt(&post.content, RSS_DESCRIPTION_CHARS)
            } else {
                post.excerpt.clone()
            },
            pub_date: post.published_at.unwrap_or(post.created_at),
            image_url: post.image_url.as_deref().map(|url| absolute_url(base, url)),
        })
        .collect();

    Ok(cached(RSS_CONTENT_TYPE, render_rss(&channel, &items)))
}

/// GET /merchant-feed.xml
///
/// Active routes as products, priced at their economy fare in the
/// configured currency.
pub async fn merchant_feed(State(state): State<AppState>) -> AppResult<Response> {
    let base = &state.config.base_url;
    let site = SiteSettingsRepo::get_or_create_default(&state.pool).await?;
    let config = TransferConfigRepo::get_or_create_default(&state.pool).await?;
    let routes = RouteRepo::list_active(&state.pool).await?;

    let channel = RssChannel {
        title: site.site_name.clone(),
        link: base.clone(),
        description: site.meta_description.clone(),
        language: "ru".to_string(),
        self_link: absolute_url(base, "/merchant-feed.xml"),
    };

    let products: Vec<MerchantProduct> = routes
        .iter()
        .map(|route| MerchantProduct {
            id: format!("route-{}", route.id),
            title: format!("Transfer {} - {}", route.origin_city, route.destination_city),
            description: route.description.clone().unwrap_or_else(|| {
                format!(
                    "{} - {}, {} km, {}",
                    route.origin_city, route.destination_city, route.distance, route.estimated_time
                )
            }),
            link: absolute_url(base, &route_path(route.id)),
            image_link: route.image_url.as_deref().map(|url| absolute_url(base, url)),
            price: route.price_economy,
            currency: config.currency.clone(),
            in_stock: route.is_active,
            brand: site.site_name.clone(),
        })
        .collect();

    Ok(cached(XML_CONTENT_TYPE, render_merchant_feed(&channel, &products)))
}

/// GET /robots.txt
pub async fn robots(State(state): State<AppState>) -> Response {
    cached(TEXT_CONTENT_TYPE, robots_txt(&state.config.base_url))
}

fn robots_txt(base: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\nDisallow: /admin\nDisallow: /api/\n\nSitemap: {}\n",
        absolute_url(base, "/sitemap.xml")
    )
}

/// GET /indexnow.txt
///
/// The IndexNow verification key, when one is configured.
pub async fn indexnow_key(State(state): State<AppState>) -> AppResult<Response> {
    let key = state
        .config
        .indexnow_key
        .clone()
        .ok_or_else(|| AppError::NotFound("IndexNow key is not configured".into()))?;
    Ok(cached(TEXT_CONTENT_TYPE, key))
}
