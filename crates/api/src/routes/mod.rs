pub mod auth;
pub mod blog;
pub mod feeds;
pub mod galleries;
pub mod health;
pub mod leads;
pub mod reviews;
pub mod settings;
pub mod transfer_routes;
pub mod upload;
pub mod vehicles;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                          login (public)
/// /auth/session                        current session
/// /auth/logout                         logout
///
/// /blog                                list, create
/// /blog/slug/{slug}                    public read by slug
/// /blog/{id}                           get, update, delete
/// /blog/{id}/publish|unpublish         toggle visibility (PATCH)
///
/// /galleries                           list, create
/// /galleries/slug/{slug}               public read by slug
/// /galleries/{id}                      get (with photos), update, delete
/// /galleries/{id}/publish|unpublish    toggle visibility (PATCH)
/// /galleries/{id}/photos               list, add
/// /galleries/{id}/photos/batch         add many (POST)
/// /galleries/{id}/photos/reorder       rewrite order (PUT)
/// /galleries/photos/{photo_id}         update, delete
///
/// /reviews                             list, submit
/// /reviews/stats                       published count and mean rating
/// /reviews/approve?id=, /reject?id=    moderation (PATCH)
/// /reviews/{id}                        get, update, delete
/// /reviews/{id}/approve|reject         moderation by path (PATCH)
///
/// /routes                              list, create
/// /routes/{id}                         get, update, delete
///
/// /vehicles                            list, create
/// /vehicles/{id}                       get, update, delete
///
/// /applications                        submit (public), list
/// /applications/{id}                   get, delete
/// /applications/{id}/status            set status (PATCH)
///
/// /transfers                           submit (public), list
/// /transfers/{id}                      get, delete
/// /transfers/{id}/status               set status (PATCH)
///
/// /settings/site|home|transfer|benefits    get (public), update
///
/// /upload                              multipart image upload
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/blog", blog::router())
        .nest("/galleries", galleries::router())
        .nest("/reviews", reviews::router())
        .nest("/routes", transfer_routes::router())
        .nest("/vehicles", vehicles::router())
        .nest("/applications", leads::applications_router())
        .nest("/transfers", leads::transfers_router())
        .nest("/settings", settings::router())
        .nest("/upload", upload::router())
}
