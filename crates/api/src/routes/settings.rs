use axum::routing::get;
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Singleton settings routes mounted at `/settings`. Reads are public,
/// writes need an admin session.
///
/// ```text
/// GET|PUT /site       -> get_site_settings, update_site_settings
/// GET|PUT /home       -> get_home_settings, update_home_settings
/// GET|PUT /transfer   -> get_transfer_config, update_transfer_config
/// GET|PUT /benefits   -> get_benefit_stats, update_benefit_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/site",
            get(settings::get_site_settings).put(settings::update_site_settings),
        )
        .route(
            "/home",
            get(settings::get_home_settings).put(settings::update_home_settings),
        )
        .route(
            "/transfer",
            get(settings::get_transfer_config).put(settings::update_transfer_config),
        )
        .route(
            "/benefits",
            get(settings::get_benefit_stats).put(settings::update_benefit_stats),
        )
}
