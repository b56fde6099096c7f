//! Route definitions for the public site.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::SiteState;

/// Build the site router.
pub fn build_router(state: SiteState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/project/{slug}", get(handlers::project))
        .route("/status", get(handlers::status))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
