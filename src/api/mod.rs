pub mod extract;
pub mod handlers;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};
use std::sync::Arc;

use crate::{
    config::Settings,
    service::ServiceContext,
};
use state::AppState;

pub fn create_app(
    service_context: Arc<ServiceContext>,
    settings: Arc<Settings>,
) -> Router {
    let app_state = AppState::new(service_context, settings);

    Router::new()
        // Root, health and diagnostic endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))
        .route("/test", get(handlers::root::test_database))

        // Content API
        .nest("/api", api_routes())

        // Add state to the router
        .with_state(app_state)

        // Middleware
        .layer(CompressionLayer::new())
        // Mirrors origin, method and headers and allows credentials,
        // which a literal `*` cannot be combined with.
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/announcements",
            get(handlers::announcements::list).post(handlers::announcements::create),
        )
        .route(
            "/events",
            get(handlers::events::list).post(handlers::events::create),
        )
        .route("/contact", post(handlers::contact::submit))
}
